//! Configuration System
//!
//! Loads settings from an optional TOML file, then applies environment
//! variable overrides.

use crate::data::schema;
use crate::data::DataPaths;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "atlas.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input file locations. File names are relative to `dir` unless absolute.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_demographics")]
    pub demographics: PathBuf,

    #[serde(default = "default_crosswalk")]
    pub crosswalk: PathBuf,

    #[serde(default = "default_gdp")]
    pub gdp: PathBuf,

    #[serde(default = "default_world")]
    pub world: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_demographics() -> PathBuf {
    PathBuf::from("gender.csv")
}

fn default_crosswalk() -> PathBuf {
    PathBuf::from("country_codes.csv")
}

fn default_gdp() -> PathBuf {
    PathBuf::from("gdp_per_capita.csv")
}

fn default_world() -> PathBuf {
    PathBuf::from("world.geojson")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            demographics: default_demographics(),
            crosswalk: default_crosswalk(),
            gdp: default_gdp(),
            world: default_world(),
        }
    }
}

impl DataConfig {
    pub fn paths(&self) -> DataPaths {
        DataPaths {
            demographics: self.dir.join(&self.demographics),
            crosswalk: self.dir.join(&self.crosswalk),
            gdp: self.dir.join(&self.gdp),
        }
    }

    pub fn world_path(&self) -> PathBuf {
        self.dir.join(&self.world)
    }
}

/// Window and initial selection
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_year")]
    pub default_year: i32,

    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_year() -> i32 {
    schema::DEFAULT_YEAR
}

fn default_width() -> f32 {
    1400.0
}

fn default_height() -> f32 {
    900.0
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_year: default_year(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl UiConfig {
    /// Configured start year, clamped into the slider range.
    pub fn start_year(&self) -> i32 {
        self.default_year.clamp(schema::FIRST_YEAR, schema::LAST_YEAR)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `path` if given, else `./atlas.toml` if present, else defaults.
    /// Environment overrides are applied in every case.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("ATLAS_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Ok(year) = std::env::var("ATLAS_DEFAULT_YEAR") {
            if let Ok(y) = year.parse() {
                self.ui.default_year = y;
            }
        }
        if let Ok(level) = std::env::var("ATLAS_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.default_year, 1990);
        assert_eq!(config.logging.level, "info");

        let paths = config.data.paths();
        assert_eq!(paths.demographics, Path::new("./gender.csv"));
        assert_eq!(paths.crosswalk, Path::new("./country_codes.csv"));
        assert_eq!(paths.gdp, Path::new("./gdp_per_capita.csv"));
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
[data]
dir = "/srv/atlas"
gdp = "gdp.csv"

[ui]
default_year = 2005
"#,
        )
        .unwrap();

        assert_eq!(config.data.paths().gdp, Path::new("/srv/atlas/gdp.csv"));
        assert_eq!(config.data.demographics, Path::new("gender.csv"));
        assert_eq!(config.ui.start_year(), 2005);
        assert_eq!(config.ui.width, 1400.0);
    }

    #[test]
    fn test_start_year_is_clamped() {
        let mut ui = UiConfig::default();
        ui.default_year = 1800;
        assert_eq!(ui.start_year(), 1960);
        ui.default_year = 2077;
        assert_eq!(ui.start_year(), 2019);
    }

    // Keep this the only test that sets ATLAS_* variables.
    #[test]
    fn test_env_overrides() {
        std::env::set_var("ATLAS_DATA_DIR", "/srv/atlas");
        std::env::set_var("ATLAS_DEFAULT_YEAR", "2005");
        std::env::set_var("ATLAS_LOG_LEVEL", "debug");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.data.dir, Path::new("/srv/atlas"));
        assert_eq!(config.data.paths().gdp, Path::new("/srv/atlas/gdp_per_capita.csv"));
        assert_eq!(config.ui.default_year, 2005);
        assert_eq!(config.logging.level, "debug");

        // a year that does not parse leaves the current value alone
        std::env::set_var("ATLAS_DEFAULT_YEAR", "soon");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.ui.default_year, schema::DEFAULT_YEAR);

        std::env::remove_var("ATLAS_DATA_DIR");
        std::env::remove_var("ATLAS_DEFAULT_YEAR");
        std::env::remove_var("ATLAS_LOG_LEVEL");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Config::load(Path::new("/no/such/atlas.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
