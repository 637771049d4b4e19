//! CSV Data Loader Module
//! Reads the input tables with Polars and pulls typed columns out of them.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to load CSV {path}: {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{path} is missing expected column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    ///
    /// A missing or unreadable file is reported with its path so that the
    /// caller can refuse to start. Column types are inferred from every row,
    /// so a late decimal cell never gets coerced to null.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::MissingFile(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(None)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::CsvError {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "Read CSV"
        );
        Ok(df)
    }

    /// Get list of column names from a DataFrame.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Fail with the first expected column the table does not have.
    pub fn require_columns(df: &DataFrame, path: &Path, columns: &[&str]) -> Result<(), LoaderError> {
        let present = Self::get_columns(df);
        match columns.iter().find(|c| !present.iter().any(|p| p == *c)) {
            Some(missing) => Err(LoaderError::MissingColumn {
                path: path.to_path_buf(),
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Column as strings, kept byte for byte; nulls and empty cells become `None`.
    pub fn string_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let casted = df.column(column)?.cast(&DataType::String)?;
        let ca = casted.as_materialized_series().str()?;
        Ok(ca
            .into_iter()
            .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
            .collect())
    }

    /// Column as floats; nulls, NaNs and unparsable cells become `None`.
    pub fn f64_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let casted = df.column(column)?.cast(&DataType::Float64)?;
        let ca = casted.as_materialized_series().f64()?;
        Ok(ca
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Column as integers. Float cells are accepted when they hold a whole number.
    pub fn i64_values(df: &DataFrame, column: &str) -> Result<Vec<Option<i64>>, LoaderError> {
        Ok(Self::f64_values(df, column)?
            .into_iter()
            .map(|v| v.filter(|x| x.fract() == 0.0).map(|x| x as i64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = DataLoader::read_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(_)));
    }

    #[test]
    fn test_require_columns() {
        let file = write_csv("alpha-3,country-code\nAFG,4\n");
        let df = DataLoader::read_csv(file.path()).unwrap();

        assert!(DataLoader::require_columns(&df, file.path(), &["alpha-3"]).is_ok());
        let err = DataLoader::require_columns(&df, file.path(), &["alpha-3", "region"]).unwrap_err();
        match err {
            LoaderError::MissingColumn { column, .. } => assert_eq!(column, "region"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_typed_columns_treat_blanks_as_missing() {
        let file = write_csv("code,value,id\nAFG,1.5,4\n,,\nALB,2.0,8.0\n");
        let df = DataLoader::read_csv(file.path()).unwrap();

        let codes = DataLoader::string_values(&df, "code").unwrap();
        assert_eq!(codes, vec![Some("AFG".to_string()), None, Some("ALB".to_string())]);

        let values = DataLoader::f64_values(&df, "value").unwrap();
        assert_eq!(values, vec![Some(1.5), None, Some(2.0)]);

        let ids = DataLoader::i64_values(&df, "id").unwrap();
        assert_eq!(ids, vec![Some(4), None, Some(8)]);
    }

    #[test]
    fn test_codes_are_not_trimmed() {
        let file = write_csv("code,value\nAFG,1\n\" ALB\",2\n");
        let df = DataLoader::read_csv(file.path()).unwrap();

        let codes = DataLoader::string_values(&df, "code").unwrap();
        assert_eq!(codes, vec![Some("AFG".to_string()), Some(" ALB".to_string())]);
    }

    #[test]
    fn test_late_decimal_keeps_float_type() {
        let mut contents = String::from("value\n");
        for _ in 0..10_050 {
            contents.push_str("70\n");
        }
        contents.push_str("70.5\n");
        let file = write_csv(&contents);
        let df = DataLoader::read_csv(file.path()).unwrap();

        let values = DataLoader::f64_values(&df, "value").unwrap();
        assert_eq!(values.len(), 10_051);
        assert_eq!(values[10_050], Some(70.5));
    }
}
