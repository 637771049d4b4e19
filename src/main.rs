//! Gender Gap Atlas - Life Expectancy & GDP Dashboard
//!
//! Loads the three input tables once, then opens the interactive dashboard.

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use gender_gap_atlas::config::Config;
use gender_gap_atlas::data::Dataset;
use gender_gap_atlas::geo::WorldMap;
use gender_gap_atlas::gui::{AtlasApp, ControlPanel};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "gender-gap-atlas", version, about = "Life expectancy & GDP dashboard")]
struct Args {
    /// Config file (defaults to ./atlas.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the input files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Year selected at startup
    #[arg(short, long)]
    year: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }
    if let Some(year) = args.year {
        config.ui.default_year = year;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("gender_gap_atlas={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Gender Gap Atlas v{}", env!("CARGO_PKG_VERSION"));

    let paths = config.data.paths();
    let dataset = Dataset::load(&paths)
        .with_context(|| format!("Cannot start: failed to load data from {:?}", config.data.dir))?;

    let world_path = config.data.world_path();
    let world = match WorldMap::load(&world_path) {
        Ok(world) => Some(world),
        Err(e) => {
            tracing::warn!(path = %world_path.display(), error = %e, "Choropleth disabled");
            None
        }
    };

    let control_panel = ControlPanel::new(
        config.ui.start_year(),
        &[
            paths.demographics.as_path(),
            paths.crosswalk.as_path(),
            paths.gdp.as_path(),
        ],
        dataset.report,
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.width, config.ui.height])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Gender Gap Atlas"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Gender Gap Atlas",
        options,
        Box::new(move |cc| Ok(Box::new(AtlasApp::new(cc, dataset, world, control_panel)))),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {e}"))
}
