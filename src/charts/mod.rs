//! Charts module - Chart rendering

mod chart_data;
mod plotter;
mod renderer;
pub mod scale;

pub use chart_data::{ChoroplethData, ScatterData, ScatterPoint, TrendData};
pub use plotter::{ChartPlotter, CHART_HEIGHT};
pub use renderer::{RenderError, StaticChartRenderer, EXPORT_SIZE};
