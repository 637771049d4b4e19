//! Gender Gap Atlas - life expectancy, gender gap and GDP dashboard
//!
//! Loads per-country demographic indicators and GDP per capita, joins them
//! through an alpha-3 country crosswalk and renders a choropleth, a male vs
//! female scatter and a global trend chart for a selectable year.

pub mod charts;
pub mod config;
pub mod data;
pub mod geo;
pub mod gui;
