//! Data module - CSV loading, crosswalk join and derivation

mod crosswalk;
mod dataset;
mod loader;
mod processor;
mod records;
pub mod schema;

pub use crosswalk::{CountryRef, Crosswalk};
pub use dataset::{DataPaths, Dataset, LoadReport, SliceError};
pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, DropStats};
pub use records::{
    DemographicRecord, GdpRow, GdpSeries, Indicators, SliceRow, YearAggregate, YearSlice,
    YearlyAggregate,
};
