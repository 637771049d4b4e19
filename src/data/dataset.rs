//! The immutable tables the dashboard runs on, loaded once at startup.

use super::crosswalk::Crosswalk;
use super::loader::{DataLoader, LoaderError};
use super::processor::{DataProcessor, DropStats};
use super::records::{DemographicRecord, GdpSeries, YearSlice, YearlyAggregate};
use super::schema;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SliceError {
    #[error("Year {0} is outside {first}-{last}", first = schema::FIRST_YEAR, last = schema::LAST_YEAR)]
    YearOutOfRange(i32),
}

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub demographics: PathBuf,
    pub crosswalk: PathBuf,
    pub gdp: PathBuf,
}

/// Summary of what loading kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub crosswalk_entries: usize,
    pub demographic_records: usize,
    pub dropped: DropStats,
    pub gdp_rows: usize,
    pub gdp_unresolved: usize,
}

/// Demographic records, GDP series and yearly aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub crosswalk: Crosswalk,
    pub demographics: Vec<DemographicRecord>,
    pub gdp: GdpSeries,
    pub yearly: YearlyAggregate,
    pub report: LoadReport,
}

impl Dataset {
    /// Read and join the three tables. Any unreadable file or missing column is an error.
    pub fn load(paths: &DataPaths) -> Result<Self, LoaderError> {
        let crosswalk_df = DataLoader::read_csv(&paths.crosswalk)?;
        DataLoader::require_columns(&crosswalk_df, &paths.crosswalk, &schema::CROSSWALK_COLUMNS)?;

        let demographics_df = DataLoader::read_csv(&paths.demographics)?;
        DataLoader::require_columns(
            &demographics_df,
            &paths.demographics,
            &schema::DEMOGRAPHIC_COLUMNS,
        )?;

        let gdp_df = DataLoader::read_csv(&paths.gdp)?;
        DataLoader::require_columns(&gdp_df, &paths.gdp, &schema::GDP_COLUMNS)?;

        let crosswalk = Crosswalk::from_dataframe(&crosswalk_df)?;
        let (demographics, dropped) = DataProcessor::prepare_demographics(&demographics_df, &crosswalk)?;
        let gdp = DataProcessor::prepare_gdp(&gdp_df, &crosswalk)?;
        let yearly = DataProcessor::yearly_aggregate(&demographics, &gdp);

        let report = LoadReport {
            crosswalk_entries: crosswalk.len(),
            demographic_records: demographics.len(),
            dropped,
            gdp_rows: gdp.len(),
            gdp_unresolved: gdp.rows().iter().filter(|r| r.country_id.is_none()).count(),
        };
        tracing::info!(?report, "Dataset loaded");

        Ok(Self {
            crosswalk,
            demographics,
            gdp,
            yearly,
            report,
        })
    }

    /// Demographic rows of `year` with GDP per capita joined by country id.
    pub fn year_slice(&self, year: i32) -> Result<YearSlice, SliceError> {
        if !schema::is_valid_year(year) {
            return Err(SliceError::YearOutOfRange(year));
        }
        let slice = DataProcessor::year_slice(&self.demographics, &self.gdp, year);
        tracing::debug!(year, countries = slice.len(), "Built year slice");
        Ok(slice)
    }
}
