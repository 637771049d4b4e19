//! Data Processor Module
//! Joins the raw tables through the crosswalk, derives columns and pivots GDP.

use super::crosswalk::Crosswalk;
use super::loader::{DataLoader, LoaderError};
use super::records::{
    DemographicRecord, GdpRow, GdpSeries, Indicators, SliceRow, YearAggregate, YearSlice,
    YearlyAggregate,
};
use super::schema;
use polars::prelude::*;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Rows left out while preparing the demographic table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropStats {
    pub incomplete: usize,
    pub unknown_code: usize,
}

/// Handles the join and derivation steps.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep complete rows whose country code is in the crosswalk and derive
    /// ratio, mean and crosswalk columns for them.
    pub fn prepare_demographics(
        df: &DataFrame,
        crosswalk: &Crosswalk,
    ) -> Result<(Vec<DemographicRecord>, DropStats), LoaderError> {
        let names = DataLoader::string_values(df, schema::COUNTRY_NAME)?;
        let codes = DataLoader::string_values(df, schema::COUNTRY_CODE)?;
        let years = DataLoader::i64_values(df, schema::YEAR)?;
        let indicator_columns = schema::INDICATOR_COLUMNS
            .iter()
            .map(|c| DataLoader::f64_values(df, c))
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::new();
        let mut stats = DropStats::default();

        for i in 0..df.height() {
            let mut values = [None; 8];
            for (slot, column) in values.iter_mut().zip(&indicator_columns) {
                *slot = column[i];
            }

            let year = years[i].and_then(|y| i32::try_from(y).ok());
            let (Some(name), Some(code), Some(year), Some(indicators)) = (
                names[i].clone(),
                codes[i].clone(),
                year,
                Indicators::from_values(values),
            ) else {
                stats.incomplete += 1;
                continue;
            };

            let Some(country) = crosswalk.resolve(&code) else {
                stats.unknown_code += 1;
                continue;
            };

            records.push(DemographicRecord::derive(name, code, year, indicators, country));
        }

        tracing::info!(
            kept = records.len(),
            incomplete = stats.incomplete,
            unknown_code = stats.unknown_code,
            "Prepared demographic records"
        );
        Ok((records, stats))
    }

    /// Pivot the wide GDP table (one column per year label) into per-row year
    /// lookups and attach crosswalk ids. Year columns the file lacks stay absent.
    pub fn prepare_gdp(df: &DataFrame, crosswalk: &Crosswalk) -> Result<GdpSeries, LoaderError> {
        let codes = DataLoader::string_values(df, schema::COUNTRY_CODE)?;
        let columns = DataLoader::get_columns(df);

        let mut rows: Vec<GdpRow> = codes
            .into_iter()
            .map(|code| GdpRow {
                country_id: code.as_deref().and_then(|c| crosswalk.resolve(c)).map(|c| c.id),
                country_code: code,
                values: BTreeMap::new(),
            })
            .collect();

        let mut year_columns = 0usize;
        for year in schema::years() {
            let label = year.to_string();
            if !columns.contains(&label) {
                continue;
            }
            year_columns += 1;
            for (row, value) in rows.iter_mut().zip(DataLoader::f64_values(df, &label)?) {
                if let Some(v) = value {
                    row.values.insert(year, v);
                }
            }
        }

        let unresolved = rows.iter().filter(|r| r.country_id.is_none()).count();
        tracing::info!(
            rows = rows.len(),
            unresolved,
            year_columns,
            "Prepared GDP series"
        );
        Ok(GdpSeries::new(rows))
    }

    /// Global means per year over the full dashboard range.
    pub fn yearly_aggregate(records: &[DemographicRecord], gdp: &GdpSeries) -> YearlyAggregate {
        let years = schema::years()
            .map(|year| {
                let gdp_values: Vec<f64> = gdp.values_for_year(year).collect();
                let life_values: Vec<f64> = records
                    .iter()
                    .filter(|r| r.year == year)
                    .map(|r| r.life_expectancy)
                    .filter(|v| !v.is_nan())
                    .collect();

                YearAggregate {
                    year,
                    mean_gdp_per_capita: Self::mean(&gdp_values),
                    mean_life_expectancy: Self::mean(&life_values),
                }
            })
            .collect();

        YearlyAggregate { years }
    }

    /// Rows of `year` left-joined with GDP at that year.
    pub fn year_slice(records: &[DemographicRecord], gdp: &GdpSeries, year: i32) -> YearSlice {
        let rows = records
            .iter()
            .filter(|r| r.year == year)
            .map(|r| SliceRow {
                gdp_per_capita: gdp.value(r.country_id, year),
                record: r.clone(),
            })
            .collect();
        YearSlice::new(year, rows)
    }

    fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.mean())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crosswalk() -> Crosswalk {
        let df = df!(
            "alpha-3" => ["AFG", "ALB", "DZA"],
            "country-code" => [4i64, 8, 12],
            "region" => ["Asia", "Europe", "Africa"]
        )
        .unwrap();
        Crosswalk::from_dataframe(&df).unwrap()
    }

    fn demographics() -> DataFrame {
        df!(
            schema::COUNTRY_NAME => ["Afghanistan", "Albania", "Nowhere", "Algeria", "Afghanistan"],
            schema::COUNTRY_CODE => ["AFG", "ALB", "XYZ", "DZA", "AFG"],
            schema::YEAR => [1990i64, 1990, 1990, 1990, 1991],
            schema::ADOLESCENT_FERTILITY => [150.0, 20.0, 10.0, 30.0, 149.0],
            schema::FERTILITY_TOTAL => [7.5, 2.9, 1.0, 4.7, 7.4],
            schema::LIFE_EXPECTANCY_FEMALE => [Some(51.0), Some(75.0), Some(80.0), None, Some(52.0)],
            schema::LIFE_EXPECTANCY_MALE => [49.0, 69.0, 70.0, 65.0, 50.0],
            schema::MORTALITY_FEMALE => [300.0, 90.0, 50.0, 150.0, 290.0],
            schema::MORTALITY_MALE => [350.0, 150.0, 100.0, 180.0, 340.0],
            schema::SURVIVAL_65_FEMALE => [45.0, 82.0, 90.0, 70.0, 46.0],
            schema::SURVIVAL_65_MALE => [40.0, 72.0, 80.0, 65.0, 41.0]
        )
        .unwrap()
    }

    #[test]
    fn test_prepare_demographics_drops_unknown_and_incomplete() {
        let (records, stats) = DataProcessor::prepare_demographics(&demographics(), &crosswalk()).unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.country_code != "XYZ"));
        assert!(records.iter().all(|r| r.country_code != "DZA"));
        assert_eq!(stats.unknown_code, 1);
        assert_eq!(stats.incomplete, 1);

        let alb = records.iter().find(|r| r.country_code == "ALB").unwrap();
        assert_eq!(alb.country_id, 8);
        assert_eq!(alb.region.as_deref(), Some("Europe"));
        assert_eq!(alb.life_expectancy, 72.0);
    }

    #[test]
    fn test_prepare_gdp_pivots_available_years() {
        let df = df!(
            "Country Name" => ["Afghanistan", "World"],
            "Country Code" => ["AFG", "WLD"],
            "1990" => [Some(300.0), Some(4000.0)],
            "1991" => [None, Some(4100.0)]
        )
        .unwrap();

        let gdp = DataProcessor::prepare_gdp(&df, &crosswalk()).unwrap();

        assert_eq!(gdp.len(), 2);
        assert_eq!(gdp.rows()[1].country_id, None);
        assert_eq!(gdp.value(4, 1990), Some(300.0));
        assert_eq!(gdp.value(4, 1991), None);
        assert_eq!(gdp.value(4, 1965), None);
    }

    #[test]
    fn test_year_slice_left_join() {
        let (records, _) = DataProcessor::prepare_demographics(&demographics(), &crosswalk()).unwrap();
        let gdp_df = df!(
            "Country Code" => ["AFG"],
            "1990" => [300.0]
        )
        .unwrap();
        let gdp = DataProcessor::prepare_gdp(&gdp_df, &crosswalk()).unwrap();

        let slice = DataProcessor::year_slice(&records, &gdp, 1990);
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.get(4).unwrap().gdp_per_capita, Some(300.0));
        assert_eq!(slice.get(8).unwrap().gdp_per_capita, None);

        let later = DataProcessor::year_slice(&records, &gdp, 1991);
        assert_eq!(later.len(), 1);
        assert_eq!(later.get(4).unwrap().gdp_per_capita, None);
    }

    #[test]
    fn test_yearly_aggregate_means() {
        let (records, _) = DataProcessor::prepare_demographics(&demographics(), &crosswalk()).unwrap();
        let gdp_df = df!(
            "Country Code" => ["AFG", "WLD"],
            "1990" => [300.0, 500.0]
        )
        .unwrap();
        let gdp = DataProcessor::prepare_gdp(&gdp_df, &crosswalk()).unwrap();

        let aggregate = DataProcessor::yearly_aggregate(&records, &gdp);
        assert_eq!(aggregate.years.len(), 60);

        let y1990 = aggregate.get(1990).unwrap();
        assert_eq!(y1990.mean_gdp_per_capita, Some(400.0));
        assert_eq!(y1990.mean_life_expectancy, Some((50.0 + 72.0) / 2.0));

        let y1991 = aggregate.get(1991).unwrap();
        assert_eq!(y1991.mean_gdp_per_capita, None);
        assert_eq!(y1991.mean_life_expectancy, Some(51.0));

        assert_eq!(aggregate.get(1960).unwrap().mean_life_expectancy, None);
    }
}
