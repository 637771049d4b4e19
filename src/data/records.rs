//! Typed rows of the loaded tables and the per-year views built from them.

use super::crosswalk::CountryRef;
use super::schema;
use std::collections::{BTreeMap, HashMap};

/// The eight source indicators of one demographic row, all present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicators {
    pub adolescent_fertility_rate: f64,
    pub fertility_rate_total: f64,
    pub life_expectancy_female: f64,
    pub life_expectancy_male: f64,
    pub mortality_rate_female: f64,
    pub mortality_rate_male: f64,
    pub survival_to_65_female: f64,
    pub survival_to_65_male: f64,
}

impl Indicators {
    /// Build from values in [`schema::INDICATOR_COLUMNS`] order.
    /// Returns `None` if any value is missing.
    pub fn from_values(values: [Option<f64>; 8]) -> Option<Self> {
        let [a, b, c, d, e, f, g, h] = values;
        Some(Self {
            adolescent_fertility_rate: a?,
            fertility_rate_total: b?,
            life_expectancy_female: c?,
            life_expectancy_male: d?,
            mortality_rate_female: e?,
            mortality_rate_male: f?,
            survival_to_65_female: g?,
            survival_to_65_male: h?,
        })
    }
}

/// One complete (country, year) row with its derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicRecord {
    pub country_name: String,
    pub country_code: String,
    pub year: i32,
    pub indicators: Indicators,

    /// Female / male life expectancy.
    pub life_expectancy_ratio: f64,
    /// Female / male adult mortality.
    pub mortality_rate_ratio: f64,
    /// Female / male survival to 65.
    pub survival_to_65_ratio: f64,
    /// Mean of female and male life expectancy.
    pub life_expectancy: f64,

    pub country_id: u32,
    pub region: Option<String>,
}

impl DemographicRecord {
    /// Attach derived columns and crosswalk fields to a complete source row.
    pub fn derive(
        country_name: String,
        country_code: String,
        year: i32,
        indicators: Indicators,
        country: &CountryRef,
    ) -> Self {
        let ind = &indicators;
        Self {
            life_expectancy_ratio: ind.life_expectancy_female / ind.life_expectancy_male,
            mortality_rate_ratio: ind.mortality_rate_female / ind.mortality_rate_male,
            survival_to_65_ratio: ind.survival_to_65_female / ind.survival_to_65_male,
            life_expectancy: (ind.life_expectancy_female + ind.life_expectancy_male) / 2.0,
            country_name,
            country_code,
            year,
            indicators,
            country_id: country.id,
            region: country.region.clone(),
        }
    }

    pub fn region_label(&self) -> &str {
        self.region.as_deref().unwrap_or(schema::labels::UNKNOWN_REGION)
    }
}

/// One row of the wide GDP table, pivoted into a year lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpRow {
    pub country_code: Option<String>,
    pub country_id: Option<u32>,
    pub values: BTreeMap<i32, f64>,
}

/// GDP per capita by country and year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GdpSeries {
    rows: Vec<GdpRow>,
    by_id: HashMap<u32, usize>,
}

impl GdpSeries {
    pub fn new(rows: Vec<GdpRow>) -> Self {
        let mut by_id = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            if let Some(id) = row.country_id {
                by_id.entry(id).or_insert(idx);
            }
        }
        Self { rows, by_id }
    }

    pub fn rows(&self) -> &[GdpRow] {
        &self.rows
    }

    /// GDP per capita of `country_id` in `year`, if the table has one.
    pub fn value(&self, country_id: u32, year: i32) -> Option<f64> {
        let idx = *self.by_id.get(&country_id)?;
        self.rows[idx].values.get(&year).copied()
    }

    /// All values present for `year`, regardless of id resolution.
    pub fn values_for_year(&self, year: i32) -> impl Iterator<Item = f64> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.values.get(&year).copied())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A demographic row joined with GDP for the slice's year.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceRow {
    pub record: DemographicRecord,
    pub gdp_per_capita: Option<f64>,
}

/// Demographic rows of one year, keyed by country id.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSlice {
    pub year: i32,
    rows: Vec<SliceRow>,
    by_id: HashMap<u32, usize>,
}

impl YearSlice {
    pub fn new(year: i32, rows: Vec<SliceRow>) -> Self {
        let mut by_id = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_id.entry(row.record.country_id).or_insert(idx);
        }
        Self { year, rows, by_id }
    }

    pub fn rows(&self) -> &[SliceRow] {
        &self.rows
    }

    pub fn get(&self, country_id: u32) -> Option<&SliceRow> {
        self.by_id.get(&country_id).map(|&idx| &self.rows[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Min and max mean life expectancy in the slice.
    pub fn life_expectancy_range(&self) -> Option<(f64, f64)> {
        self.rows.iter().fold(None, |acc, row| {
            let v = row.record.life_expectancy;
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            })
        })
    }
}

/// Global means for one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearAggregate {
    pub year: i32,
    pub mean_gdp_per_capita: Option<f64>,
    pub mean_life_expectancy: Option<f64>,
}

/// Year-by-year global means over the whole dashboard range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyAggregate {
    pub years: Vec<YearAggregate>,
}

impl YearlyAggregate {
    pub fn get(&self, year: i32) -> Option<&YearAggregate> {
        self.years.iter().find(|y| y.year == year)
    }
}
