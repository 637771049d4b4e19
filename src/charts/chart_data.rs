//! Chart inputs built from the year slice and the yearly aggregate.
//! No joins or aggregation happen here, only encoding of derived columns.

use super::scale;
use crate::data::{YearSlice, YearlyAggregate};
use std::collections::{BTreeSet, HashMap};

/// Life expectancy by country id for the choropleth.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethData {
    pub year: i32,
    pub values: HashMap<u32, f64>,
    pub range: Option<(f64, f64)>,
}

impl ChoroplethData {
    pub fn from_slice(slice: &YearSlice) -> Self {
        Self {
            year: slice.year,
            values: slice
                .rows()
                .iter()
                .map(|row| (row.record.country_id, row.record.life_expectancy))
                .collect(),
            range: slice.life_expectancy_range(),
        }
    }

    /// Fill colour for a country, `None` when it has no data this year.
    pub fn fill(&self, country_id: u32) -> Option<(u8, u8, u8)> {
        let value = *self.values.get(&country_id)?;
        let (min, max) = self.range?;
        Some(scale::viridis(value, min, max))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub country_name: String,
    pub region: String,
    pub male: f64,
    pub female: f64,
    pub gdp_per_capita: f64,
    pub radius: f64,
}

/// Male vs female life expectancy, sized by GDP per capita.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterData {
    pub year: i32,
    /// Sorted region labels; index drives the colour.
    pub regions: Vec<String>,
    pub points: Vec<ScatterPoint>,
}

impl ScatterData {
    /// Rows without GDP for the year cannot be sized and are left out.
    pub fn from_slice(slice: &YearSlice) -> Self {
        let points: Vec<ScatterPoint> = slice
            .rows()
            .iter()
            .filter_map(|row| {
                let gdp = row.gdp_per_capita?;
                let ind = &row.record.indicators;
                Some(ScatterPoint {
                    country_name: row.record.country_name.clone(),
                    region: row.record.region_label().to_string(),
                    male: ind.life_expectancy_male,
                    female: ind.life_expectancy_female,
                    gdp_per_capita: gdp,
                    radius: scale::gdp_radius(gdp),
                })
            })
            .collect();

        let regions: BTreeSet<String> = points.iter().map(|p| p.region.clone()).collect();
        Self {
            year: slice.year,
            regions: regions.into_iter().collect(),
            points,
        }
    }

    pub fn color(&self, point: &ScatterPoint) -> (u8, u8, u8) {
        scale::region_color(&self.regions, &point.region)
    }
}

/// Global averages per year for the dual-axis trend chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendData {
    pub gdp: Vec<(i32, f64)>,
    pub life_expectancy: Vec<(i32, f64)>,
}

impl TrendData {
    pub fn from_aggregate(aggregate: &YearlyAggregate) -> Self {
        Self {
            gdp: aggregate
                .years
                .iter()
                .filter_map(|y| Some((y.year, y.mean_gdp_per_capita?)))
                .collect(),
            life_expectancy: aggregate
                .years
                .iter()
                .filter_map(|y| Some((y.year, y.mean_life_expectancy?)))
                .collect(),
        }
    }
}
