//! Country crosswalk: alpha-3 code to numeric country id and region.

use super::loader::{DataLoader, LoaderError};
use super::schema;
use polars::prelude::DataFrame;
use std::collections::HashMap;

/// What an alpha-3 code resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRef {
    pub id: u32,
    pub region: Option<String>,
}

/// Lookup table keyed by alpha-3 code. One entry per code, first row wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crosswalk {
    entries: HashMap<String, CountryRef>,
}

impl Crosswalk {
    /// Build the crosswalk from the `alpha-3` / `country-code` / `region` columns.
    ///
    /// Rows without a code or without a usable numeric id are skipped.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, LoaderError> {
        let codes = DataLoader::string_values(df, schema::ALPHA3)?;
        let ids = DataLoader::i64_values(df, schema::NUMERIC_CODE)?;
        let regions = DataLoader::string_values(df, schema::REGION)?;

        let rows = codes
            .into_iter()
            .zip(ids)
            .zip(regions)
            .map(|((code, id), region)| (code, id, region));
        Ok(Self::from_rows(rows))
    }

    fn from_rows(
        rows: impl IntoIterator<Item = (Option<String>, Option<i64>, Option<String>)>,
    ) -> Self {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for (code, id, region) in rows {
            let (Some(code), Some(id)) = (code, id.and_then(|v| u32::try_from(v).ok())) else {
                skipped += 1;
                continue;
            };
            entries.entry(code).or_insert(CountryRef { id, region });
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Crosswalk rows without code or numeric id");
        }
        Self { entries }
    }

    pub fn resolve(&self, alpha3: &str) -> Option<&CountryRef> {
        self.entries.get(alpha3)
    }

    pub fn contains(&self, alpha3: &str) -> bool {
        self.entries.contains_key(alpha3)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, id: i64, region: &str) -> (Option<String>, Option<i64>, Option<String>) {
        (Some(code.to_string()), Some(id), Some(region.to_string()))
    }

    #[test]
    fn test_first_occurrence_wins() {
        let crosswalk = Crosswalk::from_rows(vec![
            row("AFG", 4, "Asia"),
            row("ALB", 8, "Europe"),
            row("AFG", 999, "Elsewhere"),
        ]);

        assert_eq!(crosswalk.len(), 2);
        let afg = crosswalk.resolve("AFG").unwrap();
        assert_eq!(afg.id, 4);
        assert_eq!(afg.region.as_deref(), Some("Asia"));
    }

    #[test]
    fn test_incomplete_rows_are_skipped() {
        let crosswalk = Crosswalk::from_rows(vec![
            (None, Some(4), Some("Asia".to_string())),
            (Some("ATA".to_string()), None, None),
            (Some("BAD".to_string()), Some(-1), None),
            (Some("AUS".to_string()), Some(36), None),
        ]);

        assert_eq!(crosswalk.len(), 1);
        assert!(!crosswalk.contains("ATA"));
        assert!(!crosswalk.contains("BAD"));
        assert_eq!(crosswalk.resolve("AUS").unwrap().region, None);
    }
}
