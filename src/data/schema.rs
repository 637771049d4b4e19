//! Source column names and chart labels for the three input tables.

/// First and last year covered by the dashboard (inclusive).
pub const FIRST_YEAR: i32 = 1960;
pub const LAST_YEAR: i32 = 2019;

/// Year selected when the dashboard opens.
pub const DEFAULT_YEAR: i32 = 1990;

/// Every year of the dashboard range, oldest first.
pub fn years() -> impl Iterator<Item = i32> {
    FIRST_YEAR..=LAST_YEAR
}

pub fn is_valid_year(year: i32) -> bool {
    (FIRST_YEAR..=LAST_YEAR).contains(&year)
}

// Demographic indicators file
pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "Country Code";
pub const YEAR: &str = "Year";
pub const ADOLESCENT_FERTILITY: &str =
    "average_value_Adolescent fertility rate (births per 1,000 women ages 15-19)";
pub const FERTILITY_TOTAL: &str = "average_value_Fertility rate, total (births per woman)";
pub const LIFE_EXPECTANCY_FEMALE: &str = "average_value_Life expectancy at birth, female (years)";
pub const LIFE_EXPECTANCY_MALE: &str = "average_value_Life expectancy at birth, male (years)";
pub const MORTALITY_FEMALE: &str =
    "average_value_Mortality rate, adult, female (per 1,000 female adults)";
pub const MORTALITY_MALE: &str = "average_value_Mortality rate, adult, male (per 1,000 male adults)";
pub const SURVIVAL_65_FEMALE: &str = "average_value_Survival to age 65, female (% of cohort)";
pub const SURVIVAL_65_MALE: &str = "average_value_Survival to age 65, male (% of cohort)";

/// The eight numeric indicators, in record field order.
pub const INDICATOR_COLUMNS: [&str; 8] = [
    ADOLESCENT_FERTILITY,
    FERTILITY_TOTAL,
    LIFE_EXPECTANCY_FEMALE,
    LIFE_EXPECTANCY_MALE,
    MORTALITY_FEMALE,
    MORTALITY_MALE,
    SURVIVAL_65_FEMALE,
    SURVIVAL_65_MALE,
];

/// All eleven columns a demographic row must have filled in.
pub const DEMOGRAPHIC_COLUMNS: [&str; 11] = [
    COUNTRY_NAME,
    COUNTRY_CODE,
    YEAR,
    ADOLESCENT_FERTILITY,
    FERTILITY_TOTAL,
    LIFE_EXPECTANCY_FEMALE,
    LIFE_EXPECTANCY_MALE,
    MORTALITY_FEMALE,
    MORTALITY_MALE,
    SURVIVAL_65_FEMALE,
    SURVIVAL_65_MALE,
];

// Crosswalk file
pub const ALPHA3: &str = "alpha-3";
pub const NUMERIC_CODE: &str = "country-code";
pub const REGION: &str = "region";

pub const CROSSWALK_COLUMNS: [&str; 3] = [ALPHA3, NUMERIC_CODE, REGION];

// GDP file: `Country Code` plus one column per year label ("1960", ...)
pub const GDP_COLUMNS: [&str; 1] = [COUNTRY_CODE];

/// Display labels used on chart axes and legends.
pub mod labels {
    pub const LIFE_EXPECTANCY: &str = "Life expectancy at birth";
    pub const LIFE_EXPECTANCY_FEMALE: &str = "Life expectancy at birth (female)";
    pub const LIFE_EXPECTANCY_MALE: &str = "Life expectancy at birth (male)";
    pub const AVG_GDP_PER_CAPITA: &str = "Avg GDP Per Capita";
    pub const AVG_LIFE_EXPECTANCY: &str = "Avg Life expectancy at birth";
    pub const UNKNOWN_REGION: &str = "Unknown";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range() {
        assert_eq!(years().count(), 60);
        assert!(is_valid_year(FIRST_YEAR));
        assert!(is_valid_year(LAST_YEAR));
        assert!(is_valid_year(DEFAULT_YEAR));
        assert!(!is_valid_year(1959));
        assert!(!is_valid_year(2020));
    }
}
