//! Colour and size scales shared by the interactive and static charts.

/// Scatter axes: life expectancy domain for both sexes.
pub const LIFE_DOMAIN: (f64, f64) = (20.0, 90.0);

/// GDP per capita domain (log scale) for point sizes and the trend bars.
pub const GDP_DOMAIN: (f64, f64) = (100.0, 100_000.0);

/// Right axis of the trend chart.
pub const TREND_LIFE_DOMAIN: (f64, f64) = (40.0, 80.0);

/// Point radius range in pixels for the GDP size encoding.
pub const RADIUS_RANGE: (f64, f64) = (2.0, 14.0);

pub const GDP_BAR_RGB: (u8, u8, u8) = (0x52, 0x76, 0xA7);
pub const LIFE_LINE_RGB: (u8, u8, u8) = (0xF1, 0x87, 0x27);
pub const NO_DATA_RGB: (u8, u8, u8) = (211, 211, 211);

/// Viridis anchor colours at evenly spaced stops.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Region colours, assigned by sorted region order.
pub const REGION_PALETTE: [(u8, u8, u8); 10] = [
    (76, 120, 168),  // Blue
    (245, 133, 24),  // Orange
    (228, 87, 86),   // Red
    (114, 183, 178), // Teal
    (84, 162, 75),   // Green
    (238, 202, 59),  // Yellow
    (178, 121, 162), // Purple
    (255, 157, 166), // Pink
    (157, 117, 93),  // Brown
    (186, 176, 172), // Grey
];

/// Viridis colour for `value` within `[min, max]`, clamped at both ends.
pub fn viridis(value: f64, min: f64, max: f64) -> (u8, u8, u8) {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };

    let pos = t * (VIRIDIS.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = pos - lo as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[hi]);
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Position of `value` on a log10 scale over `domain`, clamped to 0..=1.
pub fn log_fraction(value: f64, domain: (f64, f64)) -> f64 {
    let (lo, hi) = (domain.0.log10(), domain.1.log10());
    ((value.max(f64::MIN_POSITIVE).log10() - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Point radius for a GDP per capita value.
pub fn gdp_radius(gdp_per_capita: f64) -> f64 {
    let t = log_fraction(gdp_per_capita, GDP_DOMAIN);
    RADIUS_RANGE.0 + t * (RADIUS_RANGE.1 - RADIUS_RANGE.0)
}

/// Maps GDP onto the life-expectancy axis of the trend chart so both series
/// share one plot with independent scales.
pub fn gdp_to_trend_axis(gdp_per_capita: f64) -> f64 {
    let t = log_fraction(gdp_per_capita, GDP_DOMAIN);
    TREND_LIFE_DOMAIN.0 + t * (TREND_LIFE_DOMAIN.1 - TREND_LIFE_DOMAIN.0)
}

/// Inverse of [`gdp_to_trend_axis`], used for the right-hand axis labels.
pub fn trend_axis_to_gdp(y: f64) -> f64 {
    let t = (y - TREND_LIFE_DOMAIN.0) / (TREND_LIFE_DOMAIN.1 - TREND_LIFE_DOMAIN.0);
    let (lo, hi) = (GDP_DOMAIN.0.log10(), GDP_DOMAIN.1.log10());
    10f64.powf(lo + t * (hi - lo))
}

/// Stable colour for each region, in sorted order.
pub fn region_color(regions: &[String], region: &str) -> (u8, u8, u8) {
    let idx = regions.iter().position(|r| r == region).unwrap_or(0);
    REGION_PALETTE[idx % REGION_PALETTE.len()]
}
