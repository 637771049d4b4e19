//! Static Chart Renderer
//! Draws the three dashboard charts with plotters.
//!
//! The choropleth is always rasterised here (egui cannot fill concave country
//! outlines) and handed to the viewer as an RGB buffer. All three charts can
//! also be written out as PNG files.

use super::chart_data::{ChoroplethData, ScatterData, TrendData};
use super::scale;
use crate::data::schema::{self, labels};
use crate::geo::WorldMap;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("No world geometry loaded")]
    NoGeometry,
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Exported image size
pub const EXPORT_SIZE: (u32, u32) = (1600, 800);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Rasterise the choropleth into a packed RGB buffer of `width * height * 3` bytes.
    pub fn render_choropleth_rgb(
        world: &WorldMap,
        data: &ChoroplethData,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw_choropleth(&root, world, data)?;
            root.present().map_err(draw_err)?;
        }
        Ok(buffer)
    }

    /// Write every chart as a PNG into `dir`. The choropleth is skipped when
    /// no geometry is available. Returns the written paths.
    pub fn export_png(
        dir: &Path,
        world: Option<&WorldMap>,
        choropleth: &ChoroplethData,
        scatter: &ScatterData,
        trend: &TrendData,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let (width, height) = EXPORT_SIZE;
        let mut written = Vec::new();

        if let Some(world) = world.filter(|w| !w.is_empty()) {
            let path = dir.join(format!("choropleth_{}.png", choropleth.year));
            {
                let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
                Self::draw_choropleth(&root, world, choropleth)?;
                root.present().map_err(draw_err)?;
            }
            written.push(path);
        }

        let path = dir.join(format!("gender_scatter_{}.png", scatter.year));
        {
            let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
            Self::draw_scatter(&root, scatter)?;
            root.present().map_err(draw_err)?;
        }
        written.push(path);

        let path = dir.join("global_trends.png");
        {
            let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
            Self::draw_trends(&root, trend)?;
            root.present().map_err(draw_err)?;
        }
        written.push(path);

        tracing::info!(dir = %dir.display(), files = written.len(), "Exported charts");
        Ok(written)
    }

    /// Equirectangular world map: gray base layer, viridis fill where data exists.
    fn draw_choropleth<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        world: &WorldMap,
        data: &ChoroplethData,
    ) -> Result<(), RenderError> {
        if world.is_empty() {
            return Err(RenderError::NoGeometry);
        }
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(root)
            .margin(4)
            .build_cartesian_2d(-180f64..180f64, -90f64..90f64)
            .map_err(draw_err)?;

        for shape in &world.shapes {
            let fill = rgb(data.fill(shape.id).unwrap_or(scale::NO_DATA_RGB));
            for ring in shape.rings.iter().filter(|r| r.len() >= 3) {
                chart
                    .draw_series(std::iter::once(Polygon::new(ring.clone(), fill.filled())))
                    .map_err(draw_err)?;
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        ring.clone(),
                        BLACK.stroke_width(1),
                    )))
                    .map_err(draw_err)?;
            }
        }
        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &ScatterData,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;
        let (lo, hi) = scale::LIFE_DOMAIN;

        let mut chart = ChartBuilder::on(root)
            .caption(
                format!("Life expectancy by sex, {}", data.year),
                ("sans-serif", 24),
            )
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(lo..hi, lo..hi)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(labels::LIFE_EXPECTANCY_MALE)
            .y_desc(labels::LIFE_EXPECTANCY_FEMALE)
            .draw()
            .map_err(draw_err)?;

        for region in &data.regions {
            let color = rgb(scale::region_color(&data.regions, region));
            chart
                .draw_series(
                    data.points
                        .iter()
                        .filter(|p| &p.region == region)
                        .map(|p| {
                            Circle::new(
                                (p.male, p.female),
                                p.radius.round() as u32,
                                color.mix(0.7).filled(),
                            )
                        }),
                )
                .map_err(draw_err)?
                .label(region.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        chart
            .draw_series(LineSeries::new(vec![(lo, lo), (hi, hi)], RED.stroke_width(2)))
            .map_err(draw_err)?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
        Ok(())
    }

    /// GDP bars on a log left axis, life expectancy line on the right axis.
    fn draw_trends<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &TrendData,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;
        let (gdp_lo, gdp_hi) = scale::GDP_DOMAIN;
        let (life_lo, life_hi) = scale::TREND_LIFE_DOMAIN;
        let years = schema::FIRST_YEAR..(schema::LAST_YEAR + 1);
        let bar_color = rgb(scale::GDP_BAR_RGB);
        let line_color = rgb(scale::LIFE_LINE_RGB);

        let mut chart = ChartBuilder::on(root)
            .caption("Global averages", ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .right_y_label_area_size(60)
            .build_cartesian_2d(years.clone(), (gdp_lo..gdp_hi).log_scale())
            .map_err(draw_err)?
            .set_secondary_coord(years, life_lo..life_hi);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Year")
            .y_desc(labels::AVG_GDP_PER_CAPITA)
            .draw()
            .map_err(draw_err)?;

        chart
            .configure_secondary_axes()
            .y_desc(labels::AVG_LIFE_EXPECTANCY)
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(data.gdp.iter().map(|&(year, gdp)| {
                Rectangle::new(
                    [(year, gdp_lo), (year + 1, gdp.clamp(gdp_lo, gdp_hi))],
                    bar_color.filled(),
                )
            }))
            .map_err(draw_err)?;

        chart
            .draw_secondary_series(LineSeries::new(
                data.life_expectancy.iter().copied(),
                line_color.stroke_width(3),
            ))
            .map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ScatterPoint;
    use crate::geo::CountryShape;
    use std::collections::HashMap;

    fn world() -> WorldMap {
        WorldMap {
            shapes: vec![
                CountryShape {
                    id: 4,
                    rings: vec![vec![(-90.0, -45.0), (0.0, -45.0), (0.0, 45.0), (-90.0, -45.0)]],
                },
                CountryShape {
                    id: 8,
                    rings: vec![vec![(90.0, 45.0), (170.0, 45.0), (170.0, 80.0), (90.0, 45.0)]],
                },
            ],
        }
    }

    #[test]
    fn test_choropleth_buffer_size() {
        let data = ChoroplethData {
            year: 1990,
            values: HashMap::from([(4, 60.0)]),
            range: Some((60.0, 60.0)),
        };
        let buffer = StaticChartRenderer::render_choropleth_rgb(&world(), &data, 120, 60).unwrap();
        assert_eq!(buffer.len(), 120 * 60 * 3);
        // background stays white in the corner
        assert_eq!(&buffer[0..3], &[255, 255, 255]);
    }

    #[test]
    fn test_choropleth_needs_geometry() {
        let data = ChoroplethData {
            year: 1990,
            values: HashMap::new(),
            range: None,
        };
        let err = StaticChartRenderer::render_choropleth_rgb(&WorldMap::default(), &data, 10, 10)
            .unwrap_err();
        assert!(matches!(err, RenderError::NoGeometry));
    }

    fn export_inputs() -> (ChoroplethData, ScatterData, TrendData) {
        let choropleth = ChoroplethData {
            year: 1990,
            values: HashMap::from([(4, 50.0), (8, 72.0)]),
            range: Some((50.0, 72.0)),
        };
        let scatter = ScatterData {
            year: 1990,
            regions: vec!["Asia".to_string()],
            points: vec![ScatterPoint {
                country_name: "Afghanistan".to_string(),
                region: "Asia".to_string(),
                male: 49.0,
                female: 51.0,
                gdp_per_capita: 300.5,
                radius: scale::gdp_radius(300.5),
            }],
        };
        let trend = TrendData {
            gdp: vec![(1990, 300.5), (1991, 310.0)],
            life_expectancy: vec![(1990, 50.0), (1991, 51.0)],
        };
        (choropleth, scatter, trend)
    }

    #[test]
    fn test_export_png_writes_all_charts() {
        let dir = tempfile::tempdir().unwrap();
        let (choropleth, scatter, trend) = export_inputs();

        let written =
            StaticChartRenderer::export_png(dir.path(), Some(&world()), &choropleth, &scatter, &trend)
                .unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["choropleth_1990.png", "gender_scatter_1990.png", "global_trends.png"]
        );
        for path in &written {
            assert!(path.starts_with(dir.path()));
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_export_png_skips_map_without_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let (choropleth, scatter, trend) = export_inputs();

        let written =
            StaticChartRenderer::export_png(dir.path(), None, &choropleth, &scatter, &trend).unwrap();

        assert_eq!(written.len(), 2);
        assert!(!dir.path().join("choropleth_1990.png").exists());
        assert!(dir.path().join("gender_scatter_1990.png").is_file());
        assert!(dir.path().join("global_trends.png").is_file());
    }
}
