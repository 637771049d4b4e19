//! Chart Viewer Widget
//! Right side scrollable panel with the three dashboard charts.

use crate::charts::{ChartPlotter, ChoroplethData, ScatterData, StaticChartRenderer, TrendData};
use crate::data::YearSlice;
use crate::geo::WorldMap;
use egui::{Color32, RichText, ScrollArea, TextureHandle, TextureOptions};

const CHART_SPACING: f32 = 15.0;
const MAP_SIZE: (u32, u32) = (800, 400);

/// Scrollable chart display area.
pub struct ChartViewer {
    pub choropleth: ChoroplethData,
    pub scatter: ScatterData,
    pub trend: TrendData,
    /// Rasterised choropleth and the year it was drawn for.
    map_texture: Option<(i32, TextureHandle)>,
    map_error: Option<String>,
}

impl ChartViewer {
    pub fn new(slice: &YearSlice, trend: TrendData) -> Self {
        Self {
            choropleth: ChoroplethData::from_slice(slice),
            scatter: ScatterData::from_slice(slice),
            trend,
            map_texture: None,
            map_error: None,
        }
    }

    /// Replace the per-year charts. The trend chart does not depend on the year.
    pub fn set_slice(&mut self, slice: &YearSlice) {
        self.choropleth = ChoroplethData::from_slice(slice);
        self.scatter = ScatterData::from_slice(slice);
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, world: Option<&WorldMap>) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::card(ui, "Geographic Heatmap", |ui| self.draw_map(ctx, ui, world));
                ui.add_space(CHART_SPACING);

                let title = format!("Life expectancy by sex ({})", self.scatter.year);
                let scatter = &self.scatter;
                Self::card(ui, &title, |ui| {
                    if scatter.points.is_empty() {
                        ui.label(
                            RichText::new("No countries with GDP data for this year")
                                .color(Color32::GRAY),
                        );
                    }
                    ChartPlotter::draw_gender_scatter(ui, scatter);
                });
                ui.add_space(CHART_SPACING);

                let trend = &self.trend;
                Self::card(ui, "Global averages 1960-2019", |ui| {
                    ChartPlotter::draw_trends(ui, trend);
                });
            });
    }

    fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(18.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
    }

    fn draw_map(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, world: Option<&WorldMap>) {
        let Some(world) = world.filter(|w| !w.is_empty()) else {
            ui.label(
                RichText::new("No world geometry loaded; set [data] world in atlas.toml")
                    .color(Color32::GRAY),
            );
            ChartPlotter::draw_viridis_legend(ui, self.choropleth.range);
            return;
        };

        let year = self.choropleth.year;
        let stale = self.map_texture.as_ref().map_or(true, |(y, _)| *y != year);
        if stale {
            let (w, h) = MAP_SIZE;
            match StaticChartRenderer::render_choropleth_rgb(world, &self.choropleth, w, h) {
                Ok(rgb) => {
                    let image = egui::ColorImage::from_rgb([w as usize, h as usize], &rgb);
                    let texture = ctx.load_texture("choropleth", image, TextureOptions::LINEAR);
                    self.map_texture = Some((year, texture));
                    self.map_error = None;
                }
                Err(e) => {
                    tracing::warn!(year, error = %e, "Choropleth render failed");
                    self.map_texture = None;
                    self.map_error = Some(e.to_string());
                }
            }
        }

        if let Some(error) = &self.map_error {
            ui.label(RichText::new(format!("Error: {}", error)).color(Color32::from_rgb(220, 53, 69)));
        }
        if let Some((_, texture)) = &self.map_texture {
            let size = egui::vec2(MAP_SIZE.0 as f32, MAP_SIZE.1 as f32);
            ui.add(egui::Image::new(egui::load::SizedTexture::new(texture.id(), size)));
        }
        ui.add_space(6.0);
        ChartPlotter::draw_viridis_legend(ui, self.choropleth.range);
    }
}
