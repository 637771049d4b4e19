//! Chart Plotter Module
//! Interactive scatter and trend charts using egui_plot.

use super::chart_data::{ScatterData, TrendData};
use super::scale;
use crate::data::schema::{self, labels};
use egui::{Color32, RichText};
use egui_plot::{AxisHints, Bar, BarChart, HPlacement, Legend, Line, Plot, PlotPoints, Points};

pub const CHART_HEIGHT: f32 = 400.0;

pub fn color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Short GDP labels for axis ticks: 100, 1k, 10k, 100k.
pub fn format_gdp(value: f64) -> String {
    if value >= 1000.0 {
        let k = value / 1000.0;
        if k >= 10.0 {
            format!("{:.0}k", k)
        } else {
            format!("{:.1}k", k).replace(".0k", "k")
        }
    } else {
        format!("{:.0}", value)
    }
}

/// Creates the interactive dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Male vs female life expectancy, coloured by region, sized by GDP.
    pub fn draw_gender_scatter(ui: &mut egui::Ui, data: &ScatterData) {
        let (lo, hi) = scale::LIFE_DOMAIN;

        Plot::new(format!("gender_scatter_{}", data.year))
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(labels::LIFE_EXPECTANCY_MALE)
            .y_axis_label(labels::LIFE_EXPECTANCY_FEMALE)
            .include_x(lo)
            .include_x(hi)
            .include_y(lo)
            .include_y(hi)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for point in &data.points {
                    // same name per region so the legend groups them
                    plot_ui.points(
                        Points::new(vec![[point.male, point.female]])
                            .radius(point.radius as f32)
                            .color(color32(data.color(point)).gamma_multiply(0.8))
                            .name(&point.region),
                    );
                }

                plot_ui.line(
                    Line::new(PlotPoints::new(vec![[lo, lo], [hi, hi]]))
                        .color(Color32::RED)
                        .width(1.5),
                );
            });
    }

    /// Average GDP bars (log scale, left axis) and average life expectancy
    /// line (right axis) sharing one plot.
    pub fn draw_trends(ui: &mut egui::Ui, data: &TrendData) {
        let (life_lo, life_hi) = scale::TREND_LIFE_DOMAIN;
        let bar_color = color32(scale::GDP_BAR_RGB);
        let line_color = color32(scale::LIFE_LINE_RGB);

        let gdp_axis = AxisHints::new_y()
            .label(labels::AVG_GDP_PER_CAPITA)
            .formatter(move |mark, _range| {
                if (life_lo..=life_hi).contains(&mark.value) {
                    format_gdp(scale::trend_axis_to_gdp(mark.value))
                } else {
                    String::new()
                }
            });
        let life_axis = AxisHints::new_y()
            .label(labels::AVG_LIFE_EXPECTANCY)
            .placement(HPlacement::Right);

        let bars: Vec<Bar> = data
            .gdp
            .iter()
            .map(|&(year, gdp)| {
                Bar::new(year as f64, scale::gdp_to_trend_axis(gdp) - life_lo)
                    .base_offset(life_lo)
                    .width(0.8)
                    .fill(bar_color)
                    .name(format!("{}: {}", year, format_gdp(gdp)))
            })
            .collect();

        let life_points: PlotPoints = data
            .life_expectancy
            .iter()
            .map(|&(year, v)| [year as f64, v])
            .collect();

        Plot::new("global_trends")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .custom_y_axes(vec![gdp_axis, life_axis])
            .x_axis_label("Year")
            .include_x(schema::FIRST_YEAR as f64 - 1.0)
            .include_x(schema::LAST_YEAR as f64 + 1.0)
            .include_y(life_lo)
            .include_y(life_hi)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(bar_color)
                        .name(labels::AVG_GDP_PER_CAPITA),
                );
                plot_ui.line(
                    Line::new(life_points)
                        .color(line_color)
                        .width(2.5)
                        .name(labels::AVG_LIFE_EXPECTANCY),
                );
            });
    }

    /// Horizontal viridis ramp with min/max labels.
    pub fn draw_viridis_legend(ui: &mut egui::Ui, range: Option<(f64, f64)>) {
        let Some((min, max)) = range else {
            ui.label(RichText::new("No data for this year").color(Color32::GRAY));
            return;
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{:.1}", min)).size(12.0));

            let steps = 48;
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(240.0, 14.0), egui::Sense::hover());
            let step_width = rect.width() / steps as f32;
            for i in 0..steps {
                let value = min + (max - min) * i as f64 / (steps - 1) as f64;
                let x = rect.left() + i as f32 * step_width;
                let cell = egui::Rect::from_min_size(
                    egui::pos2(x, rect.top()),
                    egui::vec2(step_width + 0.5, rect.height()),
                );
                ui.painter()
                    .rect_filled(cell, 0.0, color32(scale::viridis(value, min, max)));
            }

            ui.label(RichText::new(format!("{:.1}", max)).size(12.0));
            ui.label(RichText::new(labels::LIFE_EXPECTANCY).size(12.0).color(Color32::GRAY));
        });
    }
}
