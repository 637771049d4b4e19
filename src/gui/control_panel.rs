//! Control Panel Widget
//! Left side panel with the data source summary, year selector and export.

use crate::data::schema;
use crate::data::LoadReport;
use egui::{Color32, RichText};
use std::path::Path;

/// Left side control panel.
pub struct ControlPanel {
    pub year: i32,
    pub sources: Vec<String>,
    pub report: LoadReport,
    pub status: String,
}

impl ControlPanel {
    pub fn new(year: i32, sources: &[&Path], report: LoadReport) -> Self {
        Self {
            year: year.clamp(schema::FIRST_YEAR, schema::LAST_YEAR),
            sources: sources
                .iter()
                .map(|p| {
                    p.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| p.display().to_string())
                })
                .collect(),
            report,
            status: "Ready".to_string(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Gender Gap Atlas")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Life expectancy & GDP")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Sources").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                for source in &self.sources {
                    ui.label(RichText::new(source).size(12.0));
                }
                ui.add_space(4.0);

                let r = &self.report;
                egui::Grid::new("load_report")
                    .num_columns(2)
                    .spacing([12.0, 2.0])
                    .show(ui, |ui| {
                        Self::report_row(ui, "Countries", r.crosswalk_entries);
                        Self::report_row(ui, "Records", r.demographic_records);
                        Self::report_row(ui, "Incomplete", r.dropped.incomplete);
                        Self::report_row(ui, "Unknown code", r.dropped.unknown_code);
                        Self::report_row(ui, "GDP rows", r.gdp_rows);
                        Self::report_row(ui, "GDP without id", r.gdp_unresolved);
                    });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Section =====
        ui.label(RichText::new("📅 Choose Year").size(14.0).strong());
        ui.add_space(5.0);

        let slider = egui::Slider::new(&mut self.year, schema::FIRST_YEAR..=schema::LAST_YEAR)
            .text("year")
            .step_by(1.0);
        if ui.add(slider).changed() {
            action = ControlPanelAction::YearChanged(self.year);
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn report_row(ui: &mut egui::Ui, label: &str, value: usize) {
        ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
        ui.label(RichText::new(value.to_string()).size(11.0));
        ui.end_row();
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    YearChanged(i32),
    ExportPng,
}
