//! Gender Gap Atlas Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{StaticChartRenderer, TrendData};
use crate::data::{Dataset, YearSlice};
use crate::geo::WorldMap;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::Path;

/// Main application window. Owns the loaded tables for the process lifetime.
pub struct AtlasApp {
    dataset: Dataset,
    world: Option<WorldMap>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl AtlasApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: Dataset,
        world: Option<WorldMap>,
        control_panel: ControlPanel,
    ) -> Self {
        let trend = TrendData::from_aggregate(&dataset.yearly);
        let slice = dataset.year_slice(control_panel.year).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Starting with an empty year");
            YearSlice::new(control_panel.year, Vec::new())
        });

        Self {
            chart_viewer: ChartViewer::new(&slice, trend),
            dataset,
            world,
            control_panel,
        }
    }

    /// Recompute the year slice and the per-year charts.
    fn handle_year_changed(&mut self, year: i32) {
        match self.dataset.year_slice(year) {
            Ok(slice) => {
                self.chart_viewer.set_slice(&slice);
                self.control_panel
                    .set_status(&format!("{} countries in {}", slice.len(), year));
            }
            Err(e) => {
                tracing::warn!(year, error = %e, "Rejected year");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Ask for a directory and write the charts there as PNG files.
    fn handle_export_png(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };
        self.export_to(&dir);
    }

    fn export_to(&mut self, dir: &Path) {
        let result = StaticChartRenderer::export_png(
            dir,
            self.world.as_ref(),
            &self.chart_viewer.choropleth,
            &self.chart_viewer.scatter,
            &self.chart_viewer.trend,
        );

        match result {
            Ok(files) => {
                self.control_panel
                    .set_status(&format!("Exported {} charts to {}", files.len(), dir.display()));
                if let Err(e) = open::that(dir) {
                    tracing::debug!(error = %e, "Could not open export directory");
                }
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::YearChanged(year) => self.handle_year_changed(year),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui, self.world.as_ref());
        });
    }
}
