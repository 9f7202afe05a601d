use eframe::egui::{self, ScrollArea};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

const CHART_HEIGHT: f32 = 320.0;
const TABLE_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let dashboard = &self.state.dashboard;
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("SpaceX Launch Records Dashboard");
                    });
                    ui.add_space(8.0);
                    charts::outcome_pie(ui, dashboard, CHART_HEIGHT);
                    ui.add_space(12.0);
                    charts::payload_scatter(ui, dashboard, CHART_HEIGHT);
                    ui.add_space(12.0);
                    table::launch_table(ui, dashboard, TABLE_HEIGHT);
                });
        });
    }
}
