use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::state::DashboardState;

/// Render the launches currently shown on the scatter chart as a table.
pub fn launch_table(ui: &mut Ui, state: &DashboardState, max_height: f32) {
    let rows = state.scatter_rows();
    ui.strong(format!("Filtered launches ({})", rows.len()));

    TableBuilder::new(ui)
        .id_salt("launch_table")
        .striped(true)
        .resizable(true)
        .max_scroll_height(max_height)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Outcome", "Booster Version Category"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut table_row| {
                let row = &rows[table_row.index()];
                table_row.col(|ui| {
                    ui.label(&row.site);
                });
                table_row.col(|ui| {
                    ui.label(format!("{:.1}", row.payload_mass_kg));
                });
                table_row.col(|ui| {
                    ui.label(RichText::new(row.outcome.label()).color(outcome_color(row.outcome)));
                });
                table_row.col(|ui| {
                    ui.label(&row.booster_category);
                });
            });
        });
}
