use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::aggregate::{PayloadRange, SiteSelection};
use crate::state::{AppState, ControlEvent, DashboardState};

// ---------------------------------------------------------------------------
// Left side panel – input controls
// ---------------------------------------------------------------------------

/// Render the site selector and payload range controls, dispatching one
/// event per changed control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut events = Vec::new();
    let dashboard = &state.dashboard;

    ui.strong("Launch Site");
    if let Some(site) = site_selector(ui, dashboard) {
        events.push(ControlEvent::SiteChanged(site));
    }
    ui.add_space(8.0);

    ui.strong("Payload range (Kg)");
    if let Some(range) = payload_range_sliders(ui, dashboard, state.slider_step) {
        events.push(ControlEvent::RangeChanged(range));
    }
    ui.add_space(8.0);

    if ui.button("Reset filters").clicked() {
        events.push(ControlEvent::Reset);
    }

    for event in events {
        state.dashboard.dispatch(event);
    }

    if let Some(notice) = state.dashboard.notice() {
        ui.separator();
        ui.label(RichText::new(notice).color(Color32::RED));
    }
}

fn site_selector(ui: &mut Ui, dashboard: &DashboardState) -> Option<SiteSelection> {
    let current = dashboard.site();
    let options = std::iter::once(SiteSelection::All).chain(
        dashboard
            .dataset()
            .distinct_sites()
            .iter()
            .cloned()
            .map(SiteSelection::Site),
    );

    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let label = option.to_string();
                if ui.selectable_label(*current == option, label).clicked() && *current != option {
                    picked = Some(option);
                }
            }
        });
    picked
}

/// Two sliders over the dataset's payload bounds. The slider that moved wins
/// when the two would cross.
fn payload_range_sliders(ui: &mut Ui, dashboard: &DashboardState, step: f64) -> Option<PayloadRange> {
    let (min, max) = dashboard.dataset().payload_bounds();
    let current = dashboard.range();
    let mut low = current.low;
    let mut high = current.high;

    let low_changed = ui
        .add(Slider::new(&mut low, min..=max).step_by(step).text("min"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, min..=max).step_by(step).text("max"))
        .changed();

    if low_changed {
        high = high.max(low);
    } else if high_changed {
        low = low.min(high);
    } else {
        return None;
    }

    let range = PayloadRange::new(low, high).clamp_to((min, max));
    (range != current).then_some(range)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let dashboard = &state.dashboard;
        ui.label(format!(
            "{}: {} launches, {} sites, {} in range",
            state.source.display(),
            dashboard.dataset().len(),
            dashboard.dataset().distinct_sites().len(),
            dashboard.scatter_rows().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
