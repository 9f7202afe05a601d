use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Corner, GridMark, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::{outcome_color, ColorMap};
use crate::data::aggregate::{scatter_title, OutcomeSummary, ScatterRow};
use crate::data::model::Outcome;
use crate::state::DashboardState;
use crate::ui::pie;

const PIE_RADIUS: f64 = 1.0;

// ---------------------------------------------------------------------------
// Pie chart: outcome summary
// ---------------------------------------------------------------------------

/// Colour per slice, in `summary.slices()` order: the site palette in ALL
/// mode, the fixed outcome colours for a single site.
fn slice_colors(summary: &OutcomeSummary, site_colors: &ColorMap) -> Vec<Color32> {
    match summary {
        OutcomeSummary::SuccessesBySite(by_site) => by_site
            .iter()
            .map(|(site, _)| site_colors.color_for(site))
            .collect(),
        OutcomeSummary::OutcomesForSite { counts, .. } => counts
            .iter()
            .map(|(outcome, _)| outcome_color(*outcome))
            .collect(),
    }
}

/// Render the outcome pie for the current site selection.
pub fn outcome_pie(ui: &mut Ui, state: &DashboardState, height: f32) {
    let Some(summary) = state.summary() else {
        ui.label(RichText::new("Invalid selection").color(Color32::RED));
        return;
    };

    ui.strong(summary.title());

    let (slices, colors): (Vec<_>, Vec<_>) = summary
        .slices()
        .into_iter()
        .zip(slice_colors(summary, &state.site_colors))
        .filter(|((_, count), _)| *count > 0)
        .unzip();
    let wedges = pie::layout(&slices);
    if wedges.is_empty() {
        ui.label("No launches to show.");
        return;
    }

    Plot::new("success_pie_chart")
        .legend(Legend::default().position(Corner::RightTop))
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.6 * PIE_RADIUS)
        .include_x(1.6 * PIE_RADIUS)
        .include_y(-1.1 * PIE_RADIUS)
        .include_y(1.1 * PIE_RADIUS)
        .show(ui, |plot_ui| {
            for (wedge, &color) in wedges.iter().zip(&colors) {
                // Pieces share a name so they share one legend entry.
                let name = format!("{} ({})", wedge.label, wedge.count);
                for piece in wedge.pieces(PIE_RADIUS) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(piece))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }
            }
            for wedge in &wedges {
                let [x, y] = wedge.label_anchor(PIE_RADIUS);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(wedge.percent_label())
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart: payload vs outcome
// ---------------------------------------------------------------------------

/// Tick labels for the outcome axis: only 0 and 1 are labelled.
fn outcome_tick(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    match mark.value {
        v if v == 0.0 => Outcome::Failure.label().to_string(),
        v if v == 1.0 => Outcome::Success.label().to_string(),
        _ => String::new(),
    }
}

/// Group rows into one point series per booster category, in first-seen order.
fn series_by_category(rows: &[ScatterRow]) -> Vec<(&str, Vec<[f64; 2]>)> {
    let mut series: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
    for row in rows {
        let point = [row.payload_mass_kg, f64::from(row.outcome.class())];
        match series
            .iter_mut()
            .find(|(category, _)| *category == row.booster_category)
        {
            Some((_, points)) => points.push(point),
            None => series.push((row.booster_category.as_str(), vec![point])),
        }
    }
    series
}

/// Hover text for the scatter chart. `name` is the hovered series (booster
/// category) and is empty when the cursor is not on a point; the launch
/// site(s) are found by matching the point back to its rows.
fn hover_text(rows: &[ScatterRow], name: &str, value: &PlotPoint) -> String {
    if name.is_empty() {
        return format!("{:.0} kg", value.x);
    }

    let outcome = if value.y >= 0.5 { Outcome::Success } else { Outcome::Failure };
    let mut sites: Vec<&str> = Vec::new();
    for row in rows {
        let on_point = row.booster_category == name
            && row.payload_mass_kg == value.x
            && row.outcome == outcome;
        if on_point && !sites.contains(&row.site.as_str()) {
            sites.push(&row.site);
        }
    }

    if sites.is_empty() {
        format!("{name}\n{:.0} kg, {outcome}", value.x)
    } else {
        format!("{name}\n{}\n{:.0} kg, {outcome}", sites.join(", "), value.x)
    }
}

/// Render the payload-vs-outcome scatter for the current site and range.
pub fn payload_scatter(ui: &mut Ui, state: &DashboardState, height: f32) {
    ui.strong(scatter_title(state.site()));

    let rows = state.scatter_rows();
    let range = state.range();
    let hover_rows = rows.to_vec();

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default().position(Corner::RightBottom))
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .y_axis_formatter(outcome_tick)
        .include_x(range.low)
        .include_x(range.high)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .label_formatter(move |name, value| hover_text(&hover_rows, name, value))
        .show(ui, |plot_ui| {
            for (category, points) in series_by_category(rows) {
                let color = state.category_colors.color_for(category);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(4.0),
                );
            }
        });
}
