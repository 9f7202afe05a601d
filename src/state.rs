use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{
    compute_outcome_summary, compute_scatter_rows, OutcomeSummary, PayloadRange, ScatterRow,
    SiteSelection,
};
use crate::data::error::{LoadError, QueryError};
use crate::data::loader::load_file;
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Control events
// ---------------------------------------------------------------------------

/// A change reported by one of the input controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteChanged(SiteSelection),
    RangeChanged(PayloadRange),
    /// Back to `ALL` and the full payload bounds.
    Reset,
}

// ---------------------------------------------------------------------------
// Dashboard state: control values + chart inputs
// ---------------------------------------------------------------------------

/// Current control values for one dataset and the chart data derived from them.
///
/// Chart data is only ever written by [`DashboardState::dispatch`], so it
/// always reflects the current controls.
pub struct DashboardState {
    dataset: Arc<LaunchDataset>,
    site: SiteSelection,
    range: PayloadRange,

    /// Pie chart input; `None` when the site selection was rejected.
    summary: Option<OutcomeSummary>,
    /// Scatter chart input; empty when the query was rejected.
    scatter_rows: Vec<ScatterRow>,
    /// User-visible message for a rejected selection.
    notice: Option<String>,

    /// Scatter colours, one per booster category.
    pub category_colors: ColorMap,
    /// Pie colours in ALL mode, one per site.
    pub site_colors: ColorMap,

    /// Number of aggregation calls made so far.
    recomputations: usize,
}

impl DashboardState {
    /// Build the initial state (`ALL`, full payload bounds) and compute both charts.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        debug_assert!(!dataset.is_empty(), "loader never yields an empty dataset");
        let range = PayloadRange::full(&dataset);
        let category_colors = ColorMap::new(dataset.booster_categories());
        let site_colors = ColorMap::new(dataset.distinct_sites());

        let mut state = Self {
            dataset,
            site: SiteSelection::All,
            range,
            summary: None,
            scatter_rows: Vec::new(),
            notice: None,
            category_colors,
            site_colors,
            recomputations: 0,
        };
        state.refresh_summary();
        state.refresh_scatter();
        state
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn range(&self) -> PayloadRange {
        self.range
    }

    pub fn summary(&self) -> Option<&OutcomeSummary> {
        self.summary.as_ref()
    }

    pub fn scatter_rows(&self) -> &[ScatterRow] {
        &self.scatter_rows
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Apply a control change and recompute only the charts that depend on it.
    /// Returns whether anything changed.
    pub fn dispatch(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::SiteChanged(site) => {
                if site == self.site {
                    return false;
                }
                self.site = site;
                self.refresh_summary();
                self.refresh_scatter();
            }
            ControlEvent::RangeChanged(range) => {
                if range == self.range {
                    return false;
                }
                self.range = range;
                self.refresh_scatter();
            }
            ControlEvent::Reset => {
                let full = PayloadRange::full(&self.dataset);
                if self.site == SiteSelection::All && self.range == full {
                    return false;
                }
                self.site = SiteSelection::All;
                self.range = full;
                self.refresh_summary();
                self.refresh_scatter();
            }
        }
        true
    }

    fn refresh_summary(&mut self) {
        self.recomputations += 1;
        match compute_outcome_summary(&self.dataset, &self.site) {
            Ok(summary) => {
                log::debug!(
                    "pie #{}: {} slices, {} launches for {}",
                    self.recomputations,
                    summary.slices().len(),
                    summary.total(),
                    self.site
                );
                self.summary = Some(summary);
                self.notice = None;
            }
            Err(err) => {
                log::warn!("pie query rejected: {err}");
                self.summary = None;
                self.notice = Some(err.to_string());
            }
        }
    }

    fn refresh_scatter(&mut self) {
        self.recomputations += 1;
        match compute_scatter_rows(&self.dataset, &self.site, self.range) {
            Ok(rows) => {
                log::debug!(
                    "scatter #{}: {} rows for {} in [{}, {}] kg",
                    self.recomputations,
                    rows.len(),
                    self.site,
                    self.range.low,
                    self.range.high
                );
                self.scatter_rows = rows;
            }
            Err(err @ QueryError::InvalidRange { .. }) => {
                log::warn!("scatter query rejected, showing no points: {err}");
                self.scatter_rows.clear();
            }
            Err(err @ QueryError::InvalidSite(_)) => {
                log::warn!("scatter query rejected: {err}");
                self.scatter_rows.clear();
                self.notice = Some(err.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub dashboard: DashboardState,

    /// File the current dataset was loaded from.
    pub source: PathBuf,

    /// Step of the payload sliders, in kg.
    pub slider_step: f64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, source: PathBuf, slider_step: f64) -> Self {
        Self {
            dashboard: DashboardState::new(Arc::new(dataset)),
            source,
            slider_step,
            status_message: None,
        }
    }

    /// Replace the dataset with the one at `path`. On failure the current
    /// dataset stays and the error is shown in the status line.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset, path),
            Err(err) => self.report_load_error(path, &err),
        }
    }

    fn set_dataset(&mut self, dataset: LaunchDataset, path: &Path) {
        log::info!(
            "Loaded {} launches from {} ({} sites)",
            dataset.len(),
            path.display(),
            dataset.distinct_sites().len()
        );
        self.dashboard = DashboardState::new(Arc::new(dataset));
        self.source = path.to_path_buf();
        self.status_message = None;
    }

    fn report_load_error(&mut self, path: &Path, err: &LoadError) {
        log::error!("Failed to load {}: {err}", path.display());
        self.status_message = Some(format!("Error: {err}"));
    }
}
