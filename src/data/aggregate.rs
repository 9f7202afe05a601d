//! Chart-ready aggregations over a [`LaunchDataset`].
//!
//! Both entry points are pure functions of the dataset and the current control
//! values. Nothing is cached here; callers recompute on every input change.

use std::fmt;

use super::error::QueryError;
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Site selector value: every site, or one site from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Check the selection against the dataset's known sites.
    fn validate(&self, dataset: &LaunchDataset) -> Result<(), QueryError> {
        match self {
            SiteSelection::All => Ok(()),
            SiteSelection::Site(site) if dataset.has_site(site) => Ok(()),
            SiteSelection::Site(site) => Err(QueryError::InvalidSite(site.clone())),
        }
    }

    fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str("All Sites"),
            SiteSelection::Site(site) => f.write_str(site),
        }
    }
}

/// Inclusive payload mass interval in kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// The dataset's full payload bounds; the initial range of the control.
    pub fn full(dataset: &LaunchDataset) -> Self {
        let (low, high) = dataset.payload_bounds();
        PayloadRange { low, high }
    }

    /// Clamp both ends into `(min, max)` and keep `low <= high`.
    pub fn clamp_to(self, (min, max): (f64, f64)) -> Self {
        let high = self.high.clamp(min, max);
        let low = self.low.clamp(min, max).min(high);
        PayloadRange { low, high }
    }

    fn validate(&self) -> Result<(), QueryError> {
        // Written so that a NaN on either side is rejected too.
        if self.low <= self.high {
            Ok(())
        } else {
            Err(QueryError::InvalidRange {
                low: self.low,
                high: self.high,
            })
        }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Pie chart: outcome summary
// ---------------------------------------------------------------------------

/// Input of the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeSummary {
    /// ALL mode: success count per site. Sites without successes are absent.
    SuccessesBySite(Vec<(String, usize)>),
    /// Single-site mode: count per outcome. Outcomes that never occur are absent.
    OutcomesForSite {
        site: String,
        counts: Vec<(Outcome, usize)>,
    },
}

impl OutcomeSummary {
    /// `(label, count)` per pie slice, in slice order.
    pub fn slices(&self) -> Vec<(String, usize)> {
        match self {
            OutcomeSummary::SuccessesBySite(by_site) => by_site.clone(),
            OutcomeSummary::OutcomesForSite { counts, .. } => counts
                .iter()
                .map(|(outcome, n)| (outcome.label().to_string(), *n))
                .collect(),
        }
    }

    pub fn total(&self) -> usize {
        match self {
            OutcomeSummary::SuccessesBySite(by_site) => by_site.iter().map(|(_, n)| n).sum(),
            OutcomeSummary::OutcomesForSite { counts, .. } => counts.iter().map(|(_, n)| n).sum(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            OutcomeSummary::SuccessesBySite(_) => "Total Successful Launches by Site".to_string(),
            OutcomeSummary::OutcomesForSite { site, .. } => {
                format!("Outcome Distribution for Site {site}")
            }
        }
    }
}

/// Count `key` occurrences, keeping keys in first-appearance order.
fn count_in_order<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

/// Pie chart data for the current site selection.
///
/// * `All` → successful launches grouped by site.
/// * `Site(s)` → launches at `s` grouped by outcome.
pub fn compute_outcome_summary(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
) -> Result<OutcomeSummary, QueryError> {
    selection.validate(dataset)?;

    let summary = match selection {
        SiteSelection::All => {
            let successes = dataset
                .records()
                .iter()
                .filter(|r| r.outcome == Outcome::Success)
                .map(|r| r.site.as_str());
            let by_site = count_in_order(successes)
                .into_iter()
                .map(|(site, n)| (site.to_string(), n))
                .collect();
            OutcomeSummary::SuccessesBySite(by_site)
        }
        SiteSelection::Site(site) => {
            let outcomes = dataset
                .records()
                .iter()
                .filter(|r| r.site == *site)
                .map(|r| r.outcome);
            OutcomeSummary::OutcomesForSite {
                site: site.clone(),
                counts: count_in_order(outcomes),
            }
        }
    };

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Scatter chart: filtered rows
// ---------------------------------------------------------------------------

/// One point of the payload-vs-outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterRow {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub site: String,
}

/// Scatter chart data: records inside `range` (inclusive) at the selected
/// site(s), in dataset order.
pub fn compute_scatter_rows(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Result<Vec<ScatterRow>, QueryError> {
    range.validate()?;
    selection.validate(dataset)?;

    Ok(dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg) && selection.matches(&r.site))
        .map(|r| ScatterRow {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome,
            booster_category: r.booster_category.clone(),
            site: r.site.clone(),
        })
        .collect())
}

pub fn scatter_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for Site {site}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, small_dataset};

    fn site(s: &str) -> SiteSelection {
        SiteSelection::Site(s.to_string())
    }

    fn mixed_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            record("CCAFS LC-40", 525.0, Outcome::Failure, "v1.0"),
            record("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            record("KSC LC-39A", 2490.0, Outcome::Success, "FT"),
            record("CCAFS LC-40", 3170.0, Outcome::Success, "v1.1"),
            record("KSC LC-39A", 5300.0, Outcome::Success, "FT"),
            record("VAFB SLC-4E", 9600.0, Outcome::Success, "B4"),
            record("CCAFS SLC-40", 4000.0, Outcome::Failure, "B5"),
        ])
        .unwrap()
    }

    #[test]
    fn test_worked_example() {
        let ds = small_dataset();

        assert_eq!(
            compute_outcome_summary(&ds, &SiteSelection::All).unwrap(),
            OutcomeSummary::SuccessesBySite(vec![("KSC".to_string(), 1), ("CCAFS".to_string(), 1)])
        );

        let ksc = compute_outcome_summary(&ds, &site("KSC")).unwrap();
        assert_eq!(
            ksc.slices(),
            vec![("Success".to_string(), 1), ("Failure".to_string(), 1)]
        );

        let rows = compute_scatter_rows(&ds, &SiteSelection::All, PayloadRange::new(4000.0, 8000.0)).unwrap();
        let tuples: Vec<_> = rows
            .iter()
            .map(|r| (r.payload_mass_kg, r.outcome.class(), r.booster_category.as_str(), r.site.as_str()))
            .collect();
        assert_eq!(tuples, vec![(5000.0, 1, "v1", "KSC"), (7000.0, 1, "v2", "CCAFS")]);
    }

    #[test]
    fn test_degenerate_range_outside_data_is_empty() {
        let ds = small_dataset();
        let rows = compute_scatter_rows(&ds, &SiteSelection::All, PayloadRange::new(10000.0, 10000.0)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_range_is_inclusive_at_both_ends() {
        let ds = small_dataset();
        let rows = compute_scatter_rows(&ds, &SiteSelection::All, PayloadRange::new(3000.0, 5000.0)).unwrap();
        let payloads: Vec<f64> = rows.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![5000.0, 3000.0]);
    }

    #[test]
    fn test_all_mode_omits_sites_without_successes() {
        let ds = mixed_dataset();
        let summary = compute_outcome_summary(&ds, &SiteSelection::All).unwrap();
        let labels: Vec<String> = summary.slices().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["KSC LC-39A", "CCAFS LC-40", "VAFB SLC-4E"]);
        assert!(!labels.contains(&"CCAFS SLC-40".to_string()));
        assert_eq!(summary.title(), "Total Successful Launches by Site");
    }

    #[test]
    fn test_all_mode_sums_to_success_count() {
        let ds = mixed_dataset();
        let successes = ds.records().iter().filter(|r| r.outcome == Outcome::Success).count();
        let summary = compute_outcome_summary(&ds, &SiteSelection::All).unwrap();
        assert_eq!(summary.total(), successes);
    }

    #[test]
    fn test_site_mode_counts_every_launch_at_site() {
        let ds = mixed_dataset();
        for s in ds.distinct_sites() {
            let summary = compute_outcome_summary(&ds, &site(s)).unwrap();
            let OutcomeSummary::OutcomesForSite { counts, .. } = &summary else {
                panic!("expected single-site summary");
            };
            assert!(counts.len() <= 2);
            let at_site = ds.records().iter().filter(|r| &r.site == s).count();
            assert_eq!(summary.total(), at_site);
        }
    }

    #[test]
    fn test_site_mode_single_slice_when_all_succeed() {
        let ds = mixed_dataset();
        let summary = compute_outcome_summary(&ds, &site("KSC LC-39A")).unwrap();
        assert_eq!(summary.slices(), vec![("Success".to_string(), 2)]);
        assert_eq!(summary.title(), "Outcome Distribution for Site KSC LC-39A");

        let failures_only = compute_outcome_summary(&ds, &site("CCAFS SLC-40")).unwrap();
        assert_eq!(failures_only.slices(), vec![("Failure".to_string(), 1)]);
    }

    #[test]
    fn test_unknown_site_is_rejected() {
        let ds = small_dataset();
        assert_eq!(
            compute_outcome_summary(&ds, &site("Boca Chica")),
            Err(QueryError::InvalidSite("Boca Chica".to_string()))
        );
        assert_eq!(
            compute_scatter_rows(&ds, &site("Boca Chica"), PayloadRange::full(&ds)),
            Err(QueryError::InvalidSite("Boca Chica".to_string()))
        );
    }

    #[test]
    fn test_inverted_or_nan_range_is_rejected() {
        let ds = small_dataset();
        assert_eq!(
            compute_scatter_rows(&ds, &SiteSelection::All, PayloadRange::new(8000.0, 4000.0)),
            Err(QueryError::InvalidRange { low: 8000.0, high: 4000.0 })
        );
        assert!(compute_scatter_rows(&ds, &SiteSelection::All, PayloadRange::new(f64::NAN, 4000.0)).is_err());
    }

    #[test]
    fn test_scatter_rows_within_range_and_stable() {
        let ds = mixed_dataset();
        let range = PayloadRange::new(400.0, 5300.0);
        let rows = compute_scatter_rows(&ds, &SiteSelection::All, range).unwrap();

        assert!(rows.iter().all(|r| range.contains(r.payload_mass_kg)));

        let expected: Vec<f64> = ds
            .records()
            .iter()
            .map(|r| r.payload_mass_kg)
            .filter(|&p| range.contains(p))
            .collect();
        let got: Vec<f64> = rows.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_scatter_rows_for_one_site() {
        let ds = mixed_dataset();
        let rows = compute_scatter_rows(&ds, &site("CCAFS LC-40"), PayloadRange::full(&ds)).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.site == "CCAFS LC-40"));
        assert_eq!(
            scatter_title(&site("CCAFS LC-40")),
            "Correlation between Payload and Success for Site CCAFS LC-40"
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let ds = mixed_dataset();
        let range = PayloadRange::new(500.0, 9600.0);
        for selection in [SiteSelection::All, site("VAFB SLC-4E")] {
            assert_eq!(
                compute_outcome_summary(&ds, &selection),
                compute_outcome_summary(&ds, &selection)
            );
            assert_eq!(
                compute_scatter_rows(&ds, &selection, range),
                compute_scatter_rows(&ds, &selection, range)
            );
        }
    }

    #[test]
    fn test_payload_range_clamp() {
        let clamped = PayloadRange::new(-100.0, 20000.0).clamp_to((0.0, 9600.0));
        assert_eq!(clamped, PayloadRange::new(0.0, 9600.0));

        let crossed = PayloadRange::new(9000.0, 500.0).clamp_to((0.0, 9600.0));
        assert_eq!(crossed, PayloadRange::new(500.0, 500.0));
    }

    #[test]
    fn test_site_selection_display() {
        assert_eq!(SiteSelection::All.to_string(), "All Sites");
        assert_eq!(site("KSC LC-39A").to_string(), "KSC LC-39A");
    }
}
