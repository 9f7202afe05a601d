use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. The source encodes it as `class` 0 (failure) / 1 (success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a numeric class value. Only exactly 0 and 1 are accepted.
    pub fn from_class(class: f64) -> Option<Self> {
        if class == 0.0 {
            Some(Outcome::Failure)
        } else if class == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// The numeric class value, used as the y coordinate on the scatter chart.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch, validated at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Always finite and `>= 0`.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed site/category indices.
///
/// Read-only once built: there are no mutating methods, and the app shares it
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    sites: Vec<String>,
    /// Distinct booster categories in first-appearance order.
    booster_categories: Vec<String>,
    payload_bounds: (f64, f64),
}

impl LaunchDataset {
    /// Build the indices from loaded records. Returns `None` for an empty
    /// record list, which has no payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut bounds = (first.payload_mass_kg, first.payload_mass_kg);
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            bounds.0 = bounds.0.min(rec.payload_mass_kg);
            bounds.1 = bounds.1.max(rec.payload_mass_kg);
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }
        }

        Some(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds: bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn distinct_sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// `(min, max)` payload mass over all records.
    pub fn payload_bounds(&self) -> (f64, f64) {
        self.payload_bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty. Always false for a loaded dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_category: booster.to_string(),
        }
    }

    /// `[(KSC,5000,1,v1),(KSC,3000,0,v1),(CCAFS,7000,1,v2)]`
    pub(crate) fn small_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("KSC", 5000.0, Outcome::Success, "v1"),
            record("KSC", 3000.0, Outcome::Failure, "v1"),
            record("CCAFS", 7000.0, Outcome::Success, "v2"),
        ])
        .unwrap()
    }

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0.5), None);
        assert_eq!(Outcome::from_class(2.0), None);
        assert_eq!(Outcome::from_class(f64::NAN), None);
    }

    #[test]
    fn test_indices_follow_appearance_order() {
        let ds = LaunchDataset::from_records(vec![
            record("VAFB", 100.0, Outcome::Failure, "FT"),
            record("KSC", 50.0, Outcome::Success, "B4"),
            record("VAFB", 900.0, Outcome::Success, "FT"),
        ])
        .unwrap();

        assert_eq!(ds.distinct_sites(), ["VAFB", "KSC"]);
        assert_eq!(ds.booster_categories(), ["FT", "B4"]);
        assert_eq!(ds.payload_bounds(), (50.0, 900.0));
        assert!(ds.has_site("KSC"));
        assert!(!ds.has_site("ALL"));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_empty_records_have_no_dataset() {
        assert!(LaunchDataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn test_single_record_bounds() {
        let ds = LaunchDataset::from_records(vec![record("KSC", 0.0, Outcome::Success, "v1")]).unwrap();
        assert_eq!(ds.payload_bounds(), (0.0, 0.0));
        assert!(!ds.is_empty());
    }
}
