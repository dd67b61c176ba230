use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Record – one launch attempt
// ---------------------------------------------------------------------------

/// A single launch attempt (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Launch site identifier, e.g. `CCAFS LC-40`.
    pub site: String,
    pub payload_mass_kg: f64,
    /// `true` for a successful landing/mission, `false` otherwise.
    pub outcome: bool,
    /// Opaque booster label (`v1.1`, `FT`, `B5`, ...). Never interpreted.
    pub booster_category: String,
}

/// Human-readable label for an outcome flag.
pub fn outcome_label(outcome: bool) -> &'static str {
    if outcome {
        "success"
    } else {
        "failure"
    }
}

// ---------------------------------------------------------------------------
// PayloadBounds – global min/max payload, fixed at load time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// Whether `value` lies inside the closed interval `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for PayloadBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.0} kg, {:.0} kg]", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable launch table with indices computed once at load time.
///
/// Fields are private so nothing can mutate the records after construction;
/// share it across threads as `Arc<Dataset>`.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
    payload_bounds: PayloadBounds,
}

impl Dataset {
    /// Validate the records and build the site / booster / payload indices.
    ///
    /// Fails on an empty table or on a payload that is negative or not finite.
    pub fn from_records(records: Vec<Record>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
                return Err(DataError::InvalidPayload {
                    row,
                    value: rec.payload_mass_kg,
                });
            }
            min = min.min(rec.payload_mass_kg);
            max = max.max(rec.payload_mass_kg);
            sites.insert(rec.site.clone());
            booster_categories.insert(rec.booster_category.clone());
        }

        Ok(Dataset {
            records,
            sites,
            booster_categories,
            payload_bounds: PayloadBounds { min, max },
        })
    }

    /// All records in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted set of known launch sites.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn payload_bounds(&self) -> PayloadBounds {
        self.payload_bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty. Always `false` for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
