use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::filter::{filter_by_payload, filter_by_site};
use crate::data::model::{outcome_label, Dataset};
use crate::data::selection::{NormalizedSelection, SiteFilter};

// ---------------------------------------------------------------------------
// Outcome distribution (pie chart)
// ---------------------------------------------------------------------------

/// Which question a distribution answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionMode {
    /// Successful launches per site, over the full dataset.
    SuccessesBySite,
    /// Success vs. failure counts for one site.
    OutcomesForSite(String),
}

/// One labelled wedge of the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub count: u64,
}

/// Label → count result set. Slices are ordered; the label set depends on
/// the mode, so consumers must not assume a fixed set of labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub mode: DistributionMode,
    pub slices: Vec<Slice>,
}

impl OutcomeDistribution {
    /// Sum of all slice counts.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Count for `label`, if that label is present.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.slices
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.count)
    }

    /// Whether there is nothing to draw (no slices or all counts zero).
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn title(&self) -> String {
        match &self.mode {
            DistributionMode::SuccessesBySite => "Total successful launches by site".to_string(),
            DistributionMode::OutcomesForSite(site) => {
                format!("Success vs. failed launches for site {site}")
            }
        }
    }
}

/// Outcome distribution for a site choice.
///
/// * `AllSites` → success count per site over the **whole** dataset; the
///   payload range is deliberately not an input.
/// * `Site(id)` → `success` / `failure` counts for that site. An unknown or
///   empty site gives both categories with a zero count.
pub fn aggregate_outcomes(dataset: &Dataset, site: &SiteFilter) -> OutcomeDistribution {
    match site {
        SiteFilter::AllSites => {
            let mut per_site: BTreeMap<&str, u64> =
                dataset.sites().iter().map(|s| (s.as_str(), 0)).collect();
            for rec in dataset.records().iter().filter(|r| r.outcome) {
                *per_site.entry(rec.site.as_str()).or_default() += 1;
            }
            OutcomeDistribution {
                mode: DistributionMode::SuccessesBySite,
                slices: per_site
                    .into_iter()
                    .map(|(label, count)| Slice {
                        label: label.to_string(),
                        count,
                    })
                    .collect(),
            }
        }
        SiteFilter::Site(id) => {
            let subset = filter_by_site(dataset.records(), site);
            let successes = subset.iter().filter(|r| r.outcome).count() as u64;
            let failures = subset.len() as u64 - successes;
            OutcomeDistribution {
                mode: DistributionMode::OutcomesForSite(id.clone()),
                slices: vec![
                    Slice {
                        label: outcome_label(true).to_string(),
                        count: successes,
                    },
                    Slice {
                        label: outcome_label(false).to_string(),
                        count: failures,
                    },
                ],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload correlation (scatter chart)
// ---------------------------------------------------------------------------

/// One scatter point: x = payload, y = outcome, color = booster category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub payload_mass_kg: f64,
    pub outcome: bool,
    pub booster_category: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PayloadCorrelation {
    /// Points in dataset order.
    pub points: Vec<CorrelationPoint>,
}

impl PayloadCorrelation {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points grouped by booster category, categories sorted, dataset order
    /// kept inside each group.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&CorrelationPoint>> {
        let mut groups: BTreeMap<&str, Vec<&CorrelationPoint>> = BTreeMap::new();
        for p in &self.points {
            groups.entry(p.booster_category.as_str()).or_default().push(p);
        }
        groups
    }
}

/// Payload range first, over the full dataset, then the site filter.
pub fn aggregate_payload_correlation(
    dataset: &Dataset,
    selection: &NormalizedSelection,
) -> PayloadCorrelation {
    let in_range = filter_by_payload(dataset.records(), selection.low, selection.high);
    let subset = filter_by_site(in_range, &selection.site);

    PayloadCorrelation {
        points: subset
            .into_iter()
            .map(|r| CorrelationPoint {
                payload_mass_kg: r.payload_mass_kg,
                outcome: r.outcome,
                booster_category: r.booster_category.clone(),
            })
            .collect(),
    }
}
