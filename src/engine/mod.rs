/// Engine layer: selection → result sets.
///
/// ```text
///   Selection (raw, from the controls)
///        │ normalize against Dataset payload bounds
///        ▼
///   NormalizedSelection ──┬──► aggregate_outcomes            ──► OutcomeDistribution
///                         └──► aggregate_payload_correlation ──► PayloadCorrelation
/// ```
///
/// Everything here is a pure function of `(&Dataset, &Selection)`. The
/// [`dispatch`] module runs the two aggregations off the UI thread and keeps
/// only the newest selection's results.

pub mod aggregate;
pub mod dispatch;

use serde::{Deserialize, Serialize};

use crate::data::model::Dataset;
use crate::data::selection::Selection;

pub use aggregate::{
    aggregate_outcomes, aggregate_payload_correlation, CorrelationPoint, DistributionMode,
    OutcomeDistribution, PayloadCorrelation, Slice,
};

/// Both result sets for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResults {
    pub distribution: OutcomeDistribution,
    pub correlation: PayloadCorrelation,
}

/// Consumer of freshly computed result sets (the chart widgets, or a test
/// recorder). The two outputs arrive independently and in either order.
pub trait ResultSink {
    fn accept_distribution(&mut self, distribution: OutcomeDistribution);
    fn accept_correlation(&mut self, correlation: PayloadCorrelation);
}

/// Run the whole pipeline synchronously.
pub fn compute(dataset: &Dataset, selection: &Selection) -> DashboardResults {
    let normalized = selection.normalize(dataset.payload_bounds());
    if normalized.adjusted {
        log::debug!(
            "Normalized selection {:?}..{:?} to ({}, {})",
            selection.low,
            selection.high,
            normalized.low,
            normalized.high
        );
    }

    DashboardResults {
        distribution: aggregate_outcomes(dataset, &normalized.site),
        correlation: aggregate_payload_correlation(dataset, &normalized),
    }
}
