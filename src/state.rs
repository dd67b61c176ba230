use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashConfig;
use crate::data::model::Dataset;
use crate::data::selection::{Selection, SiteFilter};
use crate::engine::dispatch::{ComputeDispatcher, ReadyNotifier};
use crate::engine::{OutcomeDistribution, PayloadCorrelation, ResultSink};

// ---------------------------------------------------------------------------
// Latest results shown by the charts
// ---------------------------------------------------------------------------

/// What the two charts currently display. Each side is replaced wholesale
/// when the dispatcher delivers a newer result.
#[derive(Debug, Default)]
pub struct ChartResults {
    pub distribution: Option<OutcomeDistribution>,
    pub correlation: Option<PayloadCorrelation>,
}

impl ResultSink for ChartResults {
    fn accept_distribution(&mut self, distribution: OutcomeDistribution) {
        self.distribution = Some(distribution);
    }

    fn accept_correlation(&mut self, correlation: PayloadCorrelation) {
        self.correlation = Some(correlation);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashConfig,

    /// Loaded dataset, shared read-only with the compute workers.
    pub dataset: Option<Arc<Dataset>>,

    /// Current site choice.
    pub site: SiteFilter,

    /// Payload slider positions in kg, as the user left them.
    pub range_low: f64,
    pub range_high: f64,

    pub results: ChartResults,

    /// Colours per launch site and per booster category.
    pub site_colors: Option<ColorMap>,
    pub booster_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    dispatcher: Option<ComputeDispatcher>,
    notifier: Option<ReadyNotifier>,
    /// Selection last sent to the dispatcher, to skip redundant requests.
    requested: Option<Selection>,
}

impl AppState {
    pub fn new(config: DashConfig) -> Self {
        Self {
            range_low: config.slider_min,
            range_high: config.slider_max,
            config,
            dataset: None,
            site: SiteFilter::AllSites,
            results: ChartResults::default(),
            site_colors: None,
            booster_colors: None,
            status_message: None,
            dispatcher: None,
            notifier: None,
            requested: None,
        }
    }

    /// Called from worker threads whenever a result is ready (repaint hook).
    pub fn set_notifier(&mut self, notify: ReadyNotifier) {
        self.notifier = Some(notify);
    }

    /// Ingest a newly loaded dataset: reset controls, colours and results,
    /// then request the first computation.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let dataset = Arc::new(dataset);
        let bounds = dataset.payload_bounds();

        let range = self.config.slider_range(bounds.min, bounds.max);
        self.range_low = *range.start();
        self.range_high = *range.end();
        self.site = SiteFilter::AllSites;

        self.site_colors = Some(ColorMap::new(dataset.sites().iter().cloned()));
        self.booster_colors = Some(ColorMap::new(dataset.booster_categories().iter().cloned()));

        let mut dispatcher = ComputeDispatcher::new(Arc::clone(&dataset));
        if let Some(notify) = &self.notifier {
            dispatcher = dispatcher.with_notifier(Arc::clone(notify));
        }
        self.dispatcher = Some(dispatcher);
        self.dataset = Some(dataset);
        self.results = ChartResults::default();
        self.requested = None;
        self.status_message = None;

        self.refresh();
    }

    /// The selection the controls currently describe.
    pub fn selection(&self) -> Selection {
        Selection::new(self.site.clone(), self.range_low, self.range_high)
    }

    pub fn set_site(&mut self, site: SiteFilter) {
        self.site = site;
        self.refresh();
    }

    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        self.range_low = low;
        self.range_high = high;
        self.refresh();
    }

    /// Put the payload sliders back to their full span.
    pub fn reset_payload_range(&mut self) {
        let (min, max) = match &self.dataset {
            Some(ds) => {
                let b = ds.payload_bounds();
                (b.min, b.max)
            }
            None => (self.config.slider_min, self.config.slider_max),
        };
        let range = self.config.slider_range(min, max);
        self.set_payload_range(*range.start(), *range.end());
    }

    /// Request a recomputation if the selection changed since the last one.
    pub fn refresh(&mut self) {
        let selection = self.selection();
        if self.requested.as_ref() == Some(&selection) {
            return;
        }
        if let Some(dispatcher) = &mut self.dispatcher {
            dispatcher.request(&selection);
            self.requested = Some(selection);
        }
    }

    /// Move any finished results into [`ChartResults`]. Returns whether
    /// anything changed.
    pub fn poll_results(&mut self) -> bool {
        match &mut self.dispatcher {
            Some(dispatcher) => dispatcher.deliver(&mut self.results) > 0,
            None => false,
        }
    }
}
