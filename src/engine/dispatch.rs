use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use super::aggregate::{
    aggregate_outcomes, aggregate_payload_correlation, OutcomeDistribution, PayloadCorrelation,
};
use super::ResultSink;
use crate::data::model::Dataset;
use crate::data::selection::Selection;

/// Callback fired from a worker thread after it posts a result, typically
/// `egui::Context::request_repaint`.
pub type ReadyNotifier = Arc<dyn Fn() + Send + Sync>;

enum Output {
    Distribution(OutcomeDistribution),
    Correlation(PayloadCorrelation),
}

struct Tagged {
    generation: u64,
    output: Output,
}

// ---------------------------------------------------------------------------
// ComputeDispatcher – background aggregation, last selection wins
// ---------------------------------------------------------------------------

/// Runs both aggregations for a selection on their own worker threads.
///
/// Every request bumps a generation counter and tags its outputs with it.
/// [`ComputeDispatcher::deliver`] hands the sink only outputs from the newest
/// generation; anything older is dropped on arrival.
pub struct ComputeDispatcher {
    dataset: Arc<Dataset>,
    latest: u64,
    tx: Sender<Tagged>,
    rx: Receiver<Tagged>,
    on_ready: Option<ReadyNotifier>,
}

impl ComputeDispatcher {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            dataset,
            latest: 0,
            tx,
            rx,
            on_ready: None,
        }
    }

    pub fn with_notifier(mut self, notify: ReadyNotifier) -> Self {
        self.on_ready = Some(notify);
        self
    }

    /// Start computing both result sets for `selection`. Returns its generation.
    pub fn request(&mut self, selection: &Selection) -> u64 {
        self.latest += 1;
        let generation = self.latest;
        let normalized = selection.normalize(self.dataset.payload_bounds());

        log::debug!(
            "generation {generation}: site={} range=({}, {})",
            normalized.site,
            normalized.low,
            normalized.high
        );

        let site = normalized.site.clone();
        self.spawn(generation, move |ds| {
            Output::Distribution(aggregate_outcomes(ds, &site))
        });
        self.spawn(generation, move |ds| {
            Output::Correlation(aggregate_payload_correlation(ds, &normalized))
        });

        generation
    }

    fn spawn<F>(&self, generation: u64, job: F)
    where
        F: FnOnce(&Dataset) -> Output + Send + 'static,
    {
        let dataset = Arc::clone(&self.dataset);
        let tx = self.tx.clone();
        let notify = self.on_ready.clone();
        std::thread::spawn(move || {
            let output = job(&dataset);
            if tx.send(Tagged { generation, output }).is_ok() {
                if let Some(notify) = notify {
                    notify();
                }
            }
        });
    }

    /// Drain finished outputs into `sink`, skipping stale generations.
    /// Returns how many outputs were delivered.
    pub fn deliver<S: ResultSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut delivered = 0;
        while let Ok(Tagged { generation, output }) = self.rx.try_recv() {
            if generation < self.latest {
                log::trace!(
                    "dropping stale output from generation {generation} (latest {})",
                    self.latest
                );
                continue;
            }
            match output {
                Output::Distribution(d) => sink.accept_distribution(d),
                Output::Correlation(c) => sink.accept_correlation(c),
            }
            delivered += 1;
        }
        delivered
    }
}
