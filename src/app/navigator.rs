use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{debug, warn};

use crate::dataset::{DatasetSource, GraphDataset, Level, cluster_isolates, normalize};

pub(super) enum NavigatorEvent {
    /// A fully transformed dataset is ready to become the active one.
    Swapped { level: Level, dataset: GraphDataset },
    /// The fetch failed; the previously active dataset stays in place.
    Failed { level: Level, error: String },
}

struct FetchResponse {
    generation: u64,
    level: Level,
    result: Result<GraphDataset, String>,
}

/// The level-transition state machine. Fetches run on spawned worker
/// threads; each request carries a generation number and only the newest
/// generation's response is ever applied, so a slow stale fetch can never
/// clobber a later navigation.
pub(super) struct LevelNavigator {
    source: Arc<dyn DatasetSource>,
    level: Level,
    generation: u64,
    applied_generation: u64,
    tx: Sender<FetchResponse>,
    rx: Receiver<FetchResponse>,
}

impl LevelNavigator {
    pub(super) fn new(source: Arc<dyn DatasetSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            level: Level::Top,
            generation: 0,
            applied_generation: 0,
            tx,
            rx,
        }
    }

    pub(super) fn level(&self) -> &Level {
        &self.level
    }

    pub(super) fn is_loading(&self) -> bool {
        self.applied_generation < self.generation
    }

    pub(super) fn reload_top(&mut self) {
        self.start_fetch(Level::Top);
    }

    /// Drill into a node's module-level dataset. Only meaningful at the top
    /// level; file nodes are leaves and clicks on them stay informational.
    pub(super) fn select(&mut self, node_id: &str) -> bool {
        if !self.level.is_top() {
            return false;
        }
        self.start_fetch(Level::Module(node_id.to_string()));
        true
    }

    pub(super) fn select_up(&mut self) -> bool {
        if self.level.is_top() {
            return false;
        }
        self.start_fetch(Level::Top);
        true
    }

    fn start_fetch(&mut self, target: Level) {
        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let result = source
                .fetch(&target)
                .map(|mut dataset| {
                    // The full load pipeline runs off-thread; the UI only
                    // ever sees a dataset with reversal, colors and isolate
                    // clustering already applied.
                    normalize(&mut dataset);
                    cluster_isolates(&mut dataset);
                    dataset
                })
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(FetchResponse {
                generation,
                level: target,
                result,
            });
        });
    }

    /// Drains completed fetches; called once per frame.
    pub(super) fn poll(&mut self) -> Option<NavigatorEvent> {
        while let Ok(response) = self.rx.try_recv() {
            if let Some(event) = self.apply(response) {
                return Some(event);
            }
        }
        None
    }

    fn apply(&mut self, response: FetchResponse) -> Option<NavigatorEvent> {
        if response.generation != self.generation {
            debug!(
                "discarding superseded dataset response for {} (generation {}, newest {})",
                response.level.label(),
                response.generation,
                self.generation
            );
            return None;
        }

        self.applied_generation = response.generation;
        match response.result {
            Ok(dataset) => {
                self.level = response.level.clone();
                Some(NavigatorEvent::Swapped {
                    level: response.level,
                    dataset,
                })
            }
            Err(error) => {
                warn!(
                    "failed to load dataset for {}: {error}",
                    response.level.label()
                );
                Some(NavigatorEvent::Failed {
                    level: response.level,
                    error,
                })
            }
        }
    }
}
