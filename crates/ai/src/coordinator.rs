//! Serialises analysis results onto one displayed state.
//!
//! Several analyses can be in flight when the inventory changes quickly.
//! Only the most recently started one may replace the displayed result;
//! stale completions are dropped.
//!
//! Analyses always run on their own task, so a caller that stops waiting
//! cannot leave a request pending forever.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use medswap_events::EventBus;
use medswap_inventory::{InventoryEvent, InventoryItem, InventoryStore};

use crate::analyzer::EfficiencyAnalyzer;
use crate::result::AnalysisResult;

/// What the dashboard currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisState {
    /// No analysis has been requested yet.
    Idle,
    /// `request` is running; `previous` is still displayed meanwhile.
    Pending {
        request: u64,
        previous: Option<AnalysisResult>,
    },
    Ready { request: u64, result: AnalysisResult },
}

impl AnalysisState {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisState::Idle => None,
            AnalysisState::Pending { previous, .. } => previous.as_ref(),
            AnalysisState::Ready { result, .. } => Some(result),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisState::Pending { .. })
    }
}

/// Outcome of one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refreshed {
    pub request: u64,
    pub result: AnalysisResult,
    /// False when a newer request had started before this one finished.
    pub applied: bool,
}

#[derive(Debug)]
struct Inner {
    latest: u64,
    state: AnalysisState,
}

/// Last-request-wins wrapper around [`EfficiencyAnalyzer`].
pub struct AnalysisCoordinator {
    analyzer: EfficiencyAnalyzer,
    inner: Mutex<Inner>,
}

impl AnalysisCoordinator {
    pub fn new(analyzer: EfficiencyAnalyzer) -> Self {
        Self {
            analyzer,
            inner: Mutex::new(Inner {
                latest: 0,
                state: AnalysisState::Idle,
            }),
        }
    }

    pub fn analyzer(&self) -> &EfficiencyAnalyzer {
        &self.analyzer
    }

    pub fn state(&self) -> AnalysisState {
        self.lock().state.clone()
    }

    pub fn latest_result(&self) -> Option<AnalysisResult> {
        self.lock().state.result().cloned()
    }

    /// Analyse `items` and apply the result if still current.
    ///
    /// The analysis runs on a spawned task; dropping this future detaches
    /// from it without abandoning the request.
    pub async fn refresh(self: &Arc<Self>, items: Vec<InventoryItem>) -> Refreshed {
        let request = self.begin();
        self.detach(request, items).await
    }

    /// Analyse the store's current local inventory.
    ///
    /// The snapshot is taken under the same lock that numbers the request, so
    /// a newer request never carries an older snapshot.
    pub async fn refresh_from<B>(self: &Arc<Self>, store: &InventoryStore<B>) -> Refreshed
    where
        B: EventBus<InventoryEvent>,
    {
        let (request, items) = self.begin_with(|| store.list_local());
        self.detach(request, items).await
    }

    /// Start an analysis on `runtime` and return immediately.
    ///
    /// The request number is allocated before this returns, so calls made in
    /// sequence are ordered even if their tasks are scheduled out of order.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        items: Vec<InventoryItem>,
        runtime: &Handle,
    ) -> JoinHandle<Refreshed> {
        let request = self.begin();
        self.start(request, items, runtime)
    }

    /// [`spawn_refresh`](Self::spawn_refresh) over the store's current local inventory.
    pub fn spawn_refresh_from<B>(
        self: &Arc<Self>,
        store: &InventoryStore<B>,
        runtime: &Handle,
    ) -> JoinHandle<Refreshed>
    where
        B: EventBus<InventoryEvent>,
    {
        let (request, items) = self.begin_with(|| store.list_local());
        self.start(request, items, runtime)
    }

    fn start(
        self: &Arc<Self>,
        request: u64,
        items: Vec<InventoryItem>,
        runtime: &Handle,
    ) -> JoinHandle<Refreshed> {
        let this = Arc::clone(self);
        runtime.spawn(async move { this.run(request, items).await })
    }

    async fn detach(self: &Arc<Self>, request: u64, items: Vec<InventoryItem>) -> Refreshed {
        match self.start(request, items, &Handle::current()).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                warn!(request, error = %e, "analysis task did not complete");
                Refreshed {
                    request,
                    result: AnalysisResult::fallback(),
                    applied: false,
                }
            }
        }
    }

    async fn run(&self, request: u64, items: Vec<InventoryItem>) -> Refreshed {
        let result = self.analyzer.analyze(&items).await;
        let applied = self.complete(request, &result);
        Refreshed {
            request,
            result,
            applied,
        }
    }

    fn begin(&self) -> u64 {
        self.begin_with(|| ()).0
    }

    /// Number a new request and capture its input in one critical section.
    fn begin_with<T>(&self, snapshot: impl FnOnce() -> T) -> (u64, T) {
        let mut inner = self.lock();
        let input = snapshot();
        inner.latest += 1;
        let request = inner.latest;
        let previous = inner.state.result().cloned();
        inner.state = AnalysisState::Pending { request, previous };
        debug!(request, "analysis requested");
        (request, input)
    }

    fn complete(&self, request: u64, result: &AnalysisResult) -> bool {
        let mut inner = self.lock();
        if request != inner.latest {
            debug!(request, latest = inner.latest, "discarding stale analysis result");
            return false;
        }
        inner.state = AnalysisState::Ready {
            request,
            result: result.clone(),
        };
        true
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
