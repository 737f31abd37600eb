//! Re-runs analysis whenever the local inventory changes.
//!
//! The watcher is a plain thread subscribed to the store's event bus. Bursts
//! of events collapse into a single refresh over the latest snapshot.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, info};

use medswap_events::{Event, EventBus};
use medswap_inventory::{InventoryEvent, InventoryStore};

use crate::coordinator::AnalysisCoordinator;

#[derive(Debug, Clone)]
pub struct InventoryWatcher {
    /// How often the thread wakes to check for shutdown.
    pub poll: Duration,
}

impl Default for InventoryWatcher {
    fn default() -> Self {
        Self {
            poll: Duration::from_millis(250),
        }
    }
}

/// Handle for a running watcher.
#[derive(Debug)]
pub struct InventoryWatcherHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl InventoryWatcherHandle {
    /// Stop the watcher thread and wait for it to exit.
    ///
    /// Analyses already spawned on the runtime keep running.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

impl InventoryWatcher {
    pub fn new(poll: Duration) -> Self {
        Self { poll }
    }

    /// Subscribe to `store` and start the watcher thread.
    ///
    /// Refreshes are spawned on `runtime`; the thread itself never blocks on
    /// the analysis service.
    pub fn spawn<B>(
        &self,
        store: Arc<InventoryStore<B>>,
        coordinator: Arc<AnalysisCoordinator>,
        runtime: Handle,
    ) -> io::Result<InventoryWatcherHandle>
    where
        B: EventBus<InventoryEvent> + 'static,
    {
        // Subscribe before the thread starts so no change can slip past.
        let subscription = store.subscribe();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let poll = self.poll;

        let join = thread::Builder::new()
            .name("inventory-watcher".to_string())
            .spawn(move || {
                info!("inventory watcher started");
                loop {
                    if shutdown_rx.try_recv().is_ok() {
                        break;
                    }

                    let first = match subscription.recv_timeout(poll) {
                        Ok(event) => event,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    };

                    // Coalesce whatever else is already queued.
                    let mut stale = first.changes_local_snapshot();
                    let mut seen = 1usize;
                    for event in subscription.pending() {
                        stale |= event.changes_local_snapshot();
                        seen += 1;
                    }

                    if !stale {
                        debug!(event = first.event_type(), "inventory event does not affect analysis");
                        continue;
                    }

                    debug!(events = seen, "inventory changed; refreshing analysis");
                    drop(coordinator.spawn_refresh_from(&*store, &runtime));
                }
                info!("inventory watcher stopped");
            })?;

        Ok(InventoryWatcherHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::EfficiencyAnalyzer;
    use crate::coordinator::AnalysisState;
    use crate::generator::TextGenerator;
    use crate::prompt::GenerationRequest;
    use crate::result::{AiError, RiskLevel};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use medswap_core::{FixedClock, ItemId};
    use medswap_inventory::{Category, ItemDraft, seed};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    /// Answers "High" whenever the prompt mentions the watched item name.
    #[derive(Default)]
    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let risk = if request.prompt.contains("Saline Bags") { "High" } else { "Low" };
            Ok(format!(r#"{{"riskLevel":"{risk}","recommendations":[],"potentialSavings":"$0"}}"#))
        }
    }

    fn store() -> Arc<InventoryStore> {
        let clock = Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        Arc::new(InventoryStore::new(seed::demo_catalog(), clock).unwrap())
    }

    async fn wait_for(mut done: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done() {
            assert!(Instant::now() < deadline, "timed out waiting for watcher");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn refreshes_after_inventory_change() {
        let store = store();
        let generator = Arc::new(CountingGenerator::default());
        let coordinator = Arc::new(AnalysisCoordinator::new(EfficiencyAnalyzer::new(generator.clone())));

        let handle = InventoryWatcher::new(Duration::from_millis(20))
            .spawn(store.clone(), coordinator.clone(), Handle::current())
            .unwrap();

        store
            .add_item(ItemDraft::new(
                "Saline Bags",
                Category::Medicine,
                40,
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ))
            .unwrap();

        wait_for(|| {
            matches!(
                coordinator.state(),
                AnalysisState::Ready { ref result, .. } if result.risk_level == RiskLevel::High
            )
        })
        .await;
        assert!(generator.calls.load(Ordering::SeqCst) >= 1);

        tokio::task::spawn_blocking(move || handle.shutdown()).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn swap_requests_do_not_trigger_analysis() {
        let store = store();
        let generator = Arc::new(CountingGenerator::default());
        let coordinator = Arc::new(AnalysisCoordinator::new(EfficiencyAnalyzer::new(generator.clone())));

        let handle = InventoryWatcher::new(Duration::from_millis(20))
            .spawn(store.clone(), coordinator.clone(), Handle::current())
            .unwrap();

        store
            .request_swap(&ItemId::new("item-3"), &ItemId::new("item-1"))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(coordinator.state(), AnalysisState::Idle);

        tokio::task::spawn_blocking(move || handle.shutdown()).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn newer_request_always_sees_newer_inventory() {
        let store = store();
        let generator = Arc::new(CountingGenerator::default());
        let coordinator = Arc::new(AnalysisCoordinator::new(EfficiencyAnalyzer::new(generator)));

        let before = coordinator.spawn_refresh_from(&*store, &Handle::current());
        store
            .add_item(ItemDraft::new(
                "Saline Bags",
                Category::Medicine,
                40,
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ))
            .unwrap();
        let after = coordinator.refresh_from(&*store).await;

        assert_eq!(after.request, 2);
        assert_eq!(after.result.risk_level, RiskLevel::High);
        let before = before.await.unwrap();
        assert_eq!(before.request, 1);
        assert_eq!(before.result.risk_level, RiskLevel::Low);

        match coordinator.state() {
            AnalysisState::Ready { request, result } => {
                assert_eq!(request, 2);
                assert_eq!(result.risk_level, RiskLevel::High);
            }
            other => panic!("expected ready state, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn removal_is_reflected_in_next_analysis() {
        let store = store();
        let generator = Arc::new(CountingGenerator::default());
        let coordinator = Arc::new(AnalysisCoordinator::new(EfficiencyAnalyzer::new(generator.clone())));

        let handle = InventoryWatcher::new(Duration::from_millis(20))
            .spawn(store.clone(), coordinator.clone(), Handle::current())
            .unwrap();

        let added = store
            .add_item(ItemDraft::new(
                "Saline Bags",
                Category::Medicine,
                40,
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ))
            .unwrap();
        wait_for(|| {
            coordinator
                .latest_result()
                .is_some_and(|r| r.risk_level == RiskLevel::High)
        })
        .await;

        store.remove_item(&added.id);
        wait_for(|| {
            matches!(
                coordinator.state(),
                AnalysisState::Ready { ref result, .. } if result.risk_level == RiskLevel::Low
            )
        })
        .await;

        tokio::task::spawn_blocking(move || handle.shutdown()).await.unwrap();
    }
}
