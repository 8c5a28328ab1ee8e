//! Simulated payment settlement.
//!
//! Settlement is modeled as a cancellable delayed task owned by the
//! scheduler, not an orphaned timer: every pending settlement stays
//! addressable by order id until it fires or is explicitly cancelled.
//! The settlement action itself is fire-and-forget: its outcome is
//! logged by the caller-provided future, never surfaced to the user.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Registry of in-flight settlement timers, keyed by order id.
#[derive(Clone, Default)]
pub struct SettlementScheduler {
    tasks: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl SettlementScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `settle` to run after `delay`. The task deregisters itself
    /// once the settlement action has completed. Scheduling the same order
    /// twice replaces (and aborts) the earlier timer.
    pub fn schedule<F>(&self, order_id: Uuid, delay: Duration, settle: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let tasks = Arc::clone(&self.tasks);
        // The lock is taken before the spawn so the task's self-removal
        // cannot run until its handle is registered. A zero delay would
        // otherwise leave a finished handle in the map forever.
        let mut registry = self.tasks.lock().expect("settlement registry poisoned");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            settle.await;
            tasks
                .lock()
                .expect("settlement registry poisoned")
                .remove(&order_id);
        });

        debug!("Scheduled settlement for order {order_id} in {delay:?}");
        if let Some(prev) = registry.insert(order_id, handle) {
            prev.abort();
        }
    }

    /// Cancels a pending settlement. Returns false if none was pending
    /// (already fired, already cancelled, or never scheduled).
    pub fn cancel(&self, order_id: Uuid) -> bool {
        let handle = self
            .tasks
            .lock()
            .expect("settlement registry poisoned")
            .remove(&order_id);
        match handle {
            Some(handle) => {
                handle.abort();
                info!("Cancelled pending settlement for order {order_id}");
                true
            }
            None => false,
        }
    }

    /// Whether a settlement timer is currently registered for the order.
    pub fn is_scheduled(&self, order_id: Uuid) -> bool {
        self.tasks
            .lock()
            .expect("settlement registry poisoned")
            .contains_key(&order_id)
    }

    /// Aborts every pending settlement. Used on shutdown.
    pub fn abort_all(&self) {
        let mut tasks = self.tasks.lock().expect("settlement registry poisoned");
        for (order_id, handle) in tasks.drain() {
            handle.abort();
            info!("Aborted pending settlement for order {order_id} on shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_settle(counter: Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_settlement_fires_once_after_delay() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let order_id = Uuid::new_v4();

        scheduler.schedule(
            order_id,
            Duration::from_millis(2000),
            counting_settle(Arc::clone(&fired)),
        );
        // Let the spawned task register its sleep before the clock moves.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(1999)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(scheduler.is_scheduled(order_id));

        tokio::time::advance(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_scheduled(order_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_settlement_never_fires() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let order_id = Uuid::new_v4();

        scheduler.schedule(
            order_id,
            Duration::from_millis(2000),
            counting_settle(Arc::clone(&fired)),
        );

        assert!(scheduler.cancel(order_id));
        assert!(!scheduler.is_scheduled(order_id));

        tokio::time::advance(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_reports_nothing_pending() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let order_id = Uuid::new_v4();

        scheduler.schedule(
            order_id,
            Duration::from_millis(10),
            counting_settle(Arc::clone(&fired)),
        );
        // Let the spawned task register its sleep before the clock moves.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(20)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!scheduler.cancel(order_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_settlement_deregisters_itself() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let order_id = Uuid::new_v4();

        scheduler.schedule(order_id, Duration::ZERO, counting_settle(Arc::clone(&fired)));

        tokio::time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_scheduled(order_id));
        assert!(!scheduler.cancel(order_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_earlier_timer() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let order_id = Uuid::new_v4();

        scheduler.schedule(
            order_id,
            Duration::from_millis(1000),
            counting_settle(Arc::clone(&fired)),
        );
        scheduler.schedule(
            order_id,
            Duration::from_millis(3000),
            counting_settle(Arc::clone(&fired)),
        );
        // Let the replacement task register its sleep before the clock moves.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(2000)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_all_clears_registry() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        scheduler.schedule(
            first,
            Duration::from_millis(1000),
            counting_settle(Arc::clone(&fired)),
        );
        scheduler.schedule(
            second,
            Duration::from_millis(1000),
            counting_settle(Arc::clone(&fired)),
        );

        scheduler.abort_all();
        assert!(!scheduler.is_scheduled(first));
        assert!(!scheduler.is_scheduled(second));

        tokio::time::advance(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
