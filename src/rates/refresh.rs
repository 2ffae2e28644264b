//! Periodic rate refresh
//!
//! Fetches once at startup, then on a fixed nominal period of one hour. The
//! host timer may coalesce a tick by up to a minute for power efficiency;
//! delayed missed-tick behavior keeps that from ever producing two fetches
//! inside a 59-minute window. A fetch failure leaves the table stale and
//! waits for the next tick.

use super::fetcher::RateFetcher;
use super::table::SharedRateTable;
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Nominal refresh period: one hour
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Handle to a running refresh task
///
/// Holds the loading flag and aborts the task when dropped, so the refresh
/// lifetime is tied to its owner.
pub struct RefreshHandle {
    task: JoinHandle<()>,
    in_flight: Arc<AtomicBool>,
}

impl RefreshHandle {
    /// True while a fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Stop the periodic refresh
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn the background refresh loop against a shared table
///
/// Must be called from within a tokio runtime. The first fetch happens
/// immediately, then once per `period`.
pub fn spawn_refresh(
    fetcher: RateFetcher,
    table: SharedRateTable,
    period: Duration,
) -> RefreshHandle {
    let in_flight = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&in_flight);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            // The first tick completes immediately: the startup fetch
            ticker.tick().await;
            fetch_and_apply(&fetcher, &table, &flag).await;
        }
    });

    RefreshHandle { task, in_flight }
}

/// One guarded fetch attempt
///
/// Best-effort single-flight: a tick arriving while a previous attempt is
/// still outstanding is skipped rather than queued. If the guard is ever
/// bypassed, last-write-wins on the table.
async fn fetch_and_apply(fetcher: &RateFetcher, table: &SharedRateTable, in_flight: &AtomicBool) {
    if in_flight.swap(true, Ordering::SeqCst) {
        debug!("Skipping rate refresh: previous fetch still in flight");
        return;
    }

    match fetcher.fetch_once().await {
        Ok(rates) => {
            let mut table = table.write().unwrap();
            table.apply_fetched_rates(&rates);
            debug!("Applied {} fetched rates", rates.len());
        }
        Err(e) => {
            // Stale rates are acceptable; the next tick tries again
            warn!("Rate refresh failed: {}", e);
        }
    }

    in_flight.store(false, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::table::RateTable;

    #[tokio::test]
    async fn test_failed_fetch_leaves_table_stale() {
        let table = RateTable::seeded().into_shared();
        let fetcher = RateFetcher::with_endpoint("TWD", "http://127.0.0.1:9").unwrap();

        let handle = spawn_refresh(fetcher, Arc::clone(&table), Duration::from_secs(3600));

        // Give the startup fetch time to fail
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if !handle.is_loading() {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;

        let table = table.read().unwrap();
        assert!(table.last_updated().is_none());
        assert_eq!(table.lookup("JPY"), Some(0.0));
    }

    #[tokio::test]
    async fn test_cancel_stops_task() {
        let table = RateTable::seeded().into_shared();
        let fetcher = RateFetcher::with_endpoint("TWD", "http://127.0.0.1:9").unwrap();

        let handle = spawn_refresh(fetcher, table, Duration::from_secs(3600));
        handle.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_loading());
    }
}
