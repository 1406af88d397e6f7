//! Poller: the background loop that keeps the board fresh.
//!
//! Ticks run at a fixed rate of [`POLL_INTERVAL`], starting immediately.
//! Each tick's fetch is awaited before the next tick is considered, so two
//! ticks never overlap; a tick that comes due while a fetch is still
//! outstanding is skipped rather than queued. Shutdown is watched during
//! the fetch as well, so a slow source does not hold the loop open.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::StatusSource;
use crate::services::board_service::BoardService;

/// Time between two ticks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Spawns and drives the refresh loop.
pub struct Poller;

impl Poller {
    /// Spawn the loop. It stops when `shutdown` flips to `true` or its
    /// sender is dropped.
    pub fn start<S>(
        service: Arc<BoardService<S>>,
        shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()>
    where
        S: StatusSource + Send + Sync + 'static,
    {
        tokio::spawn(run(service, shutdown))
    }
}

async fn run<S>(service: Arc<BoardService<S>>, mut shutdown: watch::Receiver<bool>)
where
    S: StatusSource + Send + Sync + 'static,
{
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        interval_ms = POLL_INTERVAL.as_millis(),
        "status poller started"
    );
    loop {
        tokio::select! {
            biased;
            () = stop_requested(&mut shutdown) => break,
            _ = ticker.tick() => {}
        }
        // dropping an unfinished refresh is fine: the board is written in
        // one step after the fetch completes
        tokio::select! {
            biased;
            () = stop_requested(&mut shutdown) => break,
            () = tick(&service) => {}
        }
    }
    tracing::info!("status poller stopped");
}

/// Resolves once `true` is sent or the sender is gone.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    // an error means the sender was dropped, which also stops the loop
    let _ = shutdown.wait_for(|stop| *stop).await;
}

async fn tick<S: StatusSource>(service: &BoardService<S>) {
    match service.refresh().await {
        Ok(report) => tracing::debug!(
            created = report.created,
            online = report.online,
            offline = report.offline,
            degraded = report.degraded,
            skipped = report.skipped,
            "board refreshed"
        ),
        Err(err) => tracing::warn!(%err, "status fetch failed, keeping last board"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusboard_domain::error::StatusBoardError;
    use statusboard_domain::record::StatsPayload;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches and concurrent fetches; optionally slow or failing.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Duration,
        fail_first: usize,
    }

    impl StatusSource for CountingSource {
        fn fetch(&self) -> impl Future<Output = Result<StatsPayload, StatusBoardError>> + Send {
            async move {
                let call = self.calls.fetch_add(1, Ordering::SeqCst);
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(self.delay).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);

                if call < self.fail_first {
                    return Err(StatusBoardError::upstream(std::io::Error::other("timeout")));
                }
                Ok(StatsPayload {
                    updated: None,
                    servers: vec![serde_json::json!({"name": "a"})],
                })
            }
        }
    }

    async fn run_for(source: CountingSource, elapsed: Duration) -> Arc<BoardService<CountingSource>> {
        let service = Arc::new(BoardService::new(source));
        let (tx, rx) = watch::channel(false);
        let handle = Poller::start(Arc::clone(&service), rx);

        tokio::time::sleep(elapsed).await;
        tx.send(true).unwrap();
        handle.await.unwrap();
        service
    }

    #[tokio::test(start_paused = true)]
    async fn should_tick_immediately_then_every_interval() {
        let service = run_for(CountingSource::default(), Duration::from_millis(6500)).await;
        let board = service.snapshot().await;

        assert_eq!(board.len(), 1);
        assert_eq!(service.source().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_never_overlap_slow_fetches() {
        let source = CountingSource {
            delay: Duration::from_millis(7000),
            ..CountingSource::default()
        };
        let service = run_for(source, Duration::from_millis(20_000)).await;
        let source = service.source();

        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(source.calls.load(Ordering::SeqCst) < 7);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_without_waiting_for_fetch_in_flight() {
        let source = CountingSource {
            delay: Duration::from_secs(60),
            ..CountingSource::default()
        };
        let service = Arc::new(BoardService::new(source));
        let (tx, rx) = watch::channel(false);
        let handle = Poller::start(Arc::clone(&service), rx);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(service.source().in_flight.load(Ordering::SeqCst), 1);
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("poller should stop before the fetch completes")
            .unwrap();
        assert!(service.snapshot().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_shutdown_sender_is_dropped() {
        let service = Arc::new(BoardService::new(CountingSource::default()));
        let (tx, rx) = watch::channel(false);
        let handle = Poller::start(Arc::clone(&service), rx);

        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("poller should stop once the sender is gone")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_failed_ticks() {
        let source = CountingSource {
            fail_first: 2,
            ..CountingSource::default()
        };
        let service = run_for(source, Duration::from_millis(6500)).await;

        assert_eq!(service.snapshot().await.len(), 1);
    }
}
