use anyhow::{bail, Result};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};

use crate::entity::ChangeCounter;
use crate::interactor::TokenInteractor;

/// Keeps the token list fresh: once at start, after every successful write and on a
/// fixed interval. The background task lives until `stop` or until the service drops.
pub struct RefreshService {
    interactor: Arc<dyn TokenInteractor>,
    changes: ChangeCounter,
    period: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshService {
    pub fn new(
        interactor: Arc<dyn TokenInteractor>,
        changes: ChangeCounter,
        period: Duration,
    ) -> Self {
        Self {
            interactor,
            changes,
            period,
            stop_tx: None,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    // Start the background reload loop
    pub fn start(&mut self) -> Result<()> {
        if self.stop_tx.is_some() {
            warn!("Refresh service is already running");
            return Ok(());
        }
        if self.period.is_zero() {
            bail!("Refresh interval must be greater than zero");
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let interactor = self.interactor.clone();
        let changes_rx = self.changes.subscribe();
        let period = self.period;

        self.handle = Some(tokio::spawn(Self::run(
            interactor, changes_rx, stop_rx, period,
        )));

        info!("Refresh service started (every {:?})", period);
        Ok(())
    }

    // Stop the background loop and wait for it to exit
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
            info!("Refresh service stop signal sent");
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    async fn run(
        interactor: Arc<dyn TokenInteractor>,
        mut changes_rx: watch::Receiver<u64>,
        mut stop_rx: mpsc::Receiver<()>,
        period: Duration,
    ) {
        // The first tick completes immediately and covers the initial load
        let mut ticker = interval(period);
        let mut last_run = Instant::now();
        let mut watching_changes = true;

        loop {
            select! {
                _ = ticker.tick() => {
                    debug!("Scheduled token reload (last run: {:.2?} ago)", last_run.elapsed());
                }
                changed = changes_rx.changed(), if watching_changes => {
                    if changed.is_err() {
                        // Every counter handle is gone, only the timer is left
                        watching_changes = false;
                        continue;
                    }
                    let count = *changes_rx.borrow_and_update();
                    debug!("Token reload after write #{}", count);
                }
                _ = stop_rx.recv() => {
                    info!("Stopping refresh service");
                    break;
                }
            }

            // Failures are logged by the interactor, the previous list stays in place
            let _ = interactor.load_all().await;
            last_run = Instant::now();
        }
    }
}

impl Drop for RefreshService {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
