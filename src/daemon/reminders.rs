use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span};

use crate::{
    reminder::scanner::ReminderScanner,
    state::AppState,
    storage::{key_value::KeyValueStore, store::Store},
    utils::clock::Clock,
};

/// Periodic reminder loop. The CLI is the only writer of the store, so state is read again on
/// every tick to pick up its changes.
pub struct ReminderModule<K> {
    store: Store<K>,
    scanner: ReminderScanner,
    shutdown: CancellationToken,
    scan_frequency: Duration,
    time_provider: Box<dyn Clock>,
}

impl<K: KeyValueStore> ReminderModule<K> {
    pub fn new(
        store: Store<K>,
        scanner: ReminderScanner,
        shutdown: CancellationToken,
        scan_frequency: Duration,
        time_provider: Box<dyn Clock>,
    ) -> Self {
        Self {
            store,
            scanner,
            shutdown,
            scan_frequency,
            time_provider,
        }
    }

    async fn scan(&mut self) -> usize {
        let state = AppState::load(&self.store).await;
        let now = self.time_provider.local_time();
        let _span = info_span!("Reminder scan", %now).entered();
        let sent = self.scanner.tick(&state, now);
        debug!("Scan sent {sent} reminders");
        sent
    }

    /// Executes the reminder event loop until the shutdown token is cancelled. Returns the
    /// scanner so callers can inspect what fired.
    pub async fn run(mut self) -> Result<ReminderScanner> {
        // Whatever way the loop ends, the rest of the daemon is told to stop with it.
        let _guard = self.shutdown.clone().drop_guard();
        let mut scan_point = self.time_provider.instant();
        loop {
            scan_point += self.scan_frequency;

            self.scan().await;

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = self.time_provider.sleep_until(scan_point) => ()
            }
        }

        info!("Stopping reminders");
        Ok(self.scanner)
    }
}
