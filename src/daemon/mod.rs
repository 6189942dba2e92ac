use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use reminders::ReminderModule;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    reminder::{
        notifier::{create_notifier, Notifier, NotifierKind},
        scanner::ReminderScanner,
    },
    storage::{key_value::KeyValueStore, open_file_store, store::Store},
    utils::{
        clock::{Clock, DefaultClock},
        dir::resolve_dir,
    },
};

pub mod args;
pub mod reminders;
pub mod shutdown;

pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(15);

pub struct DaemonConfig {
    pub scan_interval: Duration,
    pub notifier: NotifierKind,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            scan_interval: DEFAULT_SCAN_INTERVAL,
            notifier: NotifierKind::System,
        }
    }
}

/// Represents the starting point for the daemon
pub async fn start_daemon(dir: PathBuf, config: DaemonConfig) -> Result<()> {
    // Resolved before the working directory moves to `/`.
    let dir = resolve_dir(&dir)?;
    let store = open_file_store(&dir)?;
    std::env::set_current_dir("/")?;

    let shutdown_token = CancellationToken::new();

    let reminders = create_reminder_module(
        store,
        create_notifier(config.notifier),
        &shutdown_token,
        config.scan_interval,
        DefaultClock,
    );

    info!("Scanning reminders every {:?}", config.scan_interval);
    let (_, reminders_result) = tokio::join!(
        shutdown::detect_shutdown(shutdown_token.clone()),
        reminders.run(),
    );

    if let Err(reminders_result) = reminders_result {
        error!("Reminder module got an error {:?}", reminders_result);
    }

    Ok(())
}

fn create_reminder_module<K: KeyValueStore>(
    store: Store<K>,
    notifier: Box<dyn Notifier>,
    shutdown_token: &CancellationToken,
    scan_interval: Duration,
    clock: impl Clock,
) -> ReminderModule<K> {
    ReminderModule::new(
        store,
        ReminderScanner::new(notifier),
        shutdown_token.clone(),
        scan_interval,
        Box::new(clock),
    )
}
