use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::reminder::notifier::NotifierKind;

#[derive(Parser)]
#[command(name = "habitual-daemon", about = "Sends reminders for habits and tasks")]
pub struct DaemonArgs {
    /// Stay in the foreground instead of detaching.
    #[arg(long)]
    pub force: bool,
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Seconds between two reminder scans.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..=60))]
    pub interval: u64,
    #[arg(long, value_enum, default_value_t = NotifierKind::System)]
    pub notifier: NotifierKind,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console")]
    pub log_console: bool,
    #[arg(long = "log-filter")]
    pub log: Option<LevelFilter>,
}
