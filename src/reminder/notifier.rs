use std::{env, path::PathBuf, process::Stdio};

use anyhow::Result;
use clap::ValueEnum;
use tokio::process::Command;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet.
    Default,
    Granted,
    Denied,
}

/// Shows one-off messages to the user. Nothing is read back after a message is shown.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn permission(&self) -> Permission;

    /// Asks for permission if it wasn't decided yet and returns the outcome.
    fn request_permission(&mut self) -> Permission;

    fn show(&mut self, title: &str, body: &str) -> Result<()>;
}

/// Runs an external program as `program <title> <body>`, e.g. `notify-send`.
pub struct CommandNotifier {
    program: String,
    permission: Permission,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            permission: Permission::Default,
        }
    }

    fn find_program(&self) -> Option<PathBuf> {
        let paths = env::var_os("PATH")?;
        env::split_paths(&paths)
            .map(|dir| dir.join(&self.program))
            .find(|candidate| candidate.is_file())
    }
}

impl Notifier for CommandNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        if self.permission == Permission::Default {
            self.permission = match self.find_program() {
                Some(path) => {
                    info!("Sending notifications through {path:?}");
                    Permission::Granted
                }
                None => {
                    warn!("{} was not found in PATH, notifications are off", self.program);
                    Permission::Denied
                }
            };
        }
        self.permission
    }

    /// Starts the program and returns without waiting for it. The runtime reaps the child.
    fn show(&mut self, title: &str, body: &str) -> Result<()> {
        Command::new(&self.program)
            .arg(title)
            .arg(body)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Prints notifications to stdout. Handy when running the daemon in a terminal.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&mut self) -> Permission {
        Permission::Granted
    }

    fn show(&mut self, title: &str, body: &str) -> Result<()> {
        println!(
            "{} {}",
            ansi_term::Colour::Purple.bold().paint(title),
            body
        );
        Ok(())
    }
}

pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn permission(&self) -> Permission {
        Permission::Denied
    }

    fn request_permission(&mut self) -> Permission {
        Permission::Denied
    }

    fn show(&mut self, _title: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierKind {
    /// Desktop notifications.
    System,
    /// Print to the terminal the daemon runs in.
    Console,
    None,
}

pub fn create_notifier(kind: NotifierKind) -> Box<dyn Notifier> {
    match kind {
        NotifierKind::System => system_notifier(),
        NotifierKind::Console => Box::new(ConsoleNotifier),
        NotifierKind::None => Box::new(DisabledNotifier),
    }
}

fn system_notifier() -> Box<dyn Notifier> {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "linux")] {
            Box::new(CommandNotifier::new("notify-send"))
        } else {
            warn!("Desktop notifications are not supported on this platform");
            Box::new(DisabledNotifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_denied() {
        let mut notifier = CommandNotifier::new("habitual-test-no-such-notifier");
        assert_eq!(notifier.permission(), Permission::Default);

        assert_eq!(notifier.request_permission(), Permission::Denied);
        assert_eq!(notifier.permission(), Permission::Denied);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_show_does_not_wait_for_the_program() {
        // `sleep 3 0` runs for three seconds.
        let mut notifier = CommandNotifier::new("sleep");
        let started = std::time::Instant::now();

        notifier.show("3", "0").unwrap();

        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_show_reports_missing_program() {
        let mut notifier = CommandNotifier::new("habitual-test-no-such-notifier");

        assert!(notifier.show("title", "body").is_err());
    }

    #[test]
    fn test_fixed_notifiers() {
        assert_eq!(
            create_notifier(NotifierKind::Console).permission(),
            Permission::Granted
        );
        assert_eq!(
            create_notifier(NotifierKind::None).request_permission(),
            Permission::Denied
        );
    }
}
