use std::{env, path::Path, process::Stdio};

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use sysinfo::{get_current_pid, Signal, System};
use tracing::info;

use crate::reminder::notifier::NotifierKind;

use super::daemon_path::to_daemon_path;

/// Terminates every running process started from the executable at `name`, except this one.
pub fn kill_previous_servers(name: &Path) -> Result<usize> {
    let system = System::new_all();
    let current_id = get_current_pid().map_err(|e| anyhow!("Can't find own pid: {e}"))?;
    let mut killed = 0;
    for (pid, process) in system.processes().iter() {
        if *pid == current_id {
            continue;
        }

        if process
            .exe()
            .filter(|v| v.exists())
            .filter(|v| name == *v)
            .is_some()
        {
            info!("Stopping previous daemon {pid}");
            if process.kill_with(Signal::Term).is_none() {
                process.kill();
            }
            process.wait();
            killed += 1;
        }
    }
    Ok(killed)
}

fn daemon_executable() -> Result<std::path::PathBuf> {
    Ok(to_daemon_path(env::current_exe()?))
}

pub fn stop_daemon() -> Result<usize> {
    kill_previous_servers(&daemon_executable()?)
}

/// Stops a previous daemon and starts a new one. The daemon detaches itself, so the child we
/// spawn here exits right away.
pub fn restart_daemon(app_dir: &Path, notifier: NotifierKind) -> Result<()> {
    let daemon = daemon_executable()?;
    kill_previous_servers(&daemon)?;
    let mut command = std::process::Command::new(&daemon);
    command.arg("--dir").arg(app_dir);
    if let Some(value) = notifier.to_possible_value() {
        command.arg("--notifier").arg(value.get_name());
    }

    command.stdin(Stdio::null());
    command.stdout(Stdio::null());
    info!("Spawning {daemon:?}");

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
        let status = command.status()?;
        if !status.success() {
            return Err(anyhow!("{daemon:?} exited with {status}"));
        }
    }
    #[cfg(not(unix))]
    {
        command.arg("--force");
        #[allow(clippy::zombie_processes)]
        let _ = command.spawn()?;
    }
    Ok(())
}
