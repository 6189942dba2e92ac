use std::{env::args, time::Duration};

use anyhow::Result;
use clap::Parser;
use habitual::{
    daemon::{args::DaemonArgs, start_daemon, DaemonConfig},
    utils::{
        dir::application_path,
        logging::{enable_logging, DAEMON_PREFIX},
        runtime::single_thread_runtime,
    },
};
use tracing::error;

fn main() -> Result<()> {
    run_service(args().collect::<Vec<_>>())
}

fn run_service(command_args: Vec<String>) -> Result<()> {
    let args = DaemonArgs::parse_from(&command_args);

    if !args.force {
        #[cfg(unix)]
        {
            use daemonize::Daemonize;

            let daemonize = Daemonize::new()
                .stdout(daemonize::Stdio::devnull())
                .stderr(daemonize::Stdio::devnull())
                .execute();
            match daemonize {
                daemonize::Outcome::Parent(parent) => {
                    parent.inspect_err(|e| eprintln!("Failed to create daemon {e:?}"))?;
                    println!("Created daemon");
                    return Ok(());
                }
                daemonize::Outcome::Child(child) => {
                    child?;
                }
            }
        }
    }

    run(args)
}

fn run(args: DaemonArgs) -> Result<()> {
    let app_dir = application_path(args.dir)?;
    enable_logging(DAEMON_PREFIX, &app_dir, args.log, args.log_console)?;
    let config = DaemonConfig {
        scan_interval: Duration::from_secs(args.interval),
        notifier: args.notifier,
    };
    single_thread_runtime()?
        .block_on(async move { start_daemon(app_dir, config).await })
        .inspect_err(|e| error!("Daemon stopped with an error {e:?}"))?;
    Ok(())
}
