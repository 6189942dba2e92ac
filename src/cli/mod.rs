pub mod commands;
pub mod daemon_path;
pub mod output;
pub mod process;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use commands::{
    apply_finance_command, apply_habit_command, apply_task_command, apply_training_command,
    parse_onboarding_habit, FinanceCommand, HabitCommand, TaskCommand, TrainingCommand,
};
use output::{render, Tab};
use process::{restart_daemon, stop_daemon};
use tracing::{info, level_filters::LevelFilter};

use crate::{
    daemon::{start_daemon, DaemonConfig},
    reminder::notifier::NotifierKind,
    state::{session::Session, AppState},
    storage::open_file_store,
    utils::{
        dir::application_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Habitual", version, long_about = None)]
#[command(about = "Track habits, tasks, finances and workouts", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default uses $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "First time setup. Picks the habits to start with")]
    Onboard {
        #[arg(
            long = "habit",
            required = true,
            help = "Habit to track, optionally with a reminder: \"Read@21:00\". Repeat for more habits"
        )]
        habits: Vec<String>,
    },
    #[command(about = "Show one of the screens")]
    Show {
        #[arg(value_enum, default_value_t = Tab::Dashboard)]
        tab: Tab,
    },
    #[command(about = "Manage habits")]
    Habit {
        #[command(subcommand)]
        command: HabitCommand,
    },
    #[command(about = "Manage tasks")]
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    #[command(about = "Manage income and expenses")]
    Finance {
        #[command(subcommand)]
        command: FinanceCommand,
    },
    #[command(about = "Manage workouts")]
    Training {
        #[command(subcommand)]
        command: TrainingCommand,
    },
    #[command(about = "Starts the reminder daemon, replacing a running one")]
    Init {
        #[arg(long, value_enum, default_value_t = NotifierKind::System)]
        notifier: NotifierKind,
    },
    #[command(about = "Run reminders directly in current console")]
    Serve {
        #[arg(long, value_enum, default_value_t = NotifierKind::Console)]
        notifier: NotifierKind,
        #[arg(long, default_value_t = 15, help = "Seconds between two reminder scans")]
        interval: u64,
    },
    #[command(about = "Stop currently running daemon.")]
    Stop {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = application_path(args.dir)?;
    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    match args.commands {
        Commands::Init { notifier } => {
            restart_daemon(&app_dir, notifier)?;
            println!("Reminders are running");
            Ok(())
        }
        Commands::Stop {} => {
            let stopped = stop_daemon()?;
            println!("Stopped {stopped} daemon(s)");
            Ok(())
        }
        Commands::Serve { notifier, interval } => {
            let config = DaemonConfig {
                scan_interval: Duration::from_secs(interval.max(1)),
                notifier,
            };
            start_daemon(app_dir, config).await
        }
        command => {
            let mut session = Session::open(open_file_store(&app_dir)?).await;
            let tab = apply_command(session.state_mut(), command)?;
            if session.persist().await? {
                info!("Saved changes");
            }
            print!("{}", render(session.state(), tab, Local::now().date_naive())?);
            Ok(())
        }
    }
}

/// Applies one front-end command and returns the screen to show afterwards. Nothing but
/// onboarding is reachable before onboarding is done.
fn apply_command(state: &mut AppState, command: Commands) -> Result<Tab> {
    if let Commands::Onboard { habits } = command {
        if state.onboarding_completed {
            bail!("Onboarding is already completed");
        }
        let habits = habits
            .iter()
            .enumerate()
            .map(|(i, value)| parse_onboarding_habit(value, i))
            .collect::<Result<Vec<_>>>()?;
        state.complete_onboarding(habits);
        return Ok(Tab::Habits);
    }

    if !state.onboarding_completed {
        bail!("Finish the setup first: habitual onboard --habit <name>");
    }

    match command {
        Commands::Show { tab } => Ok(tab),
        Commands::Habit { command } => {
            apply_habit_command(state, command)?;
            Ok(Tab::Habits)
        }
        Commands::Task { command } => {
            apply_task_command(state, command)?;
            Ok(Tab::Habits)
        }
        Commands::Finance { command } => {
            apply_finance_command(state, command)?;
            Ok(Tab::Finance)
        }
        Commands::Training { command } => {
            apply_training_command(state, command)?;
            Ok(Tab::Training)
        }
        Commands::Onboard { .. }
        | Commands::Init { .. }
        | Commands::Serve { .. }
        | Commands::Stop {} => bail!("Not a front-end command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Args::parse_from(std::iter::once("habitual").chain(args.iter().copied())).commands
    }

    #[test]
    fn test_commands_wait_for_onboarding() {
        let mut state = AppState::default();

        assert!(apply_command(&mut state, parse(&["show"])).is_err());
        assert!(apply_command(&mut state, parse(&["habit", "add", "Read"])).is_err());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_onboarding_is_one_way() {
        let mut state = AppState::default();

        let tab = apply_command(
            &mut state,
            parse(&["onboard", "--habit", "Read@21:00", "--habit", "Run"]),
        )
        .unwrap();

        assert_eq!(tab, Tab::Habits);
        assert!(state.onboarding_completed);
        assert_eq!(state.habits.len(), 2);
        assert_eq!(state.habits[0].reminder_time.as_deref(), Some("21:00"));

        assert!(apply_command(&mut state, parse(&["onboard", "--habit", "Swim"])).is_err());
        assert_eq!(state.habits.len(), 2);
    }

    #[test]
    fn test_finance_command_prepends() {
        let mut state = AppState {
            onboarding_completed: true,
            ..Default::default()
        };

        apply_command(&mut state, parse(&["finance", "add", "10", "Coffee"])).unwrap();
        let tab = apply_command(
            &mut state,
            parse(&["finance", "add", "2500", "Salary", "--kind", "income"]),
        )
        .unwrap();

        assert_eq!(tab, Tab::Finance);
        assert_eq!(state.transactions[0].description, "Salary");
        assert_eq!(state.transactions[1].category, "General");
    }

    #[test]
    fn test_finance_command_accepts_signed_amount() {
        let mut state = AppState {
            onboarding_completed: true,
            ..Default::default()
        };

        apply_command(
            &mut state,
            parse(&["finance", "add", "-5", "Refund", "--kind", "income"]),
        )
        .unwrap();

        assert_eq!(state.transactions[0].amount, -5.);
        assert_eq!(state.transactions[0].description, "Refund");
    }

    #[test]
    fn test_show_defaults_to_dashboard() {
        let mut state = AppState {
            onboarding_completed: true,
            ..Default::default()
        };

        assert_eq!(apply_command(&mut state, parse(&["show"])).unwrap(), Tab::Dashboard);
        assert_eq!(
            apply_command(&mut state, parse(&["show", "training"])).unwrap(),
            Tab::Training
        );
    }
}
