use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use clap::{CommandFactory, Subcommand};

use crate::{
    state::{mutations::HABIT_COLORS, AppState},
    storage::entities::{
        Habit, Intensity, NewTask, NewTransaction, NewWorkout, Priority, TransactionKind,
        WorkoutKind,
    },
    utils::time::parse_reminder_time,
};

use super::{output::short_id, Args};

#[derive(Subcommand, Debug)]
pub enum HabitCommand {
    #[command(about = "Track a new habit")]
    Add {
        name: String,
        #[arg(long, help = "Display color, e.g. #10b981")]
        color: Option<String>,
        #[arg(long, help = "Daily reminder time as HH:mm")]
        reminder: Option<String>,
    },
    #[command(about = "Mark a habit as done today, or undo it")]
    Toggle { id: String },
    #[command(about = "Stop tracking a habit")]
    Remove { id: String },
    #[command(about = "Change or clear the reminder of a habit")]
    Remind {
        id: String,
        #[arg(long, help = "Reminder time as HH:mm. Leave out to clear the reminder")]
        at: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    #[command(about = "Add a task")]
    Add {
        title: String,
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(
            long,
            help = "Due date. Examples are \"today\", \"tomorrow\", \"15/03/2025\". Defaults to today"
        )]
        due: Option<String>,
        #[arg(long, help = "Reminder time as HH:mm")]
        reminder: Option<String>,
    },
    #[command(about = "Mark a task as done, or undo it")]
    Toggle { id: String },
    #[command(about = "Delete a task")]
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum FinanceCommand {
    #[command(about = "Record income or an expense", allow_negative_numbers = true)]
    Add {
        amount: f64,
        description: String,
        #[arg(long, value_enum, default_value_t = TransactionKind::Expense)]
        kind: TransactionKind,
        #[arg(long, default_value = "General")]
        category: String,
        #[arg(long, help = "Date of the transaction. Defaults to today")]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrainingCommand {
    #[command(about = "Log a workout")]
    Add {
        #[arg(value_enum)]
        kind: WorkoutKind,
        #[arg(help = "Duration in minutes")]
        duration: u32,
        #[arg(long, value_enum, default_value_t = Intensity::Medium)]
        intensity: Intensity,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, help = "Date of the workout. Defaults to today")]
        date: Option<String>,
    },
}

fn validation_error(message: String) -> anyhow::Error {
    Args::command()
        .error(clap::error::ErrorKind::ValueValidation, message)
        .into()
}

/// Parses human dates like "tomorrow" or "15/03/2025". `None` means today.
pub fn parse_date(value: Option<&str>) -> Result<NaiveDate> {
    let now = Local::now();
    match value {
        None => Ok(now.date_naive()),
        Some(value) => parse_date_string(value, now, Dialect::Uk)
            .map(|v| v.date_naive())
            .map_err(|e| validation_error(format!("Failed to validate date {value:?}: {e}"))),
    }
}

fn parse_reminder(value: Option<&str>) -> Result<Option<String>> {
    value
        .map(parse_reminder_time)
        .transpose()
        .map_err(|e| validation_error(e.to_string()))
}

/// Finds the single id starting with `prefix`. Listings only show the first few characters.
pub fn resolve_id<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> Result<String> {
    let mut matches = ids.filter(|id| id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.to_string()),
        (None, _) => bail!("Nothing found with id {prefix}"),
        (Some(_), Some(_)) => bail!("Id {prefix} is ambiguous, type more characters"),
    }
}

/// Turns `name` or `name@HH:mm` into a new habit. Colors cycle through the palette.
pub fn parse_onboarding_habit(value: &str, index: usize) -> Result<Habit> {
    let (name, reminder) = match value.rsplit_once('@') {
        Some((name, reminder)) => (name, Some(reminder)),
        None => (value, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(validation_error(format!("Habit {value:?} has no name")));
    }
    Ok(Habit::new(
        name.to_string(),
        HABIT_COLORS[index % HABIT_COLORS.len()].to_string(),
        parse_reminder(reminder)?,
    ))
}

fn habit_id(state: &AppState, prefix: &str) -> Result<String> {
    resolve_id(state.habits.iter().map(|h| h.id.as_str()), prefix)
}

fn task_id(state: &AppState, prefix: &str) -> Result<String> {
    resolve_id(state.tasks.iter().map(|t| t.id.as_str()), prefix)
}

pub fn apply_habit_command(state: &mut AppState, command: HabitCommand) -> Result<()> {
    match command {
        HabitCommand::Add {
            name,
            color,
            reminder,
        } => {
            let color = color
                .unwrap_or_else(|| HABIT_COLORS[state.habits.len() % HABIT_COLORS.len()].into());
            let habit = Habit::new(name, color, parse_reminder(reminder.as_deref())?);
            let habit = state.add_habit(habit);
            println!("Added habit {} {}", short_id(&habit.id), habit.name);
        }
        HabitCommand::Toggle { id } => {
            let id = habit_id(state, &id)?;
            let habit = state
                .toggle_habit(&id)
                .ok_or_else(|| anyhow!("Habit {id} disappeared"))?;
            let verb = if habit.completed_today { "Completed" } else { "Undid" };
            println!("{verb} {}, streak is now {}", habit.name, habit.streak);
        }
        HabitCommand::Remove { id } => {
            let id = habit_id(state, &id)?;
            if let Some(habit) = state.remove_habit(&id) {
                println!("Removed habit {}", habit.name);
            }
        }
        HabitCommand::Remind { id, at } => {
            let id = habit_id(state, &id)?;
            let reminder = parse_reminder(at.as_deref())?;
            if let Some(habit) = state.set_habit_reminder(&id, reminder) {
                match &habit.reminder_time {
                    Some(time) => println!("Reminding about {} at {time}", habit.name),
                    None => println!("Cleared reminder of {}", habit.name),
                }
            }
        }
    }
    Ok(())
}

pub fn apply_task_command(state: &mut AppState, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add {
            title,
            priority,
            due,
            reminder,
        } => {
            let task = state.add_task(NewTask {
                title,
                priority,
                due_date: parse_date(due.as_deref())?,
                reminder_time: parse_reminder(reminder.as_deref())?,
            });
            println!("Added task {} {}", short_id(&task.id), task.title);
        }
        TaskCommand::Toggle { id } => {
            let id = task_id(state, &id)?;
            if let Some(task) = state.toggle_task(&id) {
                let verb = if task.completed { "Completed" } else { "Reopened" };
                println!("{verb} {}", task.title);
            }
        }
        TaskCommand::Remove { id } => {
            let id = task_id(state, &id)?;
            if let Some(task) = state.remove_task(&id) {
                println!("Removed task {}", task.title);
            }
        }
    }
    Ok(())
}

pub fn apply_finance_command(state: &mut AppState, command: FinanceCommand) -> Result<()> {
    match command {
        FinanceCommand::Add {
            amount,
            description,
            kind,
            category,
            date,
        } => {
            let transaction = state.add_transaction(NewTransaction {
                amount,
                description,
                category,
                kind,
                date: parse_date(date.as_deref())?,
            });
            println!(
                "Recorded {} {:.2} {}",
                transaction.kind, transaction.amount, transaction.description
            );
        }
    }
    Ok(())
}

pub fn apply_training_command(state: &mut AppState, command: TrainingCommand) -> Result<()> {
    match command {
        TrainingCommand::Add {
            kind,
            duration,
            intensity,
            notes,
            date,
        } => {
            let workout = state.add_workout(NewWorkout {
                kind,
                duration,
                intensity,
                date: parse_date(date.as_deref())?,
                notes,
            });
            println!("Logged {} for {} minutes", workout.kind, workout.duration);
        }
    }
    Ok(())
}
