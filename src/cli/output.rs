use std::fmt::{Display, Write};

use ansi_term::{Colour, Style};
use chrono::NaiveDate;
use clap::ValueEnum;

use crate::{
    state::{summary::summarize, AppState},
    storage::entities::{Habit, Priority, TransactionKind},
};

/// Screens of the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Dashboard,
    Habits,
    Finance,
    Training,
    /// Everything an assistant would be given as context, as JSON.
    Assistant,
}

impl Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Dashboard => write!(f, "dashboard"),
            Tab::Habits => write!(f, "habits"),
            Tab::Finance => write!(f, "finance"),
            Tab::Training => write!(f, "training"),
            Tab::Assistant => write!(f, "assistant"),
        }
    }
}

const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn render(state: &AppState, tab: Tab, today: NaiveDate) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    match tab {
        Tab::Dashboard => render_dashboard(&mut out, state, today)?,
        Tab::Habits => render_habits(&mut out, state)?,
        Tab::Finance => render_finance(&mut out, state)?,
        Tab::Training => render_training(&mut out, state)?,
        Tab::Assistant => {
            let context = serde_json::to_string_pretty(state).map_err(|_| std::fmt::Error)?;
            writeln!(out, "{context}")?;
        }
    }
    Ok(out)
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", Style::new().bold().underline().paint(title))
}

/// Parses `#rrggbb`. Anything else is shown without color.
fn habit_colour(habit: &Habit) -> Option<Colour> {
    let hex = habit.color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Colour::RGB(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn render_dashboard(out: &mut String, state: &AppState, today: NaiveDate) -> std::fmt::Result {
    let summary = summarize(state, today);
    heading(out, "Today")?;
    writeln!(
        out,
        "Level {}  {} xp  daily score {}%",
        summary.stats.level, summary.stats.xp, summary.stats.daily_score
    )?;
    writeln!(
        out,
        "Habits\t{}/{} done, best streak {}",
        summary.habits_done, summary.habits_total, summary.best_streak
    )?;
    writeln!(
        out,
        "Tasks\t{} pending, {} high priority",
        summary.pending_tasks, summary.pending_high_priority
    )?;
    let balance = if summary.balance < 0. {
        Colour::Red.paint(format!("{:.2}", summary.balance))
    } else {
        Colour::Green.paint(format!("{:.2}", summary.balance))
    };
    writeln!(
        out,
        "Finance\t{balance} balance ({:.2} in, {:.2} out)",
        summary.income, summary.expenses
    )?;
    writeln!(
        out,
        "Training\t{} workouts, {} minutes this week",
        summary.workouts_this_week, summary.minutes_this_week
    )
}

fn render_habits(out: &mut String, state: &AppState) -> std::fmt::Result {
    heading(out, "Habits")?;
    for habit in &state.habits {
        let mark = if habit.completed_today { "[x]" } else { "[ ]" };
        let name = match habit_colour(habit) {
            Some(colour) => colour.paint(habit.name.as_str()).to_string(),
            None => habit.name.clone(),
        };
        write!(
            out,
            "{mark} {}\t{name}\tstreak {}",
            short_id(&habit.id),
            habit.streak
        )?;
        if let Some(time) = &habit.reminder_time {
            write!(out, "\tat {time}")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    heading(out, "Tasks")?;
    for task in &state.tasks {
        let mark = if task.completed { "[x]" } else { "[ ]" };
        let priority = match task.priority {
            Priority::High => Colour::Red.paint(task.priority.to_string()),
            Priority::Medium => Colour::Yellow.paint(task.priority.to_string()),
            Priority::Low => Style::new().dimmed().paint(task.priority.to_string()),
        };
        write!(
            out,
            "{mark} {}\t{}\t{priority}\tdue {}",
            short_id(&task.id),
            task.title,
            task.due_date
        )?;
        if let Some(time) = &task.reminder_time {
            write!(out, "\tat {time}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_finance(out: &mut String, state: &AppState) -> std::fmt::Result {
    heading(out, "Transactions")?;
    for t in &state.transactions {
        let amount = match t.kind {
            TransactionKind::Income => Colour::Green.paint(format!("+{:.2}", t.amount.abs())),
            TransactionKind::Expense => Colour::Red.paint(format!("-{:.2}", t.amount.abs())),
        };
        writeln!(
            out,
            "{}\t{amount}\t{}\t{}",
            t.date, t.category, t.description
        )?;
    }
    Ok(())
}

fn render_training(out: &mut String, state: &AppState) -> std::fmt::Result {
    heading(out, "Workouts")?;
    for w in &state.workouts {
        write!(
            out,
            "{}\t{}\t{} min\t{}",
            w.date, w.kind, w.duration, w.intensity
        )?;
        if let Some(notes) = &w.notes {
            write!(out, "\t{notes}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
