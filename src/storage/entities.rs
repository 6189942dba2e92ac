use std::fmt::Display;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A recurring behaviour the user tracks. `completed_today` is flipped by
/// [toggle_habit](crate::state::AppState::toggle_habit) and the streak follows it.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    /// Never negative. Kept up to date by increments and decrements, not recomputed.
    pub streak: u32,
    pub completed_today: bool,
    pub color: String,
    /// Local time formatted as `HH:mm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize, Clone, Copy, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Copy, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Money movement. Transactions are only ever prepended, never edited. The sign of `amount`
/// is not checked against `kind`.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

/// Transaction fields supplied by the user; the id is assigned on insertion.
#[derive(PartialEq, Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Copy, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkoutKind {
    Strength,
    Cardio,
    Flexibility,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize, Clone, Copy, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct Workout {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    /// Minutes.
    pub duration: u32,
    pub intensity: Intensity,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct NewWorkout {
    pub kind: WorkoutKind,
    pub duration: u32,
    pub intensity: Intensity,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub reminder_time: Option<String>,
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::High => write!(f, "HIGH"),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "INCOME"),
            TransactionKind::Expense => write!(f, "EXPENSE"),
        }
    }
}

impl Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutKind::Strength => write!(f, "STRENGTH"),
            WorkoutKind::Cardio => write!(f, "CARDIO"),
            WorkoutKind::Flexibility => write!(f, "FLEXIBILITY"),
        }
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intensity::Low => write!(f, "LOW"),
            Intensity::Medium => write!(f, "MEDIUM"),
            Intensity::High => write!(f, "HIGH"),
        }
    }
}
