use tracing::{debug, info};
use uuid::Uuid;

use crate::storage::entities::{
    Habit, NewTask, NewTransaction, NewWorkout, Task, Transaction, Workout,
};

use super::AppState;

/// Fresh identity for a new record. Collisions are not checked for.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Palette handed out to habits created without an explicit color.
pub const HABIT_COLORS: [&str; 6] = [
    "#6366f1", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4",
];

impl Habit {
    pub fn new(name: String, color: String, reminder_time: Option<String>) -> Self {
        Self {
            id: generate_id(),
            name,
            streak: 0,
            completed_today: false,
            color,
            reminder_time,
        }
    }
}

impl AppState {
    /// Adds a transaction at the front of the list.
    pub fn add_transaction(&mut self, transaction: NewTransaction) -> &Transaction {
        let NewTransaction {
            amount,
            description,
            category,
            kind,
            date,
        } = transaction;
        let transaction = Transaction {
            id: generate_id(),
            amount,
            description,
            category,
            kind,
            date,
        };
        info!("Adding transaction {}", transaction.id);
        self.transactions.insert(0, transaction);
        &self.transactions[0]
    }

    /// Flips `completed_today`. Completing adds one to the streak, undoing takes one away but
    /// never goes below zero. Calling it twice flips twice.
    pub fn toggle_habit(&mut self, id: &str) -> Option<&Habit> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        if habit.completed_today {
            habit.streak = habit.streak.saturating_sub(1);
        } else {
            habit.streak = habit.streak.saturating_add(1);
        }
        habit.completed_today = !habit.completed_today;
        debug!(
            "Habit {} completed: {}, streak: {}",
            habit.id, habit.completed_today, habit.streak
        );
        Some(habit)
    }

    /// Replaces the habits with the ones picked during setup. There is no way back.
    pub fn complete_onboarding(&mut self, initial_habits: Vec<Habit>) {
        info!("Completing onboarding with {} habits", initial_habits.len());
        self.habits = initial_habits;
        self.onboarding_completed = true;
    }

    pub fn add_habit(&mut self, habit: Habit) -> &Habit {
        self.habits.push(habit);
        &self.habits[self.habits.len() - 1]
    }

    pub fn remove_habit(&mut self, id: &str) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id == id)?;
        Some(self.habits.remove(index))
    }

    /// `None` removes the reminder.
    pub fn set_habit_reminder(&mut self, id: &str, reminder_time: Option<String>) -> Option<&Habit> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        habit.reminder_time = reminder_time;
        Some(habit)
    }

    pub fn add_task(&mut self, task: NewTask) -> &Task {
        let NewTask {
            title,
            priority,
            due_date,
            reminder_time,
        } = task;
        self.tasks.push(Task {
            id: generate_id(),
            title,
            completed: false,
            priority,
            due_date,
            reminder_time,
        });
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn toggle_task(&mut self, id: &str) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task)
    }

    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Adds a workout at the front of the list.
    pub fn add_workout(&mut self, workout: NewWorkout) -> &Workout {
        let NewWorkout {
            kind,
            duration,
            intensity,
            date,
            notes,
        } = workout;
        self.workouts.insert(
            0,
            Workout {
                id: generate_id(),
                kind,
                duration,
                intensity,
                date,
                notes,
            },
        );
        &self.workouts[0]
    }
}
