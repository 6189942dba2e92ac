use chrono::{NaiveDate, Weekday};

use crate::storage::entities::{Priority, TransactionKind};

use super::AppState;

const XP_PER_STREAK_DAY: u32 = 10;
const XP_PER_TASK: u32 = 5;
const XP_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub xp: u32,
    pub level: u32,
    /// Percentage of habits completed today.
    pub daily_score: u32,
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub habits_done: usize,
    pub habits_total: usize,
    pub best_streak: u32,
    pub pending_tasks: usize,
    pub pending_high_priority: usize,
    pub workouts_this_week: usize,
    pub minutes_this_week: u32,
    pub stats: UserStats,
}

/// Amounts are summed by absolute value and the sign comes from the transaction kind.
pub fn summarize(state: &AppState, today: NaiveDate) -> Summary {
    let (income, expenses) =
        state
            .transactions
            .iter()
            .fold((0., 0.), |(income, expenses), t| match t.kind {
                TransactionKind::Income => (income + t.amount.abs(), expenses),
                TransactionKind::Expense => (income, expenses + t.amount.abs()),
            });

    let habits_done = state.habits.iter().filter(|h| h.completed_today).count();
    let habits_total = state.habits.len();
    let pending = state.tasks.iter().filter(|t| !t.completed);

    let week = today.week(Weekday::Mon);
    let this_week = state
        .workouts
        .iter()
        .filter(|w| week.first_day() <= w.date && w.date <= week.last_day());

    let streak_sum = state
        .habits
        .iter()
        .fold(0u32, |sum, h| sum.saturating_add(h.streak));
    let tasks_done = u32::try_from(state.tasks.iter().filter(|t| t.completed).count())
        .unwrap_or(u32::MAX);
    let xp = streak_sum
        .saturating_mul(XP_PER_STREAK_DAY)
        .saturating_add(tasks_done.saturating_mul(XP_PER_TASK));

    Summary {
        income,
        expenses,
        balance: income - expenses,
        habits_done,
        habits_total,
        best_streak: state.habits.iter().map(|h| h.streak).max().unwrap_or(0),
        pending_tasks: pending.clone().count(),
        pending_high_priority: pending.filter(|t| t.priority == Priority::High).count(),
        workouts_this_week: this_week.clone().count(),
        minutes_this_week: this_week.map(|w| w.duration).sum(),
        stats: UserStats {
            xp,
            level: xp / XP_PER_LEVEL + 1,
            daily_score: if habits_total == 0 {
                0
            } else {
                (habits_done * 100 / habits_total) as u32
            },
        },
    }
}
