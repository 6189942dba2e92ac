use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::{state::AppState, utils::time::minute_of};

use super::notifier::{Notifier, Permission};

/// Once the fired-set grows past this it is dropped entirely. A reminder may fire again right
/// after a clear.
pub const MAX_FIRED_REMINDERS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    Habit,
    Task,
}

/// Identifies one firing: a single item on a single day at a single minute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderKey {
    pub kind: ReminderKind,
    pub id: String,
    pub day: NaiveDate,
    pub minute: String,
}

/// Compares reminder times of habits and tasks against the clock and shows a notification for
/// each item that is due. Each item fires at most once per day and minute as long as the
/// fired-set wasn't cleared.
pub struct ReminderScanner {
    notifier: Box<dyn Notifier>,
    enabled: Option<bool>,
    fired: HashSet<ReminderKey>,
}

impl ReminderScanner {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            notifier,
            enabled: None,
            fired: HashSet::new(),
        }
    }

    pub fn fired_len(&self) -> usize {
        self.fired.len()
    }

    /// Permission is settled on first use. Without it the scanner stays silent for good.
    fn is_enabled(&mut self) -> bool {
        *self.enabled.get_or_insert_with(|| {
            let permission = match self.notifier.permission() {
                Permission::Default => self.notifier.request_permission(),
                permission => permission,
            };
            if permission != Permission::Granted {
                warn!("Notifications are not permitted ({permission:?}), reminders are off");
            }
            permission == Permission::Granted
        })
    }

    fn reclaim(&mut self) {
        if self.fired.len() > MAX_FIRED_REMINDERS {
            debug!("Clearing {} fired reminders", self.fired.len());
            self.fired.clear();
        }
    }

    fn fire(&mut self, key: ReminderKey, title: &str, body: &str) -> bool {
        if self.fired.contains(&key) {
            return false;
        }
        info!("Reminding about {:?} {}", key.kind, key.id);
        if let Err(e) = self.notifier.show(title, body) {
            warn!("Failed to show notification for {:?} {}: {e:?}", key.kind, key.id);
        }
        self.fired.insert(key);
        true
    }

    /// Runs one scan at local wall-clock time `now`. Returns how many notifications were sent.
    pub fn tick(&mut self, state: &AppState, now: NaiveDateTime) -> usize {
        if !self.is_enabled() {
            return 0;
        }
        self.reclaim();

        let minute = minute_of(now);
        let day = now.date();
        let mut sent = 0;

        for habit in &state.habits {
            if habit.completed_today || habit.reminder_time.as_deref() != Some(minute.as_str()) {
                continue;
            }
            let key = ReminderKey {
                kind: ReminderKind::Habit,
                id: habit.id.clone(),
                day,
                minute: minute.clone(),
            };
            let body = format!("Time for: {}.", habit.name);
            if self.fire(key, "Habit pending!", &body) {
                sent += 1;
            }
        }

        for task in &state.tasks {
            if task.completed || task.reminder_time.as_deref() != Some(minute.as_str()) {
                continue;
            }
            let key = ReminderKey {
                kind: ReminderKind::Task,
                id: task.id.clone(),
                day,
                minute: minute.clone(),
            };
            let body = format!("Task: \"{}\"", task.title);
            if self.fire(key, "Task reminder", &body) {
                sent += 1;
            }
        }

        self.reclaim();
        sent
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use crate::{
        reminder::notifier::MockNotifier,
        storage::entities::{Habit, Priority, Task},
        utils::logging::TEST_LOGGING,
    };

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 12)
            .unwrap()
    }

    fn habit(id: &str, reminder_time: Option<&str>, completed_today: bool) -> Habit {
        Habit {
            id: id.into(),
            name: "Read".into(),
            streak: 0,
            completed_today,
            color: "#6366f1".into(),
            reminder_time: reminder_time.map(Into::into),
        }
    }

    fn task(id: &str, reminder_time: Option<&str>, completed: bool) -> Task {
        Task {
            id: id.into(),
            title: "Pay rent".into(),
            completed,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            reminder_time: reminder_time.map(Into::into),
        }
    }

    fn granted() -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(Permission::Granted);
        notifier
    }

    fn state(habits: Vec<Habit>, tasks: Vec<Task>) -> AppState {
        AppState {
            habits,
            tasks,
            onboarding_completed: true,
            ..Default::default()
        }
    }

    fn fill(scanner: &mut ReminderScanner, count: usize) {
        for i in 0..count {
            scanner.fired.insert(ReminderKey {
                kind: ReminderKind::Task,
                id: format!("filler-{i}"),
                day: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                minute: "00:00".into(),
            });
        }
    }

    #[test]
    fn test_habit_fires_once_per_minute() {
        *TEST_LOGGING;
        let mut notifier = granted();
        notifier
            .expect_show()
            .with(eq("Habit pending!"), eq("Time for: Read."))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(vec![habit("h", Some("08:00"), false)], vec![]);

        assert_eq!(scanner.tick(&state, at(8, 0)), 1);
        assert_eq!(scanner.fired_len(), 1);

        assert_eq!(scanner.tick(&state, at(8, 0)), 0);
        assert_eq!(scanner.fired_len(), 1);
    }

    #[test]
    fn test_completed_habit_is_silent() {
        let mut notifier = granted();
        notifier.expect_show().never();
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(vec![habit("h", Some("08:00"), true)], vec![]);

        assert_eq!(scanner.tick(&state, at(8, 0)), 0);
        assert_eq!(scanner.fired_len(), 0);
    }

    #[test]
    fn test_other_minutes_are_silent() {
        let mut notifier = granted();
        notifier.expect_show().never();
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(
            vec![habit("h", Some("08:00"), false), habit("n", None, false)],
            vec![task("t", Some("08:00"), false)],
        );

        assert_eq!(scanner.tick(&state, at(7, 59)), 0);
        assert_eq!(scanner.tick(&state, at(8, 1)), 0);
    }

    #[test]
    fn test_task_fires_unless_completed() {
        let mut notifier = granted();
        notifier
            .expect_show()
            .with(eq("Task reminder"), eq("Task: \"Pay rent\""))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(
            vec![],
            vec![task("open", Some("21:30"), false), task("done", Some("21:30"), true)],
        );

        assert_eq!(scanner.tick(&state, at(21, 30)), 1);
        assert_eq!(scanner.tick(&state, at(21, 30)), 0);
    }

    #[test]
    fn test_same_id_in_habits_and_tasks_fire_separately() {
        let mut notifier = granted();
        notifier.expect_show().times(2).returning(|_, _| Ok(()));
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(
            vec![habit("same", Some("08:00"), false)],
            vec![task("same", Some("08:00"), false)],
        );

        assert_eq!(scanner.tick(&state, at(8, 0)), 2);
        assert_eq!(scanner.fired_len(), 2);
    }

    #[test]
    fn test_fires_again_next_day() {
        let mut notifier = granted();
        notifier.expect_show().times(2).returning(|_, _| Ok(()));
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(vec![habit("h", Some("08:00"), false)], vec![]);

        assert_eq!(scanner.tick(&state, at(8, 0)), 1);
        assert_eq!(scanner.tick(&state, at(8, 0) + chrono::Duration::days(1)), 1);
    }

    #[test]
    fn test_over_bound_set_is_cleared_before_scan() {
        let mut notifier = granted();
        notifier.expect_show().never();
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        fill(&mut scanner, MAX_FIRED_REMINDERS + 1);
        assert_eq!(scanner.fired_len(), 201);

        scanner.tick(&state(vec![], vec![]), at(8, 0));

        assert_eq!(scanner.fired_len(), 0);
    }

    #[test]
    fn test_set_at_bound_is_kept() {
        let mut notifier = granted();
        notifier.expect_show().never();
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        fill(&mut scanner, MAX_FIRED_REMINDERS);

        scanner.tick(&state(vec![], vec![]), at(8, 0));

        assert_eq!(scanner.fired_len(), MAX_FIRED_REMINDERS);
    }

    #[test]
    fn test_crossing_bound_during_scan_clears() {
        let mut notifier = granted();
        notifier.expect_show().times(1).returning(|_, _| Ok(()));
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        fill(&mut scanner, MAX_FIRED_REMINDERS);

        let sent = scanner.tick(&state(vec![habit("h", Some("08:00"), false)], vec![]), at(8, 0));

        assert_eq!(sent, 1);
        assert_eq!(scanner.fired_len(), 0);
    }

    #[test]
    fn test_denied_permission_is_a_permanent_no_op() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .times(1)
            .return_const(Permission::Denied);
        notifier.expect_request_permission().never();
        notifier.expect_show().never();
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(vec![habit("h", Some("08:00"), false)], vec![]);

        assert_eq!(scanner.tick(&state, at(8, 0)), 0);
        assert_eq!(scanner.tick(&state, at(8, 0)), 0);
        assert_eq!(scanner.fired_len(), 0);
    }

    #[test]
    fn test_undecided_permission_is_requested_once() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .times(1)
            .return_const(Permission::Default);
        notifier
            .expect_request_permission()
            .times(1)
            .return_const(Permission::Granted);
        notifier.expect_show().times(1).returning(|_, _| Ok(()));
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(vec![habit("h", Some("08:00"), false)], vec![]);

        assert_eq!(scanner.tick(&state, at(8, 0)), 1);
        assert_eq!(scanner.tick(&state, at(8, 0)), 0);
    }

    #[test]
    fn test_failed_notification_is_not_retried() {
        let mut notifier = granted();
        notifier
            .expect_show()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("no display")));
        let mut scanner = ReminderScanner::new(Box::new(notifier));
        let state = state(vec![habit("h", Some("08:00"), false)], vec![]);

        scanner.tick(&state, at(8, 0));
        scanner.tick(&state, at(8, 0));

        assert_eq!(scanner.fired_len(), 1);
    }
}
