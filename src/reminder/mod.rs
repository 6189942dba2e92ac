//! Local reminders: [scanner::ReminderScanner] decides what is due, [notifier::Notifier] shows
//! it.

pub mod notifier;
pub mod scanner;
