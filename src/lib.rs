//! Habits, tasks, finances and workouts tracked from the terminal.
//! State lives in a small local store; a separate daemon watches it and sends reminder
//! notifications when a habit or task is due.
//!

pub mod cli;
pub mod daemon;
pub mod reminder;
pub mod state;
pub mod storage;
pub mod utils;
