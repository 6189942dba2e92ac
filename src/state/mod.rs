//! In-memory state of a habitual session and the operations that change it.
//!
//! [AppState] is the single source of truth while a command runs. It is loaded from the
//! [Store](crate::storage::store::Store) once, mutated through the methods in [mutations], and
//! written back by [session::Session::persist].

pub mod mutations;
pub mod session;
pub mod summary;

use serde::Serialize;

use crate::storage::{
    entities::{Habit, Task, Transaction, Workout},
    key_value::KeyValueStore,
    store::{Store, StoreKey},
};

#[derive(PartialEq, Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub habits: Vec<Habit>,
    pub tasks: Vec<Task>,
    /// Most recent first.
    pub transactions: Vec<Transaction>,
    /// Most recent first.
    pub workouts: Vec<Workout>,
    pub onboarding_completed: bool,
}

impl AppState {
    /// Reads every collection, defaulting to empty for anything missing or unreadable.
    pub async fn load<K: KeyValueStore>(store: &Store<K>) -> Self {
        Self {
            habits: store.load(StoreKey::Habits).await.unwrap_or_default(),
            tasks: store.load(StoreKey::Tasks).await.unwrap_or_default(),
            transactions: store.load(StoreKey::Transactions).await.unwrap_or_default(),
            workouts: store.load(StoreKey::Workouts).await.unwrap_or_default(),
            onboarding_completed: store.load_flag(StoreKey::OnboardingDone).await,
        }
    }

    pub async fn save<K: KeyValueStore>(&self, store: &Store<K>) -> anyhow::Result<()> {
        store.save(StoreKey::Habits, &self.habits).await?;
        store.save(StoreKey::Tasks, &self.tasks).await?;
        store.save(StoreKey::Transactions, &self.transactions).await?;
        store.save(StoreKey::Workouts, &self.workouts).await?;
        store
            .save_flag(StoreKey::OnboardingDone, self.onboarding_completed)
            .await?;
        Ok(())
    }
}
