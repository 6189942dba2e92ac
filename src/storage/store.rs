use std::fmt::Display;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::key_value::KeyValueStore;

/// The five entries habitual persists. The names are part of the on-disk layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Habits,
    Tasks,
    Transactions,
    Workouts,
    OnboardingDone,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Habits => "habits",
            StoreKey::Tasks => "tasks",
            StoreKey::Transactions => "transactions",
            StoreKey::Workouts => "workouts",
            StoreKey::OnboardingDone => "onboarding_done",
        }
    }
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed view over a [KeyValueStore]. Loading never fails: anything that can't be read back is
/// reported in the logs and treated as if it was never saved.
pub struct Store<K> {
    inner: K,
}

impl<K: KeyValueStore> Store<K> {
    pub fn new(inner: K) -> Self {
        Self { inner }
    }

    pub async fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let raw = match self.inner.get(key.as_str()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Nothing saved under {key}");
                return None;
            }
            Err(e) => {
                warn!("Failed to read {key}, falling back to defaults: {e:?}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored {key} is not valid, falling back to defaults: {e}");
                None
            }
        }
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.inner.set(key.as_str(), &raw).await
    }

    /// Flags are stored as the strings `true`/`false`. Anything else reads as `false`.
    pub async fn load_flag(&self, key: StoreKey) -> bool {
        match self.inner.get(key.as_str()).await {
            Ok(raw) => raw.as_deref() == Some("true"),
            Err(e) => {
                warn!("Failed to read {key}, assuming false: {e:?}");
                false
            }
        }
    }

    pub async fn save_flag(&self, key: StoreKey, value: bool) -> Result<()> {
        self.inner.set(key.as_str(), &value.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::storage::{
        entities::{Priority, Task},
        key_value::{FileStore, KeyValueStore, MemoryStore},
    };

    use super::*;

    fn test_tasks() -> Vec<Task> {
        vec![
            Task {
                id: "b".into(),
                title: "Pay rent".into(),
                completed: false,
                priority: Priority::High,
                due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                reminder_time: Some("09:30".into()),
            },
            Task {
                id: "a".into(),
                title: "Water plants".into(),
                completed: true,
                priority: Priority::Low,
                due_date: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
                reminder_time: None,
            },
        ]
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order_and_fields() -> Result<()> {
        let dir = tempdir()?;
        let store = Store::new(FileStore::new(dir.path().to_owned())?);
        let tasks = test_tasks();

        store.save(StoreKey::Tasks, &tasks).await?;
        let loaded: Option<Vec<Task>> = store.load(StoreKey::Tasks).await;

        assert_eq!(loaded, Some(tasks));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_never_saved() {
        let store = Store::new(MemoryStore::default());
        let loaded: Option<Vec<Task>> = store.load(StoreKey::Tasks).await;
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_load_corrupted_is_absent() -> Result<()> {
        let inner = MemoryStore::default();
        inner.set("tasks", "[{\"id\": ").await?;
        let store = Store::new(inner);

        let loaded: Option<Vec<Task>> = store.load(StoreKey::Tasks).await;

        assert_eq!(loaded, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_flag_round_trip() -> Result<()> {
        let store = Store::new(MemoryStore::default());
        assert!(!store.load_flag(StoreKey::OnboardingDone).await);

        store.save_flag(StoreKey::OnboardingDone, true).await?;
        assert!(store.load_flag(StoreKey::OnboardingDone).await);

        store.save_flag(StoreKey::OnboardingDone, false).await?;
        assert!(!store.load_flag(StoreKey::OnboardingDone).await);
        Ok(())
    }

    #[tokio::test]
    async fn test_flag_garbage_reads_false() -> Result<()> {
        let inner = MemoryStore::default();
        inner.set("onboarding_done", "yes").await?;
        let store = Store::new(inner);

        assert!(!store.load_flag(StoreKey::OnboardingDone).await);
        Ok(())
    }
}
