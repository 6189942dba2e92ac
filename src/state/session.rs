use anyhow::Result;
use tracing::{debug, info};

use crate::storage::{key_value::KeyValueStore, store::Store};

use super::AppState;

/// One run of the front-end: state is read on open and written back only when it changed.
pub struct Session<K> {
    store: Store<K>,
    state: AppState,
    persisted: AppState,
}

impl<K: KeyValueStore> Session<K> {
    pub async fn open(store: Store<K>) -> Self {
        let state = AppState::load(&store).await;
        debug!(
            "Loaded {} habits, {} tasks, {} transactions, {} workouts",
            state.habits.len(),
            state.tasks.len(),
            state.transactions.len(),
            state.workouts.len()
        );
        Self {
            store,
            persisted: state.clone(),
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state != self.persisted
    }

    /// Writes all entries if anything changed since the last write. Returns whether a write
    /// happened.
    pub async fn persist(&mut self) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.state.save(&self.store).await?;
        self.persisted = self.state.clone();
        info!("Persisted state");
        Ok(true)
    }
}
