use tracing::{debug, error};

use crate::{error::TrackerResult, tracker::outcome::Outcome};

use super::json_storage::StateStorage;

/// Bridges a tracker and its [StateStorage]. Operations run against a copy of the state which
/// only replaces the loaded state once it is safely on disk, so a failed save leaves both the
/// file and the in-memory state as they were.
pub struct Persisted<T, S> {
    state: T,
    storage: S,
}

impl<T: Clone, S: StateStorage<T>> Persisted<T, S> {
    pub async fn load(storage: S) -> TrackerResult<Self> {
        let state = storage.load().await?;
        Ok(Self { state, storage })
    }

    pub fn state(&self) -> &T {
        &self.state
    }

    /// Runs `operation` and writes the state back when the outcome asks for it.
    pub async fn apply<R>(
        &mut self,
        operation: impl FnOnce(&mut T) -> TrackerResult<Outcome<R>>,
    ) -> TrackerResult<Outcome<R>> {
        let mut next = self.state.clone();
        let outcome = operation(&mut next)?;
        if outcome.needs_persist() {
            self.storage
                .save(&next)
                .await
                .inspect_err(|e| error!("Failed to save state {e:?}"))?;
        } else {
            debug!("Operation didn't change anything, skipping save");
        }
        self.state = next;
        Ok(outcome)
    }

    pub fn into_state(self) -> T {
        self.state
    }
}
