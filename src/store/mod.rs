//! Persistence of task progress, the feedback note and the weekly goal.
//!
//! Every value lives under its own string key. Loading is fail-soft: a
//! missing or unreadable value degrades to the fixture default instead of
//! reaching the user.

#[cfg(test)]
pub mod memory;
pub mod sqlite;

use anyhow::{Context, Result};

use crate::models::{Curriculum, ProgressState};

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const TASKS_KEY: &str = "tasks";
pub const FEEDBACK_KEY: &str = "feedback";
pub const WEEKLY_GOAL_KEY: &str = "weekly_goal";

/// A synchronous, string-keyed dictionary that survives across sessions.
pub trait ProgressStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    fn load_tasks(&self) -> Result<Option<ProgressState>> {
        match self.get(TASKS_KEY)? {
            None => Ok(None),
            Some(raw) => {
                let state = serde_json::from_str(&raw).context("Parsing stored tasks")?;
                Ok(Some(state))
            }
        }
    }

    fn save_tasks(&mut self, state: &ProgressState) -> Result<()> {
        let raw = serde_json::to_string(state).context("Serializing tasks")?;
        self.set(TASKS_KEY, &raw)
    }

    fn load_feedback(&self) -> Result<Option<String>> {
        self.get(FEEDBACK_KEY)
    }

    /// An empty note drops the key instead of storing "".
    fn save_feedback(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.remove(FEEDBACK_KEY)
        } else {
            self.set(FEEDBACK_KEY, text)
        }
    }

    fn load_weekly_goal(&self) -> Result<Option<String>> {
        self.get(WEEKLY_GOAL_KEY)
    }

    fn save_weekly_goal(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.remove(WEEKLY_GOAL_KEY)
        } else {
            self.set(WEEKLY_GOAL_KEY, text)
        }
    }
}

/// Stored progress, or a fresh copy of the fixture on first run or when the
/// stored value cannot be read.
pub fn load_progress<S: ProgressStore + ?Sized>(store: &S, curriculum: &Curriculum) -> ProgressState {
    match store.load_tasks() {
        Ok(Some(mut state)) => {
            let discarded = state.reconcile(curriculum);
            if !discarded.is_empty() {
                log::warn!("Stored tasks for weeks {:?} no longer match the curriculum; reset", discarded);
            }
            state
        }
        Ok(None) => {
            log::debug!("No stored tasks, starting from the curriculum");
            ProgressState::from_curriculum(curriculum)
        }
        Err(e) => {
            log::warn!("Ignoring stored tasks: {:#}", e);
            ProgressState::from_curriculum(curriculum)
        }
    }
}

/// Stored text, or an empty string when absent or unreadable.
pub fn load_text(loaded: Result<Option<String>>, what: &str) -> String {
    match loaded {
        Ok(text) => text.unwrap_or_default(),
        Err(e) => {
            log::warn!("Ignoring stored {}: {:#}", what, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::TaskFlag;

    #[test]
    fn first_run_starts_from_the_fixture() {
        let curriculum = fixtures::curriculum::load().unwrap();
        let store = MemoryStore::default();
        let state = load_progress(&store, &curriculum);

        let template = &curriculum.week(2).unwrap().tasks;
        let live = state.tasks(2).unwrap();
        assert_eq!(live.len(), template.len());
        assert!(live.iter().zip(template).all(|(a, b)| a.id == b.id));
        assert_eq!(live, template.as_slice());
    }

    #[test]
    fn malformed_tasks_are_treated_as_missing() {
        let curriculum = fixtures::curriculum::load().unwrap();
        let mut store = MemoryStore::default();
        store.set(TASKS_KEY, "{not json").unwrap();

        assert!(store.load_tasks().is_err());
        let state = load_progress(&store, &curriculum);
        assert_eq!(state, ProgressState::from_curriculum(&curriculum));
    }

    #[test]
    fn save_then_load_round_trips() {
        let curriculum = fixtures::curriculum::load().unwrap();
        let mut store = MemoryStore::default();
        let mut state = ProgressState::from_curriculum(&curriculum);
        state.set_flag(3, "3-2", TaskFlag::Practice, true).unwrap();

        store.save_tasks(&state).unwrap();
        assert_eq!(store.load_tasks().unwrap(), Some(state.clone()));
        assert_eq!(load_progress(&store, &curriculum), state);
    }

    #[test]
    fn text_fields_default_to_empty() {
        let mut store = MemoryStore::default();
        assert_eq!(load_text(store.load_feedback(), "feedback"), "");
        store.save_weekly_goal("Dominar Bibliologia").unwrap();
        assert_eq!(load_text(store.load_weekly_goal(), "goal"), "Dominar Bibliologia");
        assert_eq!(load_text(Err(anyhow::anyhow!("disk")), "goal"), "");
    }

    #[test]
    fn clearing_a_note_removes_its_key() {
        let mut store = MemoryStore::default();
        store.save_feedback("Semana difícil").unwrap();
        store.save_weekly_goal("Ler Berkhof").unwrap();
        store.save_feedback("").unwrap();
        store.save_weekly_goal("").unwrap();
        assert_eq!(store.get(FEEDBACK_KEY).unwrap(), None);
        assert_eq!(store.get(WEEKLY_GOAL_KEY).unwrap(), None);
    }
}
