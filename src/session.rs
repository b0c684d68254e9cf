//! The running study session: fixture, live progress and notes, wired to a
//! store. Every mutation is written through before the call returns.

use anyhow::{Result, anyhow};

use crate::models::{Curriculum, DailyTask, ProgressState, StateError, TaskFlag, WeekRecord};
use crate::progress::{self, Progress};
use crate::store::{self, ProgressStore};

/// Week by which the plan's core phases are meant to be finished.
pub const TARGET_WEEK: i64 = 24;

pub struct StudySession<S: ProgressStore> {
    store: S,
    curriculum: Curriculum,
    state: ProgressState,
    feedback: String,
    weekly_goal: String,
    save_error: Option<String>,
}

impl<S: ProgressStore> StudySession<S> {
    /// Load whatever the store holds. Unreadable values fall back to the
    /// fixture or to empty text.
    pub fn open(store: S, curriculum: Curriculum) -> Self {
        let state = store::load_progress(&store, &curriculum);
        let feedback = store::load_text(store.load_feedback(), "feedback");
        let weekly_goal = store::load_text(store.load_weekly_goal(), "weekly goal");
        Self {
            store,
            curriculum,
            state,
            feedback,
            weekly_goal,
            save_error: None,
        }
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn week(&self, week: u32) -> Option<&WeekRecord> {
        self.curriculum.week(week)
    }

    pub fn tasks(&self, week: u32) -> &[DailyTask] {
        progress::week_tasks(&self.state, &self.curriculum, week)
    }

    /// The last write failure, if the most recent save did not go through.
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    // ─── Tasks ───────────────────────────────────────────────────────────────

    pub fn set_flag(&mut self, week: u32, task_id: &str, flag: TaskFlag, value: bool) -> Result<(), StateError> {
        self.state.set_flag(week, task_id, flag, value)?;
        self.persist_tasks();
        Ok(())
    }

    /// Flip one flag and return its new value.
    pub fn toggle_flag(&mut self, week: u32, task_id: &str, flag: TaskFlag) -> Result<bool, StateError> {
        let current = self
            .state
            .tasks(week)
            .ok_or(StateError::UnknownWeek(week))?
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.flag(flag))
            .ok_or_else(|| StateError::UnknownTask {
                week,
                id: task_id.to_string(),
            })?;
        self.set_flag(week, task_id, flag, !current)?;
        Ok(!current)
    }

    /// Find a task of `week` by id ("3-2"), 1-based position ("2") or the
    /// start of its day label ("terça").
    pub fn resolve_task(&self, week: u32, selector: &str) -> Result<&DailyTask> {
        let tasks = self.tasks(week);
        if tasks.is_empty() {
            return Err(anyhow!("Week {} is not part of the curriculum", week));
        }
        let selector = selector.trim();

        if let Some(task) = tasks.iter().find(|t| t.id == selector) {
            return Ok(task);
        }
        if let Ok(n) = selector.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| tasks.get(i))
                .ok_or_else(|| anyhow!("Week {} has {} days; '{}' is out of range", week, tasks.len(), n));
        }
        let needle = selector.to_lowercase();
        let mut matches = tasks.iter().filter(|t| t.day.to_lowercase().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task),
            (Some(_), Some(_)) => Err(anyhow!("'{}' matches more than one day of week {}", selector, week)),
            _ => Err(anyhow!("No day '{}' in week {}", selector, week)),
        }
    }

    /// Throw away every flag and start again from the fixture.
    pub fn reset(&mut self) {
        self.state = ProgressState::from_curriculum(&self.curriculum);
        self.persist_tasks();
    }

    // ─── Notes ───────────────────────────────────────────────────────────────

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn set_feedback(&mut self, text: impl Into<String>) {
        self.feedback = text.into();
        let result = self.store.save_feedback(&self.feedback);
        self.record("feedback", result);
    }

    pub fn weekly_goal(&self) -> &str {
        &self.weekly_goal
    }

    pub fn set_weekly_goal(&mut self, text: impl Into<String>) {
        self.weekly_goal = text.into();
        let result = self.store.save_weekly_goal(&self.weekly_goal);
        self.record("weekly goal", result);
    }

    // ─── Stats ───────────────────────────────────────────────────────────────

    pub fn week_progress(&self, week: u32) -> Progress {
        progress::week_progress(&self.state, &self.curriculum, week)
    }

    pub fn phase_progress(&self, phase: u8) -> Progress {
        progress::phase_progress(&self.state, &self.curriculum, phase)
    }

    pub fn overall_progress(&self) -> Progress {
        progress::overall_progress(&self.state)
    }

    pub fn completed_days(&self, week: u32) -> u32 {
        progress::completed_days(self.tasks(week))
    }

    /// Weeks left until the target week. Negative once it has passed.
    pub fn weeks_remaining(&self, week: u32) -> i64 {
        TARGET_WEEK - week as i64
    }

    // ─── Persistence ─────────────────────────────────────────────────────────

    fn persist_tasks(&mut self) {
        let result = self.store.save_tasks(&self.state);
        self.record("tasks", result);
    }

    fn record(&mut self, what: &str, result: Result<()>) {
        match result {
            Ok(()) => {
                log::debug!("Saved {}", what);
                self.save_error = None;
            }
            Err(e) => {
                log::warn!("Failed to save {}: {:#}", what, e);
                self.save_error = Some(format!("{e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::store::MemoryStore;

    fn session() -> StudySession<MemoryStore> {
        StudySession::open(MemoryStore::default(), fixtures::curriculum::load().unwrap())
    }

    /// A store whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore;

    impl ProgressStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("disk full while writing {}", key))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn flag_changes_are_written_through() {
        let mut s = session();
        s.set_flag(3, "3-2", TaskFlag::Practice, true).unwrap();

        let stored = s.store().load_tasks().unwrap().unwrap();
        assert!(stored.tasks(3).unwrap()[1].practice);
        assert_eq!(stored.tasks(3).unwrap(), s.tasks(3));
    }

    #[test]
    fn toggling_twice_restores_the_flag() {
        let mut s = session();
        assert!(s.toggle_flag(1, "1-1", TaskFlag::Study).unwrap());
        assert!(!s.toggle_flag(1, "1-1", TaskFlag::Study).unwrap());
        assert_eq!(s.week_progress(1).checked, 0);
        assert!(matches!(
            s.toggle_flag(1, "9-9", TaskFlag::Study),
            Err(StateError::UnknownTask { .. })
        ));
    }

    #[test]
    fn reopening_restores_progress_and_notes() {
        let mut s = session();
        s.set_flag(2, "2-1", TaskFlag::Devotional, true).unwrap();
        s.set_feedback("Preciso revisar a doutrina da Trindade.");
        s.set_weekly_goal("Terminar Grudem cap. 14");

        let store = s.store().clone();
        let again = StudySession::open(store, fixtures::curriculum::load().unwrap());
        assert!(again.tasks(2)[0].devotional);
        assert_eq!(again.feedback(), "Preciso revisar a doutrina da Trindade.");
        assert_eq!(again.weekly_goal(), "Terminar Grudem cap. 14");
    }

    #[test]
    fn resolves_tasks_by_id_position_or_day() {
        let s = session();
        assert_eq!(s.resolve_task(4, "4-3").unwrap().id, "4-3");
        assert_eq!(s.resolve_task(4, "2").unwrap().id, "4-2");
        assert_eq!(s.resolve_task(4, "segunda").unwrap().id, "4-1");
        assert!(s.resolve_task(4, "9").is_err());
        assert!(s.resolve_task(4, "0").is_err());
        assert!(s.resolve_task(4, "feriado").is_err());
        assert!(s.resolve_task(40, "1").is_err());
    }

    #[test]
    fn reset_clears_every_flag() {
        let mut s = session();
        s.set_flag(1, "1-1", TaskFlag::Study, true).unwrap();
        s.set_feedback("mantido");
        s.reset();
        assert_eq!(s.overall_progress().checked, 0);
        assert_eq!(s.feedback(), "mantido");
        let stored = s.store().load_tasks().unwrap().unwrap();
        assert!(!stored.tasks(1).unwrap()[0].study);
    }

    #[test]
    fn failed_writes_are_reported_but_not_fatal() {
        let mut s = StudySession::open(ReadOnlyStore, fixtures::curriculum::load().unwrap());
        s.set_flag(1, "1-1", TaskFlag::Study, true).unwrap();
        assert!(s.tasks(1)[0].study);
        assert!(s.save_error().unwrap().contains("disk full"));
        s.set_weekly_goal("x");
        assert_eq!(s.weekly_goal(), "x");
    }

    #[test]
    fn remaining_weeks_go_negative_after_the_target() {
        let s = session();
        assert_eq!(s.weeks_remaining(1), 23);
        assert_eq!(s.weeks_remaining(24), 0);
        assert_eq!(s.weeks_remaining(30), -6);
    }
}
