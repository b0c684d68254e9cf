use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::{Curriculum, DailyTask, TaskFlag};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("week {0} is not part of the curriculum")]
    UnknownWeek(u32),
    #[error("week {week} has no task '{id}'")]
    UnknownTask { week: u32, id: String },
}

/// Live, user-editable copy of every week's tasks, keyed by week number.
///
/// Serialises as a JSON object whose keys are the week numbers as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressState {
    weeks: BTreeMap<u32, Vec<DailyTask>>,
}

impl ProgressState {
    /// Deep copy of the fixture for every week.
    pub fn from_curriculum(curriculum: &Curriculum) -> Self {
        let weeks = curriculum
            .weeks()
            .iter()
            .map(|w| (w.week, w.tasks.clone()))
            .collect();
        Self { weeks }
    }

    pub fn tasks(&self, week: u32) -> Option<&[DailyTask]> {
        self.weeks.get(&week).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[DailyTask])> {
        self.weeks.iter().map(|(w, t)| (*w, t.as_slice()))
    }

    pub fn set_flag(
        &mut self,
        week: u32,
        task_id: &str,
        flag: TaskFlag,
        value: bool,
    ) -> Result<(), StateError> {
        let tasks = self
            .weeks
            .get_mut(&week)
            .ok_or(StateError::UnknownWeek(week))?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StateError::UnknownTask {
                week,
                id: task_id.to_string(),
            })?;
        task.set_flag(flag, value);
        Ok(())
    }

    /// Bring the state back in line with the fixture.
    ///
    /// A stored week keeps its flags only when its task identifiers match the
    /// fixture in order and count; the template text is always refreshed from
    /// the fixture. Missing weeks are added, unknown weeks dropped. Returns the
    /// weeks whose stored tasks had to be discarded.
    pub fn reconcile(&mut self, curriculum: &Curriculum) -> Vec<u32> {
        let mut discarded = Vec::new();
        let mut weeks = BTreeMap::new();

        for record in curriculum.weeks() {
            let mut fresh = record.tasks.clone();
            match self.weeks.get(&record.week) {
                Some(stored) if same_shape(stored, &fresh) => {
                    for (task, old) in fresh.iter_mut().zip(stored) {
                        task.copy_flags_from(old);
                    }
                }
                Some(_) => discarded.push(record.week),
                None => {}
            }
            weeks.insert(record.week, fresh);
        }

        self.weeks = weeks;
        discarded
    }
}

fn same_shape(stored: &[DailyTask], template: &[DailyTask]) -> bool {
    stored.len() == template.len() && stored.iter().zip(template).all(|(a, b)| a.id == b.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekRecord;

    fn curriculum() -> Curriculum {
        let week = |n: u32, days: usize| WeekRecord {
            week: n,
            macro_area: "Teologia Sistemática".to_string(),
            sub_area: format!("Área {n}"),
            phase: 1,
            objective: String::new(),
            tasks: (1..=days)
                .map(|d| DailyTask::new(format!("{n}-{d}"), format!("Dia {d}"), "Conteúdo"))
                .collect(),
            additional_resources: None,
        };
        Curriculum::new(vec![week(1, 2), week(2, 3)])
    }

    #[test]
    fn serialises_week_numbers_as_string_keys() {
        let state = ProgressState::from_curriculum(&curriculum());
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("1").is_some());
        assert_eq!(json["2"].as_array().unwrap().len(), 3);

        let back: ProgressState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn set_flag_reports_unknown_targets() {
        let mut state = ProgressState::from_curriculum(&curriculum());
        state.set_flag(1, "1-2", TaskFlag::Review, true).unwrap();
        assert!(state.tasks(1).unwrap()[1].review);

        assert_eq!(
            state.set_flag(9, "9-1", TaskFlag::Study, true),
            Err(StateError::UnknownWeek(9))
        );
        assert!(matches!(
            state.set_flag(1, "nope", TaskFlag::Study, true),
            Err(StateError::UnknownTask { week: 1, .. })
        ));
    }

    #[test]
    fn reconcile_keeps_flags_of_matching_weeks() {
        let c = curriculum();
        let mut state = ProgressState::from_curriculum(&c);
        state.set_flag(2, "2-3", TaskFlag::Study, true).unwrap();
        state.weeks.get_mut(&2).unwrap()[2].content = "texto antigo".to_string();

        let discarded = state.reconcile(&c);
        assert!(discarded.is_empty());
        let task = &state.tasks(2).unwrap()[2];
        assert!(task.study);
        assert_eq!(task.content, "Conteúdo");
    }

    #[test]
    fn reconcile_resets_diverging_weeks_and_fills_missing_ones() {
        let c = curriculum();
        let mut state = ProgressState::from_curriculum(&c);
        state.set_flag(1, "1-1", TaskFlag::Study, true).unwrap();
        state.weeks.get_mut(&1).unwrap().pop();
        state.weeks.remove(&2);
        state.weeks.insert(40, vec![DailyTask::new("40-1", "x", "y")]);

        let discarded = state.reconcile(&c);
        assert_eq!(discarded, vec![1]);
        assert_eq!(state.iter().count(), 2);
        assert_eq!(state.tasks(1).unwrap().len(), 2);
        assert!(!state.tasks(1).unwrap()[0].study);
        assert_eq!(state.tasks(2).unwrap().len(), 3);
        assert!(state.tasks(40).is_none());
    }
}
