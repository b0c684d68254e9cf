//! Completion percentages rolled up from the per-task flags.
//!
//! A task counts towards the numerator as soon as any of its five flags is
//! set, while the denominator assumes all five. The ratio is therefore
//! "days started" rather than "checkboxes ticked", and is kept that way so
//! the numbers match what users have always been shown.

use crate::models::{Curriculum, DailyTask, ProgressState, TaskFlag};

pub const FLAGS_PER_TASK: u32 = 5;

/// Denominator of the "Dias Completos" card, regardless of the week's task count.
pub const NOMINAL_WEEK_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub checked: u32,
    pub total: u32,
}

impl Progress {
    pub fn of_tasks(tasks: &[DailyTask]) -> Self {
        let started = tasks.iter().filter(|t| task_score(t) > 0).count() as u32;
        Self {
            checked: started * FLAGS_PER_TASK,
            total: tasks.len() as u32 * FLAGS_PER_TASK,
        }
    }

    pub fn merge(self, other: Progress) -> Self {
        Self {
            checked: self.checked + other.checked,
            total: self.total + other.total,
        }
    }

    /// 0–100. An empty denominator is 0%, never NaN.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.checked as f64 / self.total as f64 * 100.0
        }
    }

    pub fn rounded(&self) -> u32 {
        self.percent().round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }
}

pub fn task_score(task: &DailyTask) -> u8 {
    TaskFlag::ALL.iter().filter(|f| task.flag(**f)).count() as u8
}

pub fn day_complete(task: &DailyTask) -> bool {
    TaskFlag::ALL.iter().all(|f| task.flag(*f))
}

pub fn completed_days(tasks: &[DailyTask]) -> u32 {
    tasks.iter().filter(|t| day_complete(t)).count() as u32
}

/// The live tasks of `week`, or the fixture template when the state has none.
pub fn week_tasks<'a>(state: &'a ProgressState, curriculum: &'a Curriculum, week: u32) -> &'a [DailyTask] {
    state
        .tasks(week)
        .or_else(|| curriculum.week(week).map(|w| w.tasks.as_slice()))
        .unwrap_or(&[])
}

pub fn week_progress(state: &ProgressState, curriculum: &Curriculum, week: u32) -> Progress {
    Progress::of_tasks(week_tasks(state, curriculum, week))
}

pub fn phase_progress(state: &ProgressState, curriculum: &Curriculum, phase: u8) -> Progress {
    curriculum
        .weeks()
        .iter()
        .filter(|w| w.phase == phase)
        .map(|w| week_progress(state, curriculum, w.week))
        .fold(Progress::default(), Progress::merge)
}

pub fn overall_progress(state: &ProgressState) -> Progress {
    state
        .iter()
        .map(|(_, tasks)| Progress::of_tasks(tasks))
        .fold(Progress::default(), Progress::merge)
}
