use serde::Deserialize;
use std::collections::HashSet;

use crate::fixtures::FixtureError;
use crate::models::{AdditionalResource, Curriculum, DailyTask, WeekRecord};

const CURRICULUM_JSON: &str = include_str!("../../data/curriculum.json");

const MIN_TASKS: usize = 5;
const MAX_TASKS: usize = 7;
const PHASES: std::ops::RangeInclusive<u8> = 1..=4;

#[derive(Deserialize)]
struct CurriculumFile {
    weeks: Vec<RawWeek>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeek {
    week: u32,
    macro_area: String,
    sub_area: String,
    phase: u8,
    objective: String,
    days: Vec<RawDay>,
    #[serde(default)]
    additional_resources: Option<Vec<AdditionalResource>>,
}

/// A day entry; descriptions left out fall back to the daily schedule.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDay {
    day: String,
    content: String,
    study_desc: Option<String>,
    practice_desc: Option<String>,
    test_desc: Option<String>,
    review_desc: Option<String>,
    devotional_desc: Option<String>,
}

impl RawDay {
    fn into_task(self, week: u32, position: usize) -> DailyTask {
        let content = self.content.as_str();
        let study = self
            .study_desc
            .unwrap_or_else(|| format!("45 min de leitura dirigida e anotações: {content}."));
        let practice = self
            .practice_desc
            .unwrap_or_else(|| format!("30 min: escreva um resumo de uma página sobre {content}."));
        let test = self
            .test_desc
            .unwrap_or_else(|| format!("15 min: responda sem consulta a três perguntas sobre {content}."));
        let review = self
            .review_desc
            .unwrap_or_else(|| "15 min: releia as anotações do dia e registre as dúvidas.".to_string());
        let devotional = self
            .devotional_desc
            .unwrap_or_else(|| "30 min de oração e leitura bíblica, sem finalidade de estudo.".to_string());

        let mut task = DailyTask::new(format!("{week}-{position}"), self.day, self.content);
        task.study_desc = study;
        task.practice_desc = practice;
        task.test_desc = test;
        task.review_desc = review;
        task.devotional_desc = devotional;
        task
    }
}

/// Parse and validate the embedded 32-week plan.
pub fn load() -> Result<Curriculum, FixtureError> {
    parse(CURRICULUM_JSON)
}

fn parse(json: &str) -> Result<Curriculum, FixtureError> {
    let file: CurriculumFile = serde_json::from_str(json).map_err(|source| FixtureError::Parse {
        name: "curriculum",
        source,
    })?;

    let weeks: Vec<WeekRecord> = file
        .weeks
        .into_iter()
        .map(|raw| WeekRecord {
            week: raw.week,
            tasks: raw
                .days
                .into_iter()
                .enumerate()
                .map(|(i, day)| day.into_task(raw.week, i + 1))
                .collect(),
            macro_area: raw.macro_area,
            sub_area: raw.sub_area,
            phase: raw.phase,
            objective: raw.objective,
            additional_resources: raw.additional_resources,
        })
        .collect();

    validate(&weeks)?;
    Ok(Curriculum::new(weeks))
}

fn validate(weeks: &[WeekRecord]) -> Result<(), FixtureError> {
    for (i, week) in weeks.iter().enumerate() {
        let expected = i as u32 + 1;
        if week.week != expected {
            return Err(FixtureError::Invalid(format!(
                "expected week {expected}, found week {}",
                week.week
            )));
        }
        if !PHASES.contains(&week.phase) {
            return Err(FixtureError::Invalid(format!(
                "week {} has phase {}",
                week.week, week.phase
            )));
        }
        if !(MIN_TASKS..=MAX_TASKS).contains(&week.tasks.len()) {
            return Err(FixtureError::Invalid(format!(
                "week {} has {} tasks",
                week.week,
                week.tasks.len()
            )));
        }
        let mut ids = HashSet::new();
        if !week.tasks.iter().all(|t| ids.insert(t.id.as_str())) {
            return Err(FixtureError::Invalid(format!(
                "week {} repeats a task id",
                week.week
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceType;

    #[test]
    fn embedded_curriculum_has_32_valid_weeks() {
        let c = load().unwrap();
        assert_eq!(c.weeks().len(), 32);
        assert_eq!(c.first_week(), 1);
        assert_eq!(c.last_week(), 32);
        assert_eq!(c.phases(), vec![1, 2, 3, 4]);
        assert_eq!(c.phase_span(1), Some((1, 6)));
        assert_eq!(c.phase_span(3), Some((13, 18)));
        assert!(c.weeks().iter().all(|w| (5..=7).contains(&w.tasks.len())));
    }

    #[test]
    fn tasks_start_unchecked_with_schedule_descriptions() {
        let c = load().unwrap();
        let week = c.week(2).unwrap();
        assert_eq!(week.tasks[0].id, "2-1");
        assert!(week.tasks.iter().all(|t| !t.study && !t.devotional));
        assert!(week.tasks[0].study_desc.contains(&week.tasks[0].content));
    }

    #[test]
    fn explicit_descriptions_override_the_schedule() {
        let c = load().unwrap();
        let sunday = c.week(24).unwrap().tasks.last().unwrap().clone();
        assert_eq!(sunday.day, "Domingo");
        assert!(sunday.study_desc.starts_with("Sem estudo formal"));
    }

    #[test]
    fn resources_keep_their_type() {
        let c = load().unwrap();
        let kinds: Vec<ResourceType> = c.week(1).unwrap().resources().iter().map(|r| r.kind).collect();
        assert!(kinds.contains(&ResourceType::Leitura));
        assert!(kinds.contains(&ResourceType::Video));
        assert!(c.week(24).unwrap().resources().is_empty());
    }

    #[test]
    fn rejects_out_of_order_weeks() {
        let json = r#"{"weeks":[{"week":2,"macroArea":"a","subArea":"b","phase":1,"objective":"c",
            "days":[{"day":"1","content":"x"},{"day":"2","content":"x"},{"day":"3","content":"x"},
                    {"day":"4","content":"x"},{"day":"5","content":"x"}]}]}"#;
        assert!(matches!(parse(json), Err(FixtureError::Invalid(_))));
    }

    #[test]
    fn rejects_short_weeks_and_bad_json() {
        let json = r#"{"weeks":[{"week":1,"macroArea":"a","subArea":"b","phase":1,"objective":"c",
            "days":[{"day":"1","content":"x"}]}]}"#;
        assert!(matches!(parse(json), Err(FixtureError::Invalid(_))));
        assert!(matches!(parse("{"), Err(FixtureError::Parse { .. })));
    }
}
