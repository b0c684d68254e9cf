use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the five independent completion flags of a daily task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskFlag {
    Study,
    Practice,
    Test,
    Review,
    Devotional,
}

impl TaskFlag {
    pub const ALL: [TaskFlag; 5] = [
        TaskFlag::Study,
        TaskFlag::Practice,
        TaskFlag::Test,
        TaskFlag::Review,
        TaskFlag::Devotional,
    ];

    /// 1-based position: the TUI number key and the numeric form accepted
    /// by `trilha check`.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).map_or(0, |i| i + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFlag::Study => "Estudo",
            TaskFlag::Practice => "Prática",
            TaskFlag::Test => "Teste",
            TaskFlag::Review => "Revisão",
            TaskFlag::Devotional => "Devocional",
        }
    }

    /// 1-based position, used for the TUI number keys.
    pub fn from_index(n: usize) -> Option<TaskFlag> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl std::fmt::Display for TaskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TaskFlag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "study" | "estudo" => Ok(TaskFlag::Study),
            "2" | "practice" | "pratica" | "prática" => Ok(TaskFlag::Practice),
            "3" | "test" | "teste" => Ok(TaskFlag::Test),
            "4" | "review" | "revisao" | "revisão" => Ok(TaskFlag::Review),
            "5" | "devotional" | "devocional" => Ok(TaskFlag::Devotional),
            _ => Err(anyhow::anyhow!("Unknown task flag: {}", s)),
        }
    }
}

/// A single day of study. Only the five flags change at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub id: String,
    pub day: String,
    pub content: String,
    #[serde(default)]
    pub study: bool,
    #[serde(default)]
    pub practice: bool,
    #[serde(default)]
    pub test: bool,
    #[serde(default)]
    pub review: bool,
    #[serde(default)]
    pub devotional: bool,
    #[serde(default)]
    pub study_desc: String,
    #[serde(default)]
    pub practice_desc: String,
    #[serde(default)]
    pub test_desc: String,
    #[serde(default)]
    pub review_desc: String,
    #[serde(default)]
    pub devotional_desc: String,
}

impl DailyTask {
    /// A task with every flag cleared and no descriptions.
    pub fn new(id: impl Into<String>, day: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            day: day.into(),
            content: content.into(),
            study: false,
            practice: false,
            test: false,
            review: false,
            devotional: false,
            study_desc: String::new(),
            practice_desc: String::new(),
            test_desc: String::new(),
            review_desc: String::new(),
            devotional_desc: String::new(),
        }
    }

    pub fn flag(&self, flag: TaskFlag) -> bool {
        match flag {
            TaskFlag::Study => self.study,
            TaskFlag::Practice => self.practice,
            TaskFlag::Test => self.test,
            TaskFlag::Review => self.review,
            TaskFlag::Devotional => self.devotional,
        }
    }

    pub fn set_flag(&mut self, flag: TaskFlag, value: bool) {
        match flag {
            TaskFlag::Study => self.study = value,
            TaskFlag::Practice => self.practice = value,
            TaskFlag::Test => self.test = value,
            TaskFlag::Review => self.review = value,
            TaskFlag::Devotional => self.devotional = value,
        }
    }

    pub fn description(&self, flag: TaskFlag) -> &str {
        match flag {
            TaskFlag::Study => &self.study_desc,
            TaskFlag::Practice => &self.practice_desc,
            TaskFlag::Test => &self.test_desc,
            TaskFlag::Review => &self.review_desc,
            TaskFlag::Devotional => &self.devotional_desc,
        }
    }

    /// Copy the flag values of `other` onto this task.
    pub fn copy_flags_from(&mut self, other: &DailyTask) {
        for flag in TaskFlag::ALL {
            self.set_flag(flag, other.flag(flag));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Leitura,
    #[serde(rename = "Vídeo")]
    Video,
}

impl ResourceType {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Leitura => "Leitura",
            ResourceType::Video => "Vídeo",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalResource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRecord {
    pub week: u32,
    pub macro_area: String,
    pub sub_area: String,
    pub phase: u8,
    pub objective: String,
    pub tasks: Vec<DailyTask>,
    #[serde(default)]
    pub additional_resources: Option<Vec<AdditionalResource>>,
}

impl WeekRecord {
    pub fn resources(&self) -> &[AdditionalResource] {
        self.additional_resources.as_deref().unwrap_or(&[])
    }

    /// Label used by week selectors: "Semana N - subárea (Fase P)".
    pub fn selector_label(&self) -> String {
        format!("Semana {} - {} (Fase {})", self.week, self.sub_area, self.phase)
    }
}

/// The ordered, read-only 32-week study plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Curriculum {
    weeks: Vec<WeekRecord>,
}

impl Curriculum {
    pub fn new(weeks: Vec<WeekRecord>) -> Self {
        Self { weeks }
    }

    pub fn weeks(&self) -> &[WeekRecord] {
        &self.weeks
    }

    pub fn week(&self, week: u32) -> Option<&WeekRecord> {
        self.weeks.iter().find(|w| w.week == week)
    }

    pub fn first_week(&self) -> u32 {
        self.weeks.first().map(|w| w.week).unwrap_or(1)
    }

    pub fn last_week(&self) -> u32 {
        self.weeks.last().map(|w| w.week).unwrap_or(1)
    }

    pub fn clamp_week(&self, week: u32) -> u32 {
        week.clamp(self.first_week(), self.last_week())
    }

    /// Distinct phase numbers in ascending order.
    pub fn phases(&self) -> Vec<u8> {
        let mut phases: Vec<u8> = self.weeks.iter().map(|w| w.phase).collect();
        phases.sort_unstable();
        phases.dedup();
        phases
    }

    /// First and last week belonging to `phase`.
    pub fn phase_span(&self, phase: u8) -> Option<(u32, u32)> {
        let mut weeks = self.weeks.iter().filter(|w| w.phase == phase).map(|w| w.week);
        let first = weeks.next()?;
        let last = weeks.last().unwrap_or(first);
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> DailyTask {
        DailyTask::new(id, "Segunda-feira", "Revelação")
    }

    #[test]
    fn flags_are_independent() {
        let mut t = task("1-1");
        t.set_flag(TaskFlag::Test, true);
        for flag in TaskFlag::ALL {
            assert_eq!(t.flag(flag), flag == TaskFlag::Test);
        }
    }

    #[test]
    fn flag_parsing_accepts_both_languages() {
        assert_eq!("revisão".parse::<TaskFlag>().unwrap(), TaskFlag::Review);
        assert_eq!("Pratica".parse::<TaskFlag>().unwrap(), TaskFlag::Practice);
        assert_eq!("devotional".parse::<TaskFlag>().unwrap(), TaskFlag::Devotional);
        assert_eq!("1".parse::<TaskFlag>().unwrap(), TaskFlag::Study);
        assert!("sono".parse::<TaskFlag>().is_err());
        assert_eq!(TaskFlag::from_index(5), Some(TaskFlag::Devotional));
        assert_eq!(TaskFlag::from_index(0), None);
        for flag in TaskFlag::ALL {
            assert_eq!(TaskFlag::from_index(flag.number()), Some(flag));
            assert_eq!(flag.number().to_string().parse::<TaskFlag>().unwrap(), flag);
        }
    }

    #[test]
    fn task_json_uses_camel_case_fields() {
        let mut t = task("2-3");
        t.study_desc = "Ler".to_string();
        t.review = true;
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["studyDesc"], "Ler");
        assert_eq!(json["review"], true);
    }

    #[test]
    fn resource_type_uses_accented_label() {
        let r: AdditionalResource =
            serde_json::from_str(r#"{"title":"x","url":"u","type":"Vídeo"}"#).unwrap();
        assert_eq!(r.kind, ResourceType::Video);
        assert_eq!(r.kind.to_string(), "Vídeo");
    }

    #[test]
    fn phase_span_covers_first_and_last_week() {
        let week = |n: u32, phase: u8| WeekRecord {
            week: n,
            macro_area: String::new(),
            sub_area: String::new(),
            phase,
            objective: String::new(),
            tasks: vec![task(&format!("{n}-1"))],
            additional_resources: None,
        };
        let c = Curriculum::new(vec![week(1, 1), week(2, 1), week(3, 2)]);
        assert_eq!(c.phase_span(1), Some((1, 2)));
        assert_eq!(c.phase_span(2), Some((3, 3)));
        assert_eq!(c.phase_span(4), None);
        assert_eq!(c.phases(), vec![1, 2]);
        assert_eq!(c.clamp_week(0), 1);
        assert_eq!(c.clamp_week(40), 3);
    }
}
