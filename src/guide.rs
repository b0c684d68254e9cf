//! Static study guidance shown next to the checklist: the suggested daily
//! schedule, weekend rules, goal-setting tips and reflection prompts.

use crate::models::TaskFlag;

pub struct ScheduleSlot {
    pub flag: TaskFlag,
    pub module: &'static str,
    pub focus: &'static str,
    pub minutes: u32,
}

/// Weekday routine, in the order it is meant to be done.
pub const DAILY_SCHEDULE: [ScheduleSlot; 5] = [
    ScheduleSlot {
        flag: TaskFlag::Devotional,
        module: "Devocional",
        focus: "Oração e Leitura Bíblica (Não-Estudo)",
        minutes: 30,
    },
    ScheduleSlot {
        flag: TaskFlag::Study,
        module: "Estudo (Leitura/Pesquisa)",
        focus: "Absorção de novo conteúdo e anotações",
        minutes: 45,
    },
    ScheduleSlot {
        flag: TaskFlag::Practice,
        module: "Prática (Exercício/Resumo)",
        focus: "Aplicação, síntese e produção de conteúdo",
        minutes: 30,
    },
    ScheduleSlot {
        flag: TaskFlag::Test,
        module: "Teste (Avaliação/Questionário)",
        focus: "Verificação rápida de aprendizado e identificação de lacunas",
        minutes: 15,
    },
    ScheduleSlot {
        flag: TaskFlag::Review,
        module: "Revisão (Notas)",
        focus: "Fixação e retenção do conteúdo do dia",
        minutes: 15,
    },
];

pub const WEEKEND_NOTES: [(&str, &str); 2] = [
    (
        "Sábado",
        "2 horas para Revisão Semanal, Teste Semanal ou recuperação de tarefas pendentes.",
    ),
    ("Domingo", "Dia de Descanso e Contemplação (0 horas de estudo formal)."),
];

pub const WEEKS_IN_PLAN: u32 = 32;
pub const PLAN_DURATION: &str = "≈ 8 meses";

pub const REFLECTION_PROMPTS: [&str; 4] = [
    "O que foi mais desafiador hoje?",
    "Qual foi o insight mais importante?",
    "Como posso aplicar isso na prática?",
    "Preciso revisar algum conceito?",
];

pub const ANTI_PROCRASTINATION: [&str; 2] = [
    "Regra das 2 Horas Inegociáveis: o estudo deve ser agendado no calendário como um compromisso fixo.",
    "Se falhar, a recuperação deve ocorrer no dia seguinte, antes do novo estudo.",
];

pub const SUCCESS_TIPS: [&str; 4] = [
    "Estude sempre no mesmo horário",
    "Use a técnica Pomodoro (50/10)",
    "Crie flashcards para recuperação ativa",
    "Pratique explicando para alguém",
];

pub fn phase_title(phase: u8) -> &'static str {
    match phase {
        1 => "Teologia Sistemática - Fundamentos",
        2 => "Teologia Sistemática - Conclusão + Bíblica",
        3 => "Teologia Histórica",
        4 => "Teologia Prática e Revisão",
        _ => "Fase extra",
    }
}

pub fn daily_minutes() -> u32 {
    DAILY_SCHEDULE.iter().map(|s| s.minutes).sum()
}

/// Goal-setting tips, the first one naming the week's sub-area.
pub fn goal_tips(sub_area: &str) -> [String; 4] {
    [
        format!("Seja específico: não apenas \"estudar\", mas \"dominar {sub_area}\""),
        "Seja mensurável: \"conseguir explicar em 5 minutos\"".to_string(),
        "Seja realista: considere as 2 horas diárias disponíveis".to_string(),
        "Alinhe com o objetivo final: \"ensino\"".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_routine_covers_every_flag_once() {
        assert_eq!(daily_minutes(), 135);
        for flag in TaskFlag::ALL {
            assert_eq!(DAILY_SCHEDULE.iter().filter(|s| s.flag == flag).count(), 1);
        }
    }

    #[test]
    fn goal_tips_mention_the_sub_area() {
        assert!(goal_tips("Pneumatologia")[0].contains("dominar Pneumatologia"));
    }
}
