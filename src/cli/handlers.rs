use anyhow::{Context, Result, anyhow, bail};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::AppConfig;
use crate::db::repository::KvRepo;
use crate::export;
use crate::filter::{TypeFilter, filter_catalog, filter_resources};
use crate::guide;
use crate::models::{Category, DailyTask, TaskFlag, WeekRecord};
use crate::progress::{NOMINAL_WEEK_DAYS, Progress, task_score};
use crate::session::StudySession;
use crate::store::{ProgressStore, SqliteStore, TASKS_KEY};
use crate::utils::format::{self, format_minutes, format_percent, pad, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

#[allow(unused_macros)]
macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

const BLUE: &str = "\x1b[34m";
const PURPLE: &str = "\x1b[35m";
const ORANGE: &str = "\x1b[38;5;208m";

fn phase_color(phase: u8) -> &'static str {
    match phase {
        1 => BLUE,
        2 => PURPLE,
        3 => GREEN,
        4 => ORANGE,
        _ => DIM,
    }
}

// ─── Week ────────────────────────────────────────────────────────────────────

pub fn handle_week<S: ProgressStore>(
    session: &StudySession<S>,
    config: &AppConfig,
    week: Option<u32>,
) -> Result<()> {
    let record = resolve_week(session, week.unwrap_or(config.study.current_week))?;
    let n = record.week;
    let last = session.curriculum().last_week();

    println!();
    println_colored!(GOLD, "  Semana {} de {}  ·  {}", n, last, record.sub_area);
    println!();
    println!("  Macroárea:  {}", record.macro_area);
    println!("  Subárea:    {}", record.sub_area);
    println_colored!(phase_color(record.phase), "  Fase:       {}", record.phase);
    println!("  Objetivo:   {}", record.objective);
    println!();

    let overall = session.overall_progress();
    let this_week = session.week_progress(n);
    print_card("Progresso Geral", overall);
    print_card(&format!("Semana {}", n), this_week);
    println!(
        "  {}  {}/{}",
        pad("Dias Completos", 16),
        session.completed_days(n),
        NOMINAL_WEEK_DAYS
    );
    println!(
        "  {}  {} semanas {}",
        pad("Prazo Total", 16),
        guide::WEEKS_IN_PLAN,
        guide::PLAN_DURATION
    );

    println!();
    println_colored!(BOLD, "  Checklist Diário");
    println!();
    for (i, task) in session.tasks(n).iter().enumerate() {
        print_task(i + 1, task);
    }
    println!();
    println_colored!(DIM, "  trilha check {} <dia> <estudo|pratica|teste|revisao|devocional>", n);
    println!();
    Ok(())
}

fn print_card(label: &str, progress: Progress) {
    let color = if progress.is_complete() { GREEN } else { BOLD };
    println_colored!(
        color,
        "  {}  {:>4}  {}  ({}/{})",
        pad(label, 16),
        format_percent(progress),
        progress_bar(progress.checked, progress.total, 20),
        progress.checked,
        progress.total
    );
}

fn print_task(position: usize, task: &DailyTask) {
    let score = task_score(task);
    let color = match score {
        5 => GREEN,
        0 => DIM,
        _ => AMBER,
    };
    let marks: String = TaskFlag::ALL
        .iter()
        .map(|f| {
            if task.flag(*f) {
                f.label().chars().take(1).collect()
            } else {
                "·".to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println_colored!(
        color,
        "  {}. [{}] {}/5  {}",
        position,
        marks,
        score,
        pad(&task.day, 14)
    );
    println!("        {}", task.content);
}

// ─── Check ───────────────────────────────────────────────────────────────────

pub fn handle_check<S: ProgressStore>(
    session: &mut StudySession<S>,
    week: u32,
    day: &str,
    flag: &str,
    off: bool,
) -> Result<()> {
    let flag = TaskFlag::from_str(flag).map_err(|_| {
        anyhow!(
            "Unknown activity '{}'. Use: estudo, pratica, teste, revisao, devocional",
            flag
        )
    })?;
    let (task_id, day_label) = {
        let task = session.resolve_task(week, day)?;
        (task.id.clone(), task.day.clone())
    };

    session.set_flag(week, &task_id, flag, !off)?;

    if let Some(err) = session.save_error() {
        bail!("Não foi possível salvar o progresso: {}", err);
    }
    if off {
        println_colored!(DIM, "  ○ {} — {} desmarcado (semana {})", day_label, flag.label(), week);
    } else {
        println_colored!(GREEN, "  ✓ {} — {} concluído (semana {})", day_label, flag.label(), week);
    }
    let progress = session.week_progress(week);
    println_colored!(DIM, "  Semana {}: {}", week, format_percent(progress));
    Ok(())
}

// ─── Progress ────────────────────────────────────────────────────────────────

pub fn handle_progress<S: ProgressStore>(session: &StudySession<S>, config: &AppConfig) -> Result<()> {
    let curriculum = session.curriculum();
    let current = curriculum.clamp_week(config.study.current_week);

    println!();
    println_colored!(GOLD, "  Progresso");
    println!();
    print_card("Geral", session.overall_progress());
    println!();

    for phase in curriculum.phases() {
        let progress = session.phase_progress(phase);
        let span = curriculum
            .phase_span(phase)
            .map(|(a, b)| format!("Semanas {}-{}", a, b))
            .unwrap_or_default();
        println_colored!(
            phase_color(phase),
            "  Fase {}  {:>4}  {}  {}",
            phase,
            format_percent(progress),
            progress_bar(progress.checked, progress.total, 20),
            span
        );
        println_colored!(DIM, "          {}", guide::phase_title(phase));
    }

    println!();
    println_colored!(DIM, "  Semanas  (● = 100%, ◑ = iniciada, ○ = 0%, [ ] = atual)");
    println!();
    for row in curriculum.weeks().chunks(8) {
        print!("  ");
        for record in row {
            let progress = session.week_progress(record.week);
            let icon = if progress.is_complete() {
                format!("{}●\x1b[0m", GREEN)
            } else if progress.checked > 0 {
                format!("{}◑\x1b[0m", AMBER)
            } else {
                format!("{}○\x1b[0m", DIM)
            };
            if record.week == current {
                print!("{}[{:>2} {}]\x1b[0m ", GOLD, record.week, icon);
            } else {
                print!(" {:>2} {}  ", record.week, icon);
            }
        }
        println!();
    }
    println!();
    Ok(())
}

// ─── Resources ───────────────────────────────────────────────────────────────

pub fn handle_resources<S: ProgressStore>(
    session: &StudySession<S>,
    config: &AppConfig,
    week: Option<u32>,
    search: Option<&str>,
    kind: &str,
) -> Result<()> {
    let record = resolve_week(session, week.unwrap_or(config.study.current_week))?;
    let kind = TypeFilter::from_str(kind)?;
    let query = search.unwrap_or("");

    println!();
    println_colored!(GOLD, "  Recursos Adicionais  ·  Semana {} ({})", record.week, record.sub_area);
    println!();

    if record.resources().is_empty() {
        println_colored!(AMBER, "  Nenhum recurso adicional encontrado");
        println_colored!(DIM, "  Os recursos para esta semana serão adicionados em breve.");
        println!();
        return Ok(());
    }

    let found = filter_resources(record.resources(), query, kind);
    if found.is_empty() {
        println_colored!(AMBER, "  Nenhum recurso encontrado");
        println_colored!(DIM, "  Ajuste os termos de busca ou o filtro de tipo (--type todos).");
        println!();
        return Ok(());
    }

    for resource in found {
        let color = match resource.kind {
            crate::models::ResourceType::Leitura => BLUE,
            crate::models::ResourceType::Video => RED,
        };
        print_colored!(color, "  [{}] ", pad(resource.kind.label(), 7));
        println_colored!(BOLD, "{}", resource.title);
        println_colored!(DIM, "            {}", resource.url);
    }
    println!();
    Ok(())
}

// ─── Goal & feedback ─────────────────────────────────────────────────────────

pub fn handle_goal<S: ProgressStore>(
    session: &mut StudySession<S>,
    config: &AppConfig,
    text: Option<String>,
    clear: bool,
) -> Result<()> {
    let week = session.curriculum().clamp_week(config.study.current_week);

    if clear || text.is_some() {
        session.set_weekly_goal(text.unwrap_or_default());
        return report_save(session, "Meta atualizada");
    }

    let record = resolve_week(session, week)?;
    println!();
    println_colored!(GOLD, "  Meta para a Semana {}", week);
    println!();
    if session.weekly_goal().is_empty() {
        println_colored!(DIM, "  Ex: {}", record.objective);
    } else {
        for line in session.weekly_goal().lines() {
            println!("  {}", line);
        }
    }
    println!();
    println_colored!(BLUE, "  Dica: Como Definir Boas Metas");
    for tip in guide::goal_tips(&record.sub_area) {
        println_colored!(DIM, "  ✓ {}", tip);
    }
    println!();
    println!(
        "  Dias Completos: {}   Progresso: {}   Semana Atual: {}   Restantes: {}",
        session.completed_days(week),
        format_percent(session.week_progress(week)),
        week,
        session.weeks_remaining(week)
    );
    println!();
    Ok(())
}

pub fn handle_feedback<S: ProgressStore>(
    session: &mut StudySession<S>,
    text: Option<String>,
    clear: bool,
) -> Result<()> {
    if clear || text.is_some() {
        session.set_feedback(text.unwrap_or_default());
        return report_save(session, "Feedback salvo");
    }

    println!();
    println_colored!(GOLD, "  Feedback Pessoal");
    println!();
    if session.feedback().is_empty() {
        println_colored!(DIM, "  (vazio) Registre reflexões com: trilha feedback \"...\"");
    } else {
        for line in session.feedback().lines() {
            println!("  {}", line);
        }
    }
    println!();
    println_colored!(GREEN, "  Perguntas para Reflexão");
    for prompt in guide::REFLECTION_PROMPTS {
        println_colored!(DIM, "  • {}", prompt);
    }
    println!();
    println_colored!(AMBER, "  Sistema Anti-Procrastinação");
    for line in guide::ANTI_PROCRASTINATION {
        println_colored!(DIM, "  {}", line);
    }
    println!();
    Ok(())
}

fn report_save<S: ProgressStore>(session: &StudySession<S>, done: &str) -> Result<()> {
    if let Some(err) = session.save_error() {
        bail!("Não foi possível salvar: {}", err);
    }
    println_colored!(GREEN, "  ✓ {}", done);
    Ok(())
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

pub fn handle_catalog(categories: &[Category], search: Option<&str>) -> Result<()> {
    let query = search.unwrap_or("");
    let filtered = filter_catalog(categories, query);

    println!();
    println_colored!(GOLD, "  Materiais de Estudo de Teologia");
    println!();

    if filtered.is_empty() {
        println_colored!(AMBER, "  Nenhum material encontrado para \"{}\"", query);
        println_colored!(DIM, "  Rode sem --search para ver a lista completa.");
        println!();
        return Ok(());
    }

    for category in &filtered {
        println_colored!(
            BOLD,
            "  {} {}  ({} materiais)",
            category.icon.glyph(),
            category.name,
            category.material_count()
        );
        println_colored!(DIM, "     {}", category.description);
        for sub in &category.sub_categories {
            println!("     - {}  [{}]", sub.name, sub.materials.len());
            for material in &sub.materials {
                println!("         • {}: {}", material.name, material.details);
            }
        }
        println!();
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(
    categories: &[Category],
    config: &AppConfig,
    search: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let filtered = filter_catalog(categories, search.unwrap_or(""));
    let bytes = export::render_document(&filtered)?;
    let path = output.unwrap_or_else(|| config.export_path());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Creating {:?}", parent))?;
    }
    std::fs::write(&path, &bytes).with_context(|| format!("Writing {:?}", path))?;
    log::info!("Exported {} bytes to {:?}", bytes.len(), path);

    let count: usize = filtered.iter().map(Category::material_count).sum();
    println_colored!(GREEN, "  ✓ {} materiais exportados para {}", count, path.display());
    Ok(())
}

// ─── Schedule ────────────────────────────────────────────────────────────────

pub fn handle_schedule() -> Result<()> {
    println!();
    println_colored!(GOLD, "  Cronograma Diário Sugerido (Segunda a Sexta)");
    println!();
    println_colored!(BOLD, "  #  {}  {}  Tempo", pad("Módulo", 30), pad("Foco", 62));
    for slot in &guide::DAILY_SCHEDULE {
        println!(
            "  {}  {}  {}  {}",
            slot.flag.number(),
            pad(slot.module, 30),
            pad(slot.focus, 62),
            format_minutes(slot.minutes)
        );
    }
    println!();
    println_colored!(DIM, "  Total diário: {}", format_minutes(guide::daily_minutes()));
    println_colored!(DIM, "  Marque com: trilha check <semana> <dia> <#>");
    println!();
    for (day, note) in guide::WEEKEND_NOTES {
        println_colored!(BLUE, "  {}: {}", day, note);
    }
    println!();
    println_colored!(BOLD, "  Dicas de Sucesso");
    for tip in guide::SUCCESS_TIPS {
        println_colored!(DIM, "  ✓ {}", tip);
    }
    println!();
    Ok(())
}

// ─── Reset ───────────────────────────────────────────────────────────────────

pub fn handle_reset<S: ProgressStore>(session: &mut StudySession<S>, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt("  Apagar todo o progresso das 32 semanas? [s/N] ")?;
        if !matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes") {
            println_colored!(DIM, "  Nada foi alterado");
            return Ok(());
        }
    }
    session.reset();
    report_save(session, "Progresso reiniciado")
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(session: &StudySession<SqliteStore>, config: &AppConfig) -> Result<()> {
    println!();
    println_colored!(GOLD, "  trilha");
    println!();
    println!("  Config:       {}", AppConfig::config_path()?.display());
    println!("  Database:     {}", AppConfig::db_path()?.display());
    println!("  Export:       {}", config.export_path().display());
    println!("  Current week: {}", config.study.current_week);
    println!("  Tick rate:    {} ms", config.ui.tick_rate_ms);
    let saved = KvRepo::updated_at(session.store().connection(), TASKS_KEY)?;
    let saved = saved.map(|raw| format::format_timestamp(&raw));
    println!("  Last saved:   {}", saved.as_deref().unwrap_or("never"));
    println!();
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn resolve_week<S: ProgressStore>(session: &StudySession<S>, week: u32) -> Result<&WeekRecord> {
    let curriculum = session.curriculum();
    match session.week(week) {
        Some(record) => Ok(record),
        None => bail!(
            "Week {} is out of range ({}-{})",
            week,
            curriculum.first_week(),
            curriculum.last_week()
        ),
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::store::MemoryStore;

    struct FailingStore;

    impl ProgressStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("disco cheio ao gravar {}", key))
        }
        fn remove(&mut self, key: &str) -> Result<()> {
            Err(anyhow!("disco cheio ao apagar {}", key))
        }
    }

    fn session() -> StudySession<MemoryStore> {
        StudySession::open(MemoryStore::default(), fixtures::curriculum::load().unwrap())
    }

    #[test]
    fn check_sets_and_clears_a_flag() {
        let mut s = session();
        handle_check(&mut s, 2, "terça", "revisão", false).unwrap();
        assert!(s.tasks(2)[1].review);
        handle_check(&mut s, 2, "2-2", "review", true).unwrap();
        assert!(!s.tasks(2)[1].review);
    }

    #[test]
    fn check_rejects_unknown_input() {
        let mut s = session();
        assert!(handle_check(&mut s, 2, "1", "sono", false).is_err());
        assert!(handle_check(&mut s, 99, "1", "estudo", false).is_err());
    }

    #[test]
    fn out_of_range_week_is_an_error() {
        let s = session();
        let config = AppConfig::default();
        assert!(handle_week(&s, &config, Some(33)).is_err());
        assert!(handle_week(&s, &config, Some(5)).is_ok());
        assert!(handle_resources(&s, &config, Some(0), None, "todos").is_err());
        assert!(handle_resources(&s, &config, Some(1), Some("x"), "podcast").is_err());
    }

    #[test]
    fn goal_and_feedback_are_stored() {
        let mut s = session();
        let config = AppConfig::default();
        handle_goal(&mut s, &config, Some("Ler Berkhof".to_string()), false).unwrap();
        handle_feedback(&mut s, Some("Dúvida sobre kenosis".to_string()), false).unwrap();
        assert_eq!(s.weekly_goal(), "Ler Berkhof");
        assert_eq!(s.feedback(), "Dúvida sobre kenosis");

        handle_goal(&mut s, &config, None, true).unwrap();
        assert_eq!(s.weekly_goal(), "");
    }

    #[test]
    fn export_writes_a_pdf_and_refuses_empty_results() {
        let dir = tempfile::tempdir().unwrap();
        let categories = fixtures::catalog::load().unwrap();
        let config = AppConfig::default();

        let path = dir.path().join("out").join("materiais.pdf");
        handle_export(&categories, &config, None, Some(path.clone())).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));

        let missing = dir.path().join("nada.pdf");
        assert!(handle_export(&categories, &config, Some("zzzz-inexistente"), Some(missing.clone())).is_err());
        assert!(!missing.exists());
    }

    #[test]
    fn failed_writes_make_one_shot_commands_fail() {
        let mut s = StudySession::open(FailingStore, fixtures::curriculum::load().unwrap());
        let config = AppConfig::default();

        let err = handle_check(&mut s, 1, "1", "estudo", false).unwrap_err();
        assert!(err.to_string().contains("Não foi possível salvar"));
        assert!(handle_goal(&mut s, &config, Some("Ler".to_string()), false).is_err());
        assert!(handle_feedback(&mut s, None, true).is_err());
        assert!(handle_reset(&mut s, true).is_err());
    }
}
