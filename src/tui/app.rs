use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::config::AppConfig;
use crate::export;
use crate::filter::{ResourceFilter, filter_catalog};
use crate::guide;
use crate::models::{Category, TaskFlag};
use crate::session::StudySession;
use crate::store::ProgressStore;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{
    catalog, checklist, header, notes, progress, resources, schedule, stats, statusbar, tabs,
};

/// Ticks a status message stays on screen.
const STATUS_TICKS: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Checklist,
    Progress,
    Schedule,
    Resources,
    Goals,
    Feedback,
    Materials,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Checklist,
        Tab::Progress,
        Tab::Schedule,
        Tab::Resources,
        Tab::Goals,
        Tab::Feedback,
        Tab::Materials,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Checklist => "Checklist",
            Tab::Progress => "Progresso",
            Tab::Schedule => "Cronograma",
            Tab::Resources => "Recursos",
            Tab::Goals => "Metas",
            Tab::Feedback => "Feedback",
            Tab::Materials => "Materiais",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Tab::Checklist => &[
                ("[←→]", "semana"),
                ("[↑↓]", "dia"),
                ("[1-5]", "marcar"),
                ("[Enter]", "detalhes"),
                ("[w]", "ir para"),
                ("[Tab]", "aba"),
                ("[?]", "ajuda"),
                ("[q]", "sair"),
            ],
            Tab::Resources => &[
                ("[/]", "buscar"),
                ("[t]", "tipo"),
                ("[c]", "limpar"),
                ("[←→]", "semana"),
                ("[Tab]", "aba"),
                ("[q]", "sair"),
            ],
            Tab::Goals | Tab::Feedback => &[
                ("[e]", "editar"),
                ("[←→]", "semana"),
                ("[Tab]", "aba"),
                ("[q]", "sair"),
            ],
            Tab::Materials => &[
                ("[/]", "buscar"),
                ("[c]", "limpar"),
                ("[↑↓]", "rolar"),
                ("[x]", "exportar PDF"),
                ("[Tab]", "aba"),
                ("[q]", "sair"),
            ],
            Tab::Progress | Tab::Schedule => &[
                ("[←→]", "semana"),
                ("[w]", "ir para"),
                ("[Tab]", "aba"),
                ("[?]", "ajuda"),
                ("[q]", "sair"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Main,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    ResourceSearch,
    CatalogSearch,
    EditGoal,
    EditFeedback,
    WeekPicker,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct App<S: ProgressStore> {
    pub session: StudySession<S>,
    pub catalog: Vec<Category>,
    pub config: AppConfig,
    pub view: View,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub current_week: u32,
    pub focus_idx: usize,
    pub expanded: Option<String>,
    pub resource_filter: ResourceFilter,
    pub catalog_query: String,
    pub catalog_scroll: u16,
    pub picker_idx: usize,
    pub status: Option<StatusMessage>,
    status_ttl: u8,
    pub should_quit: bool,
}

impl<S: ProgressStore> App<S> {
    pub fn new(session: StudySession<S>, catalog: Vec<Category>, config: AppConfig) -> Self {
        let current_week = session.curriculum().clamp_week(config.study.current_week);
        App {
            session,
            catalog,
            config,
            view: View::Main,
            tab: Tab::Checklist,
            input_mode: InputMode::Normal,
            current_week,
            focus_idx: 0,
            expanded: None,
            resource_filter: ResourceFilter::default(),
            catalog_query: String::new(),
            catalog_scroll: 0,
            picker_idx: 0,
            status: None,
            status_ttl: 0,
            should_quit: false,
        }
    }

    pub fn tick(&mut self) {
        if self.status.is_some() {
            self.status_ttl = self.status_ttl.saturating_sub(1);
            if self.status_ttl == 0 {
                self.status = None;
            }
        }
    }

    fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
        self.status_ttl = STATUS_TICKS;
    }

    /// Surface a failed write from the last session call, if any.
    fn report_save_error(&mut self) {
        if let Some(err) = self.session.save_error() {
            let msg = format!("Falha ao salvar: {}", err);
            self.set_status(StatusMessage::Error(msg));
        }
    }

    pub fn filtered_catalog(&self) -> Vec<Category> {
        filter_catalog(&self.catalog, &self.catalog_query)
    }

    // ─── Keys ────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Some terminals also report release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::ResourceSearch | InputMode::CatalogSearch => self.handle_search_key(key),
            InputMode::EditGoal | InputMode::EditFeedback => self.handle_edit_key(key),
            InputMode::WeekPicker => self.handle_picker_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.view == View::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.view = View::Main;
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
                return;
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                return;
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                return;
            }
            KeyCode::Left | KeyCode::Char('h') if self.tab != Tab::Materials => {
                self.go_to_week(self.current_week.saturating_sub(1));
                return;
            }
            KeyCode::Right | KeyCode::Char('l') if self.tab != Tab::Materials => {
                self.go_to_week(self.current_week + 1);
                return;
            }
            KeyCode::Char('w') if self.tab != Tab::Materials => {
                let weeks = self.session.curriculum().weeks();
                self.picker_idx = weeks
                    .iter()
                    .position(|w| w.week == self.current_week)
                    .unwrap_or(0);
                self.input_mode = InputMode::WeekPicker;
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Checklist => self.handle_checklist_key(key),
            Tab::Resources => match key.code {
                KeyCode::Char('/') => self.input_mode = InputMode::ResourceSearch,
                KeyCode::Char('t') => self.resource_filter.kind = self.resource_filter.kind.cycle(),
                KeyCode::Char('c') => {
                    if self.resource_filter.is_active() {
                        self.resource_filter.clear();
                    } else {
                        self.set_status(StatusMessage::Info("Nenhum filtro ativo".to_string()));
                    }
                }
                _ => {}
            },
            Tab::Goals => {
                if key.code == KeyCode::Char('e') {
                    self.input_mode = InputMode::EditGoal;
                }
            }
            Tab::Feedback => {
                if key.code == KeyCode::Char('e') {
                    self.input_mode = InputMode::EditFeedback;
                }
            }
            Tab::Materials => match key.code {
                KeyCode::Char('/') => self.input_mode = InputMode::CatalogSearch,
                KeyCode::Char('c') => {
                    self.catalog_query.clear();
                    self.catalog_scroll = 0;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.catalog_scroll = self.catalog_scroll.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.catalog_scroll = self.catalog_scroll.saturating_add(1);
                }
                KeyCode::PageUp => self.catalog_scroll = self.catalog_scroll.saturating_sub(10),
                KeyCode::PageDown => self.catalog_scroll = self.catalog_scroll.saturating_add(10),
                KeyCode::Char('x') => self.export_catalog(),
                _ => {}
            },
            Tab::Progress | Tab::Schedule => {}
        }
    }

    fn handle_checklist_key(&mut self, key: KeyEvent) {
        let count = self.session.tasks(self.current_week).len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focus_idx + 1 < count {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let id = self
                    .session
                    .tasks(self.current_week)
                    .get(self.focus_idx)
                    .map(|t| t.id.clone());
                self.expanded = if self.expanded == id { None } else { id };
            }
            KeyCode::Char(c) => {
                if let Some(flag) = c.to_digit(10).and_then(|d| TaskFlag::from_index(d as usize)) {
                    self.toggle_focused(flag);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let catalog = self.input_mode == InputMode::CatalogSearch;
        let buffer = if catalog {
            &mut self.catalog_query
        } else {
            &mut self.resource_filter.query
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
        if catalog {
            self.catalog_scroll = 0;
        }
    }

    /// Every keystroke is saved straight away.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        let goal = self.input_mode == InputMode::EditGoal;
        let mut text = if goal {
            self.session.weekly_goal().to_string()
        } else {
            self.session.feedback().to_string()
        };
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                return;
            }
            KeyCode::Enter => text.push('\n'),
            KeyCode::Backspace => {
                if text.pop().is_none() {
                    return;
                }
            }
            KeyCode::Char(c) => text.push(c),
            _ => return,
        }
        if goal {
            self.session.set_weekly_goal(text);
        } else {
            self.session.set_feedback(text);
        }
        self.report_save_error();
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let weeks = self.session.curriculum().weeks();
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Up | KeyCode::Char('k') => self.picker_idx = self.picker_idx.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.picker_idx + 1 < weeks.len() {
                    self.picker_idx += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(week) = weeks.get(self.picker_idx).map(|w| w.week) {
                    self.go_to_week(week);
                }
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    // ─── Actions ─────────────────────────────────────────────────────────────

    pub fn go_to_week(&mut self, week: u32) {
        let week = self.session.curriculum().clamp_week(week);
        if week != self.current_week {
            self.current_week = week;
            self.focus_idx = 0;
            self.expanded = None;
        }
    }

    fn toggle_focused(&mut self, flag: TaskFlag) {
        let Some(id) = self
            .session
            .tasks(self.current_week)
            .get(self.focus_idx)
            .map(|t| t.id.clone())
        else {
            return;
        };
        match self.session.toggle_flag(self.current_week, &id, flag) {
            Ok(_) => self.report_save_error(),
            Err(e) => self.set_status(StatusMessage::Error(e.to_string())),
        }
    }

    fn export_catalog(&mut self) {
        let filtered = self.filtered_catalog();
        let path = self.config.export_path();
        let result = export::render_document(&filtered)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Creating {:?}", parent))?;
                }
                std::fs::write(&path, &bytes).with_context(|| format!("Writing {:?}", path))
            });
        match result {
            Ok(()) => {
                log::info!("Exported bibliography to {:?}", path);
                self.set_status(StatusMessage::Info(format!("PDF salvo em {}", path.display())));
            }
            Err(e) => {
                log::warn!("Export failed: {:#}", e);
                self.set_status(StatusMessage::Error(format!("{:#}", e)));
            }
        }
    }

    // ─── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let show_cards = self.tab != Tab::Materials;
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),                             // header
                Constraint::Length(3),                             // tabs
                Constraint::Length(if show_cards { 3 } else { 0 }), // stats cards
                Constraint::Min(0),                                // body
                Constraint::Length(1),                             // status bar
            ])
            .split(area);

        let curriculum = self.session.curriculum();
        header::render(
            frame,
            outer[0],
            curriculum.week(self.current_week),
            curriculum.last_week(),
        );

        let titles: Vec<&str> = Tab::ALL.iter().map(Tab::title).collect();
        tabs::render(frame, outer[1], &titles, self.tab.index());

        if show_cards {
            stats::render(
                frame,
                outer[2],
                self.session.overall_progress(),
                self.current_week,
                self.session.week_progress(self.current_week),
                self.session.completed_days(self.current_week),
            );
        }

        self.draw_body(frame, outer[3]);

        let status = match &self.status {
            Some(StatusMessage::Info(msg)) => statusbar::Status::Info(msg),
            Some(StatusMessage::Error(msg)) => statusbar::Status::Error(msg),
            None => statusbar::Status::Hints(self.tab.hints()),
        };
        statusbar::render(frame, outer[4], status);

        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
        if self.input_mode == InputMode::WeekPicker {
            self.draw_week_picker(frame);
        }
    }

    fn draw_body(&self, frame: &mut Frame, area: Rect) {
        let week = self.current_week;
        let record = self.session.week(week);
        let sub_area = record.map(|r| r.sub_area.as_str()).unwrap_or("");

        match self.tab {
            Tab::Checklist => checklist::render(
                frame,
                area,
                week,
                sub_area,
                self.session.tasks(week),
                self.focus_idx,
                self.expanded.as_deref(),
            ),
            Tab::Progress => {
                let curriculum = self.session.curriculum();
                let phases: Vec<progress::PhaseRow> = curriculum
                    .phases()
                    .into_iter()
                    .map(|phase| progress::PhaseRow {
                        phase,
                        span: curriculum.phase_span(phase),
                        progress: self.session.phase_progress(phase),
                    })
                    .collect();
                let weeks: Vec<_> = curriculum
                    .weeks()
                    .iter()
                    .map(|w| (w.week, self.session.week_progress(w.week)))
                    .collect();
                progress::render(
                    frame,
                    area,
                    self.session.overall_progress(),
                    &phases,
                    &weeks,
                    week,
                );
            }
            Tab::Schedule => schedule::render(frame, area),
            Tab::Resources => {
                let all = record.map(|r| r.resources()).unwrap_or(&[]);
                let found = self.resource_filter.apply(all);
                resources::render(
                    frame,
                    area,
                    &self.resource_filter,
                    self.input_mode == InputMode::ResourceSearch,
                    !all.is_empty(),
                    &found,
                );
            }
            Tab::Goals => {
                let note = notes::Note {
                    title: format!("Meta para a Semana {}", week),
                    text: self.session.weekly_goal(),
                    placeholder: format!(
                        "Ex: {}",
                        record
                            .map(|r| r.objective.as_str())
                            .unwrap_or("Completar todos os estudos da semana")
                    ),
                    hints_title: "Dica: Como Definir Boas Metas",
                    hints: guide::goal_tips(sub_area)
                        .into_iter()
                        .map(|t| format!("✓ {}", t))
                        .collect(),
                    footer: Some(format!(
                        "Dias Completos {}  ·  Progresso {}%  ·  Semana Atual {}  ·  Restantes {}",
                        self.session.completed_days(week),
                        self.session.week_progress(week).rounded(),
                        week,
                        self.session.weeks_remaining(week)
                    )),
                };
                notes::render(frame, area, &note, self.input_mode == InputMode::EditGoal);
            }
            Tab::Feedback => {
                let note = notes::Note {
                    title: "Campo de Feedback Pessoal".to_string(),
                    text: self.session.feedback(),
                    placeholder: "Escreva aqui seus pensamentos, dificuldades encontradas, insights importantes...".to_string(),
                    hints_title: "Perguntas para Reflexão",
                    hints: guide::REFLECTION_PROMPTS
                        .iter()
                        .map(|p| format!("• {}", p))
                        .collect(),
                    footer: Some(format!(
                        "Sistema Anti-Procrastinação: {}",
                        guide::ANTI_PROCRASTINATION.join(" ")
                    )),
                };
                notes::render(frame, area, &note, self.input_mode == InputMode::EditFeedback);
            }
            Tab::Materials => catalog::render(
                frame,
                area,
                &self.catalog_query,
                self.input_mode == InputMode::CatalogSearch,
                &self.filtered_catalog(),
                self.catalog_scroll,
            ),
        }
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 6,
            width: area.width / 2,
            height: (area.height * 2 / 3).min(22),
        };

        frame.render_widget(Clear, popup_area);

        let keys = [
            ("[← →]", "Semana anterior / próxima"),
            ("[w]", "Escolher semana"),
            ("[Tab]", "Próxima aba"),
            ("[↑ ↓]", "Navegar dias / rolar"),
            ("[1-5]", "Estudo, Prática, Teste, Revisão, Devocional"),
            ("[Enter]", "Expandir dia"),
            ("[/]", "Buscar (Recursos, Materiais)"),
            ("[t]", "Tipo de recurso"),
            ("[c]", "Limpar filtros"),
            ("[e]", "Editar meta / feedback"),
            ("[x]", "Exportar materiais em PDF"),
            ("[?]", "Ajuda"),
            ("[q] / Esc", "Sair"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Atalhos",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in keys {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<11}", key), theme::gold()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Ajuda ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_week_picker(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = (area.height * 2 / 3).max(5);
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 6,
            width: area.width / 2,
            height,
        };

        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = self
            .session
            .curriculum()
            .weeks()
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let style = if i == self.picker_idx {
                    theme::accent().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    theme::phase(w.phase)
                };
                Line::from(Span::styled(format!(" {} ", w.selector_label()), style))
            })
            .collect();

        let visible = height.saturating_sub(2) as usize;
        let scroll = (self.picker_idx + 1).saturating_sub(visible);

        let block = Block::default()
            .title(Span::styled(" Navegação de Semanas ", theme::gold()))
            .title_bottom(Span::styled(" [Enter] abrir · [Esc] cancelar ", theme::dim()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        let paragraph = Paragraph::new(lines).block(block).scroll((scroll as u16, 0));
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the TUI event loop. The viewed week is written back to the config on exit.
pub fn run<S: ProgressStore>(
    session: StudySession<S>,
    catalog: Vec<Category>,
    mut config: AppConfig,
) -> Result<()> {
    let tick_rate = config.ui.tick_rate_ms;
    let mut app = App::new(session, catalog, config.clone());

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(),
            }
        }
    })();

    ratatui::restore();

    if config.study.current_week != app.current_week {
        config.study.current_week = app.current_week;
        if let Err(e) = config.save() {
            log::warn!("Could not remember week {}: {:#}", app.current_week, e);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::ResourceType;
    use crate::filter::TypeFilter;
    use crate::store::MemoryStore;
    use crossterm::event::KeyModifiers;

    fn app() -> App<MemoryStore> {
        let session = StudySession::open(MemoryStore::default(), fixtures::curriculum::load().unwrap());
        App::new(session, fixtures::catalog::load().unwrap(), AppConfig::default())
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn number_keys_toggle_flags_of_the_focused_day() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('4'));
        let task = &app.session.tasks(1)[1];
        assert!(task.review);
        assert!(!task.study);

        let stored = app.session.store().load_tasks().unwrap().unwrap();
        assert!(stored.tasks(1).unwrap()[1].review);

        press(&mut app, KeyCode::Char('4'));
        assert!(!app.session.tasks(1)[1].review);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.session.week_progress(1).checked, 0);
    }

    #[test]
    fn week_navigation_is_clamped() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_week, 1);
        app.go_to_week(31);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_week, 32);
        assert_eq!(app.focus_idx, 0);
    }

    #[test]
    fn week_picker_jumps_to_the_chosen_week() {
        let mut app = app();
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.input_mode, InputMode::WeekPicker);
        for _ in 0..4 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_week, 5);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn enter_expands_and_collapses_a_day() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.expanded.as_deref(), Some("1-1"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.expanded, None);
    }

    #[test]
    fn goal_edits_are_saved_on_every_keystroke() {
        let mut app = app();
        app.tab = Tab::Goals;
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "Ler Calvino");
        assert_eq!(app.session.store().load_weekly_goal().unwrap().as_deref(), Some("Ler Calvino"));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.weekly_goal(), "Ler Calvin");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);

        // typing 'q' while editing must not quit
        app.tab = Tab::Feedback;
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.session.feedback(), "q");
    }

    #[test]
    fn resource_filters_cycle_and_clear() {
        let mut app = app();
        app.tab = Tab::Resources;
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.resource_filter.kind, TypeFilter::Only(ResourceType::Leitura));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "xyz");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.resource_filter.query, "xyz");
        assert!(app.resource_filter.is_active());

        press(&mut app, KeyCode::Char('c'));
        assert!(!app.resource_filter.is_active());
        press(&mut app, KeyCode::Char('c'));
        assert!(matches!(app.status, Some(StatusMessage::Info(_))));
    }

    #[test]
    fn catalog_search_and_reset() {
        let mut app = app();
        app.tab = Tab::Materials;
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzzz-inexistente");
        press(&mut app, KeyCode::Esc);
        assert!(app.filtered_catalog().is_empty());

        press(&mut app, KeyCode::Char('x'));
        assert!(matches!(app.status, Some(StatusMessage::Error(_))));

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.filtered_catalog(), app.catalog);
    }

    #[test]
    fn export_writes_to_the_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.config.export.directory = dir.path().to_string_lossy().into_owned();
        app.tab = Tab::Materials;
        press(&mut app, KeyCode::Char('x'));
        assert!(matches!(app.status, Some(StatusMessage::Info(_))));
        assert!(dir.path().join("materiais_estudo_teologia.pdf").exists());
    }

    #[test]
    fn tabs_wrap_and_help_closes() {
        let mut app = app();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Materials);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Checklist);

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.view, View::Main);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn status_messages_expire() {
        let mut app = app();
        app.set_status(StatusMessage::Info("ok".to_string()));
        for _ in 0..STATUS_TICKS {
            app.tick();
        }
        assert_eq!(app.status, None);
    }
}
