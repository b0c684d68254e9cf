use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};

use crate::guide;
use crate::progress::Progress;
use crate::tui::theme;

pub struct PhaseRow {
    pub phase: u8,
    pub span: Option<(u32, u32)>,
    pub progress: Progress,
}

/// Overall bar, one bar per phase, then the week grid.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    overall: Progress,
    phases: &[PhaseRow],
    weeks: &[(u32, Progress)],
    current_week: u32,
) {
    let block = Block::default()
        .title(Span::styled(" Progresso ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(phases.iter().map(|_| Constraint::Length(2)));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    bar(frame, rows[0], "Geral".to_string(), overall, theme::ACCENT);
    for (i, row) in phases.iter().enumerate() {
        let label = match row.span {
            Some((a, b)) => format!("Fase {} (Semanas {}-{}) {}", row.phase, a, b, guide::phase_title(row.phase)),
            None => format!("Fase {}", row.phase),
        };
        bar(frame, rows[i + 1], label, row.progress, theme::phase_color(row.phase));
    }

    grid(frame, rows[phases.len() + 1], weeks, current_week);
}

fn bar(frame: &mut Frame, area: Rect, label: String, progress: Progress, color: ratatui::style::Color) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {}", label), Style::default().fg(color)),
            Span::styled(format!("  {}%", progress.rounded()), theme::bold()),
        ])),
        parts[0],
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(theme::EMPTY))
            .ratio((progress.percent() / 100.0).clamp(0.0, 1.0))
            .label(""),
        parts[1],
    );
}

fn grid(frame: &mut Frame, area: Rect, weeks: &[(u32, Progress)], current_week: u32) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Semanas  (● 100%  ◑ iniciada  ○ 0%)",
            theme::dim(),
        )),
        Line::from(""),
    ];

    for row in weeks.chunks(8) {
        let mut spans = vec![Span::raw(" ")];
        for (week, progress) in row {
            let (icon, style) = if progress.is_complete() {
                ("●", theme::green())
            } else if progress.checked > 0 {
                ("◑", theme::amber())
            } else {
                ("○", theme::dim())
            };
            let label_style = if *week == current_week {
                theme::accent().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                theme::bold()
            };
            spans.push(Span::styled(format!(" {:>2} ", week), label_style));
            spans.push(Span::styled(icon, style));
            spans.push(Span::styled(format!(" {:>3}%  ", progress.rounded()), theme::dim()));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
