use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};

use crate::guide;
use crate::progress::{NOMINAL_WEEK_DAYS, Progress};
use crate::tui::theme;

/// The four summary cards above the tab body.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    overall: Progress,
    week: u32,
    week_progress: Progress,
    completed_days: u32,
) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    gauge(frame, cards[0], "Progresso Geral", overall);
    gauge(frame, cards[1], &format!("Semana {}", week), week_progress);
    counter(
        frame,
        cards[2],
        "Dias Completos",
        format!("{}/{}", completed_days, NOMINAL_WEEK_DAYS),
    );
    counter(
        frame,
        cards[3],
        "Prazo Total",
        format!("{} semanas {}", guide::WEEKS_IN_PLAN, guide::PLAN_DURATION),
    );
}

fn card(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface())
}

fn gauge(frame: &mut Frame, area: Rect, title: &str, progress: Progress) {
    let color = if progress.is_complete() {
        theme::GREEN
    } else {
        theme::FILL
    };
    let gauge = Gauge::default()
        .block(card(title))
        .gauge_style(Style::default().fg(color).bg(theme::EMPTY))
        .ratio((progress.percent() / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(
            format!("{}% ({}/{})", progress.rounded(), progress.checked, progress.total),
            theme::bold(),
        ));
    frame.render_widget(gauge, area);
}

fn counter(frame: &mut Frame, area: Rect, title: &str, value: String) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        value,
        theme::bold().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(card(title));
    frame.render_widget(paragraph, area);
}
