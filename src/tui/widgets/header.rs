use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::WeekRecord;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, record: Option<&WeekRecord>, last_week: u32) {
    let title_line = Line::from(vec![
        Span::styled("  ✝ trilha  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("Sistema de Domínio em Teologia Cristã", theme::dim()),
    ]);

    let mut text = vec![title_line];

    match record {
        Some(week) => {
            text.push(Line::from(vec![
                Span::styled("◀ ", theme::dim()),
                Span::styled(
                    format!("Semana {} de {}", week.week, last_week),
                    theme::bold(),
                ),
                Span::styled(" ▶", theme::dim()),
                Span::styled("  ·  ", theme::dim()),
                Span::styled(&week.macro_area, theme::accent()),
                Span::styled("  ·  ", theme::dim()),
                Span::styled(&week.sub_area, theme::bold()),
                Span::styled("  ·  ", theme::dim()),
                Span::styled(
                    format!(" Fase {} ", week.phase),
                    theme::phase(week.phase).add_modifier(Modifier::REVERSED),
                ),
            ]));
            text.push(Line::from(vec![
                Span::styled("Objetivo: ", theme::gold()),
                Span::styled(&week.objective, theme::dim()),
            ]));
        }
        None => text.push(Line::from(Span::styled("Semana indisponível", theme::red()))),
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
