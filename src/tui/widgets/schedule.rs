use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use crate::guide;
use crate::utils::format::format_minutes;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Cronograma Diário Sugerido (2 Horas) ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(guide::DAILY_SCHEDULE.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Segunda a Sexta  ·  Total diário: ", theme::dim()),
            Span::styled(format_minutes(guide::daily_minutes()), theme::bold()),
        ])),
        parts[0],
    );

    let header = Row::new(vec!["Tecla", "Módulo", "Foco", "Tempo"])
        .style(theme::gold().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let rows: Vec<Row> = guide::DAILY_SCHEDULE
        .iter()
        .map(|slot| {
            Row::new(vec![
                Cell::from(Span::styled(format!("[{}]", slot.flag.number()), theme::gold())),
                Cell::from(Span::styled(slot.module, theme::bold())),
                Cell::from(Span::styled(slot.focus, theme::dim())),
                Cell::from(Span::styled(format_minutes(slot.minutes), theme::accent())),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(32),
            Constraint::Min(20),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .column_spacing(2);
    frame.render_widget(table, parts[1]);

    let mut notes = vec![Line::from("")];
    for (day, note) in guide::WEEKEND_NOTES {
        notes.push(Line::from(vec![
            Span::styled(format!(" {}: ", day), theme::accent().add_modifier(Modifier::BOLD)),
            Span::styled(note, theme::dim()),
        ]));
    }
    notes.push(Line::from(""));
    notes.push(Line::from(Span::styled(" Dicas de Sucesso", theme::gold())));
    for tip in guide::SUCCESS_TIPS {
        notes.push(Line::from(Span::styled(format!("  ✓ {}", tip), theme::dim())));
    }
    frame.render_widget(Paragraph::new(notes).wrap(Wrap { trim: false }), parts[2]);
}
