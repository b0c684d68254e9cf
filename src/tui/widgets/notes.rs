use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::tui::theme;

/// A free-text note with a panel of hints underneath.
pub struct Note<'a> {
    pub title: String,
    pub text: &'a str,
    pub placeholder: String,
    pub hints_title: &'a str,
    pub hints: Vec<String>,
    pub footer: Option<String>,
}

pub fn render(frame: &mut Frame, area: Rect, note: &Note, editing: bool) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(note.hints.len() as u16 + 4)])
        .split(area);

    let mut lines: Vec<Line> = if note.text.is_empty() && !editing {
        vec![Line::from(Span::styled(note.placeholder.as_str(), theme::dim()))]
    } else {
        note.text
            .split('\n')
            .map(|l| Line::from(Span::styled(l, theme::bold())))
            .collect()
    };
    if editing {
        match lines.last_mut() {
            Some(last) => last.spans.push(Span::styled("█", theme::amber())),
            None => lines.push(Line::from(Span::styled("█", theme::amber()))),
        }
    }

    let hint = if editing {
        " [Esc] concluir · [Enter] nova linha "
    } else {
        " [e] editar "
    };
    let editor = Block::default()
        .title(Span::styled(format!(" {} ", note.title), theme::gold()))
        .title_bottom(Span::styled(hint, theme::dim()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if editing { theme::amber() } else { theme::border(true) })
        .style(theme::surface());
    frame.render_widget(
        Paragraph::new(lines).block(editor).wrap(Wrap { trim: false }),
        parts[0],
    );

    let mut hints: Vec<Line> = note
        .hints
        .iter()
        .map(|h| Line::from(Span::styled(format!(" {}", h), theme::dim())))
        .collect();
    if let Some(footer) = &note.footer {
        hints.push(Line::from(""));
        hints.push(Line::from(Span::styled(format!(" {}", footer), theme::bold())));
    }
    let panel = Block::default()
        .title(Span::styled(
            format!(" {} ", note.hints_title),
            theme::accent().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());
    frame.render_widget(Paragraph::new(hints).block(panel).wrap(Wrap { trim: false }), parts[1]);
}
