use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::theme;

pub enum Status<'a> {
    Hints(&'a [(&'a str, &'a str)]),
    Info(&'a str),
    Error(&'a str),
}

pub fn render(frame: &mut Frame, area: Rect, status: Status) {
    let line = match status {
        Status::Hints(hints) => {
            let mut spans = Vec::new();
            for (key, label) in hints {
                spans.push(Span::styled(*key, theme::gold()));
                spans.push(Span::styled(format!(" {}  ", label), theme::dim()));
            }
            Line::from(spans)
        }
        Status::Info(msg) => Line::from(Span::styled(format!("✓ {}", msg), theme::green())),
        Status::Error(msg) => Line::from(Span::styled(format!("✗ {}", msg), theme::red())),
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
