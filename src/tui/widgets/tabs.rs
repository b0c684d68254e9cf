use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Tabs},
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, titles: &[&str], selected: usize) {
    let titles: Vec<Line> = titles
        .iter()
        .map(|t| Line::from(Span::styled(*t, theme::dim())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border(false))
                .style(theme::surface()),
        )
        .highlight_style(theme::accent().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider(Span::styled("│", theme::dim()));

    frame.render_widget(tabs, area);
}
