use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::{DailyTask, TaskFlag};
use crate::progress::task_score;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    week: u32,
    sub_area: &str,
    tasks: &[DailyTask],
    focused_idx: usize,
    expanded: Option<&str>,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Checklist · Semana {} · {} ", week, sub_area),
            theme::gold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    let mut lines = Vec::new();
    let mut focus_line = 0usize;

    for (i, task) in tasks.iter().enumerate() {
        let focused = i == focused_idx;
        if focused {
            focus_line = lines.len();
        }
        let score = task_score(task);
        let score_style = match score {
            5 => theme::green(),
            0 => theme::dim(),
            _ => theme::amber(),
        };
        let name_style = if focused {
            theme::accent().add_modifier(Modifier::BOLD)
        } else {
            theme::bold()
        };
        let is_open = expanded == Some(task.id.as_str());

        lines.push(Line::from(vec![
            Span::styled(if focused { " ▸ " } else { "   " }, theme::accent()),
            Span::styled(if is_open { "▾ " } else { "▹ " }, theme::dim()),
            Span::styled(format!("{:<14}", task.day), name_style),
            Span::styled(format!("{}/5  ", score), score_style),
            Span::styled(task.content.as_str(), theme::dim()),
        ]));

        if is_open {
            for (n, flag) in TaskFlag::ALL.iter().enumerate() {
                let (mark, style) = if task.flag(*flag) {
                    ("[✓]", theme::green())
                } else {
                    ("[ ]", theme::dim())
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("       {} ", n + 1), theme::gold()),
                    Span::styled(mark, style),
                    Span::styled(format!(" {:<11}", flag.label()), theme::bold()),
                    Span::styled(task.description(*flag).to_string(), theme::dim()),
                ]));
            }
            lines.push(Line::from(""));
        }
    }

    if tasks.is_empty() {
        lines.push(Line::from(Span::styled("  Nenhuma tarefa para esta semana", theme::dim())));
    }

    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = focus_line.saturating_sub(inner_height.saturating_sub(7));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
