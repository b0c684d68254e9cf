use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::Category;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    query: &str,
    editing: bool,
    categories: &[Category],
    scroll: u16,
) {
    let block = Block::default()
        .title(Span::styled(" Materiais de Estudo de Teologia ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let mut bar = vec![
        Span::styled(" Buscar: ", theme::dim()),
        Span::styled(
            if query.is_empty() && !editing {
                "nome ou detalhes do material..."
            } else {
                query
            },
            if editing { theme::gold() } else { theme::bold() },
        ),
    ];
    if editing {
        bar.push(Span::styled("█", theme::amber()));
    }
    let count: usize = categories.iter().map(Category::material_count).sum();
    bar.push(Span::styled(format!("   {} materiais", count), theme::dim()));
    frame.render_widget(Paragraph::new(Line::from(bar)), parts[0]);

    if categories.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  ⚠ Nenhum material encontrado",
                theme::amber().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("    Nada corresponde a \"{}\". [c] limpar busca", query),
                theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), parts[1]);
        return;
    }

    let mut lines = Vec::new();
    for category in categories {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", category.icon.glyph()), theme::gold()),
            Span::styled(category.name.as_str(), theme::bold().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", category.description),
            theme::dim(),
        )));
        for sub in &category.sub_categories {
            lines.push(Line::from(vec![
                Span::styled(format!("    - {} ", sub.name), theme::accent()),
                Span::styled(
                    format!(" {} ", sub.materials.len()),
                    theme::accent().add_modifier(Modifier::REVERSED),
                ),
            ]));
            for material in &sub.materials {
                lines.push(Line::from(vec![
                    Span::styled("        • ", theme::dim()),
                    Span::styled(material.name.as_str(), theme::bold()),
                    Span::styled(": ", theme::dim()),
                    Span::styled(material.details.as_str(), theme::dim()),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        parts[1],
    );
}
