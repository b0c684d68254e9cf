use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::filter::ResourceFilter;
use crate::models::{AdditionalResource, ResourceType};
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    filter: &ResourceFilter,
    editing: bool,
    has_resources: bool,
    found: &[&AdditionalResource],
) {
    let block = Block::default()
        .title(Span::styled(" Recursos Adicionais ", theme::gold()))
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
            if filter.query.is_empty() && !editing {
                "título...".to_string()
            } else {
                filter.query.clone()
            },
            if editing { theme::gold() } else { theme::bold() },
        ),
    ];
    if editing {
        bar.push(Span::styled("█", theme::amber()));
    }
    bar.push(Span::styled("   Tipo: ", theme::dim()));
    bar.push(Span::styled(filter.kind.label(), theme::accent()));
    bar.push(Span::styled(
        "   [c] limpar filtros",
        if filter.is_active() {
            theme::gold()
        } else {
            theme::dim().add_modifier(Modifier::CROSSED_OUT)
        },
    ));
    frame.render_widget(Paragraph::new(Line::from(bar)), parts[0]);

    let lines = if !has_resources {
        empty_state(
            "Nenhum Recurso Adicional Encontrado",
            "Os recursos para esta semana serão adicionados em breve.",
        )
    } else if found.is_empty() {
        empty_state(
            "Nenhum Recurso Encontrado",
            "Ajuste os termos de busca ou o filtro de tipo.",
        )
    } else {
        found
            .iter()
            .copied()
            .flat_map(|r| {
                let (icon, style) = match r.kind {
                    ResourceType::Leitura => ("📖", theme::accent()),
                    ResourceType::Video => ("▶", theme::red()),
                };
                [
                    Line::from(vec![
                        Span::styled(format!(" {} ", icon), style),
                        Span::styled(format!("{:<8}", r.kind.label()), theme::dim()),
                        Span::styled(r.title.as_str(), theme::bold()),
                    ]),
                    Line::from(Span::styled(format!("             {}", r.url), theme::dim())),
                ]
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[1]);
}

fn empty_state(title: &'static str, hint: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(format!("  ⚠ {}", title), theme::amber().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(format!("    {}", hint), theme::dim())),
    ]
}
