use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(15, 18, 26);
pub const SURFACE: Color = Color::Rgb(24, 29, 40);
pub const BORDER: Color = Color::Rgb(52, 60, 78);
pub const BORDER_FOCUS: Color = Color::Rgb(96, 148, 230);
pub const TEXT: Color = Color::Rgb(222, 226, 235);
pub const TEXT_DIM: Color = Color::Rgb(118, 128, 148);
pub const ACCENT: Color = Color::Rgb(96, 148, 230);
pub const GOLD: Color = Color::Rgb(214, 176, 84);
pub const GREEN: Color = Color::Rgb(86, 170, 110);
pub const AMBER: Color = Color::Rgb(224, 160, 64);
pub const RED: Color = Color::Rgb(206, 92, 84);
pub const FILL: Color = Color::Rgb(64, 96, 150);
pub const EMPTY: Color = Color::Rgb(36, 42, 56);

pub const PHASE_BLUE: Color = Color::Rgb(88, 140, 230);
pub const PHASE_PURPLE: Color = Color::Rgb(160, 110, 220);
pub const PHASE_GREEN: Color = Color::Rgb(86, 170, 110);
pub const PHASE_ORANGE: Color = Color::Rgb(232, 140, 60);

pub fn phase_color(phase: u8) -> Color {
    match phase {
        1 => PHASE_BLUE,
        2 => PHASE_PURPLE,
        3 => PHASE_GREEN,
        4 => PHASE_ORANGE,
        _ => TEXT_DIM,
    }
}

pub fn phase(phase: u8) -> Style {
    Style::default().fg(phase_color(phase))
}

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}
