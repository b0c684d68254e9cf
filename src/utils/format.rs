use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::progress::Progress;

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// "42%", rounded the way the dashboard shows it
pub fn format_percent(progress: Progress) -> String {
    format!("{}%", progress.rounded())
}

/// "30 min" or "1h 15min"
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}

/// Cut `text` to at most `width` terminal columns, ending in "…" when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Terminal-column width of `text`.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Right-pad `text` with spaces to `width` columns.
pub fn pad(text: &str, width: usize) -> String {
    let w = text.width();
    format!("{}{}", text, " ".repeat(width.saturating_sub(w)))
}

/// SQLite `datetime('now')` values are UTC; show them in local time.
/// Anything unparseable is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(naive) => Utc
            .from_utc_datetime(&naive)
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
