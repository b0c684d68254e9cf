//! Page layout of the bibliography handout, independent of any PDF library.
//!
//! Coordinates are millimetres measured from the top-left corner of an A4
//! page; `y` on a text op is the baseline.

use unicode_width::UnicodeWidthStr;

use crate::models::{Category, SubCategory};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 14.0;

pub const TITLE: &str = "Materiais de Estudo de Teologia";
pub const SUBTITLE: &str = "Lista organizada de recursos essenciais para aprofundar seus conhecimentos.";
pub const TOPIC_HEADER: &str = "Tópico";
pub const MATERIAL_HEADER: &str = "Material (Título, Autor, Fonte)";

const PT_TO_MM: f32 = 0.3528;
const TABLE_FONT_SIZE: f32 = 8.0;
const CELL_PADDING_MM: f32 = 2.0;
const TOPIC_COLUMN_MM: f32 = 30.0;
const LINE_SPACING: f32 = 1.15;

const BLACK: Rgb = Rgb(0, 0, 0);
const GRAY: Rgb = Rgb(100, 100, 100);
const HEADER_FILL: Rgb = Rgb(230, 230, 230);
const GRID: Rgb = Rgb(180, 180, 180);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: Rgb,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<Op>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

/// Lay out the catalogue as a title block followed by one table per
/// subcategory. The same input always produces the same document.
pub fn layout_document(categories: &[Category]) -> Document {
    let mut w = Writer::new();

    w.text(MARGIN_MM, 20.0, 18.0, true, BLACK, TITLE);
    w.text(MARGIN_MM, 26.0, 10.0, false, GRAY, SUBTITLE);
    w.cursor = 30.0;

    for category in categories {
        let lead = category
            .sub_categories
            .first()
            .map_or(row_height(1), |sub| w.table_lead(&table_rows(sub)));
        w.ensure_room(12.0 + 7.0 + lead);
        w.text(MARGIN_MM, w.cursor + 10.0, 14.0, true, BLACK, &category.name);
        w.cursor += 12.0;

        for sub in &category.sub_categories {
            let rows = table_rows(sub);
            w.ensure_room(7.0 + w.table_lead(&rows));
            w.text(MARGIN_MM, w.cursor + 5.0, 12.0, false, BLACK, &format!("- {}", sub.name));
            w.cursor += 7.0;

            w.table(&rows);
            w.cursor += 5.0;
        }
    }

    w.finish()
}

fn table_rows(sub: &SubCategory) -> Vec<[&str; 2]> {
    sub.materials
        .iter()
        .map(|m| [m.name.as_str(), m.details.as_str()])
        .collect()
}

/// Greedy word wrap using an approximate glyph width for the given font size.
/// Words longer than a line are split.
pub fn wrap_text(text: &str, width_mm: f32, font_size: f32) -> Vec<String> {
    let char_width = font_size * PT_TO_MM * 0.5;
    let max = ((width_mm / char_width).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let needed = if line.is_empty() {
                word.width()
            } else {
                line.width() + 1 + word.width()
            };
            if needed <= max {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&word);
                break;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                continue;
            }
            let (head, tail) = split_at_width(&word, max);
            lines.push(head);
            word = tail;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_at_width(word: &str, max: usize) -> (String, String) {
    let mut head = String::new();
    let mut used = 0;
    for (i, c) in word.char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max && !head.is_empty() {
            return (head, word[i..].to_string());
        }
        head.push(c);
        used += w;
    }
    (head, String::new())
}

fn line_height() -> f32 {
    TABLE_FONT_SIZE * PT_TO_MM * LINE_SPACING
}

fn row_height(lines: usize) -> f32 {
    lines as f32 * line_height() + CELL_PADDING_MM * 2.0
}

fn column_widths() -> [f32; 2] {
    let usable = PAGE_WIDTH_MM - MARGIN_MM * 2.0;
    [TOPIC_COLUMN_MM, usable - TOPIC_COLUMN_MM]
}

struct Writer {
    pages: Vec<Page>,
    current: Page,
    cursor: f32,
}

impl Writer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Page::default(),
            cursor: MARGIN_MM,
        }
    }

    fn bottom() -> f32 {
        PAGE_HEIGHT_MM - MARGIN_MM
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor = MARGIN_MM;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor + height > Self::bottom() {
            self.new_page();
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, color: Rgb, text: &str) {
        self.current.ops.push(Op::Text {
            x,
            y,
            size,
            bold,
            color,
            text: text.to_string(),
        });
    }

    /// Height of the header row plus the first body row. A header never
    /// ends a page on its own.
    fn table_lead(&self, rows: &[[&str; 2]]) -> f32 {
        let first = rows.first().map_or(0.0, |row| self.measure(*row));
        self.measure([TOPIC_HEADER, MATERIAL_HEADER]) + first
    }

    fn table(&mut self, rows: &[[&str; 2]]) {
        self.ensure_room(self.table_lead(rows));
        self.row([TOPIC_HEADER, MATERIAL_HEADER], true);
        for row in rows {
            let height = self.measure(*row);
            if self.cursor + height > Self::bottom() {
                self.new_page();
                self.row([TOPIC_HEADER, MATERIAL_HEADER], true);
            }
            self.row(*row, false);
        }
    }

    fn measure(&self, cells: [&str; 2]) -> f32 {
        let widths = column_widths();
        let lines = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| wrap_text(cell, w - CELL_PADDING_MM * 2.0, TABLE_FONT_SIZE).len())
            .max()
            .unwrap_or(1);
        row_height(lines)
    }

    fn row(&mut self, cells: [&str; 2], header: bool) {
        let height = self.measure(cells);
        let mut x = MARGIN_MM;
        let ascent = TABLE_FONT_SIZE * PT_TO_MM;

        for (cell, width) in cells.iter().zip(column_widths()) {
            self.current.ops.push(Op::Rect {
                x,
                y: self.cursor,
                width,
                height,
                fill: header.then_some(HEADER_FILL),
                stroke: Some(GRID),
            });
            let lines = wrap_text(cell, width - CELL_PADDING_MM * 2.0, TABLE_FONT_SIZE);
            for (i, line) in lines.iter().enumerate() {
                let y = self.cursor + CELL_PADDING_MM + ascent + i as f32 * line_height();
                self.text(x + CELL_PADDING_MM, y, TABLE_FONT_SIZE, header, BLACK, line);
            }
            x += width;
        }
        self.cursor += height;
    }

    fn finish(mut self) -> Document {
        self.pages.push(self.current);
        Document {
            title: TITLE.to_string(),
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::catalog::{CategoryIcon, Material};

    fn texts(doc: &Document) -> Vec<&str> {
        doc.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                Op::Rect { .. } => None,
            })
            .collect()
    }

    fn category(materials: usize) -> Category {
        Category {
            id: 1,
            name: "Estudos Bíblicos".to_string(),
            icon: CategoryIcon::Book,
            description: String::new(),
            sub_categories: vec![SubCategory {
                name: "Pentateuco".to_string(),
                materials: (0..materials)
                    .map(|i| Material {
                        name: format!("Tema {i}"),
                        details: "Introdução ao Antigo Testamento – Tremper Longman III e Raymond Dillard"
                            .to_string(),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn starts_with_the_title_block() {
        let doc = layout_document(&[category(1)]);
        let texts = texts(&doc);
        assert_eq!(texts[0], TITLE);
        assert_eq!(texts[1], SUBTITLE);
        assert_eq!(texts[1], "Lista organizada de recursos essenciais para aprofundar seus conhecimentos.");
        assert!(texts.contains(&"Estudos Bíblicos"));
        assert!(texts.contains(&"- Pentateuco"));
        assert!(texts.contains(&TOPIC_HEADER));
    }

    #[test]
    fn header_row_is_shaded() {
        let doc = layout_document(&[category(1)]);
        let shaded = doc.pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Rect { fill: Some(_), .. }))
            .count();
        assert_eq!(shaded, 2);
    }

    #[test]
    fn long_tables_break_pages_and_repeat_the_header() {
        let doc = layout_document(&[category(80)]);
        assert!(doc.pages.len() > 1);
        for page in &doc.pages {
            let has_header = page
                .ops
                .iter()
                .any(|op| matches!(op, Op::Text { text, .. } if text == TOPIC_HEADER));
            assert!(has_header);
            for op in &page.ops {
                if let Op::Rect { y, height, .. } = op {
                    assert!(y + height <= PAGE_HEIGHT_MM - MARGIN_MM + 0.01);
                }
            }
        }
    }

    #[test]
    fn header_row_stays_with_a_tall_first_row() {
        let material = |name: &str, details: String| Material {
            name: name.to_string(),
            details,
        };
        let tall = "palavra ".repeat(400);
        for filler in 1..60 {
            let doc = layout_document(&[Category {
                id: 1,
                name: "Estudos Bíblicos".to_string(),
                icon: CategoryIcon::Book,
                description: String::new(),
                sub_categories: vec![
                    SubCategory {
                        name: "Introdução".to_string(),
                        materials: (0..filler).map(|i| material(&format!("Tema {i}"), "Autor".to_string())).collect(),
                    },
                    SubCategory {
                        name: "Profetas".to_string(),
                        materials: vec![material("Isaías", tall.clone())],
                    },
                ],
            }]);
            for page in &doc.pages {
                let last_rect = page.ops.iter().rev().find(|op| matches!(op, Op::Rect { .. }));
                assert!(
                    !matches!(last_rect, Some(Op::Rect { fill: Some(_), .. })),
                    "header left alone at the bottom of a page with {filler} rows before it"
                );
                for op in &page.ops {
                    if let Op::Rect { y, height, .. } = op {
                        assert!(y + height <= PAGE_HEIGHT_MM - MARGIN_MM + 0.01);
                    }
                }
            }
        }
    }

    #[test]
    fn same_input_same_layout() {
        let catalog = fixtures::catalog::load().unwrap();
        assert_eq!(layout_document(&catalog), layout_document(&catalog));
    }

    #[test]
    fn wrapping_respects_width_and_splits_long_words() {
        let lines = wrap_text("Teologia Sistemática – Wayne Grudem, Edições Vida Nova", 30.0, 8.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width() <= 21));

        let lines = wrap_text(&"x".repeat(50), 10.0, 8.0);
        assert!(lines.len() >= 3);
        assert_eq!(lines.concat(), "x".repeat(50));

        assert_eq!(wrap_text("", 30.0, 8.0), vec![String::new()]);
    }
}
