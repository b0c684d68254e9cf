use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb as PdfRgb,
};

use crate::export::ExportError;
use crate::export::layout::{Document, Op, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, Rgb};

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Serialise a laid-out document with the PDF base-14 Helvetica fonts.
pub fn write(document: &Document) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Conteúdo",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
    };

    for (i, page) in document.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Conteúdo");
            doc.get_page(p).get_layer(l)
        };
        for op in &page.ops {
            draw(&layer, &fonts, op);
        }
    }

    doc.save_to_bytes().map_err(pdf_err)
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &Op) {
    match op {
        Op::Text {
            x,
            y,
            size,
            bold,
            color,
            text,
        } => {
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.set_fill_color(color_of(*color));
            layer.use_text(text.as_str(), *size, Mm(*x), Mm(PAGE_HEIGHT_MM - *y), font);
        }
        Op::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let top = PAGE_HEIGHT_MM - *y;
            let bottom = top - *height;
            let corners = vec![
                (Point::new(Mm(*x), Mm(top)), false),
                (Point::new(Mm(*x + *width), Mm(top)), false),
                (Point::new(Mm(*x + *width), Mm(bottom)), false),
                (Point::new(Mm(*x), Mm(bottom)), false),
            ];
            let mode = match (fill, stroke) {
                (Some(_), Some(_)) => PaintMode::FillStroke,
                (Some(_), None) => PaintMode::Fill,
                (None, Some(_)) => PaintMode::Stroke,
                (None, None) => return,
            };
            if let Some(fill) = fill {
                layer.set_fill_color(color_of(*fill));
            }
            if let Some(stroke) = stroke {
                layer.set_outline_color(color_of(*stroke));
                layer.set_outline_thickness(0.3);
            }
            layer.add_polygon(Polygon {
                rings: vec![corners],
                mode,
                winding_order: WindingOrder::NonZero,
            });
        }
    }
}

fn color_of(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(PdfRgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn pdf_err(e: printpdf::Error) -> ExportError {
    ExportError::Pdf(format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::layout::layout_document;
    use crate::fixtures;

    #[test]
    fn produces_a_pdf_file() {
        let catalog = fixtures::catalog::load().unwrap();
        let bytes = write(&layout_document(&catalog)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }
}
