//! PDF handout of the (optionally filtered) bibliography.

pub mod layout;
pub mod pdf;

use thiserror::Error;

use crate::models::Category;

pub use layout::layout_document;

pub const DEFAULT_FILE_NAME: &str = "materiais_estudo_teologia.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the material list is empty")]
    EmptyCatalog,
    #[error("failed to build PDF: {0}")]
    Pdf(String),
}

/// Render `categories` to PDF bytes. Writing them out is up to the caller.
pub fn render_document(categories: &[Category]) -> Result<Vec<u8>, ExportError> {
    if categories.iter().all(|c| c.material_count() == 0) {
        return Err(ExportError::EmptyCatalog);
    }
    let document = layout_document(categories);
    log::debug!(
        "Laid out {} categories on {} pages",
        categories.len(),
        document.pages.len()
    );
    pdf::write(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_catalog;
    use crate::fixtures;

    #[test]
    fn refuses_an_empty_catalogue() {
        let catalog = fixtures::catalog::load().unwrap();
        let none = filter_catalog(&catalog, "zzzz-inexistente");
        assert!(matches!(render_document(&none), Err(ExportError::EmptyCatalog)));
        assert!(matches!(render_document(&[]), Err(ExportError::EmptyCatalog)));
    }

    #[test]
    fn renders_a_filtered_catalogue() {
        let catalog = fixtures::catalog::load().unwrap();
        let some = filter_catalog(&catalog, "a");
        let bytes = render_document(&some).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
