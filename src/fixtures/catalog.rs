use serde::Deserialize;

use crate::fixtures::FixtureError;
use crate::models::Category;

const CATALOG_JSON: &str = include_str!("../../data/catalog.json");

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
}

/// The bibliography tree, in display order.
pub fn load() -> Result<Vec<Category>, FixtureError> {
    let file: CatalogFile =
        serde_json::from_str(CATALOG_JSON).map_err(|source| FixtureError::Parse {
            name: "catalog",
            source,
        })?;
    Ok(file.categories)
}
