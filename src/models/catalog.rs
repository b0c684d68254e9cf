use serde::{Deserialize, Serialize};

/// Icon tag carried by each bibliography category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryIcon {
    History,
    Shield,
    Scale,
    /// Also used for any tag the terminal has no glyph for.
    #[serde(other)]
    Book,
}

/// Terminal glyph for each icon tag.
const ICON_GLYPHS: [(CategoryIcon, &str); 4] = [
    (CategoryIcon::Book, "📖"),
    (CategoryIcon::History, "⌛"),
    (CategoryIcon::Shield, "🛡"),
    (CategoryIcon::Scale, "⚖"),
];

impl CategoryIcon {
    pub fn glyph(&self) -> &'static str {
        ICON_GLYPHS
            .iter()
            .find(|(icon, _)| icon == self)
            .map(|(_, glyph)| *glyph)
            .unwrap_or("📖")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Free text combining title, author and source.
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub name: String,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub icon: CategoryIcon,
    pub description: String,
    pub sub_categories: Vec<SubCategory>,
}

impl Category {
    pub fn material_count(&self) -> usize {
        self.sub_categories.iter().map(|s| s.materials.len()).sum()
    }
}
