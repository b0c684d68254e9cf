use std::str::FromStr;

use crate::filter::contains_ci;
use crate::models::{AdditionalResource, ResourceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ResourceType),
}

impl TypeFilter {
    pub fn matches(&self, kind: ResourceType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(k) => *k == kind,
        }
    }

    /// Todos → Leitura → Vídeo → Todos, for the TUI toggle.
    pub fn cycle(&self) -> TypeFilter {
        match self {
            TypeFilter::All => TypeFilter::Only(ResourceType::Leitura),
            TypeFilter::Only(ResourceType::Leitura) => TypeFilter::Only(ResourceType::Video),
            TypeFilter::Only(ResourceType::Video) => TypeFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "Todos",
            TypeFilter::Only(kind) => kind.label(),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todos" | "all" => Ok(TypeFilter::All),
            "leitura" | "reading" => Ok(TypeFilter::Only(ResourceType::Leitura)),
            "video" | "vídeo" => Ok(TypeFilter::Only(ResourceType::Video)),
            _ => Err(anyhow::anyhow!(
                "Unknown resource type: {} (expected todos, leitura or video)",
                s
            )),
        }
    }
}

/// Resources whose type passes `kind` and whose title contains `query`.
/// Input order is kept.
pub fn filter_resources<'a>(
    resources: &'a [AdditionalResource],
    query: &str,
    kind: TypeFilter,
) -> Vec<&'a AdditionalResource> {
    resources
        .iter()
        .filter(|r| kind.matches(r.kind) && contains_ci(&r.title, query))
        .collect()
}

/// The search box and type selector of the resources tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub query: String,
    pub kind: TypeFilter,
}

impl ResourceFilter {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.kind != TypeFilter::All
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.kind = TypeFilter::All;
    }

    pub fn apply<'a>(&self, resources: &'a [AdditionalResource]) -> Vec<&'a AdditionalResource> {
        filter_resources(resources, &self.query, self.kind)
    }
}
