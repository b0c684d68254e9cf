//! Case-insensitive search over the fixtures. Nothing here mutates the data
//! it is given.

pub mod catalog;
pub mod resources;

pub use catalog::filter_catalog;
pub use resources::{ResourceFilter, TypeFilter, filter_resources};

/// Substring match ignoring case. An empty needle matches everything.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
