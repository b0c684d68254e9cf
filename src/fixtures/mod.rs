//! Read-only data shipped inside the binary.

pub mod catalog;
pub mod curriculum;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("embedded {name} data is malformed: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("embedded curriculum is invalid: {0}")]
    Invalid(String),
}
