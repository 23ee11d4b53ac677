use thiserror::Error;

use crate::{CatalogError, RuleDefinitionError};

/// Unified error type for catalog construction, loading, and lookup failures.
///
/// Validation problems in a generation request are not errors of this kind;
/// they are collected in [`GenerationResult`](crate::GenerationResult).
#[derive(Debug, Error)]
pub enum StylegenError {
    #[error(transparent)]
    RuleDefinition(#[from] RuleDefinitionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("property '{property}' is defined twice for version '{version}'")]
    DuplicateRule { version: String, property: String },

    #[error("style '{name}' is defined twice")]
    DuplicateStyle { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "toml")]
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
