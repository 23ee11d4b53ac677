//! Loading catalogs and engine settings from TOML.
//!
//! A catalog document holds `[[styles]]` and `[[properties]]` tables:
//!
//! ```toml
//! [[styles]]
//! name = "anime"
//! type = "illustration"
//! tags = ["2d"]
//!
//! [[properties]]
//! version = "6"
//! name = "chaos"
//! min = 0
//! max = 100
//! default = "0"
//!
//! [[properties]]
//! version = "6"
//! name = "ar"
//! parameters = ["16:9", "1:1", "9:16"]
//! ```
//!
//! Bounds and defaults may be written as strings or bare numbers. Each
//! property row is a [`PropertyDefinition`] built through
//! [`PropertyRuleSet::builder()`], so a malformed row fails the whole load.

use serde::Deserialize;

use crate::error::StylegenError;
use crate::{EngineConfig, InMemoryCatalog, PropertyDefinition, PropertyRuleSet, Style};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    styles: Vec<Style>,
    #[serde(default)]
    properties: Vec<PropertyDefinition>,
}

impl InMemoryCatalog {
    /// Parse a TOML catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`StylegenError::Toml`] for malformed TOML and the usual
    /// catalog build errors for invalid or duplicate definitions.
    pub fn from_toml(input: &str) -> Result<Self, StylegenError> {
        let document: CatalogDocument = toml::from_str(input)?;
        let mut builder = InMemoryCatalog::builder();
        for style in document.styles {
            builder = builder.style(style);
        }
        for property in document.properties {
            builder = builder.rule_set(PropertyRuleSet::try_from(property)?);
        }
        let catalog = builder.build()?;
        tracing::debug!(rules = catalog.rule_count(), "loaded catalog from toml");
        Ok(catalog)
    }

    /// Read a TOML catalog document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`StylegenError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml()`](Self::from_toml).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, StylegenError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml(&input)
    }
}

impl EngineConfig {
    /// Parse engine settings; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StylegenError::Toml`] for malformed TOML or unknown value types.
    pub fn from_toml(input: &str) -> Result<Self, StylegenError> {
        Ok(toml::from_str(input)?)
    }
}
