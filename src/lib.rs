mod assemble;
mod catalog;
#[cfg(feature = "toml")]
mod document;
mod engine;
mod error;
mod types;
mod validate;

pub use assemble::{CommandPart, assemble, format_weight};
pub use catalog::{InMemoryCatalog, InMemoryCatalogBuilder, ResolveError, RuleCatalog, resolve};
pub use engine::{GenerationEngine, GenerationRequest};
pub use error::StylegenError;
pub use types::{
    CatalogError, EngineConfig, ErrorCode, GenerationPhase, GenerationReport, GenerationResult,
    Input, NEUTRAL_WEIGHT, NormalizedValue, PropertyRuleSet, PropertyRuleSetBuilder,
    RuleDefinitionError, Style, ValidationError, ValidationMode,
};
pub use validate::InputValidator;

#[cfg(feature = "serde")]
pub use types::PropertyDefinition;
