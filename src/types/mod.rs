mod config;
#[cfg(feature = "serde")]
mod definition;
mod error;
mod input;
mod report;
mod result;
mod rule_set;
mod style;
mod validation_error;

pub use config::EngineConfig;
#[cfg(feature = "serde")]
pub use definition::PropertyDefinition;
pub use error::{CatalogError, RuleDefinitionError};
pub use input::{Input, NEUTRAL_WEIGHT, NormalizedValue};
pub use report::{GenerationPhase, GenerationReport};
pub use result::GenerationResult;
pub use rule_set::{PropertyRuleSet, PropertyRuleSetBuilder, ValidationMode};
pub use style::Style;
pub use validation_error::{ErrorCode, ValidationError};
