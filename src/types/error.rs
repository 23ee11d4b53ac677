use thiserror::Error;

/// Reasons a [`PropertyRuleSet`](super::PropertyRuleSet) cannot be built.
#[derive(Debug, Error, PartialEq)]
pub enum RuleDefinitionError {
    #[error("{what} must not be empty")]
    EmptyName { what: &'static str },

    #[error("property '{property}' declares both a parameter list and numeric bounds")]
    EnumeratedWithRange { property: String },

    #[error("property '{property}' declares an empty parameter list")]
    EmptyParameters { property: String },

    #[error("parameter '{parameter}' of property '{property}' is not a single token")]
    MalformedParameter { property: String, parameter: String },

    #[error("{bound} bound '{value}' of property '{property}' is not a finite number")]
    UnparsableBound {
        property: String,
        bound: &'static str,
        value: String,
    },

    #[error("property '{property}' has min {min} greater than max {max}")]
    InvertedBounds { property: String, min: f64, max: f64 },

    #[error("default '{default}' of property '{property}' is invalid: {reason}")]
    InvalidDefault {
        property: String,
        default: String,
        reason: String,
    },
}

/// Failure of the rule/style lookup itself, as opposed to a lookup that
/// simply found nothing.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {message}")]
    Unavailable { message: String },

    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}
