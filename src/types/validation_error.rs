use std::fmt;

/// Stable codes for every problem a generation request can report.
///
/// The string form returned by [`ErrorCode::as_str()`] is part of the public
/// contract and never changes between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ErrorCode {
    /// No rule set exists for the property under the requested version.
    RuleNotFound,
    /// The value is empty and the rule set has no default.
    MissingValue,
    /// The value is not a member of the rule set's parameter list.
    InvalidParameter,
    /// The rule set is numeric and the value does not parse as a number.
    NotNumeric,
    /// The value lies outside the rule set's inclusive bounds.
    OutOfRange,
    /// The weight is non-finite, or zero/negative where policy forbids it.
    InvalidWeight,
    /// The requested style is not in the catalog.
    StyleNotFound,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::RuleNotFound => "RULE_NOT_FOUND",
            ErrorCode::MissingValue => "MISSING_VALUE",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::NotNumeric => "NOT_NUMERIC",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidWeight => "INVALID_WEIGHT",
            ErrorCode::StyleNotFound => "STYLE_NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found while validating a generation request.
///
/// These are values, not failures of the engine: a request that produces
/// them still returns `Ok` from
/// [`GenerationEngine::generate()`](crate::GenerationEngine::generate).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationError {
    code: ErrorCode,
    property_name: String,
    message: String,
    context: Option<String>,
}

impl ValidationError {
    pub fn new(code: ErrorCode, property_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            property_name: property_name.into(),
            message: message.into(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub(crate) fn rule_not_found(property: &str, version: &str) -> Self {
        Self::new(
            ErrorCode::RuleNotFound,
            property,
            format!("property '{property}' is not supported by version '{version}'"),
        )
        .with_context(format!("version={version}"))
    }

    pub(crate) fn missing_value(property: &str) -> Self {
        Self::new(
            ErrorCode::MissingValue,
            property,
            format!("property '{property}' requires a value and has no default"),
        )
    }

    pub(crate) fn style_not_found(style: &str) -> Self {
        Self::new(
            ErrorCode::StyleNotFound,
            "style",
            format!("style '{style}' does not exist"),
        )
        .with_context(format!("style={style}"))
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The stable string form of [`code()`](Self::code), e.g. `"OUT_OF_RANGE"`.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.code.as_str()
    }

    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
