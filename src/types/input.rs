use std::fmt;

/// The weight that renders without a `::weight` suffix.
pub const NEUTRAL_WEIGHT: f64 = 1.0;

/// One user-supplied value and its relative emphasis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Input {
    pub value: String,
    pub weight: f64,
}

impl Input {
    /// An input with the neutral weight of `1.0`.
    pub fn new(value: impl Into<String>) -> Self {
        Self::weighted(value, NEUTRAL_WEIGHT)
    }

    pub fn weighted(value: impl Into<String>, weight: f64) -> Self {
        Self {
            value: value.into(),
            weight,
        }
    }

    /// An input with no value, left for the rule set's default to fill.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// `true` when the value is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::new(value)
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::new(value)
    }
}

impl From<(&str, f64)> for Input {
    fn from((value, weight): (&str, f64)) -> Self {
        Input::weighted(value, weight)
    }
}

/// An input value after default substitution and rule checks.
///
/// Only the validator constructs these, so holding one means the value
/// satisfies the rule set it was checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedValue {
    value: String,
    defaulted: bool,
}

impl NormalizedValue {
    pub(crate) fn new(value: impl Into<String>, defaulted: bool) -> Self {
        Self {
            value: value.into(),
            defaulted,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// `true` when the value came from the rule set's default.
    #[must_use]
    pub fn is_defaulted(&self) -> bool {
        self.defaulted
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
