use std::fmt;

use super::validation_error::ValidationError;

/// Outcome of one generation request: either a rendered command or the
/// complete list of problems, never both and never neither.
///
/// With the `serde` feature it is written as a record with both fields,
/// `{"command": "anime 6", "errors": []}` or `{"command": null, "errors": [..]}`.
/// Reading a record that holds both or neither is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "GenerationRecord", into = "GenerationRecord")
)]
#[must_use]
pub enum GenerationResult {
    Assembled(String),
    Failed(Vec<ValidationError>),
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct GenerationRecord {
    command: Option<String>,
    #[serde(default)]
    errors: Vec<ValidationError>,
}

#[cfg(feature = "serde")]
impl From<GenerationResult> for GenerationRecord {
    fn from(result: GenerationResult) -> Self {
        match result {
            GenerationResult::Assembled(command) => Self {
                command: Some(command),
                errors: Vec::new(),
            },
            GenerationResult::Failed(errors) => Self {
                command: None,
                errors,
            },
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GenerationRecord> for GenerationResult {
    type Error = &'static str;

    fn try_from(record: GenerationRecord) -> Result<Self, Self::Error> {
        match (record.command, record.errors.is_empty()) {
            (Some(command), true) => Ok(GenerationResult::Assembled(command)),
            (None, false) => Ok(GenerationResult::Failed(record.errors)),
            (Some(_), false) => Err("a generation result cannot carry both a command and errors"),
            (None, true) => Err("a generation result needs either a command or errors"),
        }
    }
}

impl GenerationResult {
    /// The rendered command, present only on success.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        match self {
            GenerationResult::Assembled(command) => Some(command),
            GenerationResult::Failed(_) => None,
        }
    }

    /// Collected problems in examination order; empty on success.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            GenerationResult::Assembled(_) => &[],
            GenerationResult::Failed(errors) => errors,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Assembled(_))
    }

    /// Convert into a `Result`, for hosts that prefer `?`.
    ///
    /// # Errors
    ///
    /// Returns the collected validation errors when generation failed.
    pub fn into_result(self) -> Result<String, Vec<ValidationError>> {
        match self {
            GenerationResult::Assembled(command) => Ok(command),
            GenerationResult::Failed(errors) => Err(errors),
        }
    }
}

impl fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationResult::Assembled(command) => write!(f, "{command}"),
            GenerationResult::Failed(errors) => {
                write!(f, "{} error(s)", errors.len())?;
                for err in errors {
                    write!(f, "\n  {}: {err}", err.property_name())?;
                }
                Ok(())
            }
        }
    }
}
