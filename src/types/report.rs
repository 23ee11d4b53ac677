use std::fmt;
use std::time::Duration;

use super::result::GenerationResult;

/// Where a generation request is in its pipeline.
///
/// `Assembled` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Collecting,
    Validating,
    Assembling,
    Assembled,
    Failed,
}

impl GenerationPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GenerationPhase::Assembled | GenerationPhase::Failed)
    }
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationPhase::Collecting => "collecting",
            GenerationPhase::Validating => "validating",
            GenerationPhase::Assembling => "assembling",
            GenerationPhase::Assembled => "assembled",
            GenerationPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Detailed report returned by
/// [`GenerationEngine::generate_detailed()`](crate::GenerationEngine::generate_detailed).
///
/// Contains the result, the terminal phase, which properties were filled in
/// from defaults, and the wall-clock duration of the request.
#[derive(Debug, Clone)]
#[must_use]
pub struct GenerationReport {
    result: GenerationResult,
    phase: GenerationPhase,
    defaulted: Vec<String>,
    duration: Duration,
}

impl GenerationReport {
    pub(crate) fn new(
        result: GenerationResult,
        phase: GenerationPhase,
        defaulted: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            result,
            phase,
            defaulted,
            duration,
        }
    }

    /// Same as what [`GenerationEngine::generate()`](crate::GenerationEngine::generate) returns.
    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    pub fn into_result(self) -> GenerationResult {
        self.result
    }

    #[must_use]
    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Properties whose value was substituted from the rule set's default, in
    /// examination order.
    #[must_use]
    pub fn defaulted(&self) -> &[String] {
        &self.defaulted
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase: {}", self.phase)?;
        match self.result.command() {
            Some(command) => write!(f, ", command: {command}")?,
            None => write!(f, ", errors: {}", self.result.errors().len())?,
        }
        write!(f, ", defaulted: [{}]", self.defaulted.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
