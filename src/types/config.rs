/// Policy knobs for a [`GenerationEngine`](crate::GenerationEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Accept a weight of exactly zero, rendered as unweighted.
    pub allow_zero_weight: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_zero_weight: true,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn allow_zero_weight(mut self, allow: bool) -> Self {
        self.allow_zero_weight = allow;
        self
    }
}
