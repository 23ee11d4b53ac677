use std::collections::BTreeSet;
use std::fmt;

use super::error::RuleDefinitionError;

/// How a property's values are checked. Exactly one mode applies per rule set.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationMode {
    /// The value must exactly match one of these tokens (case-sensitive).
    Enumerated(BTreeSet<String>),
    /// The value must parse as a number within the inclusive bounds that are present.
    NumericRange { min: Option<f64>, max: Option<f64> },
    /// Any non-empty value is accepted.
    FreeForm,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Enumerated(params) => {
                let joined: Vec<&str> = params.iter().map(String::as_str).collect();
                write!(f, "one of {{{}}}", joined.join(", "))
            }
            ValidationMode::NumericRange { min, max } => {
                let lo = min.map_or_else(|| "-inf".to_owned(), |v| v.to_string());
                let hi = max.map_or_else(|| "+inf".to_owned(), |v| v.to_string());
                write!(f, "range [{lo}, {hi}]")
            }
            ValidationMode::FreeForm => write!(f, "free-form"),
        }
    }
}

/// The validation contract for one property under one version.
///
/// Immutable once built. Construct with [`PropertyRuleSet::builder()`], which
/// rejects contradictory definitions and defaults that fail their own rules.
///
/// # Example
///
/// ```
/// use stylegen::PropertyRuleSet;
///
/// let chaos = PropertyRuleSet::builder("6", "chaos")
///     .min("0")
///     .max("100")
///     .default_value("0")
///     .build()
///     .unwrap();
/// assert_eq!(chaos.min_value(), Some("0"));
/// ```
///
/// With the `serde` feature it serializes as a
/// [`PropertyDefinition`](crate::PropertyDefinition) and deserializes through
/// the same builder checks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::PropertyDefinition", into = "crate::PropertyDefinition")
)]
pub struct PropertyRuleSet {
    version: String,
    property_name: String,
    mode: ValidationMode,
    min_value: Option<String>,
    max_value: Option<String>,
    default_value: Option<String>,
    description: Option<String>,
    allow_negative_weight: bool,
}

impl PropertyRuleSet {
    #[must_use]
    pub fn builder(version: &str, property_name: &str) -> PropertyRuleSetBuilder {
        PropertyRuleSetBuilder::new(version, property_name)
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    #[must_use]
    pub fn mode(&self) -> &ValidationMode {
        &self.mode
    }

    /// The allow-list, present only in enumerated mode.
    #[must_use]
    pub fn parameters(&self) -> Option<&BTreeSet<String>> {
        match &self.mode {
            ValidationMode::Enumerated(params) => Some(params),
            _ => None,
        }
    }

    /// The lower bound exactly as it was declared.
    #[must_use]
    pub fn min_value(&self) -> Option<&str> {
        self.min_value.as_deref()
    }

    /// The upper bound exactly as it was declared.
    #[must_use]
    pub fn max_value(&self) -> Option<&str> {
        self.max_value.as_deref()
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn allows_negative_weight(&self) -> bool {
        self.allow_negative_weight
    }
}

impl fmt::Display for PropertyRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}: {}", self.property_name, self.version, self.mode)?;
        if let Some(default) = &self.default_value {
            write!(f, ", default {default}")?;
        }
        Ok(())
    }
}

/// Builder for [`PropertyRuleSet`]. Nothing is checked until [`build()`](Self::build).
#[derive(Debug, Clone)]
#[must_use]
pub struct PropertyRuleSetBuilder {
    version: String,
    property_name: String,
    parameters: Option<Vec<String>>,
    min_value: Option<String>,
    max_value: Option<String>,
    default_value: Option<String>,
    description: Option<String>,
    allow_negative_weight: bool,
}

impl PropertyRuleSetBuilder {
    fn new(version: &str, property_name: &str) -> Self {
        Self {
            version: version.to_owned(),
            property_name: property_name.to_owned(),
            parameters: None,
            min_value: None,
            max_value: None,
            default_value: None,
            description: None,
            allow_negative_weight: false,
        }
    }

    /// Switch to enumerated mode with the given allow-list.
    pub fn parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = Some(parameters.into_iter().map(Into::into).collect());
        self
    }

    pub fn min(mut self, min: impl Into<String>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<String>) -> Self {
        self.max_value = Some(max.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn allow_negative_weight(mut self, allow: bool) -> Self {
        self.allow_negative_weight = allow;
        self
    }

    /// Check the definition and freeze it.
    ///
    /// # Errors
    ///
    /// Returns [`RuleDefinitionError`] if the version or name is empty, if
    /// parameters and bounds are mixed, if a parameter is blank or not a
    /// single token, if a bound is not a finite number,
    /// if `min > max`, or if the default does not satisfy the rule set.
    pub fn build(self) -> Result<PropertyRuleSet, RuleDefinitionError> {
        if self.version.trim().is_empty() {
            return Err(RuleDefinitionError::EmptyName { what: "version" });
        }
        if self.property_name.trim().is_empty() {
            return Err(RuleDefinitionError::EmptyName {
                what: "property name",
            });
        }

        let mode = self.resolve_mode()?;

        if let Some(default) = &self.default_value
            && let Err(err) = crate::validate::check_value(&mode, &self.property_name, default)
        {
            return Err(RuleDefinitionError::InvalidDefault {
                property: self.property_name,
                default: default.clone(),
                reason: err.message().to_owned(),
            });
        }

        Ok(PropertyRuleSet {
            version: self.version,
            property_name: self.property_name,
            mode,
            min_value: self.min_value,
            max_value: self.max_value,
            default_value: self.default_value,
            description: self.description,
            allow_negative_weight: self.allow_negative_weight,
        })
    }

    fn resolve_mode(&self) -> Result<ValidationMode, RuleDefinitionError> {
        let has_bounds = self.min_value.is_some() || self.max_value.is_some();
        match &self.parameters {
            Some(_) if has_bounds => Err(RuleDefinitionError::EnumeratedWithRange {
                property: self.property_name.clone(),
            }),
            Some(params) if params.is_empty() => Err(RuleDefinitionError::EmptyParameters {
                property: self.property_name.clone(),
            }),
            Some(params) => {
                if let Some(bad) = params
                    .iter()
                    .find(|p| p.trim().is_empty() || !crate::validate::is_single_token(p))
                {
                    return Err(RuleDefinitionError::MalformedParameter {
                        property: self.property_name.clone(),
                        parameter: bad.clone(),
                    });
                }
                Ok(ValidationMode::Enumerated(params.iter().cloned().collect()))
            }
            None if has_bounds => {
                let min = self.parse_bound("min", self.min_value.as_deref())?;
                let max = self.parse_bound("max", self.max_value.as_deref())?;
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    return Err(RuleDefinitionError::InvertedBounds {
                        property: self.property_name.clone(),
                        min: lo,
                        max: hi,
                    });
                }
                Ok(ValidationMode::NumericRange { min, max })
            }
            None => Ok(ValidationMode::FreeForm),
        }
    }

    fn parse_bound(
        &self,
        bound: &'static str,
        raw: Option<&str>,
    ) -> Result<Option<f64>, RuleDefinitionError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        match crate::validate::parse_number(raw) {
            Some(v) => Ok(Some(v)),
            None => Err(RuleDefinitionError::UnparsableBound {
                property: self.property_name.clone(),
                bound,
                value: raw.to_owned(),
            }),
        }
    }
}
