use serde::{Deserialize, Deserializer, Serialize};

use super::error::RuleDefinitionError;
use super::rule_set::PropertyRuleSet;

/// Serialized form of a [`PropertyRuleSet`].
///
/// Bounds, defaults and the version are text, but bare numbers are accepted
/// when reading, so `min = 0` and `min = "0"` are the same definition.
/// Converting into a rule set goes through [`PropertyRuleSet::builder()`].
///
/// # Example
///
/// ```
/// use stylegen::{PropertyDefinition, PropertyRuleSet};
///
/// let rule = PropertyRuleSet::builder("6", "chaos").min("0").max("100").build().unwrap();
/// let definition = PropertyDefinition::from(&rule);
/// assert_eq!(definition.max.as_deref(), Some("100"));
/// assert_eq!(PropertyRuleSet::try_from(definition).unwrap(), rule);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDefinition {
    #[serde(deserialize_with = "text")]
    pub version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_text")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_text")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_text")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_negative_weight: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|s| s.map(String::from))
}

impl TryFrom<PropertyDefinition> for PropertyRuleSet {
    type Error = RuleDefinitionError;

    fn try_from(definition: PropertyDefinition) -> Result<Self, Self::Error> {
        let mut builder = PropertyRuleSet::builder(&definition.version, &definition.name)
            .allow_negative_weight(definition.allow_negative_weight);
        if let Some(parameters) = definition.parameters {
            builder = builder.parameters(parameters);
        }
        if let Some(min) = definition.min {
            builder = builder.min(min);
        }
        if let Some(max) = definition.max {
            builder = builder.max(max);
        }
        if let Some(default) = definition.default {
            builder = builder.default_value(default);
        }
        if let Some(description) = definition.description {
            builder = builder.description(description);
        }
        builder.build()
    }
}

impl From<&PropertyRuleSet> for PropertyDefinition {
    fn from(rule: &PropertyRuleSet) -> Self {
        Self {
            version: rule.version().to_owned(),
            name: rule.property_name().to_owned(),
            parameters: rule.parameters().map(|p| p.iter().cloned().collect()),
            min: rule.min_value().map(str::to_owned),
            max: rule.max_value().map(str::to_owned),
            default: rule.default_value().map(str::to_owned),
            description: rule.description().map(str::to_owned),
            allow_negative_weight: rule.allows_negative_weight(),
        }
    }
}

impl From<PropertyRuleSet> for PropertyDefinition {
    fn from(rule: PropertyRuleSet) -> Self {
        Self::from(&rule)
    }
}
