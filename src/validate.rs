use crate::{
    EngineConfig, ErrorCode, Input, NormalizedValue, PropertyRuleSet, ValidationError,
    ValidationMode,
};

/// Checks single weighted inputs against their rule set.
///
/// Value and weight are checked independently. The validator holds no state
/// beyond its configuration, so one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator {
    config: EngineConfig,
}

impl InputValidator {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Validate both the value and the weight of `input`.
    ///
    /// # Errors
    ///
    /// Returns the value problem if there is one, otherwise the weight problem.
    /// Use [`validate_value`](Self::validate_value) and
    /// [`validate_weight`](Self::validate_weight) to see both.
    pub fn validate(
        &self,
        rule: &PropertyRuleSet,
        input: &Input,
    ) -> Result<NormalizedValue, ValidationError> {
        let value = self.validate_value(rule, input)?;
        self.validate_weight(rule, input.weight)?;
        Ok(value)
    }

    /// Substitute the default for a blank value, then apply the rule set's mode.
    ///
    /// # Errors
    ///
    /// Returns `MissingValue`, `InvalidParameter`, `NotNumeric` or `OutOfRange`.
    pub fn validate_value(
        &self,
        rule: &PropertyRuleSet,
        input: &Input,
    ) -> Result<NormalizedValue, ValidationError> {
        let property = rule.property_name();
        if input.is_blank() {
            return match rule.default_value() {
                Some(default) => {
                    check_value(rule.mode(), property, default)?;
                    Ok(NormalizedValue::new(default, true))
                }
                None => Err(ValidationError::missing_value(property)),
            };
        }
        check_value(rule.mode(), property, &input.value)?;
        Ok(NormalizedValue::new(input.value.as_str(), false))
    }

    /// # Errors
    ///
    /// Returns `InvalidWeight` for a non-finite weight, a zero weight when the
    /// configuration disallows it, or a negative weight the rule set does not permit.
    pub fn validate_weight(&self, rule: &PropertyRuleSet, weight: f64) -> Result<(), ValidationError> {
        let property = rule.property_name();
        if !weight.is_finite() {
            return Err(invalid_weight(
                property,
                format!("weight {weight} of property '{property}' is not a finite number"),
            ));
        }
        if weight == 0.0 {
            if self.config.allow_zero_weight {
                return Ok(());
            }
            return Err(invalid_weight(
                property,
                format!("zero weight is not allowed for property '{property}'"),
            )
            .with_context("allow_zero_weight=false"));
        }
        if weight < 0.0 && !rule.allows_negative_weight() {
            return Err(invalid_weight(
                property,
                format!("negative weight {weight} is not allowed for property '{property}'"),
            ));
        }
        Ok(())
    }
}

fn invalid_weight(property: &str, message: String) -> ValidationError {
    ValidationError::new(ErrorCode::InvalidWeight, property, message)
}

/// Parse a finite number. `NaN` and infinities are not numbers here.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric text whose magnitude exceeds `f64`, such as `1e400`. Spelled-out
/// `inf` is not numeric text.
fn overflows(raw: &str) -> bool {
    raw.contains(|c: char| c.is_ascii_digit())
        && raw.parse::<f64>().is_ok_and(f64::is_infinite)
}

/// A value renders as one command token: no whitespace and no weight separator.
pub(crate) fn is_single_token(value: &str) -> bool {
    !value.contains(char::is_whitespace) && !value.contains("::")
}

/// Mode check shared by input validation and rule-set default checking.
pub(crate) fn check_value(
    mode: &ValidationMode,
    property: &str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing_value(property));
    }
    if !is_single_token(value) {
        return Err(ValidationError::new(
            ErrorCode::InvalidParameter,
            property,
            format!("'{value}' is not a single token; property '{property}' cannot hold it"),
        )
        .with_context("value must be a single token without '::'"));
    }
    match mode {
        ValidationMode::Enumerated(params) => {
            if params.contains(value) {
                return Ok(());
            }
            let allowed: Vec<&str> = params.iter().map(String::as_str).collect();
            Err(ValidationError::new(
                ErrorCode::InvalidParameter,
                property,
                format!("'{value}' is not an allowed value for property '{property}'"),
            )
            .with_context(format!("allowed: {}", allowed.join(", "))))
        }
        ValidationMode::NumericRange { min, max } => {
            let Some(number) = parse_number(value) else {
                if overflows(value) {
                    return Err(ValidationError::new(
                        ErrorCode::OutOfRange,
                        property,
                        format!("{value} is outside the representable number range"),
                    )
                    .with_context(mode.to_string()));
                }
                return Err(ValidationError::new(
                    ErrorCode::NotNumeric,
                    property,
                    format!("'{value}' is not a number; property '{property}' expects one"),
                ));
            };
            let reason = match (min, max) {
                (Some(lo), _) if number < *lo => Some(format!("{value} is below the minimum {lo}")),
                (_, Some(hi)) if number > *hi => Some(format!("{value} is above the maximum {hi}")),
                _ => None,
            };
            match reason {
                Some(reason) => Err(ValidationError::new(ErrorCode::OutOfRange, property, reason)
                    .with_context(mode.to_string())),
                None => Ok(()),
            }
        }
        ValidationMode::FreeForm => Ok(()),
    }
}
