use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::assemble::{CommandPart, assemble};
use crate::catalog::{ResolveError, RuleCatalog, resolve};
use crate::error::StylegenError;
use crate::validate::InputValidator;
use crate::{
    CatalogError, EngineConfig, GenerationPhase, GenerationReport, GenerationResult, Input,
    NEUTRAL_WEIGHT, NormalizedValue, ValidationError,
};

/// Everything one generation call needs: target version, style, the
/// caller-ordered weighted inputs, and the properties that must end up set.
///
/// # Example
///
/// ```
/// use stylegen::{GenerationRequest, Input};
///
/// let request = GenerationRequest::new("6", "anime")
///     .input("chaos", "40")
///     .input("subject", Input::weighted("fox", 2.0))
///     .require("ar");
/// assert_eq!(request.inputs().len(), 2);
/// assert_eq!(request.required(), &["ar"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct GenerationRequest {
    version: String,
    style: String,
    inputs: Vec<(String, Input)>,
    required: Vec<String>,
}

impl GenerationRequest {
    pub fn new(version: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            style: style.into(),
            inputs: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Build a request from pre-collected inputs and required names.
    pub fn from_parts<I, P, R, Q>(
        version: impl Into<String>,
        style: impl Into<String>,
        inputs: I,
        required: R,
    ) -> Self
    where
        I: IntoIterator<Item = (P, Input)>,
        P: Into<String>,
        R: IntoIterator<Item = Q>,
        Q: AsRef<str>,
    {
        let mut request = Self::new(version, style);
        request.inputs = inputs.into_iter().map(|(p, i)| (p.into(), i)).collect();
        for name in required {
            request = request.require(name.as_ref());
        }
        request
    }

    /// Append an input. Order is kept and rendered as given; a property may repeat.
    pub fn input(mut self, property: &str, input: impl Into<Input>) -> Self {
        self.inputs.push((property.to_owned(), input.into()));
        self
    }

    /// Mark a property as required. Repeats are ignored.
    pub fn require(mut self, property: &str) -> Self {
        if !self.required.iter().any(|r| r == property) {
            self.required.push(property.to_owned());
        }
        self
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn style(&self) -> &str {
        &self.style
    }

    #[must_use]
    pub fn inputs(&self) -> &[(String, Input)] {
        &self.inputs
    }

    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    fn supplies(&self, property: &str) -> bool {
        self.inputs.iter().any(|(p, _)| p == property)
    }
}

/// Validates generation requests against a [`RuleCatalog`] and renders commands.
///
/// Holds no per-request state. Share it behind `Arc` to generate from many
/// threads at once.
#[derive(Debug, Clone)]
pub struct GenerationEngine<C> {
    catalog: C,
    validator: InputValidator,
}

struct Outcome {
    result: GenerationResult,
    phase: GenerationPhase,
    defaulted: Vec<String>,
}

impl<C: RuleCatalog> GenerationEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: C, config: EngineConfig) -> Self {
        Self {
            catalog,
            validator: InputValidator::new(config),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.validator.config()
    }

    /// Validate every input and, if nothing is wrong, render the command.
    ///
    /// All problems are collected in one pass: supplied inputs in order, then
    /// required properties that were not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`StylegenError::Catalog`] only when the catalog lookup itself
    /// fails. Invalid input is reported inside the [`GenerationResult`].
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, StylegenError> {
        Ok(self.run(request)?.result)
    }

    /// Like [`generate()`](Self::generate), with the terminal phase, the
    /// defaulted properties and timing.
    ///
    /// # Errors
    ///
    /// Same as [`generate()`](Self::generate).
    pub fn generate_detailed(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, StylegenError> {
        let start = Instant::now();
        let outcome = self.run(request)?;
        Ok(GenerationReport::new(
            outcome.result,
            outcome.phase,
            outcome.defaulted,
            start.elapsed(),
        ))
    }

    fn run(&self, request: &GenerationRequest) -> Result<Outcome, StylegenError> {
        let span = tracing::debug_span!("generate", version = %request.version, style = %request.style);
        let _guard = span.enter();

        let mut phase = GenerationPhase::Collecting;
        debug!(
            %phase,
            inputs = request.inputs.len(),
            required = request.required.len(),
            "collecting request"
        );

        let mut errors = Vec::new();
        let style = match self.catalog.style(&request.style) {
            Ok(Some(style)) => Some(style.name.clone()),
            Ok(None) => {
                reject(&mut errors, ValidationError::style_not_found(&request.style));
                None
            }
            Err(err) => return Err(lookup_failed(err)),
        };

        advance(&mut phase, GenerationPhase::Validating);
        let mut accepted: Vec<(&str, NormalizedValue, f64)> = Vec::new();
        for (property, input) in &request.inputs {
            if let Some(value) = self.check(&request.version, property, input, &mut errors)? {
                accepted.push((property.as_str(), value, input.weight));
            }
        }

        let blank = Input::empty();
        for property in &request.required {
            if request.supplies(property) {
                continue;
            }
            trace!(property = %property, "required property not supplied");
            if let Some(value) = self.check(&request.version, property, &blank, &mut errors)? {
                accepted.push((property.as_str(), value, NEUTRAL_WEIGHT));
            }
        }

        let defaulted: Vec<String> = accepted
            .iter()
            .filter(|(_, value, _)| value.is_defaulted())
            .map(|(property, _, _)| (*property).to_owned())
            .collect();

        let result = match style {
            Some(style) if errors.is_empty() => {
                advance(&mut phase, GenerationPhase::Assembling);
                let parts: Vec<CommandPart<'_>> = accepted
                    .iter()
                    .map(|(property, value, weight)| CommandPart::new(property, value, *weight))
                    .collect();
                let command = assemble(&style, &request.version, &parts);
                advance(&mut phase, GenerationPhase::Assembled);
                GenerationResult::Assembled(command)
            }
            _ => {
                advance(&mut phase, GenerationPhase::Failed);
                debug!(errors = errors.len(), "generation failed");
                GenerationResult::Failed(errors)
            }
        };

        Ok(Outcome {
            result,
            phase,
            defaulted,
        })
    }

    /// Resolve and validate one property. Problems go to `errors`; only a
    /// broken catalog is returned as `Err`.
    fn check(
        &self,
        version: &str,
        property: &str,
        input: &Input,
        errors: &mut Vec<ValidationError>,
    ) -> Result<Option<NormalizedValue>, StylegenError> {
        let rule = match resolve(&self.catalog, version, property) {
            Ok(rule) => rule,
            Err(ResolveError::NotFound(err)) => {
                reject(errors, err);
                return Ok(None);
            }
            Err(ResolveError::Catalog(err)) => return Err(lookup_failed(err)),
        };

        let value = self.validator.validate_value(&rule, input);
        let weight = self.validator.validate_weight(&rule, input.weight);
        match (value, weight) {
            (Ok(value), Ok(())) => {
                trace!(
                    property,
                    value = value.as_str(),
                    defaulted = value.is_defaulted(),
                    "accepted"
                );
                Ok(Some(value))
            }
            (value, weight) => {
                if let Err(err) = value {
                    reject(errors, err);
                }
                if let Err(err) = weight {
                    reject(errors, err);
                }
                Ok(None)
            }
        }
    }
}

fn advance(phase: &mut GenerationPhase, next: GenerationPhase) {
    debug!(from = %phase, to = %next, "phase transition");
    *phase = next;
}

fn reject(errors: &mut Vec<ValidationError>, err: ValidationError) {
    debug!(
        code = err.error_code(),
        property = err.property_name(),
        "rejected: {}",
        err.message()
    );
    errors.push(err);
}

fn lookup_failed(err: CatalogError) -> StylegenError {
    warn!(error = %err, "catalog lookup failed");
    StylegenError::Catalog(err)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::{ErrorCode, InMemoryCatalog, PropertyRuleSet, Style};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::builder()
            .style(Style::new("anime", "illustration"))
            .property("6", "chaos", |p| p.min("0").max("100"))
            .property("6", "ar", |p| p.parameters(["16:9", "1:1", "9:16"]))
            .property("6", "stylize", |p| p.min("0").max("1000").default_value("100"))
            .property("6", "seed", |p| p.min("0"))
            .build()
            .unwrap()
    }

    fn codes(result: &GenerationResult) -> Vec<(ErrorCode, &str)> {
        result
            .errors()
            .iter()
            .map(|e| (e.code(), e.property_name()))
            .collect()
    }

    #[test]
    fn assembles_in_input_order() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "anime")
            .input("chaos", "40")
            .input("ar", "16:9");
        let result = engine.generate(&request).unwrap();
        assert_eq!(result.command(), Some("anime 6 chaos 40 ar 16:9"));
        assert!(result.errors().is_empty());
    }

    #[test]
    fn out_of_range_fails_without_command() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "anime")
            .input("chaos", "150")
            .input("ar", "16:9");
        let result = engine.generate(&request).unwrap();
        assert_eq!(result.command(), None);
        assert_eq!(codes(&result), vec![(ErrorCode::OutOfRange, "chaos")]);
    }

    #[test]
    fn collects_every_error() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "anime")
            .input("chaos", "lots")
            .input("ar", "4:3")
            .input("stylize", "250")
            .require("seed");
        let result = engine.generate(&request).unwrap();
        assert_eq!(
            codes(&result),
            vec![
                (ErrorCode::NotNumeric, "chaos"),
                (ErrorCode::InvalidParameter, "ar"),
                (ErrorCode::MissingValue, "seed"),
            ]
        );
    }

    #[test]
    fn value_and_weight_errors_both_reported() {
        let engine = GenerationEngine::new(catalog());
        let request =
            GenerationRequest::new("6", "anime").input("chaos", Input::weighted("999", f64::NAN));
        let result = engine.generate(&request).unwrap();
        assert_eq!(
            codes(&result),
            vec![
                (ErrorCode::OutOfRange, "chaos"),
                (ErrorCode::InvalidWeight, "chaos"),
            ]
        );
    }

    #[test]
    fn free_form_value_cannot_smuggle_tokens_into_command() {
        let catalog = InMemoryCatalog::builder()
            .style(Style::new("anime", "illustration"))
            .property("6", "no", |p| p)
            .property("6", "chaos", |p| p.min("0").max("100"))
            .build()
            .unwrap();
        let engine = GenerationEngine::new(catalog);
        let request = GenerationRequest::new("6", "anime").input("no", "cat::5 chaos 900");
        let result = engine.generate(&request).unwrap();
        assert_eq!(result.command(), None);
        assert_eq!(codes(&result), vec![(ErrorCode::InvalidParameter, "no")]);

        let ok = engine
            .generate(&GenerationRequest::new("6", "anime").input("no", "text,watermark"))
            .unwrap();
        assert_eq!(ok.command(), Some("anime 6 no text,watermark"));
    }

    #[test]
    fn unknown_property_is_rule_not_found() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "anime")
            .input("tile", "")
            .input("chaos", "10");
        let result = engine.generate(&request).unwrap();
        assert_eq!(codes(&result), vec![(ErrorCode::RuleNotFound, "tile")]);
    }

    #[test]
    fn unknown_version_rejects_every_property() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("4", "anime")
            .input("chaos", "10")
            .input("ar", "1:1");
        let result = engine.generate(&request).unwrap();
        assert_eq!(
            codes(&result),
            vec![
                (ErrorCode::RuleNotFound, "chaos"),
                (ErrorCode::RuleNotFound, "ar"),
            ]
        );
    }

    #[test]
    fn unknown_style_reported_first_and_inputs_still_checked() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "vaporwave").input("chaos", "500");
        let result = engine.generate(&request).unwrap();
        assert_eq!(
            codes(&result),
            vec![
                (ErrorCode::StyleNotFound, "style"),
                (ErrorCode::OutOfRange, "chaos"),
            ]
        );
    }

    #[test]
    fn required_with_default_is_filled_and_rendered_last() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "anime")
            .require("stylize")
            .input("chaos", "5");
        let report = engine.generate_detailed(&request).unwrap();
        assert_eq!(report.result().command(), Some("anime 6 chaos 5 stylize 100"));
        assert_eq!(report.defaulted(), &["stylize"]);
        assert_eq!(report.phase(), GenerationPhase::Assembled);
    }

    #[test]
    fn required_and_supplied_checked_once() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "anime")
            .input("chaos", "500")
            .require("chaos");
        let result = engine.generate(&request).unwrap();
        assert_eq!(codes(&result), vec![(ErrorCode::OutOfRange, "chaos")]);
    }

    #[test]
    fn blank_supplied_value_uses_default() {
        let engine = GenerationEngine::new(catalog());
        let request = GenerationRequest::new("6", "anime").input("stylize", Input::weighted(" ", 2.0));
        let result = engine.generate(&request).unwrap();
        assert_eq!(result.command(), Some("anime 6 stylize 100::2"));
    }

    #[test]
    fn zero_weight_policy_from_config() {
        let request = GenerationRequest::new("6", "anime").input("chaos", Input::weighted("5", 0.0));

        let lenient = GenerationEngine::new(catalog());
        assert_eq!(
            lenient.generate(&request).unwrap().command(),
            Some("anime 6 chaos 5")
        );

        let strict =
            GenerationEngine::with_config(catalog(), EngineConfig::new().allow_zero_weight(false));
        assert!(!strict.config().allow_zero_weight);
        let result = strict.generate(&request).unwrap();
        assert_eq!(codes(&result), vec![(ErrorCode::InvalidWeight, "chaos")]);
    }

    #[test]
    fn empty_request_renders_header() {
        let engine = GenerationEngine::new(catalog());
        let result = engine
            .generate(&GenerationRequest::new("6", "anime"))
            .unwrap();
        assert_eq!(result.command(), Some("anime 6"));
    }

    #[test]
    fn failed_report_has_failed_phase() {
        let engine = GenerationEngine::new(catalog());
        let report = engine
            .generate_detailed(&GenerationRequest::new("6", "anime").input("ar", "2:1"))
            .unwrap();
        assert_eq!(report.phase(), GenerationPhase::Failed);
        assert!(report.defaulted().is_empty());
    }

    struct BrokenCatalog;

    impl RuleCatalog for BrokenCatalog {
        fn rule_set(
            &self,
            _version: &str,
            _property: &str,
        ) -> Result<Option<Cow<'_, PropertyRuleSet>>, CatalogError> {
            Err(CatalogError::Unavailable {
                message: "timeout".into(),
            })
        }

        fn style(&self, name: &str) -> Result<Option<Cow<'_, Style>>, CatalogError> {
            Ok(Some(Cow::Owned(Style::new(name, "any"))))
        }
    }

    #[test]
    fn catalog_failure_is_fatal() {
        let engine = GenerationEngine::new(BrokenCatalog);
        let request = GenerationRequest::new("6", "anime").input("chaos", "1");
        let err = engine.generate(&request).unwrap_err();
        assert!(matches!(err, StylegenError::Catalog(CatalogError::Unavailable { .. })));
    }

    #[test]
    fn from_parts_dedupes_required() {
        let request = GenerationRequest::from_parts(
            "6",
            "anime",
            [("chaos", Input::new("1"))],
            ["seed", "ar", "seed"],
        );
        assert_eq!(request.required(), &["seed", "ar"]);
        assert_eq!(request.inputs()[0].0, "chaos");
    }
}
