use stylegen::{
    ErrorCode, GenerationEngine, GenerationPhase, GenerationRequest, InMemoryCatalog,
    InMemoryCatalogBuilder, Input, PropertyRuleSet, RuleDefinitionError, Style,
};

fn engine_with(
    f: impl FnOnce(InMemoryCatalogBuilder) -> InMemoryCatalogBuilder,
) -> GenerationEngine<InMemoryCatalog> {
    let builder = InMemoryCatalog::builder().style(Style::new("raw", "photo"));
    GenerationEngine::new(f(builder).build().unwrap())
}

#[test]
fn repeated_property_rendered_each_time() {
    let engine = engine_with(|c| c.property("6", "sref", |p| p));
    let request = GenerationRequest::new("6", "raw")
        .input("sref", "a")
        .input("sref", Input::weighted("b", 3.0));
    let result = engine.generate(&request).unwrap();
    assert_eq!(result.command(), Some("raw 6 sref a sref b::3"));
}

#[test]
fn repeated_invalid_property_reports_each() {
    let engine = engine_with(|c| c.property("6", "q", |p| p.parameters([".5", "1", "2"])));
    let request = GenerationRequest::new("6", "raw")
        .input("q", "3")
        .input("q", "4");
    let result = engine.generate(&request).unwrap();
    assert_eq!(result.errors().len(), 2);
}

#[test]
fn whitespace_is_not_trimmed_from_real_values() {
    let engine = engine_with(|c| c.property("6", "ar", |p| p.parameters(["1:1"])));
    let result = engine
        .generate(&GenerationRequest::new("6", "raw").input("ar", " 1:1"))
        .unwrap();
    assert_eq!(result.errors()[0].code(), ErrorCode::InvalidParameter);
}

#[test]
fn negative_bounds() {
    let engine = engine_with(|c| c.property("6", "shift", |p| p.min("-10.5").max("-1")));
    let ok = engine
        .generate(&GenerationRequest::new("6", "raw").input("shift", "-10.5"))
        .unwrap();
    assert_eq!(ok.command(), Some("raw 6 shift -10.5"));
    let bad = engine
        .generate(&GenerationRequest::new("6", "raw").input("shift", "0"))
        .unwrap();
    assert_eq!(bad.errors()[0].code(), ErrorCode::OutOfRange);
}

#[test]
fn exponent_notation_is_numeric() {
    let engine = engine_with(|c| c.property("6", "seed", |p| p.min("0").max("1e6")));
    let result = engine
        .generate(&GenerationRequest::new("6", "raw").input("seed", "2.5e3"))
        .unwrap();
    assert_eq!(result.command(), Some("raw 6 seed 2.5e3"));
}

#[test]
fn required_missing_without_rule_is_rule_not_found() {
    let engine = engine_with(|c| c);
    let result = engine
        .generate(&GenerationRequest::new("6", "raw").require("chaos"))
        .unwrap();
    assert_eq!(result.errors()[0].code(), ErrorCode::RuleNotFound);
    assert_eq!(result.errors()[0].context(), Some("version=6"));
}

#[test]
fn required_missing_checked_in_requirement_order() {
    let engine = engine_with(|c| {
        c.property("6", "a", |p| p)
            .property("6", "b", |p| p)
            .property("6", "c", |p| p.default_value("x"))
    });
    let report = engine
        .generate_detailed(
            &GenerationRequest::new("6", "raw")
                .require("b")
                .require("c")
                .require("a"),
        )
        .unwrap();
    let names: Vec<&str> = report
        .result()
        .errors()
        .iter()
        .map(|e| e.property_name())
        .collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(report.phase(), GenerationPhase::Failed);
    assert_eq!(report.defaulted(), &["c"]);
}

#[test]
fn negative_weight_only_where_rule_allows() {
    let engine = engine_with(|c| {
        c.property("6", "subject", |p| p.allow_negative_weight(true))
            .property("6", "mood", |p| p)
    });
    let ok = engine
        .generate(&GenerationRequest::new("6", "raw").input("subject", Input::weighted("dog", -0.5)))
        .unwrap();
    assert_eq!(ok.command(), Some("raw 6 subject dog::-0.5"));

    let bad = engine
        .generate(&GenerationRequest::new("6", "raw").input("mood", Input::weighted("calm", -1.0)))
        .unwrap();
    assert_eq!(bad.errors()[0].code(), ErrorCode::InvalidWeight);
}

#[test]
fn empty_default_is_rejected_at_definition() {
    let result = PropertyRuleSet::builder("6", "no").default_value("  ").build();
    assert!(matches!(
        result,
        Err(RuleDefinitionError::InvalidDefault { .. })
    ));
}

#[test]
fn infinite_bound_is_rejected_at_definition() {
    let result = PropertyRuleSet::builder("6", "chaos").max("inf").build();
    assert!(matches!(
        result,
        Err(RuleDefinitionError::UnparsableBound { .. })
    ));
}

#[test]
fn equal_bounds_pin_a_single_value() {
    let engine = engine_with(|c| c.property("6", "v", |p| p.min("7").max("7")));
    assert!(engine
        .generate(&GenerationRequest::new("6", "raw").input("v", "7"))
        .unwrap()
        .is_success());
    assert!(!engine
        .generate(&GenerationRequest::new("6", "raw").input("v", "7.0001"))
        .unwrap()
        .is_success());
}

#[test]
fn overflowing_input_is_out_of_range_and_spelled_infinity_is_not_numeric() {
    let engine = engine_with(|c| c.property("6", "seed", |p| p.min("0")));
    let huge = engine
        .generate(&GenerationRequest::new("6", "raw").input("seed", "1e400"))
        .unwrap();
    assert_eq!(huge.errors()[0].code(), ErrorCode::OutOfRange);
    assert_eq!(huge.errors()[0].context(), Some("range [0, +inf]"));

    let spelled = engine
        .generate(&GenerationRequest::new("6", "raw").input("seed", "infinity"))
        .unwrap();
    assert_eq!(spelled.errors()[0].code(), ErrorCode::NotNumeric);
}

#[test]
fn free_form_value_with_spaces_is_rejected() {
    let engine = engine_with(|c| c.property("6", "no", |p| p));
    let result = engine
        .generate(&GenerationRequest::new("6", "raw").input("no", "text watermark"))
        .unwrap();
    assert_eq!(result.command(), None);
    assert_eq!(result.errors()[0].code(), ErrorCode::InvalidParameter);
}

#[test]
fn parameter_list_with_spaces_is_rejected_at_definition() {
    let result = PropertyRuleSet::builder("6", "ar").parameters(["16 9"]).build();
    assert!(matches!(
        result,
        Err(RuleDefinitionError::MalformedParameter { .. })
    ));
}
