use stylegen::{
    ErrorCode, GenerationEngine, GenerationRequest, GenerationResult, InMemoryCatalog, Input,
    Style,
};

fn engine() -> GenerationEngine<InMemoryCatalog> {
    let catalog = InMemoryCatalog::builder()
        .style(
            Style::new("anime", "illustration")
                .description("Cel-shaded look")
                .tag("2d"),
        )
        .property("6", "chaos", |p| p.min("0").max("100"))
        .property("6", "ar", |p| p.parameters(["16:9", "1:1", "9:16"]))
        .build()
        .unwrap();
    GenerationEngine::new(catalog)
}

#[test]
fn anime_example_assembles() {
    let request = GenerationRequest::new("6", "anime")
        .input("chaos", Input::weighted("40", 1.0))
        .input("ar", Input::weighted("16:9", 1.0));
    let result = engine().generate(&request).unwrap();
    assert_eq!(
        result,
        GenerationResult::Assembled("anime 6 chaos 40 ar 16:9".to_owned())
    );
    assert!(result.errors().is_empty());
}

#[test]
fn anime_example_out_of_range() {
    let request = GenerationRequest::new("6", "anime")
        .input("chaos", Input::weighted("150", 1.0))
        .input("ar", Input::weighted("16:9", 1.0));
    let result = engine().generate(&request).unwrap();
    assert_eq!(result.command(), None);
    assert_eq!(result.errors().len(), 1);
    let err = &result.errors()[0];
    assert_eq!(err.code(), ErrorCode::OutOfRange);
    assert_eq!(err.error_code(), "OUT_OF_RANGE");
    assert_eq!(err.property_name(), "chaos");
}

#[test]
fn two_invalid_and_one_missing_gives_three_errors() {
    let request = GenerationRequest::new("6", "anime")
        .input("chaos", "150")
        .input("ar", "4:3")
        .require("ar")
        .require("quality");
    let result = engine().generate(&request).unwrap();
    let codes: Vec<ErrorCode> = result.errors().iter().map(|e| e.code()).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::OutOfRange,
            ErrorCode::InvalidParameter,
            ErrorCode::RuleNotFound,
        ]
    );
}

#[test]
fn weights_render_with_minimal_suffix() {
    let request = GenerationRequest::new("6", "anime")
        .input("chaos", Input::weighted("40", 2.0))
        .input("ar", Input::weighted("1:1", 0.75));
    let result = engine().generate(&request).unwrap();
    assert_eq!(result.command(), Some("anime 6 chaos 40::2 ar 1:1::0.75"));
}

#[test]
fn into_result_bridges_to_question_mark() {
    let ok = engine()
        .generate(&GenerationRequest::new("6", "anime").input("ar", "9:16"))
        .unwrap()
        .into_result();
    assert_eq!(ok, Ok("anime 6 ar 9:16".to_owned()));

    let err = engine()
        .generate(&GenerationRequest::new("6", "anime").input("ar", "9:17"))
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(err[0].code(), ErrorCode::InvalidParameter);
}
