use stylegen::{GenerationEngine, GenerationRequest, InMemoryCatalog, Input, Style};

fn main() {
    // Define the catalog
    let catalog = InMemoryCatalog::builder()
        .style(Style::new("anime", "illustration").tag("2d"))
        .property("6", "chaos", |p| p.min("0").max("100"))
        .property("6", "ar", |p| p.parameters(["16:9", "1:1", "9:16"]))
        .build()
        .expect("failed to build catalog");

    let engine = GenerationEngine::new(catalog);

    let request = GenerationRequest::new("6", "anime")
        .input("chaos", "40")
        .input("ar", Input::weighted("16:9", 2.0));

    match engine.generate(&request).expect("catalog lookup failed").into_result() {
        Ok(command) => println!("Command: {command}"),
        Err(errors) => {
            for err in errors {
                println!("{}: {err}", err.property_name());
            }
        }
    }
}
