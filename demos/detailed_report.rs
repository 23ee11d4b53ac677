use stylegen::{GenerationEngine, GenerationRequest, InMemoryCatalog, Style};
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=stylegen=trace shows every phase transition and accepted value
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = InMemoryCatalog::builder()
        .style(Style::new("photo", "photography"))
        .property("6", "chaos", |p| p.min("0").max("100"))
        .property("6", "stylize", |p| p.min("0").max("1000").default_value("100"))
        .property("6", "ar", |p| p.parameters(["3:2", "1:1"]))
        .build()
        .expect("failed to build catalog");
    let engine = GenerationEngine::new(catalog);

    let good = GenerationRequest::new("6", "photo")
        .input("chaos", "12")
        .require("stylize");
    let report = engine.generate_detailed(&good).expect("catalog lookup failed");
    println!("{report}");

    let bad = GenerationRequest::new("6", "photo")
        .input("chaos", "lots")
        .input("ar", "4:3")
        .input("tile", "yes");
    let report = engine.generate_detailed(&bad).expect("catalog lookup failed");
    println!("{report}");
    println!("{}", report.result());
}
