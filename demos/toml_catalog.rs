use stylegen::{GenerationEngine, GenerationRequest, InMemoryCatalog};

const CATALOG: &str = r#"
[[styles]]
name = "anime"
type = "illustration"
tags = ["2d"]

[[properties]]
version = "6"
name = "chaos"
min = 0
max = 100

[[properties]]
version = "6"
name = "ar"
parameters = ["16:9", "1:1", "9:16"]
"#;

fn main() {
    let catalog = InMemoryCatalog::from_toml(CATALOG).expect("failed to load catalog");
    for version in catalog.versions() {
        for rule in catalog.rule_sets(version) {
            println!("{rule}");
        }
    }

    let engine = GenerationEngine::new(catalog);
    let request = GenerationRequest::new("6", "anime")
        .input("chaos", "40")
        .input("ar", "1:1");
    println!("{}", engine.generate(&request).expect("catalog lookup failed"));
}
