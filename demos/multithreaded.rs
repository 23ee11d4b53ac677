use std::sync::Arc;
use std::thread;

use stylegen::{GenerationEngine, GenerationRequest, InMemoryCatalog, Style};

fn main() {
    let catalog = InMemoryCatalog::builder()
        .style(Style::new("anime", "illustration"))
        .property("6", "chaos", |p| p.min("0").max("100"))
        .build()
        .expect("failed to build catalog");
    let engine = Arc::new(GenerationEngine::new(catalog));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let chaos = (i * 40).to_string();
                let request = GenerationRequest::new("6", "anime").input("chaos", chaos);
                let result = engine.generate(&request).expect("catalog lookup failed");
                format!("thread {i}: {result}")
            })
        })
        .collect();

    for handle in handles {
        println!("{}", handle.join().expect("thread panicked"));
    }
}
