// demos/compile_deck.rs
//
// Usage: cargo run --example compile_deck -- [PAYLOAD_FILE] [TOPIC] [--study]
// Without a payload file a built-in sample deck is compiled.

use aislides_tools::{markdown::extract_text_from_deck, AssetCache, CompilerConfig, DeckCompiler};
use anyhow::Context;
use log::info;
use std::{env, fs};

const SAMPLE_PAYLOAD: &str = r#"```json
{
  "title": "Coffee Market 2025",
  "slides": [
    {"layout": "title", "content": {"title": "Coffee Market 2025", "subtitle": "Where the beans are going"}},
    {"layout": "chart_focus", "content": {"title": "Consumption", "chart": "BAR|2022,2023,2024|Cups (bn):410,425,447"}},
    {"content": {"quote": "Coffee is a language in itself.", "author": "Jackie Chan"}},
    {"layout": "content_with_table", "content": {"title": "Top producers", "table": "|Country|Share|\n|---|---|\n|Brazil|37%|\n|Vietnam|17%|"}},
    {"layout": "image_focus", "content": {"title": "Origins", "image": "coffee cherries on a branch"}},
    {"content": {"title": "Thank you", "text": "Questions?"}},
  ]
}
```"#;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let study_deck = args.iter().any(|a| a == "--study");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let payload = match positional.first() {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read payload {}", path))?,
        None => SAMPLE_PAYLOAD.to_string(),
    };
    let topic = positional.get(1).map(|s| s.as_str()).unwrap_or("Coffee market");

    let compiler = DeckCompiler::for_topic(topic, study_deck, CompilerConfig::default())?;
    info!("Using theme '{}'", compiler.theme().name);

    let deck = aislides_tools::ingest::parse_deck(&payload);
    for request in compiler.plan_image_requests(&deck) {
        info!("Image needed for {}: {}", request.key, request.prompt);
    }

    let compiled = compiler.compile_deck(&deck, &AssetCache::new());
    println!("{}", serde_json::to_string_pretty(&compiled)?);
    println!("\n{}", extract_text_from_deck(&compiled));
    Ok(())
}
