// demos/diff_decks.rs
//
// Compiles two revisions of a deck and prints how they differ.
//
// Usage: cargo run --example diff_decks --features diff

use aislides_tools::{
    diff::generate_markdown_diff, markdown::extract_text_from_deck, AssetCache, ComparerBuilder, CompilerConfig,
    DeckCompiler,
};

const BASE: &str = r#"[
  {"layout": "title", "title": "Launch plan", "subtitle": "Q3"},
  {"layout": "content", "title": "Milestones", "points": ["Beta in July", "GA in September"]},
  {"layout": "statistic", "title": "Waitlist", "statistic": "12k", "text": "sign-ups so far"}
]"#;

const CHANGED: &str = r#"[
  {"layout": "title", "title": "Launch plan", "subtitle": "Q3 and Q4"},
  {"layout": "content", "title": "Milestones", "points": ["Beta in July", "GA in October", "Partner launch"]},
  {"layout": "statistic", "title": "Waitlist", "statistic": "15k", "text": "sign-ups so far"}
]"#;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let compiler = DeckCompiler::for_topic("Product launch", false, CompilerConfig::default())?;
    let assets = AssetCache::new();
    let base = compiler.compile_payload(BASE, &assets);
    let changed = compiler.compile_payload(CHANGED, &assets);

    let result = ComparerBuilder::new()
        .set_base(base.clone())
        .set_simplify(true)
        .build()?
        .compare(&changed)?;

    println!("{}\n", result.get_readable_diff()?);
    println!("{}", result.get_git_diff()?);

    let markdown_diff = generate_markdown_diff(
        &extract_text_from_deck(&base),
        &extract_text_from_deck(&changed),
        "a/deck.md",
        "b/deck.md",
    );
    println!("{}", markdown_diff);
    Ok(())
}
