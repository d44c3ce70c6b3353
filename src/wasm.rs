//! JavaScript entry points. Everything crosses the boundary as JSON strings; empty
//! option strings select the defaults.

use wasm_bindgen::prelude::*;

use crate::compiler::DeckCompiler;
use crate::config::CompilerConfig;
use crate::converters::markdown::extract_text_from_deck;
use crate::errors::Result;
use crate::ingest::{parse_deck, repair};
use crate::models::deck::CompiledDeck;
use crate::models::template::AssetCache;
use crate::templates::Catalog;

fn config_from(config_json: &str) -> Result<CompilerConfig> {
    if config_json.trim().is_empty() {
        Ok(CompilerConfig::default())
    } else {
        CompilerConfig::from_json(config_json)
    }
}

fn assets_from(assets_json: &str) -> Result<AssetCache> {
    if assets_json.trim().is_empty() {
        Ok(AssetCache::new())
    } else {
        Ok(serde_json::from_str(assets_json)?)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn compile_to_json(
    payload: &str,
    topic: &str,
    study_deck: bool,
    assets_json: &str,
    config_json: &str,
) -> Result<String> {
    let compiler = DeckCompiler::for_topic(topic, study_deck, config_from(config_json)?)?;
    let deck = compiler.compile_payload(payload, &assets_from(assets_json)?);
    Ok(serde_json::to_string(&deck)?)
}

pub(crate) fn image_requests_to_json(payload: &str, topic: &str, study_deck: bool, config_json: &str) -> Result<String> {
    let compiler = DeckCompiler::for_topic(topic, study_deck, config_from(config_json)?)?;
    let requests = compiler.plan_image_requests(&parse_deck(payload));
    Ok(serde_json::to_string(&requests)?)
}

/// Installs the panic hook and routes `log` output to the browser console.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Compiles a raw model payload into a deck, returned as JSON.
///
/// # Arguments
///
/// * `payload` - The model output, fenced or not.
/// * `topic` - Deck topic used to pick the theme.
/// * `study_deck` - Selects the study catalog and theme packs.
/// * `assets_json` - Object of `slide-{index}-{slot}` keys to image URLs.
/// * `config_json` - A `CompilerConfig` object.
#[wasm_bindgen(js_name = compileDeck)]
pub fn compile_deck_json(
    payload: &str,
    topic: &str,
    study_deck: bool,
    assets_json: &str,
    config_json: &str,
) -> std::result::Result<String, JsValue> {
    compile_to_json(payload, topic, study_deck, assets_json, config_json).map_err(to_js)
}

/// Lists the images a payload needs, as a JSON array of requests.
#[wasm_bindgen(js_name = planImageRequests)]
pub fn plan_image_requests_json(
    payload: &str,
    topic: &str,
    study_deck: bool,
    config_json: &str,
) -> std::result::Result<String, JsValue> {
    image_requests_to_json(payload, topic, study_deck, config_json).map_err(to_js)
}

/// Repairs model output into parseable JSON text.
#[wasm_bindgen(js_name = repairJson)]
pub fn repair_json(raw: &str) -> String {
    repair(raw)
}

/// The layout menu for prompting, one line per layout.
#[wasm_bindgen(js_name = layoutMenu)]
pub fn layout_menu(study_deck: bool) -> String {
    Catalog::for_mode(study_deck).layout_menu()
}

/// Renders a compiled deck (JSON) as Markdown.
#[wasm_bindgen(js_name = deckToMarkdown)]
pub fn deck_to_markdown(deck_json: &str) -> std::result::Result<String, JsValue> {
    let deck: CompiledDeck = serde_json::from_str(deck_json).map_err(to_js)?;
    Ok(extract_text_from_deck(&deck))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_with_default_options() {
        let json = compile_to_json(
            r#"[{"layout": "title", "title": "Hello"}]"#,
            "greetings",
            false,
            "",
            "",
        )
        .expect("compiles");
        let deck: CompiledDeck = serde_json::from_str(&json).expect("deck json");
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].layout, "title");
    }

    #[test]
    fn assets_fill_image_slots() {
        let json = compile_to_json(
            r#"[{"layout": "image_focus", "title": "Fox", "image": "a red fox"}]"#,
            "animals",
            false,
            r#"{"slide-0-image": "https://img.example/fox.png"}"#,
            "",
        )
        .expect("compiles");
        assert!(json.contains("https://img.example/fox.png"));
    }

    #[test]
    fn bad_options_are_errors() {
        assert!(compile_to_json("[]", "x", false, "not json", "").is_err());
        assert!(compile_to_json("[]", "x", false, "", r#"{"maxImageRequests": "many"}"#).is_err());
    }

    #[test]
    fn image_requests_serialize_camel_case() {
        let json = image_requests_to_json(r#"[{"layout": "image_focus", "image": "an owl"}]"#, "x", false, "")
            .expect("plans");
        assert!(json.contains("\"slideIndex\":0"));
        assert!(json.contains("\"key\":\"slide-0-image\""));
    }
}
