use aislides_tools::config::GeometryConfig;
use aislides_tools::converters::geometry::contrast::{contrast_ratio, parse_color, slide_backdrop};
use aislides_tools::converters::geometry::{element_rect, is_frame, layout_groups, resolve_with, HeightCache, Rect};
use aislides_tools::ingest::normalize::{normalize, SlotKind};
use aislides_tools::models::element::ElementRecord;
use aislides_tools::models::template::{LayoutTemplate, RenderContext};
use aislides_tools::{AssetCache, Catalog, CompiledDeck, CompiledSlide, CompilerConfig, DeckCompiler};
use serde_json::{json, Map, Value as JsonValue};

const SENTENCE: &str = "Teams that measure outcomes instead of output ship fewer features but \
                        far more of the ones customers actually use every single day";

/// Every declared slot of a layout filled with content that grows.
fn fields_for(template: &LayoutTemplate) -> Map<String, JsonValue> {
    let mut fields = Map::new();
    fields.insert("layout".into(), json!(template.id));
    for slot in &template.slots {
        let value = match SlotKind::of(slot) {
            SlotKind::Chart => json!("LINE|Jan,Feb,Mar,Apr|Visits:120,340,290,410|Sign-ups:12,30,25,44"),
            SlotKind::Table => json!("|Plan|Price|Seats|\n|---|---|---|\n|Free|$0|1|\n|Team|$12|10|\n|Scale|$40|100|"),
            SlotKind::Image => json!("a lighthouse on a rocky coast at dusk"),
            SlotKind::List => json!([
                "Alice Chen - Engineering lead",
                "2019: founded in a garage",
                SENTENCE,
                "Measure twice, cut once",
                "Bob Diaz: Design",
                "Keep the feedback loop short",
                "Ship small changes often",
            ]),
            SlotKind::Text => json!(format!("{SENTENCE}. {SENTENCE}.")),
        };
        fields.insert(slot.clone(), value);
    }
    fields
}

/// One slide per catalog layout with every declared slot filled.
fn payload_for(catalog: &Catalog) -> String {
    let slides: Vec<JsonValue> = catalog
        .iter()
        .map(|template| JsonValue::Object(fields_for(template)))
        .collect();
    json!({ "title": "Everything at once", "slides": slides }).to_string()
}

/// A resolved layout together with the groups its unresolved elements formed.
struct ResolvedLayout {
    layout: String,
    groups: Vec<Vec<usize>>,
    elements: Vec<ElementRecord>,
}

fn resolved_layouts() -> Vec<ResolvedLayout> {
    let assets = AssetCache::new();
    let mut resolved = Vec::new();
    for study_deck in [false, true] {
        let compiler = DeckCompiler::for_topic("Product strategy", study_deck, CompilerConfig::default())
            .expect("built-in compiler");
        let config = &compiler.config().geometry;
        for (index, template) in compiler.catalog().iter().enumerate() {
            let content = normalize(&fields_for(template), &template.id, compiler.catalog());
            let background = compiler.theme().background_for(index);
            let slide_key = format!("slide-{index}");
            let ctx = RenderContext {
                content: &content,
                theme: compiler.theme(),
                background: &background,
                assets: &assets,
                slide_index: index,
                slide_key: &slide_key,
            };
            let mut elements = template.render(&ctx);
            let groups = layout_groups(&elements, config);
            resolve_with(&mut elements, &background, config, &mut HeightCache::new());
            resolved.push(ResolvedLayout {
                layout: template.id.clone(),
                groups,
                elements,
            });
        }
    }
    resolved
}

fn compiled_decks() -> Vec<CompiledDeck> {
    let mut assets = AssetCache::new();
    assets.insert(1, "background_image", "https://img.example/hero.png");
    assets.insert(8, "image", "https://img.example/focus.png");

    [false, true]
        .into_iter()
        .map(|study_deck| {
            let compiler = DeckCompiler::for_topic("Product strategy", study_deck, CompilerConfig::default())
                .expect("built-in compiler");
            compiler.compile_payload(&payload_for(compiler.catalog()), &assets)
        })
        .collect()
}

fn rects(slide: &CompiledSlide) -> Vec<Rect> {
    let config = GeometryConfig::default();
    slide.elements.iter().map(|e| element_rect(e, &config)).collect()
}

#[test]
fn every_layout_compiles() {
    for deck in compiled_decks() {
        assert!(!deck.slides.is_empty());
        for slide in &deck.slides {
            assert!(!slide.elements.is_empty(), "{} rendered nothing", slide.layout);
            for element in &slide.elements {
                assert!(element.id.starts_with(&slide.id), "{} outside {}", element.id, slide.id);
            }
        }
    }
}

#[test]
fn only_framed_elements_overlap() {
    let config = GeometryConfig::default();
    for ResolvedLayout { layout, groups, elements } in resolved_layouts() {
        let rects: Vec<Rect> = elements.iter().map(|e| element_rect(e, &config)).collect();
        let group_of = |i: usize| groups.iter().position(|group| group.contains(&i));
        for i in 0..elements.len() {
            for j in i + 1..elements.len() {
                // Backdrops sit behind everything.
                let (Some(gi), Some(gj)) = (group_of(i), group_of(j)) else {
                    continue;
                };
                if gi == gj && (is_frame(&elements[i], &rects[i]) || is_frame(&elements[j], &rects[j])) {
                    continue;
                }
                let (a, b) = (rects[i], rects[j]);
                if a.left.max(b.left) >= a.right().min(b.right()) - 1e-3 {
                    continue;
                }
                let overlap_y = a.bottom().min(b.bottom()) - a.top.max(b.top);
                assert!(
                    overlap_y <= 1e-6,
                    "{}: {} {:?} overlaps {} {:?}",
                    layout,
                    elements[i].id,
                    a,
                    elements[j].id,
                    b
                );
            }
        }
    }
}

#[test]
fn framed_content_moves_with_its_frame() {
    let config = GeometryConfig::default();
    let team = resolved_layouts()
        .into_iter()
        .find(|r| r.layout == "team_showcase")
        .expect("team layout");
    let rect_of = |suffix: &str| {
        team.elements
            .iter()
            .find(|e| e.id.ends_with(suffix))
            .map(|e| element_rect(e, &config))
    };
    let title = rect_of("-title").expect("title");
    let avatar = rect_of("-avatar-0").expect("avatar");
    let initial = rect_of("-initial-0").expect("initial");
    assert!(avatar.top >= title.bottom(), "{title:?} overlaps {avatar:?}");
    assert!(initial.top >= avatar.top && initial.bottom() <= avatar.bottom());
}

#[test]
fn elements_stay_on_the_canvas() {
    let config = GeometryConfig::default();
    for deck in compiled_decks() {
        for slide in &deck.slides {
            for (element, rect) in slide.elements.iter().zip(rects(slide)) {
                let at_min_font = element.is_text()
                    && element
                        .style
                        .font_size
                        .is_some_and(|size| size <= config.min_font_px + 1e-9);
                let shrinkable = element.is_text() && element.style.font_size.is_some();
                let unshrinkable = !shrinkable && rect.top > config.overflow_limit - 5.0;
                assert!(
                    rect.bottom() <= 100.0 + 1e-6 || at_min_font || unshrinkable,
                    "{}: {} ends at {:.2}%",
                    slide.layout,
                    element.id,
                    rect.bottom()
                );
                if let Some(size) = element.style.font_size {
                    assert!(size >= config.min_font_px && size <= config.max_font_px);
                }
            }
        }
    }
}

#[test]
fn text_is_readable_on_its_backdrop() {
    let config = GeometryConfig::default();
    for deck in compiled_decks() {
        for slide in &deck.slides {
            let rects = rects(slide);
            let slide_fill = slide_backdrop(&slide.background);
            for (i, element) in slide.elements.iter().enumerate() {
                if !element.is_text() {
                    continue;
                }
                let Some(color) = element.style.color.as_deref() else {
                    continue;
                };
                if color == "#000000" || color == "#ffffff" {
                    continue;
                }
                let Some(rgba) = parse_color(color) else {
                    continue;
                };
                let (x, y) = rects[i].center();
                let backdrop = slide.elements[..=i]
                    .iter()
                    .zip(&rects)
                    .filter(|(_, rect)| rect.contains(x, y))
                    .filter_map(|(e, _)| e.style.background_color.as_deref().and_then(parse_color))
                    .fold(slide_fill, |below, fill| fill.over(below));
                let ratio = contrast_ratio(rgba.over(backdrop).luminance(), backdrop.luminance());
                assert!(
                    ratio >= config.contrast_threshold,
                    "{}: {} has contrast {:.2}",
                    slide.layout,
                    element.id,
                    ratio
                );
            }
        }
    }
}

#[test]
fn concurrent_compiles_share_one_compiler() {
    let compiler = DeckCompiler::for_topic("Product strategy", false, CompilerConfig::default()).expect("compiler");
    let payload = payload_for(compiler.catalog());
    let assets = AssetCache::new();
    let expected = compiler.compile_payload(&payload, &assets);

    let results: Vec<CompiledDeck> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| compiler.compile_payload(&payload, &assets)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("compile thread"))
            .collect()
    });
    for deck in results {
        assert_eq!(deck, expected);
    }
}
