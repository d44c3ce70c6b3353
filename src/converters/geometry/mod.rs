//! Geometry resolution for rendered slides.
//!
//! Turns template output into a layout that fits the canvas. Text heights are
//! estimated and overlapping elements are stacked with a column skyline. Shapes and
//! icons move together with the content drawn on them. Text spilling past the bottom
//! edge is shrunk, unreadable text colors are replaced and font sizes are kept in a
//! legible range.

pub mod constants;
pub mod contrast;
pub mod metrics;
pub mod skyline;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::config::GeometryConfig;
use crate::models::element::{Axis, ElementKind, ElementRecord, Length};
use crate::models::theme::Background;
use constants::{
    BACKDROP_COVERAGE, MAX_SHRINK_PASSES, MIN_SHRINK_HEIGHT, SHRINK_STEP, THIN_RULE_HEIGHT,
};
use contrast::{contrast_ratio, parse_color, readable_color, slide_backdrop};
pub use metrics::HeightCache;
use metrics::TextBox;
use skyline::Skyline;

/// What a resolve pass changed, mostly for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub estimated: usize,
    pub pushed: usize,
    pub shrunk: usize,
    pub recolored: usize,
    pub clamped: usize,
}

/// The box an element occupies, in canvas percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// True when the boxes share area; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right() - OVERLAP_EPSILON
            && other.left < self.right() - OVERLAP_EPSILON
            && self.top < other.bottom() - OVERLAP_EPSILON
            && other.top < self.bottom() - OVERLAP_EPSILON
    }

    /// The smallest box covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        Rect {
            left,
            top,
            width: self.right().max(other.right()) - left,
            height: self.bottom().max(other.bottom()) - top,
        }
    }
}

const OVERLAP_EPSILON: f64 = 1e-6;

/// Resolves the box of an element. An `auto` width runs to the right edge of the
/// canvas; an `auto` height falls back to the configured defaults.
pub fn element_rect(element: &ElementRecord, config: &GeometryConfig) -> Rect {
    let style = &element.style;
    let default_height = if element.is_text() {
        config.default_text_height
    } else {
        config.default_block_height
    };
    Rect {
        left: style.left,
        top: style.top,
        width: style
            .width
            .to_percent(Axis::Horizontal)
            .unwrap_or(100.0 - style.left),
        height: style
            .height
            .to_percent(Axis::Vertical)
            .unwrap_or(default_height),
    }
}

fn text_box<'a>(element: &'a ElementRecord, config: &GeometryConfig) -> Option<TextBox<'a>> {
    let content = element.text()?;
    let style = &element.style;
    Some(TextBox {
        content,
        width_pct: style.width.to_percent(Axis::Horizontal)?,
        font_px: style.font_size?,
        line_height: style.line_height.unwrap_or(config.default_line_height),
        font_weight: style.font_weight.unwrap_or(400),
        font_family: style.font_family.as_deref(),
    })
}

/// Full-canvas elements keep their position and are ignored when stacking.
fn is_backdrop(rect: &Rect) -> bool {
    rect.width >= BACKDROP_COVERAGE && rect.height >= BACKDROP_COVERAGE
}

/// Cards, panels, avatars, dividers and icons: shapes that other elements are drawn
/// onto. Thin rules are ordinary content.
pub fn is_frame(element: &ElementRecord, rect: &Rect) -> bool {
    matches!(
        element.kind,
        ElementKind::Shape { .. } | ElementKind::Icon { .. }
    ) && rect.height > THIN_RULE_HEIGHT
        && !is_backdrop(rect)
}

/// Splits a slide into the units that stacking moves.
///
/// Every frame is grouped with the elements its declared box overlaps, transitively,
/// so a card keeps its text and an avatar keeps its initial. Everything else forms a
/// group of one. Backdrops belong to no group. Members are in z-order and groups are
/// ordered by their first member.
pub fn layout_groups(elements: &[ElementRecord], config: &GeometryConfig) -> Vec<Vec<usize>> {
    let rects: Vec<Rect> = elements.iter().map(|e| element_rect(e, config)).collect();
    let mut parent: Vec<usize> = (0..elements.len()).collect();
    for (i, element) in elements.iter().enumerate() {
        if !is_frame(element, &rects[i]) {
            continue;
        }
        for (j, rect) in rects.iter().enumerate() {
            if j != i && !is_backdrop(rect) && rects[i].intersects(rect) {
                let (a, b) = (root(&mut parent, i), root(&mut parent, j));
                parent[a.max(b)] = a.min(b);
            }
        }
    }

    let mut groups: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for (i, rect) in rects.iter().enumerate() {
        if !is_backdrop(rect) {
            let r = root(&mut parent, i);
            groups.entry(r).or_default().push(i);
        }
    }
    groups.into_values().collect()
}

fn root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Resolves geometry in place with default settings and a fresh height cache.
pub fn resolve(elements: &mut [ElementRecord], background: &Background) -> ResolveReport {
    let mut cache = HeightCache::new();
    resolve_with(elements, background, &GeometryConfig::default(), &mut cache)
}

/// Resolves geometry in place.
///
/// Element order (the z-order) is preserved; only styles change.
///
/// # Arguments
///
/// * `elements` - The rendered elements of one slide.
/// * `background` - The slide background, used for contrast checks.
/// * `config` - Geometry tuning.
/// * `cache` - Height memo scoped to the current compile call.
pub fn resolve_with(
    elements: &mut [ElementRecord],
    background: &Background,
    config: &GeometryConfig,
    cache: &mut HeightCache,
) -> ResolveReport {
    let mut report = ResolveReport::default();
    clamp_fonts(elements, config, &mut report);
    // Grouping reads the boxes as the template declared them, before text grows.
    let groups = layout_groups(elements, config);
    let declared: Vec<Rect> = elements.iter().map(|e| element_rect(e, config)).collect();
    let estimated = estimate_heights(elements, config, cache, &mut report);
    stack(elements, &groups, &declared, config, &mut report);
    fit_overflow(elements, &estimated, config, cache, &mut report);
    enforce_contrast(elements, background, config, &mut report);
    debug!("Resolved {} elements: {:?}", elements.len(), report);
    report
}

/// Clamps every font size into the legible range. Runs first, so later steps never
/// produce sizes outside it.
fn clamp_fonts(elements: &mut [ElementRecord], config: &GeometryConfig, report: &mut ResolveReport) {
    for element in elements.iter_mut() {
        if let Some(size) = element.style.font_size {
            let clamped = size.clamp(config.min_font_px, config.max_font_px);
            if clamped != size {
                debug!("Clamped font of {} from {}px to {}px", element.id, size, clamped);
                element.style.font_size = Some(clamped);
                report.clamped += 1;
            }
        }
    }
}

/// Writes an explicit height onto every `auto`-height element. Returns which elements
/// got an estimated text height, since those are re-estimated after shrinking.
fn estimate_heights(
    elements: &mut [ElementRecord],
    config: &GeometryConfig,
    cache: &mut HeightCache,
    report: &mut ResolveReport,
) -> Vec<bool> {
    elements
        .iter_mut()
        .map(|element| {
            if !element.style.height.is_auto() {
                return false;
            }
            let estimate = text_box(element, config).map(|b| cache.height(&b));
            let height = estimate.unwrap_or_else(|| element_rect(element, config).height);
            element.style.height = Length::Percent(height);
            if estimate.is_some() {
                report.estimated += 1;
            }
            estimate.is_some()
        })
        .collect()
}

/// Settles every group internally, then stacks the groups top to bottom, each moved
/// as one box.
fn stack(
    elements: &mut [ElementRecord],
    groups: &[Vec<usize>],
    declared: &[Rect],
    config: &GeometryConfig,
    report: &mut ResolveReport,
) {
    let mut units: Vec<(&[usize], Rect)> = groups
        .iter()
        .filter_map(|group| {
            settle_group(elements, group, declared, config, report);
            let bounds = group
                .iter()
                .map(|&i| element_rect(&elements[i], config))
                .reduce(|a, b| a.union(&b))?;
            Some((group.as_slice(), bounds))
        })
        .collect();
    units.sort_by(|(_, a), (_, b)| a.top.total_cmp(&b.top));

    let mut skyline = Skyline::new(config.skyline_columns);
    for (group, bounds) in units {
        let top = skyline.place(bounds.left, bounds.top, bounds.width, bounds.height, config.vertical_padding);
        let shift = top - bounds.top;
        if shift <= 0.0 {
            continue;
        }
        for &i in group {
            let element = &mut elements[i];
            debug!(
                "Pushed {} down from {:.2}% to {:.2}%",
                element.id,
                element.style.top,
                element.style.top + shift
            );
            element.style.top += shift;
            report.pushed += 1;
        }
    }
}

/// Stacks the content of a group against itself, then stretches each frame over the
/// content that starts inside it.
fn settle_group(
    elements: &mut [ElementRecord],
    group: &[usize],
    declared: &[Rect],
    config: &GeometryConfig,
    report: &mut ResolveReport,
) {
    if group.len() < 2 {
        return;
    }
    let (frames, mut content): (Vec<usize>, Vec<usize>) = group
        .iter()
        .copied()
        .partition(|&i| is_frame(&elements[i], &declared[i]));
    content.sort_by(|&a, &b| elements[a].style.top.total_cmp(&elements[b].style.top));

    let mut skyline = Skyline::new(config.skyline_columns);
    for &i in &content {
        let rect = element_rect(&elements[i], config);
        let top = skyline.place(rect.left, rect.top, rect.width, rect.height, config.vertical_padding);
        if top > rect.top {
            debug!("Pushed {} down inside its frame to {:.2}%", elements[i].id, top);
            elements[i].style.top = top;
            report.pushed += 1;
        }
    }

    for f in frames {
        let frame = element_rect(&elements[f], config);
        let content_bottom = content
            .iter()
            .filter(|&&i| declared[f].intersects(&declared[i]) && declared[i].top >= declared[f].top)
            .map(|&i| element_rect(&elements[i], config).bottom())
            .fold(frame.bottom(), f64::max);
        if content_bottom > frame.bottom() + OVERLAP_EPSILON {
            let height = content_bottom + config.vertical_padding - frame.top;
            debug!("Stretched {} to {:.2}% over its content", elements[f].id, height);
            elements[f].style.height = Length::Percent(height);
        }
    }
}

/// Shrinks elements whose bottom edge passes the overflow limit. Text first loses font
/// size by the square root of the overflow ratio, then by at least [`SHRINK_STEP`] per
/// pass; other blocks are squeezed while enough height remains.
fn fit_overflow(
    elements: &mut [ElementRecord],
    estimated: &[bool],
    config: &GeometryConfig,
    cache: &mut HeightCache,
    report: &mut ResolveReport,
) {
    let limit = config.overflow_limit;
    for (element, was_estimated) in elements.iter_mut().zip(estimated.iter().copied()) {
        let rect = element_rect(element, config);
        if rect.bottom() <= limit {
            continue;
        }
        let available = limit - rect.top;

        let shrinkable_text = element.is_text() && element.style.font_size.is_some();
        if !shrinkable_text {
            if available >= MIN_SHRINK_HEIGHT {
                element.style.height = Length::Percent(available);
                report.shrunk += 1;
            } else {
                warn!("{} {} cannot fit below {:.2}%", element.kind_name(), element.id, rect.top);
            }
            continue;
        }

        for pass in 0..MAX_SHRINK_PASSES {
            let rect = element_rect(element, config);
            let font = element.style.font_size.unwrap_or(config.min_font_px);
            if rect.bottom() <= limit || font <= config.min_font_px {
                break;
            }
            // Text pushed entirely past the limit drops straight to the minimum size.
            let target = if available > 0.0 {
                font * (available / rect.height).sqrt()
            } else {
                config.min_font_px
            };
            let target = if pass == 0 {
                target
            } else {
                target.min(font * SHRINK_STEP)
            };
            let shrunk = target.max(config.min_font_px);
            debug!("Shrinking font of {} from {:.1}px to {:.1}px", element.id, font, shrunk);
            element.style.font_size = Some(shrunk);
            report.shrunk += 1;

            let estimate = if was_estimated {
                text_box(element, config).map(|b| cache.height(&b))
            } else {
                None
            };
            match estimate {
                Some(height) => element.style.height = Length::Percent(height),
                None if available > 0.0 => element.style.height = Length::Percent(available),
                None => {}
            }
        }

        if element_rect(element, config).bottom() > limit {
            warn!("Text {} still overflows at minimum font size", element.id);
        }
    }
}

/// Replaces text colors that fail the contrast threshold against whatever is behind
/// them.
///
/// The backdrop of a text element is the slide background with the fills of every
/// earlier element under the text's center composited on top, in z-order, followed by
/// the element's own fill.
fn enforce_contrast(
    elements: &mut [ElementRecord],
    background: &Background,
    config: &GeometryConfig,
    report: &mut ResolveReport,
) {
    let slide = slide_backdrop(background);
    let rects: Vec<Rect> = elements.iter().map(|e| element_rect(e, config)).collect();
    for i in 0..elements.len() {
        if !elements[i].is_text() {
            continue;
        }
        let Some(color) = elements[i].style.color.as_deref().and_then(parse_color) else {
            continue;
        };
        let (x, y) = rects[i].center();
        let backdrop = elements[..=i]
            .iter()
            .zip(&rects)
            .filter(|(_, rect)| rect.contains(x, y))
            .filter_map(|(e, _)| e.style.background_color.as_deref().and_then(parse_color))
            .fold(slide, |below, fill| fill.over(below));

        let backdrop_luminance = backdrop.luminance();
        let ratio = contrast_ratio(color.over(backdrop).luminance(), backdrop_luminance);
        if ratio < config.contrast_threshold {
            let replacement = readable_color(backdrop_luminance);
            let element = &mut elements[i];
            debug!(
                "Recoloring {} (contrast {:.2}) to {}",
                element.id, ratio, replacement
            );
            element.style.color = Some(replacement.to_string());
            report.recolored += 1;
        }
    }
}
