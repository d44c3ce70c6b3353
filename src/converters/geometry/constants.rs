//! Defaults used by geometry resolution. Lengths are percentages of the canvas.

pub const SKYLINE_COLUMNS: usize = 50;
pub const VERTICAL_PADDING: f64 = 1.5;
pub const OVERFLOW_LIMIT: f64 = 98.0;
pub const MIN_FONT_PX: f64 = 12.0;
pub const MAX_FONT_PX: f64 = 160.0;
pub const DEFAULT_TEXT_HEIGHT: f64 = 5.0;
pub const DEFAULT_BLOCK_HEIGHT: f64 = 10.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;
pub const WCAG_AA_CONTRAST: f64 = 4.5;

// Elements covering at least this much of both axes are backdrops and never packed.
pub const BACKDROP_COVERAGE: f64 = 90.0;
// Shapes and icons up to this height (rules, underlines) are content, not frames.
pub const THIN_RULE_HEIGHT: f64 = 2.0;
// Non-text blocks are only squeezed to fit while at least this much height remains.
pub const MIN_SHRINK_HEIGHT: f64 = 5.0;
// Shrink passes after the first cut the font by at least this factor, so the loop
// always reaches the minimum size within its pass budget.
pub const SHRINK_STEP: f64 = 0.9;
pub const MAX_SHRINK_PASSES: usize = 32;

// Above this background luminance black text out-contrasts white.
pub const LUMINANCE_PIVOT: f64 = 0.179;
pub const BOLD_WEIGHT: u16 = 600;

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#ffffff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
