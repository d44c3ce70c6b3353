//! CSS color parsing and WCAG 2.x contrast checks.

use super::constants::{BLACK, DEFAULT_BACKGROUND_COLOR, LUMINANCE_PIVOT, WHITE};
use crate::models::theme::Background;

/// An sRGB color with channels in `0..=255` and alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255.0, 255.0, 255.0);
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);

    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    /// Alpha-composites `self` over an opaque `backdrop`.
    pub fn over(self, backdrop: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: f64, bg: f64| fg * a + bg * (1.0 - a);
        Rgba::opaque(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }

    /// WCAG relative luminance.
    pub fn luminance(&self) -> f64 {
        let channel = |c: f64| {
            let c = (c / 255.0).clamp(0.0, 1.0);
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
    match hex.len() {
        3 | 4 => {
            let mut digits = hex.chars().map(|c| {
                let d = c.to_digit(16).unwrap_or(0) as f64;
                d * 17.0
            });
            let r = digits.next()?;
            let g = digits.next()?;
            let b = digits.next()?;
            let a = digits.next().map(|d| d / 255.0).unwrap_or(1.0);
            Some(Rgba { r, g, b, a })
        }
        6 | 8 => {
            let r = byte(&hex[0..2])?;
            let g = byte(&hex[2..4])?;
            let b = byte(&hex[4..6])?;
            let a = if hex.len() == 8 {
                byte(&hex[6..8])? / 255.0
            } else {
                1.0
            };
            Some(Rgba { r, g, b, a })
        }
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<f64> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| match p.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().map(|v| v / 100.0),
            None => p.parse::<f64>(),
        })
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [r, g, b] => Some(Rgba::opaque(*r, *g, *b)),
        [r, g, b, a] => Some(Rgba {
            r: *r,
            g: *g,
            b: *b,
            a: *a,
        }),
        _ => None,
    }
}

/// Parses the color syntaxes templates and themes emit: `#rgb`, `#rgba`, `#rrggbb`,
/// `#rrggbbaa`, `rgb()`, `rgba()` and a handful of keywords.
///
/// Gradients resolve to their first hex stop.
pub fn parse_color(input: &str) -> Option<Rgba> {
    let value = input.trim().to_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        return parse_functional(args.strip_suffix(')')?);
    }
    if value.contains("gradient") {
        let start = value.find('#')? + 1;
        let hex: String = value[start..]
            .chars()
            .take_while(char::is_ascii_hexdigit)
            .collect();
        return parse_hex(&hex);
    }
    match value.as_str() {
        "white" => Some(Rgba::WHITE),
        "black" => Some(Rgba::BLACK),
        "transparent" => Some(Rgba {
            a: 0.0,
            ..Rgba::WHITE
        }),
        _ => None,
    }
}

/// WCAG contrast ratio between two luminances, in `1.0..=21.0`.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Black or white, whichever reads better on a background of this luminance.
pub fn readable_color(background_luminance: f64) -> &'static str {
    if background_luminance > LUMINANCE_PIVOT {
        BLACK
    } else {
        WHITE
    }
}

/// The opaque color a slide background presents to text. Unparseable backgrounds
/// count as white.
pub fn slide_backdrop(background: &Background) -> Rgba {
    let white = parse_color(DEFAULT_BACKGROUND_COLOR).unwrap_or(Rgba::WHITE);
    parse_color(&background.color)
        .map(|c| c.over(white))
        .unwrap_or(white)
}
