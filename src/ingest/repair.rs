//! Healing of JSON text produced by language models.
//!
//! Model output is frequently wrapped in Markdown fences, sprinkled with comments,
//! truncated mid-structure or littered with trailing commas. [`repair`] fixes those
//! purely textual problems; [`safe_parse`] adds a LaTeX escaping pre-pass and a strict
//! parse that falls back to a caller-supplied value instead of failing.

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::errors::Result;

/// LaTeX macros whose leading backslash models tend to leave unescaped inside JSON strings.
pub const LATEX_MACROS: &[&str] = &[
    "frac", "sum", "int", "alpha", "beta", "gamma", "pi", "sqrt", "text", "mathbf", "cdot",
    "infty", "approx",
];

/// How much of a failing payload is echoed into the log.
const LOG_SNIPPET_CHARS: usize = 100;

/// Tracks whether the scanner is inside a JSON string literal.
#[derive(Debug, Default)]
struct Lexer {
    in_string: bool,
    escaped: bool,
}

impl Lexer {
    /// Feeds one character; returns true when it belongs to a string literal
    /// (its delimiting quotes included).
    fn feed(&mut self, c: char) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
            }
            true
        } else if c == '"' {
            self.in_string = true;
            true
        } else {
            false
        }
    }
}

/// Sanitizes a raw model payload into text that has a chance of parsing as JSON.
///
/// Applies, in order: whitespace trimming, removal of every surrounding Markdown code
/// fence, comment removal (a `//` directly after `:` is kept so URL schemes survive),
/// bracket balancing (mismatched and missing closers are inserted, stray closers are
/// dropped, an unterminated string is closed) and trailing comma removal. The passes
/// repeat until the text stops changing, so `repair(repair(x)) == repair(x)`.
///
/// Input that is already valid JSON comes back unchanged apart from outer whitespace.
///
/// # Arguments
///
/// * `raw` - The text as received from the model.
///
/// # Returns
///
/// The repaired text. It may still fail to parse (for example binary garbage).
pub fn repair(raw: &str) -> String {
    let mut current = repair_pass(raw);
    loop {
        let next = repair_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn repair_pass(raw: &str) -> String {
    let unfenced = strip_code_fences(raw.trim());
    let uncommented = strip_comments(unfenced);
    let balanced = balance_brackets(&uncommented);
    strip_trailing_commas(&balanced).trim().to_string()
}

/// Peels leading ```` ``` ```` / ```` ```json ```` markers, each with its trailing
/// ```` ``` ````, until none is left.
fn strip_code_fences(mut text: &str) -> &str {
    while let Some(rest) = text.strip_prefix("```") {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        let rest = rest.trim();
        text = rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    text
}

fn strip_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut lexer = Lexer::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if lexer.feed(c) {
            out.push(c);
            i += 1;
            continue;
        }
        let next = chars.get(i + 1).copied();
        if c == '/' && next == Some('/') && !(i > 0 && chars[i - 1] == ':') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && next == Some('*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            i = (i + 2).min(chars.len());
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

fn closer_for(opener: char) -> char {
    if opener == '{' {
        '}'
    } else {
        ']'
    }
}

fn balance_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut stack: Vec<char> = Vec::new();
    let mut lexer = Lexer::default();

    for c in text.chars() {
        if lexer.feed(c) {
            out.push(c);
            continue;
        }
        match c {
            '{' | '[' => {
                stack.push(c);
                out.push(c);
            }
            '}' | ']' => {
                let opener = if c == '}' { '{' } else { '[' };
                if !stack.contains(&opener) {
                    debug!("Dropping stray '{}'", c);
                    continue;
                }
                // Close whatever was left open inside the structure this closer ends.
                while let Some(top) = stack.pop() {
                    if top == opener {
                        break;
                    }
                    out.push(closer_for(top));
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    if lexer.in_string {
        if lexer.escaped {
            out.push('\\');
        }
        out.push('"');
    }
    while let Some(open) = stack.pop() {
        out.push(closer_for(open));
    }
    out
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut lexer = Lexer::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !lexer.feed(c) && c == ',' {
            let mut j = i + 1;
            while j < chars.len() && (chars[j].is_whitespace() || chars[j] == ',') {
                j += 1;
            }
            if matches!(chars.get(j), Some(']') | Some('}')) {
                i = j;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Doubles the backslash of known LaTeX macros (`\frac` becomes `\\frac`) unless it is
/// already escaped, so math survives JSON string decoding.
pub fn escape_latex_macros(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len() + 16);
    for (i, c) in raw.char_indices() {
        let is_macro = c == '\\'
            && (i == 0 || bytes[i - 1] != b'\\')
            && LATEX_MACROS.iter().any(|m| raw[i + 1..].starts_with(m));
        if is_macro {
            out.push_str("\\\\");
        } else {
            out.push(c);
        }
    }
    out
}

/// Escapes LaTeX macros, repairs, then strictly parses.
pub fn try_parse<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let escaped = escape_latex_macros(raw);
    let repaired = repair(&escaped);
    Ok(serde_json::from_str(&repaired)?)
}

/// Parses a model payload, never failing.
///
/// # Arguments
///
/// * `raw` - The text as received from the model.
/// * `fallback` - Returned (after a logged warning) when the text cannot be healed.
///
/// # Returns
///
/// The parsed value, or `fallback`.
pub fn safe_parse<T: DeserializeOwned>(raw: &str, fallback: T) -> T {
    if raw.trim().is_empty() {
        debug!("Empty payload, using fallback");
        return fallback;
    }
    match try_parse(raw) {
        Ok(value) => value,
        Err(e) => {
            let snippet: String = raw.chars().take(LOG_SNIPPET_CHARS).collect();
            warn!("JSON repair/parse failed: {}. Input: {}...", e, snippet);
            fallback
        }
    }
}
