//! Answer width estimation over a small subset of LaTeX math markup.
//!
//! Widths are abstract "character units", not ems: a plain glyph costs 1 and
//! every construct is scored relative to that. The score only has to be good
//! enough to pick one of four card widths, so it is deliberately coarse.
//!
//! The scanner is total. Unbalanced or missing brace groups abandon the
//! construct and charge the rest of the input at the flat per-character rate.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Card types
// ────────────────────────────────────────────────────────────────────────────

/// Answer card width class, in increasing width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardType {
    TinyCard,
    ShortCard,
    MediumCard,
    LongCard,
}

impl CardType {
    /// Fraction of the line width the card occupies. A long card is sized to
    /// leave no room for anything else on its row.
    pub const fn width(self) -> f32 {
        match self {
            CardType::TinyCard => 0.245,
            CardType::ShortCard => 0.320,
            CardType::MediumCard => 0.485,
            CardType::LongCard => 0.995,
        }
    }
}

const TINY_BELOW: f32 = 10.0;
const SHORT_BELOW: f32 = 18.0;
const MEDIUM_BELOW: f32 = 30.0;

/// Picks the card type for an estimated width.
pub fn classify(width: f32) -> CardType {
    if width < TINY_BELOW {
        CardType::TinyCard
    } else if width < SHORT_BELOW {
        CardType::ShortCard
    } else if width < MEDIUM_BELOW {
        CardType::MediumCard
    } else {
        CardType::LongCard
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Estimator
// ────────────────────────────────────────────────────────────────────────────

const FUNCTION_NAMES: &[&str] = &[
    "sin", "cos", "tan", "csc", "sec", "cot", "arcsin", "arccos", "arctan", "log", "ln", "exp",
];

const FRACTION_PADDING: f32 = 1.5;
const ROOT_FACTOR: f32 = 1.3;
const FUNCTION_CHAR_WIDTH: f32 = 0.8;
const COMMAND_WIDTH: f32 = 1.5;
const SCRIPT_FACTOR: f32 = 0.5;
const BARE_SCRIPT_WIDTH: f32 = 0.5;

/// Nesting beyond this is charged flat instead of recursed into.
const MAX_DEPTH: usize = 64;

/// Estimates the typeset width of `markup`. Never fails; empty input is 0.
pub fn estimate_width(markup: &str) -> f32 {
    let chars: Vec<char> = markup.chars().collect();
    estimate(&chars, 0)
}

fn estimate(s: &[char], depth: usize) -> f32 {
    if depth > MAX_DEPTH {
        return flat_width(s);
    }

    let mut width = 0.0_f32;
    let mut i = 0;
    while i < s.len() {
        match s[i] {
            '\\' => {
                let (name, next) = read_command(s, i);
                match name.as_str() {
                    "frac" => {
                        let Some((num, after_num)) = read_group(s, next) else {
                            return width + flat_width(&s[i..]);
                        };
                        let Some((den, after_den)) = read_group(s, after_num) else {
                            return width + flat_width(&s[i..]);
                        };
                        width += estimate(num, depth + 1).max(estimate(den, depth + 1))
                            + FRACTION_PADDING;
                        i = after_den;
                    }
                    "sqrt" => {
                        let (index, after_index) = match read_bracketed(s, next) {
                            Some((index, after)) => (Some(index), after),
                            None => (None, next),
                        };
                        let Some((inner, after)) = read_group(s, after_index) else {
                            return width + flat_width(&s[i..]);
                        };
                        width += estimate(inner, depth + 1) * ROOT_FACTOR;
                        if let Some(index) = index {
                            width += estimate(index, depth + 1) * SCRIPT_FACTOR;
                        }
                        i = after;
                    }
                    fun if FUNCTION_NAMES.contains(&fun) => {
                        width += fun.len() as f32 * FUNCTION_CHAR_WIDTH;
                        i = next;
                    }
                    _ => {
                        width += COMMAND_WIDTH;
                        i = next;
                    }
                }
            }
            '^' | '_' => {
                let j = skip_whitespace(s, i + 1);
                match s.get(j) {
                    Some('{') => {
                        let Some((group, after)) = read_group(s, j) else {
                            return width + flat_width(&s[i..]);
                        };
                        width += estimate(group, depth + 1) * SCRIPT_FACTOR;
                        i = after;
                    }
                    Some(_) => {
                        width += BARE_SCRIPT_WIDTH;
                        i = j + 1;
                    }
                    None => {
                        width += 1.0;
                        i = j;
                    }
                }
            }
            c if is_skipped(c) => i += 1,
            _ => {
                width += 1.0;
                i += 1;
            }
        }
    }
    width
}

fn is_skipped(c: char) -> bool {
    c == '$' || c.is_whitespace()
}

/// Flat fallback: one unit per visible character.
fn flat_width(s: &[char]) -> f32 {
    s.iter().filter(|&&c| !is_skipped(c)).count() as f32
}

fn skip_whitespace(s: &[char], mut i: usize) -> usize {
    while s.get(i).is_some_and(|c| c.is_whitespace()) {
        i += 1;
    }
    i
}

/// Reads the command starting at the backslash at `start`.
///
/// Returns the name without the backslash and the index just past it. A
/// command is a run of ASCII letters, or a single non-letter (`\,`, `\\`).
fn read_command(s: &[char], start: usize) -> (String, usize) {
    let mut end = start + 1;
    match s.get(end) {
        Some(c) if c.is_ascii_alphabetic() => {
            while s.get(end).is_some_and(|c| c.is_ascii_alphabetic()) {
                end += 1;
            }
        }
        Some(_) => end += 1,
        None => {}
    }
    (s[start + 1..end].iter().collect(), end)
}

/// Reads a `{...}` group at `start` (after optional whitespace), matching
/// nested braces by depth. Returns the inner slice and the index past `}`.
fn read_group(s: &[char], start: usize) -> Option<(&[char], usize)> {
    read_delimited(s, start, '{', '}')
}

/// Optional `[...]` argument, as in `\sqrt[3]{x}`.
fn read_bracketed(s: &[char], start: usize) -> Option<(&[char], usize)> {
    read_delimited(s, start, '[', ']')
}

fn read_delimited(s: &[char], start: usize, open: char, close: char) -> Option<(&[char], usize)> {
    let begin = skip_whitespace(s, start);
    if s.get(begin) != Some(&open) {
        return None;
    }

    let mut depth = 0usize;
    for (offset, &c) in s[begin..].iter().enumerate() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                let end = begin + offset;
                return Some((&s[begin + 1..end], end + 1));
            }
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
