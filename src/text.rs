//! Text normalization applied before inference and fallback matching.

use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize user text.
///
/// Removes ASCII punctuation and ASCII digits, collapses whitespace runs into
/// a single space, and trims the result. Non-ASCII punctuation such as the
/// Ethiopic full stop `።` is left in place.
///
/// Anything with a string form is accepted, so numbers and other scalars can
/// be passed directly.
pub fn normalize(text: impl Display) -> String {
    let raw = text.to_string();
    let no_punct: String = raw.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let no_digits = DIGITS.replace_all(&no_punct, "");
    let collapsed = WHITESPACE.replace_all(&no_digits, " ");
    collapsed.trim().to_string()
}
