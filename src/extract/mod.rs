//! Carving an ingredient list out of free-form answer text.
//!
//! Extraction tries an ordered chain of [`LineExtractor`]s and keeps the first
//! one that finds anything. The four heading-anchored list patterns come
//! first; a keyword classifier over every line of the answer runs last.
//! Nothing here fails: an answer without ingredients yields an empty list.

mod heading;
mod keyword;

pub use self::heading::{
    HyphenListExtractor, InlineListExtractor, MiddleDotListExtractor, NumberedListExtractor,
};
pub use self::keyword::{KeywordFallbackExtractor, FOOD_KEYWORDS, MAX_FALLBACK_CHARS, STOP_WORDS};

use log::debug;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Leading list marker: hyphen, middle dot, or a number with a delimiter.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-－‐・•·]|\d+[.)．、）]|[(（]\d+[)）])\s*")
        .expect("Marker pattern should be valid")
});

/// Everything from the first quantity-ish character on.
static QUANTITY_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\d（(…:：].*$").expect("Quantity pattern should be valid")
});

/// Words marking a method/steps sub-heading rather than an ingredient.
const METHOD_WORDS: &[&str] = &["作り方", "手順", "方法", "method", "steps", "instructions"];

/// One ingredient mention taken from an answer, quantity text included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IngredientLine(String);

impl IngredientLine {
    pub fn new(text: impl Into<String>) -> Self {
        IngredientLine(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The ingredient name without the quantity that usually follows it.
    ///
    /// `"玉ねぎ 1個"` gives `"玉ねぎ"`. Falls back to the whole line when the
    /// line starts with a quantity.
    pub fn name(&self) -> &str {
        let trimmed = self.0.trim();
        match QUANTITY_TAIL.find(trimmed) {
            Some(m) if m.start() > 0 => &trimmed[..m.start()],
            _ => trimmed,
        }
    }
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IngredientLine {
    fn from(text: &str) -> Self {
        IngredientLine(text.to_string())
    }
}

impl From<String> for IngredientLine {
    fn from(text: String) -> Self {
        IngredientLine(text)
    }
}

impl PartialEq<&str> for IngredientLine {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single best-effort extraction strategy.
pub trait LineExtractor {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Return the lines this strategy recognises, or `None` when it does not
    /// apply to `text`. `Some` is never empty.
    fn extract(&self, text: &str) -> Option<Vec<IngredientLine>>;
}

/// The extraction chain in priority order.
pub fn extractor_chain() -> [&'static dyn LineExtractor; 5] {
    [
        &HyphenListExtractor,
        &NumberedListExtractor,
        &MiddleDotListExtractor,
        &InlineListExtractor,
        &KeywordFallbackExtractor,
    ]
}

/// Extract ingredient lines from an answer, in their original order.
pub fn extract_ingredient_lines(text: &str) -> Vec<IngredientLine> {
    for extractor in extractor_chain() {
        if let Some(lines) = extractor.extract(text) {
            debug!(
                "Extracted {} ingredient lines with {}",
                lines.len(),
                extractor.name()
            );
            return lines;
        }
    }
    debug!("No ingredient lines found");
    Vec::new()
}

/// Strip a leading list marker and surrounding whitespace.
pub(crate) fn strip_marker(line: &str) -> &str {
    let trimmed = line.trim();
    match MARKER.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim(),
        None => trimmed,
    }
}

pub(crate) fn is_method_heading(line: &str) -> bool {
    let lower = line.to_lowercase();
    METHOD_WORDS.iter().any(|word| lower.contains(word))
}

/// Normalise raw candidate lines: strip markers, drop blanks and method
/// headings. Returns `None` when nothing survives.
pub(crate) fn normalize_lines<'a>(
    raw: impl IntoIterator<Item = &'a str>,
) -> Option<Vec<IngredientLine>> {
    let lines: Vec<IngredientLine> = raw
        .into_iter()
        .map(strip_marker)
        .filter(|line| !line.is_empty() && !is_method_heading(line))
        .map(IngredientLine::from)
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines)
    }
}
