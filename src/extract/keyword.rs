use super::{strip_marker, IngredientLine, LineExtractor};

/// Generic food words; a line mentioning one is an ingredient candidate.
pub const FOOD_KEYWORDS: &[&str] = &[
    "肉", "野菜", "魚", "米", "ご飯", "麺", "卵", "たまご", "豆腐", "油", "醤油", "しょうゆ",
    "味噌", "みそ", "塩", "砂糖", "玉ねぎ", "たまねぎ", "にんじん", "人参", "じゃがいも",
    "キャベツ", "ねぎ", "トマト", "きのこ", "鮭",
];

/// Cooking verbs and method headings; a line mentioning one is a step.
///
/// "Cut" is listed by its verb forms only, so the counter 切れ ("slices")
/// does not disqualify a line.
pub const STOP_WORDS: &[&str] = &[
    "炒め", "煮", "茹で", "ゆで", "焼", "切る", "切っ", "切りに", "切りま", "作り方", "手順",
];

/// Candidate lines must be shorter than this many characters.
pub const MAX_FALLBACK_CHARS: usize = 50;

/// Classifies every line of the answer by keyword when no ingredients
/// heading was found.
pub struct KeywordFallbackExtractor;

impl KeywordFallbackExtractor {
    fn is_candidate(line: &str) -> bool {
        !line.is_empty()
            && line.chars().count() < MAX_FALLBACK_CHARS
            && FOOD_KEYWORDS.iter().any(|word| line.contains(word))
            && !STOP_WORDS.iter().any(|word| line.contains(word))
    }
}

impl LineExtractor for KeywordFallbackExtractor {
    fn name(&self) -> &'static str {
        "keyword_fallback"
    }

    fn extract(&self, text: &str) -> Option<Vec<IngredientLine>> {
        let lines: Vec<IngredientLine> = text
            .lines()
            .map(strip_marker)
            .filter(|line| Self::is_candidate(line))
            .map(IngredientLine::from)
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(lines)
        }
    }
}
