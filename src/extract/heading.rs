use super::{normalize_lines, IngredientLine, LineExtractor};
use regex::Regex;
use std::sync::LazyLock;

// Each list pattern is: a heading line mentioning ingredients, optional blank
// lines, then one or more consecutive list items captured as group 1.
// `\z` rather than `$` so an item at the very end of the text is still taken
// without letting `$` stop the repetition at every line end.

static HYPHEN_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[^\n]*(?:材料|ingredients)[^\n]*\n(?:[ \t]*\n)*((?:[ \t]*[-－‐][^\n]*(?:\n|\z))+)",
    )
    .expect("Hyphen list pattern should be valid")
});

static NUMBERED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[^\n]*(?:材料|ingredients)[^\n]*\n(?:[ \t]*\n)*((?:[ \t]*(?:\d+[.)．、）]|[(（]\d+[)）])[^\n]*(?:\n|\z))+)",
    )
    .expect("Numbered list pattern should be valid")
});

static MIDDLE_DOT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[^\n]*(?:材料|ingredients)[^\n]*\n(?:[ \t]*\n)*((?:[ \t]*[・•·][^\n]*(?:\n|\z))+)",
    )
    .expect("Middle dot list pattern should be valid")
});

static INLINE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[^\n]*?(?:材料|ingredients)[^\n:：]*[:：][ \t]*([^\n]+)")
        .expect("Inline list pattern should be valid")
});

static INLINE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[、,，;；]").expect("Inline separator should be valid"));

/// Collect the item lines of every block `pattern` captures.
fn extract_blocks(pattern: &Regex, text: &str) -> Option<Vec<IngredientLine>> {
    let raw: Vec<&str> = pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .flat_map(|block| block.as_str().lines())
        .collect();
    normalize_lines(raw)
}

/// `- 玉ねぎ 1個` items under an ingredients heading.
pub struct HyphenListExtractor;

impl LineExtractor for HyphenListExtractor {
    fn name(&self) -> &'static str {
        "hyphen_list"
    }

    fn extract(&self, text: &str) -> Option<Vec<IngredientLine>> {
        extract_blocks(&HYPHEN_BLOCK, text)
    }
}

/// `1. 玉ねぎ 1個` items under an ingredients heading.
pub struct NumberedListExtractor;

impl LineExtractor for NumberedListExtractor {
    fn name(&self) -> &'static str {
        "numbered_list"
    }

    fn extract(&self, text: &str) -> Option<Vec<IngredientLine>> {
        extract_blocks(&NUMBERED_BLOCK, text)
    }
}

/// `・玉ねぎ 1個` items under an ingredients heading.
pub struct MiddleDotListExtractor;

impl LineExtractor for MiddleDotListExtractor {
    fn name(&self) -> &'static str {
        "middle_dot_list"
    }

    fn extract(&self, text: &str) -> Option<Vec<IngredientLine>> {
        extract_blocks(&MIDDLE_DOT_BLOCK, text)
    }
}

/// `材料：玉ねぎ、豚肉、醤油` on a single line.
pub struct InlineListExtractor;

impl LineExtractor for InlineListExtractor {
    fn name(&self) -> &'static str {
        "inline_list"
    }

    fn extract(&self, text: &str) -> Option<Vec<IngredientLine>> {
        let raw: Vec<&str> = INLINE_LIST
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .flat_map(|list| INLINE_SEPARATOR.split(list.as_str()))
            .collect();
        normalize_lines(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(found: Option<Vec<IngredientLine>>) -> Vec<String> {
        found
            .unwrap_or_default()
            .into_iter()
            .map(IngredientLine::into_inner)
            .collect()
    }

    #[test]
    fn test_hyphen_list() {
        let text = "肉じゃがのレシピです。\n\n【材料】\n- じゃがいも 3個\n- 牛肉 200g\n- 玉ねぎ 1個\n\n【作り方】\n1. 切る";
        assert_eq!(
            lines(HyphenListExtractor.extract(text)),
            vec!["じゃがいも 3個", "牛肉 200g", "玉ねぎ 1個"]
        );
    }

    #[test]
    fn test_hyphen_list_after_blank_line_and_at_end_of_text() {
        let text = "### 材料（2人分）\n\n  - 卵 2個\n  - 塩 少々";
        assert_eq!(lines(HyphenListExtractor.extract(text)), vec!["卵 2個", "塩 少々"]);
    }

    #[test]
    fn test_hyphen_list_full_width_hyphen() {
        let text = "材料\n－豆腐 1丁\n－味噌 大さじ2\n";
        assert_eq!(
            lines(HyphenListExtractor.extract(text)),
            vec!["豆腐 1丁", "味噌 大さじ2"]
        );
    }

    #[test]
    fn test_hyphen_list_multiple_blocks() {
        let text = "材料\n- 鶏肉 300g\n\nタレの材料\n- 醤油 大さじ2\n- 砂糖 大さじ1\n";
        assert_eq!(
            lines(HyphenListExtractor.extract(text)),
            vec!["鶏肉 300g", "醤油 大さじ2", "砂糖 大さじ1"]
        );
    }

    #[test]
    fn test_hyphen_list_drops_method_items() {
        let text = "材料\n- 卵 2個\n- 作り方は下記\n";
        assert_eq!(lines(HyphenListExtractor.extract(text)), vec!["卵 2個"]);
    }

    #[test]
    fn test_hyphen_list_requires_heading() {
        let text = "おすすめ\n- 卵 2個\n- 塩 少々\n";
        assert!(HyphenListExtractor.extract(text).is_none());
    }

    #[test]
    fn test_english_heading() {
        let text = "Ingredients:\n- 2 eggs\n- 1 cup flour\n";
        assert_eq!(
            lines(HyphenListExtractor.extract(text)),
            vec!["2 eggs", "1 cup flour"]
        );
    }

    #[test]
    fn test_numbered_list() {
        let text = "材料:\n1. 鮭 2切れ\n2) 塩 少々\n3．油 大さじ1\n\n作り方:\n1. 焼く";
        assert_eq!(
            lines(NumberedListExtractor.extract(text)),
            vec!["鮭 2切れ", "塩 少々", "油 大さじ1"]
        );
    }

    #[test]
    fn test_numbered_list_ignores_quantity_lines() {
        let text = "材料\n2個 卵\n";
        assert!(NumberedListExtractor.extract(text).is_none());
    }

    #[test]
    fn test_middle_dot_list() {
        let text = "■材料（2人分）\n・キャベツ 1/4個\n・豚肉 150g\n・ソース 適量\n\n■作り方";
        assert_eq!(
            lines(MiddleDotListExtractor.extract(text)),
            vec!["キャベツ 1/4個", "豚肉 150g", "ソース 適量"]
        );
    }

    #[test]
    fn test_inline_list() {
        let text = "材料：ご飯 1膳、卵 1個, 醤油 少々\n作り方：混ぜる";
        assert_eq!(
            lines(InlineListExtractor.extract(text)),
            vec!["ご飯 1膳", "卵 1個", "醤油 少々"]
        );
    }

    #[test]
    fn test_inline_list_with_annotation_in_heading() {
        let text = "材料（1人分）: 豆腐、ねぎ";
        assert_eq!(lines(InlineListExtractor.extract(text)), vec!["豆腐", "ねぎ"]);
    }

    #[test]
    fn test_inline_list_blank_after_colon() {
        assert!(InlineListExtractor.extract("材料：   \n").is_none());
    }
}
