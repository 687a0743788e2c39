//! Plain-text rendering for the terminal front end.

use crate::error::ChatError;
use crate::estimate::{EstimationOutcome, EstimationReport, LookupTable};
use crate::session::{Favorite, ShoppingLink};
use std::fmt::Write;

pub const NO_INGREDIENTS_MESSAGE: &str = "材料が見つかりませんでした";

pub fn render_error(err: &ChatError) -> String {
    format!("エラーが発生しました: {}", err)
}

pub fn render_answer(answer: &str) -> String {
    format!("AIの回答: {}", answer)
}

pub fn render_report(report: &EstimationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "材料 | 分類 | {}", report.kind.label());
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{} | {} | {}{}",
            row.line, row.category, row.value, report.unit
        );
    }
    let _ = writeln!(out, "合計: {}{}", report.total, report.unit);
    let _ = write!(out, "1人あたり: {}{}", report.per_serving, report.unit);
    out
}

pub fn render_outcome(outcome: &EstimationOutcome) -> String {
    match outcome {
        EstimationOutcome::Report(report) => render_report(report),
        EstimationOutcome::NoIngredientsFound => NO_INGREDIENTS_MESSAGE.to_string(),
    }
}

pub fn render_table(table: &LookupTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {} entries, default {}{})",
        table.kind.label(),
        table.version,
        table.entries.len(),
        table.default_value,
        table.unit
    );
    for entry in &table.entries {
        match &entry.note {
            Some(note) => {
                let _ = writeln!(out, "{}: {}{} / {}", entry.name, entry.value, table.unit, note);
            }
            None => {
                let _ = writeln!(out, "{}: {}{}", entry.name, entry.value, table.unit);
            }
        }
    }
    out
}

pub fn render_favorites(favorites: &[Favorite]) -> String {
    if favorites.is_empty() {
        return "お気に入りはまだありません".to_string();
    }
    favorites
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}: {}…", i + 1, f.question, f.key))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_links(name: &str, links: &[ShoppingLink]) -> String {
    links
        .iter()
        .map(|link| format!("{} ({}): {}", name, link.site, link.url))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{estimate_answer, LookupTable};

    #[test]
    fn test_render_report() {
        let outcome = estimate_answer(
            "【材料】\n- 玉ねぎ 1個\n- 豚肉 300g\n",
            &LookupTable::builtin_prices(),
            Some(2),
        );
        assert_eq!(
            render_outcome(&outcome),
            "材料 | 分類 | 価格\n玉ねぎ 1個 | 玉ねぎ | 150円\n豚肉 300g | 豚肉 | 400円\n合計: 550円\n1人あたり: 275円"
        );
    }

    #[test]
    fn test_render_no_ingredients() {
        let outcome = estimate_answer("今日は晴れです", &LookupTable::builtin_prices(), Some(2));
        assert_eq!(render_outcome(&outcome), NO_INGREDIENTS_MESSAGE);
    }

    #[test]
    fn test_render_error() {
        assert_eq!(
            render_error(&ChatError::EmptyQuestion),
            "エラーが発生しました: Question cannot be empty"
        );
    }

    #[test]
    fn test_render_table_includes_notes() {
        let rendered = render_table(&LookupTable::builtin_calories());
        assert!(rendered.starts_with("カロリー (builtin-1,"));
        assert!(rendered.contains("醤油: 13kcal / 大さじ1"));
    }
}
