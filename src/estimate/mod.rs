//! Price and calorie estimates for extracted ingredient lines.
//!
//! Each line is mapped to a constant from a [`LookupTable`] by substring
//! matching. Quantities written in the line are ignored; an estimate is a
//! rough sum of table constants, not a nutrition calculation.

mod table;

pub use self::table::{
    LookupTable, TableEntry, TableKind, BUILTIN_VERSION, DEFAULT_CALORIES, DEFAULT_PRICE,
};

use crate::extract::{extract_ingredient_lines, IngredientLine};
use log::info;
use std::fmt;

/// The table entry a line was attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Matched(String),
    Unmatched,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Matched(name) => f.write_str(name),
            Category::Unmatched => f.write_str("unmatched"),
        }
    }
}

/// One row of an estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    pub line: IngredientLine,
    pub category: Category,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationReport {
    pub kind: TableKind,
    pub unit: String,
    pub rows: Vec<Estimate>,
    /// Sum of the row values, widened to 64 bits
    pub total: u64,
    pub per_serving: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimationOutcome {
    /// Extraction produced no lines
    NoIngredientsFound,
    Report(EstimationReport),
}

impl EstimationOutcome {
    pub fn report(&self) -> Option<&EstimationReport> {
        match self {
            EstimationOutcome::Report(report) => Some(report),
            EstimationOutcome::NoIngredientsFound => None,
        }
    }
}

/// Total divided by the serving count, or the total itself when the count is
/// zero or unknown.
pub fn per_serving(total: u64, servings: Option<u32>) -> u64 {
    match servings {
        Some(count) if count > 0 => total / u64::from(count),
        _ => total,
    }
}

/// Map one line to its estimate. Every line yields exactly one row.
pub fn estimate_line(line: &IngredientLine, table: &LookupTable) -> Estimate {
    match table.lookup(line.as_str()) {
        Some(entry) => Estimate {
            line: line.clone(),
            category: Category::Matched(entry.name.clone()),
            value: entry.value,
        },
        None => Estimate {
            line: line.clone(),
            category: Category::Unmatched,
            value: table.default_value,
        },
    }
}

/// Estimate every line and aggregate.
pub fn estimate(
    lines: &[IngredientLine],
    table: &LookupTable,
    servings: Option<u32>,
) -> EstimationOutcome {
    if lines.is_empty() {
        return EstimationOutcome::NoIngredientsFound;
    }

    let rows: Vec<Estimate> = lines.iter().map(|line| estimate_line(line, table)).collect();
    let total: u64 = rows.iter().map(|row| u64::from(row.value)).sum();
    let per_serving = per_serving(total, servings);

    info!(
        "Estimated {} for {} lines: total {}{}, per serving {}{}",
        table.kind,
        rows.len(),
        total,
        table.unit,
        per_serving,
        table.unit
    );

    EstimationOutcome::Report(EstimationReport {
        kind: table.kind,
        unit: table.unit.clone(),
        rows,
        total,
        per_serving,
    })
}

/// Extract ingredient lines from `answer` and estimate them.
pub fn estimate_answer(
    answer: &str,
    table: &LookupTable,
    servings: Option<u32>,
) -> EstimationOutcome {
    estimate(&extract_ingredient_lines(answer), table, servings)
}
