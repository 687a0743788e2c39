//! Estimate prices and calories for a canned answer
//!
//! No API key is needed: the answer text stands in for a model response.

use recipe_chat::render::render_outcome;
use recipe_chat::{estimate_calories, estimate_prices, extract_ingredient_lines};

fn main() {
    let answer = "\
生姜焼きのレシピです。

【材料】
- 豚肉 300g
- 玉ねぎ 1/2個
- 醤油 大さじ2
- みりん 大さじ2
- 生姜 1かけ

【作り方】
1. 玉ねぎを薄切りにする
2. 豚肉を焼き、タレを絡める";

    println!("=== Ingredient lines ===");
    for line in extract_ingredient_lines(answer) {
        println!("{} ({})", line, line.name());
    }

    println!("\n=== Price ===");
    println!("{}", render_outcome(&estimate_prices(answer, Some(2))));

    println!("\n=== Calories ===");
    println!("{}", render_outcome(&estimate_calories(answer, Some(2))));
}
