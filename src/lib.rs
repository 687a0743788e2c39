pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod extract;
pub mod interactive;
pub mod prompt;
pub mod providers;
pub mod render;
pub mod session;

pub use chat::{Provider, RecipeChat, RecipeChatBuilder};
pub use config::AppConfig;
pub use error::{ChatError, CompletionError, Result};
pub use estimate::{
    estimate, estimate_answer, Category, Estimate, EstimationOutcome, EstimationReport,
    LookupTable, TableKind,
};
pub use extract::{extract_ingredient_lines, IngredientLine};
pub use prompt::{compose_prompt, Difficulty, Question, Servings};
pub use session::Session;

/// Ask one question using the configuration from `config.toml` and the
/// environment.
///
/// # Example
/// ```no_run
/// # use recipe_chat::{ask_recipe, Difficulty, Servings};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let answer = ask_recipe("肉じゃがの作り方", Servings::new(2)?, Difficulty::Easy).await?;
/// println!("{}", answer);
/// # Ok(())
/// # }
/// ```
pub async fn ask_recipe(
    question: &str,
    servings: Servings,
    difficulty: Difficulty,
) -> Result<String> {
    let chat = RecipeChat::from_config(AppConfig::load()?)?;
    chat.ask_question(&Question::new(question, servings, difficulty))
        .await
}

/// Estimate ingredient prices in an answer with the built-in table.
pub fn estimate_prices(answer: &str, servings: Option<u32>) -> EstimationOutcome {
    estimate_answer(answer, &LookupTable::builtin_prices(), servings)
}

/// Estimate ingredient calories in an answer with the built-in table.
pub fn estimate_calories(answer: &str, servings: Option<u32>) -> EstimationOutcome {
    estimate_answer(answer, &LookupTable::builtin_calories(), servings)
}
