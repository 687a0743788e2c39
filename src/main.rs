use clap::Parser;
use log::debug;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use recipe_chat::cli::{Cli, Command};
use recipe_chat::config::AppConfig;
use recipe_chat::render::{render_answer, render_error, render_outcome, render_table};
use recipe_chat::{
    estimate_answer, interactive, Difficulty, LookupTable, Question, RecipeChat,
    Result, Servings, Session, TableKind,
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run().await {
        eprintln!("{}", render_error(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(provider) = cli.provider {
        config.default_provider = provider;
    }
    debug!("Using provider {}", config.default_provider);

    match cli.command.unwrap_or_default() {
        Command::Ask {
            question,
            servings,
            difficulty,
            estimate,
        } => cmd_ask(config, &question, servings, difficulty, estimate).await,
        Command::Estimate {
            table,
            servings,
            file,
        } => cmd_estimate(&config, table, servings, file).await,
        Command::Tables { table } => cmd_tables(&config, table),
        Command::Chat => {
            let mut session = Session::new(config.session.clone());
            let chat = RecipeChat::from_config(config)?;
            interactive::run(&chat, &mut session).await
        }
    }
}

async fn cmd_ask(
    config: AppConfig,
    question: &str,
    servings: u32,
    difficulty: Difficulty,
    estimate: Option<TableKind>,
) -> Result<()> {
    let chat = RecipeChat::from_config(config)?;
    let question = Question::new(question, Servings::new(servings)?, difficulty);
    let answer = chat.ask_question(&question).await?;
    println!("{}", render_answer(&answer));

    if let Some(kind) = estimate {
        println!();
        let outcome = chat.estimate_text(&answer, kind, Some(question.servings.get()));
        println!("{}", render_outcome(&outcome));
    }
    Ok(())
}

/// Estimate text the user supplies directly; no provider is contacted.
async fn cmd_estimate(
    config: &AppConfig,
    kind: TableKind,
    servings: Option<u32>,
    file: Option<PathBuf>,
) -> Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let table = active_table(config, kind)?;
    println!("{}", render_outcome(&estimate_answer(&text, &table, servings)));
    Ok(())
}

fn cmd_tables(config: &AppConfig, only: Option<TableKind>) -> Result<()> {
    let kinds = match only {
        Some(kind) => vec![kind],
        None => vec![TableKind::Price, TableKind::Calorie],
    };
    for kind in kinds {
        println!("{}", render_table(&active_table(config, kind)?));
    }
    Ok(())
}

fn active_table(config: &AppConfig, kind: TableKind) -> Result<LookupTable> {
    let path = match kind {
        TableKind::Price => config.tables.price.as_deref(),
        TableKind::Calorie => config.tables.calorie.as_deref(),
    };
    LookupTable::load_or_builtin(path, kind)
}
