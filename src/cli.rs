use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::estimate::TableKind;
use crate::prompt::Difficulty;

/// recipe-chat: ask a language model for recipes and estimate what they cost.
#[derive(Parser, Debug)]
#[command(name = "recipe-chat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Completion provider to use instead of the configured default
    #[arg(long, global = true)]
    pub provider: Option<String>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Ask a single cooking question and print the answer.
    Ask {
        /// The question, e.g. "肉じゃがの作り方"
        question: String,

        /// Number of servings (1 to 5).
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=5))]
        servings: u32,

        /// easy or elaborate.
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,

        /// Also estimate the answer with the price or calorie table.
        #[arg(long)]
        estimate: Option<TableKind>,
    },

    /// Estimate ingredients in an answer read from a file or stdin.
    Estimate {
        /// price or calorie.
        #[arg(short, long, default_value = "price")]
        table: TableKind,

        /// Divide the total by this many servings.
        #[arg(short, long)]
        servings: Option<u32>,

        /// Answer text file; stdin when omitted.
        file: Option<PathBuf>,
    },

    /// Print the active lookup tables.
    Tables {
        /// Only print this table.
        #[arg(short, long)]
        table: Option<TableKind>,
    },

    /// Interactive session with favorites, rating, mail and shopping links.
    #[default]
    Chat,
}
