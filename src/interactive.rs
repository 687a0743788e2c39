use dialoguer::Input;

use crate::chat::RecipeChat;
use crate::error::{ChatError, Result};
use crate::estimate::{estimate, TableKind};
use crate::extract::{extract_ingredient_lines, IngredientLine};
use crate::prompt::{Difficulty, Servings};
use crate::render::{
    render_answer, render_error, render_favorites, render_links, render_outcome,
    NO_INGREDIENTS_MESSAGE,
};
use crate::session::Session;

const HELP: &str = "\
質問を入力するとAIが答えます。コマンド:
  :price / :calorie       直前の回答の材料から価格・カロリーを推定
  :manual [price|calorie] <材料、材料…>
                          材料を手入力して価格・カロリーを推定
  :fav                    お気に入り登録/解除
  :favs                   お気に入り一覧
  :rate <1-5>             回答を評価
  :mail [宛先]            メール作成リンク
  :shop                   材料の購入リンク
  :servings <1-5>         人数を変更
  :difficulty <easy|elaborate>
  :help / :quit";

/// One line of user input in the interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Ask(String),
    Estimate(TableKind),
    Manual(TableKind, String),
    Favorite,
    Favorites,
    Rate(u8),
    Mail(Option<String>),
    Shop,
    Servings(u32),
    Difficulty(Difficulty),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(input: &str) -> ReplCommand {
    let input = input.trim();
    if input.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(command) = input.strip_prefix(':') else {
        return ReplCommand::Ask(input.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "price" => ReplCommand::Estimate(TableKind::Price),
        "calorie" | "calories" => ReplCommand::Estimate(TableKind::Calorie),
        "manual" => parse_manual(arg),
        "fav" => ReplCommand::Favorite,
        "favs" => ReplCommand::Favorites,
        "rate" => match arg.parse() {
            Ok(stars) => ReplCommand::Rate(stars),
            Err(_) => ReplCommand::Invalid(format!("rating must be 1-5, got '{arg}'")),
        },
        "mail" => ReplCommand::Mail((!arg.is_empty()).then(|| arg.to_string())),
        "shop" => ReplCommand::Shop,
        "servings" => match arg.parse() {
            Ok(count) => ReplCommand::Servings(count),
            Err(_) => ReplCommand::Invalid(format!("servings must be 1-5, got '{arg}'")),
        },
        "difficulty" => match arg.parse() {
            Ok(difficulty) => ReplCommand::Difficulty(difficulty),
            Err(e) => ReplCommand::Invalid(e),
        },
        "help" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => ReplCommand::Invalid(format!("unknown command ':{other}'")),
    }
}

/// `:manual [table] items`; the table defaults to price.
fn parse_manual(arg: &str) -> ReplCommand {
    let (kind, items) = match arg.split_once(char::is_whitespace) {
        Some((first, rest)) => match first.parse::<TableKind>() {
            Ok(kind) => (kind, rest.trim()),
            Err(_) => (TableKind::Price, arg),
        },
        None => match arg.parse::<TableKind>() {
            Ok(kind) => (kind, ""),
            Err(_) => (TableKind::Price, arg),
        },
    };
    if items.is_empty() {
        ReplCommand::Invalid("usage: :manual [price|calorie] <材料、材料…>".to_string())
    } else {
        ReplCommand::Manual(kind, items.to_string())
    }
}

/// Split hand-typed ingredients on Japanese or ASCII commas.
fn manual_lines(text: &str) -> Vec<IngredientLine> {
    text.split(['、', ',', '，'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(IngredientLine::from)
        .collect()
}

/// Execute one command against the session and return what to print.
pub async fn handle(
    chat: &RecipeChat,
    session: &mut Session,
    command: ReplCommand,
) -> Result<Option<String>> {
    let output = match command {
        ReplCommand::Ask(question) => {
            println!("AIが考え中...");
            let answer = chat.ask(session, &question).await?;
            render_answer(&answer)
        }
        ReplCommand::Estimate(kind) => render_outcome(&chat.estimate(session, kind)?),
        ReplCommand::Manual(kind, text) => render_outcome(&estimate(
            &manual_lines(&text),
            chat.table(kind),
            Some(session.servings.get()),
        )),
        ReplCommand::Favorite => {
            if session.toggle_favorite()? {
                "お気に入りに登録しました".to_string()
            } else {
                "お気に入りから削除しました".to_string()
            }
        }
        ReplCommand::Favorites => render_favorites(session.favorites()),
        ReplCommand::Rate(stars) => {
            session.rate(stars)?;
            format!("評価: {}", "★".repeat(stars as usize))
        }
        ReplCommand::Mail(to) => session.mail_link(to.as_deref())?.to_string(),
        ReplCommand::Shop => {
            let answer = session.last_answer().ok_or(ChatError::NoAnswer)?;
            let lines = extract_ingredient_lines(answer);
            if lines.is_empty() {
                NO_INGREDIENTS_MESSAGE.to_string()
            } else {
                let mut blocks = Vec::with_capacity(lines.len());
                for line in &lines {
                    blocks.push(render_links(line.name(), &session.shopping_links(line)?));
                }
                blocks.join("\n")
            }
        }
        ReplCommand::Servings(count) => {
            session.servings = Servings::new(count)?;
            format!("{}人分に設定しました", session.servings)
        }
        ReplCommand::Difficulty(difficulty) => {
            session.difficulty = difficulty;
            format!("難易度: {}", difficulty)
        }
        ReplCommand::Help => HELP.to_string(),
        ReplCommand::Invalid(message) => message,
        ReplCommand::Empty | ReplCommand::Quit => return Ok(None),
    };
    Ok(Some(output))
}

/// Read-eval-print loop over stdin until `:quit`.
///
/// Errors from individual commands are printed and the loop continues.
pub async fn run(chat: &RecipeChat, session: &mut Session) -> Result<()> {
    println!("🍳 料理チャット ({})", chat.provider_name());
    println!("料理に関する質問をどうぞ！ :help でコマンド一覧");

    loop {
        let input: String = Input::new()
            .with_prompt(format!("[{}人分・{}]", session.servings, session.difficulty))
            .allow_empty(true)
            .interact_text()?;

        let command = parse_command(&input);
        if command == ReplCommand::Quit {
            break;
        }

        match handle(chat, session, command).await {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => println!("{}", render_error(&e)),
        }
    }
    Ok(())
}
