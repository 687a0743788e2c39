use crate::error::ChatError;
use std::fmt;
use std::str::FromStr;

/// Number of people a recipe is for, as offered by the serving selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Servings(u32);

impl Servings {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 5;

    pub fn new(count: u32) -> Result<Self, ChatError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Servings(count))
        } else {
            Err(ChatError::InvalidServings(count))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Servings {
    fn default() -> Self {
        Servings(1)
    }
}

impl fmt::Display for Servings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much effort the requested dish should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Elaborate,
}

impl Difficulty {
    /// Label interpolated into the prompt
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "簡単な料理",
            Difficulty::Elaborate => "ちょっと手間のかかる料理",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "easy" | "簡単" | "簡単な料理" => Ok(Difficulty::Easy),
            "elaborate" | "手間" | "ちょっと手間のかかる料理" => {
                Ok(Difficulty::Elaborate)
            }
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy or elaborate)"
            )),
        }
    }
}

/// A cooking question together with the selector values.
#[derive(Debug, Clone, Default)]
pub struct Question {
    pub text: String,
    pub servings: Servings,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(text: impl Into<String>, servings: Servings, difficulty: Difficulty) -> Self {
        Question {
            text: text.into(),
            servings,
            difficulty,
        }
    }
}

/// Build the prompt sent to the completion provider.
///
/// `（{n}人分、{difficulty}で教えて）` is appended to the trimmed question; a
/// non-empty `suffix` is added inside the parentheses after `。`.
pub fn compose_prompt(question: &Question, suffix: Option<&str>) -> Result<String, ChatError> {
    let text = question.text.trim();
    if text.is_empty() {
        return Err(ChatError::EmptyQuestion);
    }

    let suffix = suffix.map(str::trim).filter(|s| !s.is_empty());
    Ok(match suffix {
        Some(extra) => format!(
            "{}（{}人分、{}で教えて。{}）",
            text, question.servings, question.difficulty, extra
        ),
        None => format!(
            "{}（{}人分、{}で教えて）",
            text, question.servings, question.difficulty
        ),
    })
}
