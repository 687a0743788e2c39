//! Per-user interaction state.
//!
//! A [`Session`] is created once per user and passed to each interaction.
//! It lives in memory only.

use crate::config::SessionConfig;
use crate::error::{ChatError, Result};
use crate::extract::IngredientLine;
use crate::prompt::{Difficulty, Question, Servings};
use log::debug;
use url::{form_urlencoded, Url};

pub const MAIL_SUBJECT: &str = "料理レシピ";
const MAIL_BODY_MIN_CHARS: usize = 1000;
const MAIL_BODY_MAX_CHARS: usize = 2000;

/// A saved answer, keyed by its leading characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub key: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingLink {
    pub site: &'static str,
    pub url: Url,
}

#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    /// Currently selected serving count
    pub servings: Servings,
    /// Currently selected difficulty
    pub difficulty: Difficulty,
    last_question: Option<Question>,
    last_answer: Option<String>,
    rating: Option<u8>,
    favorites: Vec<Favorite>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            config,
            ..Default::default()
        }
    }

    /// Store a fresh answer. The rating belongs to the previous answer and
    /// is cleared.
    pub fn record_answer(&mut self, question: Question, answer: String) {
        self.last_question = Some(question);
        self.last_answer = Some(answer);
        self.rating = None;
    }

    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    pub fn last_question(&self) -> Option<&Question> {
        self.last_question.as_ref()
    }

    fn require_answer(&self) -> Result<&str> {
        self.last_answer().ok_or(ChatError::NoAnswer)
    }

    /// Key a favorite is stored under: the first `favorite_key_chars`
    /// characters of the answer.
    pub fn favorite_key(&self, answer: &str) -> String {
        answer.chars().take(self.config.favorite_key_chars).collect()
    }

    pub fn is_favorite(&self) -> bool {
        self.last_answer()
            .map(|answer| {
                let key = self.favorite_key(answer);
                self.favorites.iter().any(|f| f.key == key)
            })
            .unwrap_or(false)
    }

    /// Add the current answer to favorites, or remove it if already there.
    ///
    /// Returns whether the answer is a favorite afterwards.
    pub fn toggle_favorite(&mut self) -> Result<bool> {
        let answer = self.require_answer()?.to_string();
        let key = self.favorite_key(&answer);

        if let Some(index) = self.favorites.iter().position(|f| f.key == key) {
            self.favorites.remove(index);
            debug!("Removed favorite '{}'", key);
            return Ok(false);
        }

        let question = self
            .last_question
            .as_ref()
            .map(|q| q.text.clone())
            .unwrap_or_default();
        debug!("Added favorite '{}'", key);
        self.favorites.push(Favorite {
            key,
            question,
            answer,
        });
        Ok(true)
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Rate the current answer from 1 to 5.
    pub fn rate(&mut self, stars: u8) -> Result<()> {
        if !(1..=5).contains(&stars) {
            return Err(ChatError::InvalidRating(stars));
        }
        self.require_answer()?;
        self.rating = Some(stars);
        Ok(())
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    fn mail_body_chars(&self) -> usize {
        self.config
            .mail_body_chars
            .clamp(MAIL_BODY_MIN_CHARS, MAIL_BODY_MAX_CHARS)
    }

    /// A `mailto:` link pre-filled with a truncated copy of the answer.
    ///
    /// `to` overrides the configured recipient.
    pub fn mail_link(&self, to: Option<&str>) -> Result<Url> {
        let answer = self.require_answer()?;
        let body: String = answer.chars().take(self.mail_body_chars()).collect();
        let recipient = to.unwrap_or(&self.config.mail_to).trim();

        let mut url = Url::parse(&format!("mailto:{}", recipient))?;
        url.set_query(Some(&format!(
            "subject={}&body={}",
            mail_encode(MAIL_SUBJECT),
            mail_encode(&body)
        )));
        Ok(url)
    }

    /// Search links for buying the ingredient named in `line`.
    pub fn shopping_links(&self, line: &IngredientLine) -> Result<Vec<ShoppingLink>> {
        shopping_links(line.name())
    }
}

/// Percent-encode for a mailto header; spaces become `%20`, not `+`.
fn mail_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Amazon and Rakuten search URLs for an ingredient name.
pub fn shopping_links(name: &str) -> Result<Vec<ShoppingLink>> {
    let name = name.trim();
    let amazon = Url::parse_with_params("https://www.amazon.co.jp/s", &[("k", name)])?;

    let mut rakuten = Url::parse("https://search.rakuten.co.jp/search/mall/")?;
    if let Ok(mut segments) = rakuten.path_segments_mut() {
        segments.pop_if_empty().push(name).push("");
    }

    Ok(vec![
        ShoppingLink {
            site: "Amazon",
            url: amazon,
        },
        ShoppingLink {
            site: "楽天市場",
            url: rakuten,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_answer(answer: &str) -> Session {
        let mut session = Session::new(SessionConfig::default());
        session.record_answer(
            Question::new("カレー", Servings::default(), Difficulty::Easy),
            answer.to_string(),
        );
        session
    }

    #[test]
    fn test_actions_need_an_answer() {
        let mut session = Session::new(SessionConfig::default());
        assert!(matches!(session.toggle_favorite(), Err(ChatError::NoAnswer)));
        assert!(matches!(session.rate(3), Err(ChatError::NoAnswer)));
        assert!(matches!(session.mail_link(None), Err(ChatError::NoAnswer)));
        assert!(!session.is_favorite());
    }

    #[test]
    fn test_toggle_favorite() {
        let mut session = session_with_answer("カレーの材料は玉ねぎ、にんじん、じゃがいもです。");
        assert!(session.toggle_favorite().unwrap());
        assert!(session.is_favorite());
        assert_eq!(session.favorites().len(), 1);
        assert_eq!(session.favorites()[0].question, "カレー");

        assert!(!session.toggle_favorite().unwrap());
        assert!(!session.is_favorite());
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_favorite_key_is_prefix() {
        let session = Session::new(SessionConfig {
            favorite_key_chars: 3,
            ..Default::default()
        });
        assert_eq!(session.favorite_key("肉じゃがの作り方"), "肉じゃ");
        assert_eq!(session.favorite_key("卵"), "卵");
    }

    #[test]
    fn test_answers_sharing_prefix_share_favorite() {
        let mut session = Session::new(SessionConfig {
            favorite_key_chars: 4,
            ..Default::default()
        });
        let question = Question::new("q", Servings::default(), Difficulty::Easy);
        session.record_answer(question.clone(), "おすすめは親子丼".to_string());
        session.toggle_favorite().unwrap();
        session.record_answer(question, "おすすめは牛丼".to_string());
        assert!(session.is_favorite());
    }

    #[test]
    fn test_rating() {
        let mut session = session_with_answer("回答");
        assert!(matches!(session.rate(0), Err(ChatError::InvalidRating(0))));
        assert!(matches!(session.rate(6), Err(ChatError::InvalidRating(6))));
        session.rate(4).unwrap();
        assert_eq!(session.rating(), Some(4));

        session.record_answer(
            Question::new("次", Servings::default(), Difficulty::Easy),
            "次の回答".to_string(),
        );
        assert_eq!(session.rating(), None);
    }

    #[test]
    fn test_mail_link() {
        let session = session_with_answer("玉ねぎ 1個\n豚肉 300g");
        let url = session.mail_link(Some("cook@example.com")).unwrap();
        assert_eq!(url.scheme(), "mailto");
        assert_eq!(url.path(), "cook@example.com");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0], ("subject".to_string(), MAIL_SUBJECT.to_string()));
        assert_eq!(pairs[1], ("body".to_string(), "玉ねぎ 1個\n豚肉 300g".to_string()));
        assert!(url.as_str().contains("%20"));
        assert!(!url.as_str().contains('+'));
    }

    #[test]
    fn test_mail_body_is_truncated() {
        let answer = "あ".repeat(5000);
        let mut session = Session::new(SessionConfig {
            mail_body_chars: 10,
            ..Default::default()
        });
        session.record_answer(Question::default(), answer);

        let url = session.mail_link(None).unwrap();
        let body = url
            .query_pairs()
            .find(|(k, _)| k == "body")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        // Clamped up to the minimum body length
        assert_eq!(body.chars().count(), MAIL_BODY_MIN_CHARS);
    }

    #[test]
    fn test_shopping_links() {
        let session = session_with_answer("回答");
        let links = session
            .shopping_links(&IngredientLine::from("玉ねぎ 1個"))
            .unwrap();

        assert_eq!(links.len(), 2);
        let amazon: Vec<(String, String)> = links[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(amazon, vec![("k".to_string(), "玉ねぎ".to_string())]);

        let rakuten_segments: Vec<&str> = links[1].url.path_segments().unwrap().collect();
        assert_eq!(rakuten_segments[..2], ["search", "mall"]);
        assert_eq!(
            links[1].url.as_str(),
            "https://search.rakuten.co.jp/search/mall/%E7%8E%89%E3%81%AD%E3%81%8E/"
        );
    }
}
