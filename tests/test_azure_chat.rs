use mockito::Matcher;
use recipe_chat::{
    ChatError, Difficulty, EstimationOutcome, Provider, RecipeChat, Servings, Session,
    TableKind,
};
use serde_json::json;
use std::time::Duration;

const COMPLETIONS_PATH: &str =
    "/openai/deployments/recipe-gpt/chat/completions?api-version=2024-02-15-preview";

fn chat_for(server: &mockito::ServerGuard) -> RecipeChat {
    RecipeChat::builder()
        .provider(Provider::AzureOpenAI)
        .api_key("test-key")
        .endpoint(server.url())
        .deployment_name("recipe-gpt")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn completion_body(content: &str) -> String {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

#[tokio::test]
async fn test_ask_then_estimate_prices() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .match_header("api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "messages": [{"role": "user", "content": "生姜焼きの作り方（2人分、簡単な料理で教えて）"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(
            "【材料】\n- 玉ねぎ 1個\n- 豚肉 300g\n\n作り方\n1. 玉ねぎを切る",
        ))
        .create_async()
        .await;

    let chat = chat_for(&server);
    let mut session = Session::default();
    session.servings = Servings::new(2).unwrap();
    session.difficulty = Difficulty::Easy;

    let answer = chat.ask(&mut session, "生姜焼きの作り方").await.unwrap();
    assert!(answer.starts_with("【材料】"));
    mock.assert_async().await;

    let outcome = chat.estimate(&session, TableKind::Price).unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.total, 550);
    assert_eq!(report.per_serving, 275);

    // Changing the selector afterwards does not change the divisor
    session.servings = Servings::new(5).unwrap();
    let again = chat.estimate(&session, TableKind::Price).unwrap();
    assert_eq!(again.report().unwrap().per_serving, 275);
}

#[tokio::test]
async fn test_answer_without_ingredients() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("今日は晴れです"))
        .create_async()
        .await;

    let chat = chat_for(&server);
    let mut session = Session::default();
    chat.ask(&mut session, "天気は？").await.unwrap();

    assert_eq!(
        chat.estimate(&session, TableKind::Calorie).unwrap(),
        EstimationOutcome::NoIngredientsFound
    );
}

#[tokio::test]
async fn test_failure_is_reported_once_and_session_survives() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"code": "401", "message": "Access denied due to invalid subscription key"}}"#)
        .expect(1)
        .create_async()
        .await;

    let chat = chat_for(&server);
    let mut session = Session::default();

    let err = chat.ask(&mut session, "カレー").await.unwrap_err();
    assert!(matches!(err, ChatError::Completion(_)));
    assert!(err
        .to_string()
        .contains("Access denied due to invalid subscription key"));
    // No automatic retry
    failing.assert_async().await;
    assert!(session.last_answer().is_none());

    failing.remove_async().await;
    let _ok = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("材料：卵、ご飯"))
        .create_async()
        .await;

    chat.ask(&mut session, "卵かけご飯").await.unwrap();
    assert_eq!(session.last_answer(), Some("材料：卵、ご飯"));
    assert!(session.toggle_favorite().unwrap());
}
