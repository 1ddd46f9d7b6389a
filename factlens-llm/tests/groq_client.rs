mod common;

use factlens_common::{CompletionConfig, FactlensError};
use factlens_llm::groq::GroqClient;
use factlens_llm::traits::CompletionClient;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(endpoint: &str, api_key: Option<&str>) -> CompletionConfig {
    CompletionConfig {
        model: "llama-3.1-70b-versatile".to_string(),
        api_key: api_key.map(str::to_string),
        endpoint: endpoint.to_string(),
    }
}

#[tokio::test]
async fn complete_returns_trimmed_message_content() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama-3.1-70b-versatile",
            "temperature": 0.0,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama-3.1-70b-versatile",
            "choices": [
                { "message": { "role": "assistant", "content": "  [{\"claim\":\"x\"}]  " } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GroqClient::new(config_for(&server.uri(), Some("test-key"))).unwrap();
    let resp = client
        .complete("system prompt", "user prompt", 0.0)
        .await
        .unwrap();

    assert_eq!(resp.text, "[{\"claim\":\"x\"}]");
    assert_eq!(resp.model.as_deref(), Some("llama-3.1-70b-versatile"));
}

#[tokio::test]
async fn non_success_status_surfaces_status_and_body() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": { "message": "model overloaded" }
        })))
        .mount(&server)
        .await;

    let client = GroqClient::new(config_for(&server.uri(), Some("test-key"))).unwrap();
    let err = client
        .complete("system", "user", 0.0)
        .await
        .expect_err("503 must not produce a completion");

    match err {
        FactlensError::UpstreamUnavailable { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("model overloaded"));
        }
        other => panic!("expected UpstreamUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_api_key_never_reaches_the_network() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    let client = GroqClient::new(config_for(&server.uri(), None)).unwrap();
    let err = client.complete("system", "user", 0.0).await.unwrap_err();

    assert!(matches!(err, FactlensError::MissingCredential("Groq")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unresolved_env_placeholder_counts_as_missing_key() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    let client = GroqClient::new(config_for(&server.uri(), Some("${GROQ_API_KEY}"))).unwrap();
    let err = client.complete("system", "user", 0.0).await.unwrap_err();

    assert!(matches!(err, FactlensError::MissingCredential("Groq")));
}

#[tokio::test]
async fn empty_message_content_is_a_parse_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": "" } } ]
        })))
        .mount(&server)
        .await;

    let client = GroqClient::new(config_for(&server.uri(), Some("test-key"))).unwrap();
    let err = client.complete("system", "user", 0.0).await.unwrap_err();

    assert!(matches!(err, FactlensError::UpstreamParse(_)));
}
