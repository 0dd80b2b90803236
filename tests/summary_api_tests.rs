//! Summarizer adapter tests against a local mock API server

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dignity_directive::application::ports::{Summarizer, SummaryError};
use dignity_directive::domain::directive::{DirectiveForm, DirectivePrompt};
use dignity_directive::infrastructure::GeminiSummarizer;

const MODEL: &str = "test-model";

fn summarizer(server: &MockServer) -> GeminiSummarizer {
    GeminiSummarizer::with_model("test-key", MODEL).with_base_url(server.uri())
}

fn prompt() -> DirectivePrompt {
    let mut form = DirectiveForm::new();
    form.personal_info.surname = "Ahn".into();
    form.personal_info.given_name = "Jisoo".into();
    DirectivePrompt::build(&form)
}

fn generate_path() -> String {
    format!("/{}:generateContent", MODEL)
}

#[tokio::test]
async fn successful_generation_returns_trimmed_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "  # Advance Directive\n\nA formal document.  " }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = summarizer(&server).summarize(&prompt()).await.unwrap();
    assert!(text.starts_with("# Advance Directive"));
    assert!(text.ends_with("A formal document."));
}

#[tokio::test]
async fn multiple_parts_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "First half, " }, { "text": "second half." }]
                }
            }]
        })))
        .mount(&server)
        .await;

    let text = summarizer(&server).summarize(&prompt()).await.unwrap();
    assert_eq!(text, "First half, second half.");
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = summarizer(&server).summarize(&prompt()).await.unwrap_err();
    assert!(matches!(err, SummaryError::InvalidApiKey));
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = summarizer(&server).summarize(&prompt()).await.unwrap_err();
    assert!(matches!(err, SummaryError::RateLimited));
}

#[tokio::test]
async fn empty_candidates_map_to_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = summarizer(&server).summarize(&prompt()).await.unwrap_err();
    assert!(matches!(err, SummaryError::EmptyResponse));
}

#[tokio::test]
async fn blank_document_maps_to_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "   \n  " }] } }]
        })))
        .mount(&server)
        .await;

    let err = summarizer(&server).summarize(&prompt()).await.unwrap_err();
    assert!(matches!(err, SummaryError::EmptyResponse));
}

#[tokio::test]
async fn api_error_body_surfaces_its_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let err = summarizer(&server).summarize(&prompt()).await.unwrap_err();
    match err {
        SummaryError::ApiError(message) => assert!(message.contains("quota exceeded")),
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = summarizer(&server).summarize(&prompt()).await.unwrap_err();
    match err {
        SummaryError::ApiError(message) => assert!(message.contains("HTTP")),
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn request_carries_the_drafting_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(wiremock::matchers::body_string_contains("Jisoo Ahn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    summarizer(&server).summarize(&prompt()).await.unwrap();
}
