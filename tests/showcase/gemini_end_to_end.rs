use crate::support::{at, submission};
use handloom::catalog::timestamp_id;
use handloom::media::UploadLimits;
use handloom::providers::GeminiClient;
use handloom::store::{InMemoryStore, ShowcaseStore};
use handloom::ShowcaseController;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn controller_for(server: &MockServer) -> ShowcaseController {
    let client = GeminiClient::new(Some("test-key"), "gemini-2.5-flash").with_base_url(&server.uri());
    let controller = ShowcaseController::open(
        ShowcaseStore::new(Arc::new(InMemoryStore::new())),
        Arc::new(client),
        UploadLimits::default(),
    )
    .await;
    controller
        .add_design_at(submission("Mayuri Saree", "Silk, Zari Thread"), at(0))
        .await
        .unwrap();
    controller
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
}

#[tokio::test]
async fn pitch_is_generated_over_http_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("**Subject Line:** Mayuri")))
        .expect(1)
        .mount(&server)
        .await;
    let controller = controller_for(&server).await;
    let id = timestamp_id(at(0));

    let first = controller.request_pitch(&id).await.unwrap().unwrap();
    let second = controller.request_pitch(&id).await.unwrap().unwrap();

    assert_eq!(first.pitch(), "**Subject Line:** Mayuri");
    assert_eq!(second.pitch(), first.pitch());
}

#[tokio::test]
async fn match_request_sends_schema_and_resolves_design() {
    let server = MockServer::start().await;
    let id = timestamp_id(at(0));
    let reply = json!({
        "matchedDesignId": id,
        "justification": "Peacock motifs in silk.",
        "platformRecommendations": [{"platformName": "Etsy", "reason": "Handmade buyers."}]
    })
    .to_string();
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(&reply)))
        .mount(&server)
        .await;
    let controller = controller_for(&server).await;

    let outcome = controller.request_match("blue silk saree").await.unwrap();
    assert_eq!(outcome.design.id, id);
    assert_eq!(outcome.result.platform_recommendations[0].platform_name, "Etsy");
}

#[tokio::test]
async fn http_failure_shows_fixed_banner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;
    let controller = controller_for(&server).await;

    let err = controller.request_pitch(&timestamp_id(at(0))).await.unwrap_err();
    let banner = controller.error_banner().unwrap();
    assert_eq!(banner, err.user_message());
    assert!(!banner.contains("backend exploded"));
    assert!(!banner.contains("test-key"));
}
