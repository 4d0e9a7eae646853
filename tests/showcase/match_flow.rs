use crate::support::{at, match_reply, open, submission, ScriptedModel};
use handloom::app::MatchFlow;
use handloom::catalog::timestamp_id;
use handloom::error::{ConsistencyError, ShowcaseError, ValidationError};
use handloom::providers::PromptPart;
use handloom::store::InMemoryStore;
use handloom::ShowcaseController;
use std::sync::Arc;

const REQUEST: &str = "A blue silk saree with peacock motifs for a wedding";

fn mayuri_id() -> String {
    timestamp_id(at(0))
}

async fn two_design_showcase(model: Arc<ScriptedModel>) -> ShowcaseController {
    let controller = open(Arc::new(InMemoryStore::new()), model).await;
    controller
        .add_design_at(submission("Mayuri Saree", "Silk, Zari Thread"), at(0))
        .await
        .unwrap();
    controller
        .add_design_at(submission("Kantha Stole", "Cotton"), at(5))
        .await
        .unwrap();
    controller
}

#[tokio::test]
async fn known_match_is_resolved_to_its_design() {
    let model = ScriptedModel::replying([Ok(match_reply(&mayuri_id()))]);
    let controller = two_design_showcase(Arc::clone(&model)).await;

    let outcome = controller.request_match(REQUEST).await.unwrap();
    assert_eq!(outcome.design.id, mayuri_id());
    assert_eq!(outcome.design.name, "Mayuri Saree");
    assert_eq!(outcome.result.platform_recommendations.len(), 2);
    assert_eq!(controller.match_flow(), MatchFlow::Done(outcome));

    let request = &model.requests()[0];
    assert!(request.response_schema.is_some());
    assert!(!request.has_inline_data());
    let PromptPart::Text(prompt) = &request.parts[0] else {
        panic!("match prompt should be text");
    };
    assert!(prompt.contains(REQUEST));
    assert!(prompt.contains("Mayuri Saree"));
    assert!(prompt.contains("Kantha Stole"));

    controller.close_match();
    assert_eq!(controller.match_flow(), MatchFlow::Idle);
}

#[tokio::test]
async fn unknown_match_id_is_a_consistency_error() {
    let model = ScriptedModel::replying([Ok(match_reply("1999-01-01T00:00:00.000Z"))]);
    let controller = two_design_showcase(model).await;

    let err = controller.request_match(REQUEST).await.unwrap_err();
    assert!(matches!(
        err,
        ShowcaseError::Consistency(ConsistencyError::UnknownDesign { ref design_id })
            if design_id == "1999-01-01T00:00:00.000Z"
    ));
    let message = "AI returned a matching design ID that doesn't exist in your collection.";
    assert_eq!(controller.error_banner().as_deref(), Some(message));
    assert_eq!(controller.match_flow(), MatchFlow::Errored(message.into()));
}

#[tokio::test]
async fn empty_collection_is_rejected_without_calling_model() {
    let model = ScriptedModel::replying([]);
    let controller = open(Arc::new(InMemoryStore::new()), Arc::clone(&model)).await;

    let err = controller.request_match(REQUEST).await.unwrap_err();
    assert!(matches!(
        err,
        ShowcaseError::Validation(ValidationError::EmptyCollection)
    ));
    assert_eq!(
        controller.error_banner().as_deref(),
        Some("Please upload at least one design to use the AI Matchmaker.")
    );
    assert_eq!(model.calls(), 0);
    assert_eq!(controller.match_flow(), MatchFlow::Idle);
}

#[tokio::test]
async fn blank_request_is_rejected_without_calling_model() {
    let model = ScriptedModel::replying([]);
    let controller = two_design_showcase(Arc::clone(&model)).await;

    let err = controller.request_match("   ").await.unwrap_err();
    assert!(matches!(
        err,
        ShowcaseError::Validation(ValidationError::BlankRequest)
    ));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn malformed_reply_is_a_service_error() {
    let model = ScriptedModel::replying([Ok("{\"justification\": \"no id\"}".to_string())]);
    let controller = two_design_showcase(model).await;

    let err = controller.request_match(REQUEST).await.unwrap_err();
    assert!(matches!(err, ShowcaseError::Service(_)));
    assert!(matches!(controller.match_flow(), MatchFlow::Errored(_)));
}

#[tokio::test]
async fn second_request_while_analyzing_is_rejected() {
    let model = ScriptedModel::gated([Ok(match_reply(&mayuri_id()))]);
    let controller = two_design_showcase(Arc::clone(&model)).await;

    let (first, second, ()) = tokio::join!(
        controller.request_match(REQUEST),
        controller.request_match("cotton stole"),
        async {
            tokio::task::yield_now().await;
            model.release();
        }
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(ShowcaseError::Validation(ValidationError::AnalysisInProgress))
    )));
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn banner_shows_latest_error_until_dismissed_or_success() {
    let model = ScriptedModel::replying([
        Ok(match_reply("1999-01-01T00:00:00.000Z")),
        Ok(match_reply(&mayuri_id())),
    ]);
    let controller = two_design_showcase(model).await;

    controller.request_match("").await.unwrap_err();
    controller.request_match(REQUEST).await.unwrap_err();
    assert_eq!(
        controller.error_banner().as_deref(),
        Some("AI returned a matching design ID that doesn't exist in your collection.")
    );

    controller.dismiss_error();
    assert_eq!(controller.error_banner(), None);

    controller.request_match("").await.unwrap_err();
    assert!(controller.error_banner().is_some());
    controller.request_match(REQUEST).await.unwrap();
    assert_eq!(controller.error_banner(), None);
}
