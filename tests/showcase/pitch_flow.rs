use crate::support::{at, open, submission, ScriptedModel};
use handloom::app::{PitchFlow, PitchSource};
use handloom::providers::PromptPart;
use handloom::store::{InMemoryStore, DESIGNS_KEY};
use std::sync::Arc;
use std::time::Duration;

const PITCH: &str = "**Subject Line:** The Mayuri Saree, woven for your festive edit";

#[tokio::test]
async fn first_request_generates_and_second_reuses_cached_pitch() {
    let backend = Arc::new(InMemoryStore::new());
    let model = ScriptedModel::replying([Ok(PITCH.to_string())]);
    let controller = open(Arc::clone(&backend), Arc::clone(&model)).await;

    controller.save_contact("weaver@example.com").await.unwrap();
    let design = controller
        .add_design_at(submission("Mayuri Saree", "Silk, Zari Thread"), at(0))
        .await
        .unwrap();

    let first = controller.request_pitch(&design.id).await.unwrap().unwrap();
    assert_eq!(first.source, PitchSource::Generated);
    assert_eq!(first.pitch(), PITCH);
    assert_eq!(controller.pitch_flow(&design.id), PitchFlow::Done(PITCH.into()));

    let second = controller.request_pitch(&design.id).await.unwrap().unwrap();
    assert_eq!(second.source, PitchSource::Cached);
    assert_eq!(second.pitch(), PITCH);
    assert_eq!(model.calls(), 1);

    let request = &model.requests()[0];
    assert!(matches!(request.parts[0], PromptPart::InlineData { .. }));
    let PromptPart::Text(prompt) = &request.parts[1] else {
        panic!("second part should be the text prompt");
    };
    assert!(prompt.contains("Mayuri Saree"));
    assert!(prompt.contains("Silk, Zari Thread"));
    assert!(prompt.contains("weaver@example.com"));
    assert!(request.response_schema.is_none());

    let stored = backend.raw(DESIGNS_KEY).unwrap();
    assert!(stored.contains(PITCH));
}

#[tokio::test]
async fn prompt_says_not_provided_without_contact() {
    let model = ScriptedModel::replying([Ok(PITCH.to_string())]);
    let controller = open(Arc::new(InMemoryStore::new()), Arc::clone(&model)).await;
    let design = controller
        .add_design(submission("Kantha Stole", "Cotton"))
        .await
        .unwrap();

    controller.request_pitch(&design.id).await.unwrap();

    let PromptPart::Text(prompt) = &model.requests()[0].parts[1] else {
        panic!("second part should be the text prompt");
    };
    assert!(prompt.contains("Not Provided"));
}

#[tokio::test]
async fn service_failure_sets_banner_and_leaves_design_unpitched() {
    let model = ScriptedModel::replying([
        Err(anyhow::anyhow!("Gemini API error (500): key=AIzaSySecret")),
        Ok(PITCH.to_string()),
    ]);
    let controller = open(Arc::new(InMemoryStore::new()), Arc::clone(&model)).await;
    let design = controller
        .add_design(submission("Mayuri Saree", "Silk"))
        .await
        .unwrap();

    let err = controller.request_pitch(&design.id).await.unwrap_err();
    let message = "Failed to generate pitch from Gemini API. Please check the console for more details.";
    assert_eq!(err.user_message(), message);
    assert_eq!(controller.error_banner().as_deref(), Some(message));
    assert_eq!(
        controller.pitch_flow(&design.id),
        PitchFlow::Errored(message.into())
    );
    assert!(controller.design(&design.id).unwrap().pitch.is_none());

    // Retrying clears the banner and caches the new pitch.
    let outcome = controller.request_pitch(&design.id).await.unwrap().unwrap();
    assert_eq!(outcome.source, PitchSource::Generated);
    assert_eq!(controller.error_banner(), None);
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn empty_reply_counts_as_failure() {
    let model = ScriptedModel::replying([Ok("   ".to_string())]);
    let controller = open(Arc::new(InMemoryStore::new()), model).await;
    let design = controller
        .add_design(submission("Mayuri Saree", "Silk"))
        .await
        .unwrap();

    assert!(controller.request_pitch(&design.id).await.is_err());
    assert!(controller.design(&design.id).unwrap().pitch.is_none());
}

#[tokio::test]
async fn unknown_design_is_ignored() {
    let model = ScriptedModel::replying([]);
    let controller = open(Arc::new(InMemoryStore::new()), Arc::clone(&model)).await;

    let outcome = tokio_test::assert_ok!(controller.request_pitch("2020-01-01T00:00:00.000Z").await);
    assert!(outcome.is_none());
    assert_eq!(model.calls(), 0);
    assert_eq!(controller.error_banner(), None);
}

#[tokio::test]
async fn duplicate_request_while_loading_is_a_no_op() {
    let model = ScriptedModel::gated([Ok(PITCH.to_string())]);
    let controller = open(Arc::new(InMemoryStore::new()), Arc::clone(&model)).await;
    let design = controller
        .add_design(submission("Mayuri Saree", "Silk"))
        .await
        .unwrap();

    let (first, second, ()) = tokio::join!(
        controller.request_pitch(&design.id),
        controller.request_pitch(&design.id),
        async {
            tokio::task::yield_now().await;
            model.release();
        }
    );

    let outcomes = [first.unwrap(), second.unwrap()];
    assert_eq!(outcomes.iter().filter(|o| o.is_none()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .flatten()
            .map(|o| o.source)
            .collect::<Vec<_>>(),
        [PitchSource::Generated]
    );
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn cancelled_request_does_not_stay_loading() {
    let model = ScriptedModel::gated([Ok(PITCH.to_string())]);
    let controller = open(Arc::new(InMemoryStore::new()), Arc::clone(&model)).await;
    let design = controller
        .add_design(submission("Mayuri Saree", "Silk"))
        .await
        .unwrap();

    let timed_out =
        tokio::time::timeout(Duration::from_millis(50), controller.request_pitch(&design.id)).await;
    assert!(timed_out.is_err());
    assert_eq!(controller.pitch_flow(&design.id), PitchFlow::Idle);

    model.release();
    let outcome = controller.request_pitch(&design.id).await.unwrap().unwrap();
    assert_eq!(outcome.pitch(), PITCH);
}
