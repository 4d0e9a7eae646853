use crate::support::{at, open, png_image, submission, ScriptedModel, PNG};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use handloom::catalog::{DesignImage, NewDesign};
use handloom::error::{ShowcaseError, ValidationError};
use handloom::store::InMemoryStore;
use std::sync::Arc;

#[tokio::test]
async fn new_designs_are_prepended_with_unique_ids() {
    let controller = open(Arc::new(InMemoryStore::new()), ScriptedModel::replying([])).await;

    let first = controller
        .add_design_at(submission("Mayuri Saree", "Silk, Zari Thread"), at(0))
        .await
        .unwrap();
    let second = controller
        .add_design_at(submission("Kantha Stole", "Cotton"), at(0))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    let names: Vec<_> = controller.designs().into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["Kantha Stole", "Mayuri Saree"]);
    assert!(second.pitch.is_none());
}

#[tokio::test]
async fn fields_are_trimmed_before_storing() {
    let controller = open(Arc::new(InMemoryStore::new()), ScriptedModel::replying([])).await;
    let design = tokio_test::assert_ok!(
        controller
            .add_design(NewDesign {
                name: "  Ikat Dupatta ".into(),
                description: " Double ikat ".into(),
                materials: " Cotton ".into(),
                image: Some(png_image()),
            })
            .await
    );
    assert_eq!(design.name, "Ikat Dupatta");
    assert_eq!(design.materials, "Cotton");
}

#[tokio::test]
async fn missing_image_or_blank_field_is_rejected_without_banner() {
    let controller = open(Arc::new(InMemoryStore::new()), ScriptedModel::replying([])).await;

    let no_image = NewDesign {
        image: None,
        ..submission("Mayuri Saree", "Silk")
    };
    let err = tokio_test::assert_err!(controller.add_design(no_image).await);
    assert!(matches!(
        err,
        ShowcaseError::Validation(ValidationError::MissingFields)
    ));

    let blank_name = NewDesign {
        name: "   ".into(),
        ..submission("Mayuri Saree", "Silk")
    };
    assert!(controller.add_design(blank_name).await.unwrap_err().is_validation());

    assert_eq!(controller.design_count(), 0);
    assert_eq!(controller.error_banner(), None);
}

#[tokio::test]
async fn oversized_image_is_rejected_whatever_size_is_claimed() {
    let controller = open(Arc::new(InMemoryStore::new()), ScriptedModel::replying([])).await;
    let mut payload = PNG.to_vec();
    payload.resize(3 * 1024 * 1024, 0);
    let huge = NewDesign {
        image: Some(DesignImage {
            data: STANDARD.encode(&payload),
            size_bytes: 0,
            ..png_image()
        }),
        ..submission("Mayuri Saree", "Silk")
    };

    let err = controller.add_design(huge).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Image file is too large. Please upload an image under 2MB."
    );
    assert_eq!(controller.design_count(), 0);
}

#[tokio::test]
async fn undecodable_image_is_rejected() {
    let backend = Arc::new(InMemoryStore::new());
    let controller = open(Arc::clone(&backend), ScriptedModel::replying([])).await;
    let garbled = NewDesign {
        image: Some(DesignImage {
            data: "!!!not base64!!!".into(),
            ..png_image()
        }),
        ..submission("Mayuri Saree", "Silk")
    };

    let err = controller.add_design(garbled).await.unwrap_err();
    assert!(matches!(
        err,
        ShowcaseError::Validation(ValidationError::UnreadableImage)
    ));
    assert_eq!(controller.design_count(), 0);
    assert_eq!(backend.raw(handloom::store::DESIGNS_KEY), None);
}

#[tokio::test]
async fn contact_email_is_saved_and_cleared() {
    let backend = Arc::new(InMemoryStore::new());
    let controller = open(Arc::clone(&backend), ScriptedModel::replying([])).await;

    controller.save_contact("  weaver@example.com ").await.unwrap();
    assert_eq!(controller.contact_email().as_deref(), Some("weaver@example.com"));
    assert_eq!(
        backend.raw(handloom::store::CONTACT_EMAIL_KEY).as_deref(),
        Some("weaver@example.com")
    );

    let err = controller.save_contact("   ").await.unwrap_err();
    assert!(matches!(
        err,
        ShowcaseError::Validation(ValidationError::BlankEmail)
    ));

    controller.clear_contact().await;
    assert_eq!(controller.contact_email(), None);
    assert_eq!(backend.raw(handloom::store::CONTACT_EMAIL_KEY), None);
}
