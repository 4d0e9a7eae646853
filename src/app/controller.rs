use super::state::{
    ErrorBanner, MatchFlow, MatchOutcome, PitchFlow, PitchOutcome, PitchSource,
};
use crate::catalog::{Design, DesignRepository, NewDesign, WeaverContact, next_design_id};
use crate::error::{ConsistencyError, PersistenceError, Result, ShowcaseError, ValidationError};
use crate::media::UploadLimits;
use crate::providers::GenerativeModel;
use crate::services::{MatchAnalyzer, PitchGenerator};
use crate::store::ShowcaseStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// In-memory session state. Only ever locked briefly, never across an
/// `.await`.
#[derive(Default)]
struct SessionState {
    designs: DesignRepository,
    contact: WeaverContact,
    pitch_flows: HashMap<String, PitchFlow>,
    match_flow: MatchFlow,
    banner: ErrorBanner,
}

/// Orchestrates the weaver's actions over the catalog, the store and the
/// AI clients.
pub struct ShowcaseController {
    store: ShowcaseStore,
    pitch_generator: PitchGenerator,
    match_analyzer: MatchAnalyzer,
    upload_limits: UploadLimits,
    state: Mutex<SessionState>,
    /// Orders whole-collection writes so the newest snapshot lands last.
    write_lock: tokio::sync::Mutex<()>,
}

impl ShowcaseController {
    /// Load persisted state and wire the AI clients to `model`.
    pub async fn open(
        store: ShowcaseStore,
        model: Arc<dyn GenerativeModel>,
        upload_limits: UploadLimits,
    ) -> Self {
        let persisted = store.load().await;
        info!(
            designs = persisted.designs.len(),
            contact = persisted.contact_email.is_some(),
            backend = store.backend_name(),
            "opened showcase catalog"
        );

        let state = SessionState {
            designs: DesignRepository::from_designs(persisted.designs),
            contact: WeaverContact::new(persisted.contact_email),
            ..SessionState::default()
        };

        Self {
            store,
            pitch_generator: PitchGenerator::new(Arc::clone(&model)),
            match_analyzer: MatchAnalyzer::new(model),
            upload_limits,
            state: Mutex::new(state),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Read side ────────────────────────────────────────────────────────

    pub fn designs(&self) -> Vec<Design> {
        self.state().designs.as_slice().to_vec()
    }

    pub fn design(&self, id: &str) -> Option<Design> {
        self.state().designs.find_by_id(id).cloned()
    }

    pub fn design_count(&self) -> usize {
        self.state().designs.len()
    }

    pub fn pitched_count(&self) -> usize {
        self.state().designs.pitched_count()
    }

    pub fn contact_email(&self) -> Option<String> {
        self.state().contact.email().map(String::from)
    }

    pub fn upload_limits(&self) -> &UploadLimits {
        &self.upload_limits
    }

    pub fn pitch_flow(&self, design_id: &str) -> PitchFlow {
        self.state()
            .pitch_flows
            .get(design_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn match_flow(&self) -> MatchFlow {
        self.state().match_flow.clone()
    }

    pub fn error_banner(&self) -> Option<String> {
        self.state().banner.message().map(String::from)
    }

    pub fn dismiss_error(&self) {
        self.state().banner.dismiss();
    }

    /// Close the match result view.
    pub fn close_match(&self) {
        let mut state = self.state();
        if !state.match_flow.is_analyzing() {
            state.match_flow = MatchFlow::Idle;
        }
    }

    // ── Add-design flow ──────────────────────────────────────────────────

    pub async fn add_design(&self, submission: NewDesign) -> Result<Design> {
        self.add_design_at(submission, Utc::now()).await
    }

    /// Validate and store a new design with an id derived from `now`.
    /// Validation failures stay with the form and do not touch the banner.
    pub async fn add_design_at(&self, submission: NewDesign, now: DateTime<Utc>) -> Result<Design> {
        let name = submission.name.trim();
        let description = submission.description.trim();
        let materials = submission.materials.trim();
        let Some(image) = submission.image.as_ref() else {
            return Err(ValidationError::MissingFields.into());
        };
        if name.is_empty() || description.is_empty() || materials.is_empty() || image.data.is_empty()
        {
            return Err(ValidationError::MissingFields.into());
        }
        self.upload_limits.check(image)?;

        let design = {
            let mut state = self.state();
            let design = Design {
                id: next_design_id(now, &state.designs),
                name: name.to_string(),
                description: description.to_string(),
                materials: materials.to_string(),
                image: image.data.clone(),
                image_mime_type: image.mime_type.clone(),
                pitch: None,
            };
            state.designs.add(design.clone());
            design
        };

        info!(id = %design.id, name = %design.name, "added design");
        self.persist_designs().await;
        Ok(design)
    }

    // ── Contact flow ─────────────────────────────────────────────────────

    pub async fn save_contact(&self, email: &str) -> Result<()> {
        let saved = {
            let mut state = self.state();
            state.contact.set(email)?;
            state.contact.email().map(String::from)
        };
        self.store.save_contact(saved.as_deref()).await;
        info!("saved weaver contact email");
        Ok(())
    }

    pub async fn clear_contact(&self) {
        self.state().contact.clear();
        self.store.save_contact(None).await;
        info!("cleared weaver contact email");
    }

    // ── Pitch flow ───────────────────────────────────────────────────────

    /// Show or generate the pitch for `design_id`.
    ///
    /// Returns `Ok(None)` for a design id that is no longer in the
    /// collection, or when a pitch for it is already being generated.
    pub async fn request_pitch(&self, design_id: &str) -> Result<Option<PitchOutcome>> {
        let (design, contact_email) = {
            let mut state = self.state();
            let Some(design) = state.designs.find_by_id(design_id).cloned() else {
                debug!(design_id, "pitch requested for unknown design, ignoring");
                return Ok(None);
            };

            if let Some(pitch) = design.pitch.clone() {
                state
                    .pitch_flows
                    .insert(design_id.to_string(), PitchFlow::Done(pitch));
                return Ok(Some(PitchOutcome {
                    design,
                    source: PitchSource::Cached,
                }));
            }

            if state
                .pitch_flows
                .get(design_id)
                .is_some_and(PitchFlow::is_loading)
            {
                debug!(design_id, "pitch already in flight, ignoring");
                return Ok(None);
            }

            state
                .pitch_flows
                .insert(design_id.to_string(), PitchFlow::Loading);
            state.banner.dismiss();
            (design, state.contact.email().map(String::from))
        };

        let _loading = FlowGuard::pitch(&self.state, design_id);
        let generated = self
            .pitch_generator
            .generate_pitch(&design, contact_email.as_deref())
            .await;

        match generated {
            Ok(pitch) => {
                let updated = {
                    let mut state = self.state();
                    state.designs = state.designs.with_pitch(design_id, &pitch);
                    state
                        .pitch_flows
                        .insert(design_id.to_string(), PitchFlow::Done(pitch.clone()));
                    state.designs.find_by_id(design_id).cloned()
                };
                info!(design_id, "generated pitch");
                self.persist_designs().await;

                let design = updated.unwrap_or(Design {
                    pitch: Some(pitch),
                    ..design
                });
                Ok(Some(PitchOutcome {
                    design,
                    source: PitchSource::Generated,
                }))
            }
            Err(err) => {
                let message = err.user_message();
                let mut state = self.state();
                state
                    .pitch_flows
                    .insert(design_id.to_string(), PitchFlow::Errored(message.clone()));
                state.banner.show(message);
                Err(err)
            }
        }
    }

    // ── Match flow ───────────────────────────────────────────────────────

    /// Find the design that best fits a buyer request.
    pub async fn request_match(&self, request_text: &str) -> Result<MatchOutcome> {
        let request = request_text.trim();

        let designs = {
            let mut state = self.state();
            let precondition = if state.designs.is_empty() {
                Err(ValidationError::EmptyCollection)
            } else if request.is_empty() {
                Err(ValidationError::BlankRequest)
            } else if state.match_flow.is_analyzing() {
                Err(ValidationError::AnalysisInProgress)
            } else {
                Ok(())
            };
            if let Err(err) = precondition {
                let err = ShowcaseError::from(err);
                state.banner.show(err.user_message());
                return Err(err);
            }

            state.match_flow = MatchFlow::Analyzing;
            state.banner.dismiss();
            state.designs.clone()
        };

        let _analyzing = FlowGuard::matching(&self.state);
        let analyzed = self
            .match_analyzer
            .analyze_request(request, &designs)
            .await
            .and_then(|result| {
                let design = designs
                    .find_by_id(&result.matched_design_id)
                    .cloned()
                    .ok_or_else(|| ConsistencyError::UnknownDesign {
                        design_id: result.matched_design_id.clone(),
                    })?;
                Ok(MatchOutcome { result, design })
            });

        let mut state = self.state();
        match analyzed {
            Ok(outcome) => {
                info!(matched = %outcome.design.id, "matched buyer request");
                state.match_flow = MatchFlow::Done(outcome.clone());
                Ok(outcome)
            }
            Err(err) => {
                let message = err.user_message();
                state.match_flow = MatchFlow::Errored(message.clone());
                state.banner.show(message);
                Err(err)
            }
        }
    }

    // ── Store lifecycle ──────────────────────────────────────────────────

    /// Clear the catalog and contact, in memory and in the store.
    pub async fn reset(&self) -> std::result::Result<(), PersistenceError> {
        let _write = self.write_lock.lock().await;
        self.store.clear().await?;
        *self.state() = SessionState::default();
        info!("reset showcase catalog");
        Ok(())
    }

    async fn persist_designs(&self) {
        let _write = self.write_lock.lock().await;
        let snapshot = self.designs();
        self.store.save_designs(&snapshot).await;
    }
}

/// Leaves no flow stuck in a pending state: on drop, a flow that is still
/// `Loading`/`Analyzing` falls back to idle. Covers cancellation and panics.
struct FlowGuard<'a> {
    state: &'a Mutex<SessionState>,
    slot: FlowSlot,
}

enum FlowSlot {
    Pitch(String),
    Match,
}

impl<'a> FlowGuard<'a> {
    fn pitch(state: &'a Mutex<SessionState>, design_id: &str) -> Self {
        Self {
            state,
            slot: FlowSlot::Pitch(design_id.to_string()),
        }
    }

    fn matching(state: &'a Mutex<SessionState>) -> Self {
        Self {
            state,
            slot: FlowSlot::Match,
        }
    }
}

impl Drop for FlowGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &self.slot {
            FlowSlot::Pitch(design_id) => {
                if state
                    .pitch_flows
                    .get(design_id)
                    .is_some_and(PitchFlow::is_loading)
                {
                    state.pitch_flows.remove(design_id);
                }
            }
            FlowSlot::Match => {
                if state.match_flow.is_analyzing() {
                    state.match_flow = MatchFlow::Idle;
                }
            }
        }
    }
}
