//! The wizard orchestrator.
//!
//! One `StepSequencer` per signup session. It owns the step plan, the
//! accumulated form state, and the navigation state, and it is the only
//! thing that moves `active_step`. Transitions:
//!
//! - [`StepSequencer::advance`] — validate, run the registration gate
//!   where the step demands it, then move forward (or complete).
//! - [`StepSequencer::retreat`] — move back; at the first step this
//!   reports a cancel request instead of decrementing.
//! - [`StepSequencer::jump_to`] — direct navigation, no validation.
//!
//! Because `advance` holds the sequencer exclusively across its await
//! points, no other transition can interleave with an in-flight side
//! effect — a late response can never be committed against a step the
//! user has since navigated away from.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{FlowError, RegistrationError};
use crate::flow::form::{fields, EducationEntry, ExperienceEntry, FormPatch, FormState};
use crate::flow::step::{AdvanceStrategy, FlowPlan, StepDescriptor, StepId};
use crate::registration::{RegisterPayload, RegistrationClient};
use crate::store::{AuthSession, NullSessionStore, SessionStore};
use crate::validate::FieldErrors;

/// Where the wizard currently stands.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// Index into the plan; only the sequencer's transitions change it.
    pub active_step: usize,
    /// Field → message. Cleared on every transition attempt and on
    /// matching field edits. Side-effect failures use [`fields::SUBMIT`].
    pub errors: FieldErrors,
    /// True exactly while a side-effecting call is in flight.
    pub loading: bool,
    /// True once the terminal step has succeeded.
    pub completed: bool,
}

/// Result of an [`StepSequencer::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next step.
    Advanced { to: StepId },
    /// The terminal step succeeded; the flow is done.
    Completed,
    /// Validation failed; `errors` holds the field messages.
    Rejected,
    /// The registration gate failed; `errors[submit]` holds the message
    /// and the call can simply be retried.
    SubmitFailed,
    /// Nothing happened (already completed, or a side effect in flight).
    Ignored,
}

/// Result of an [`StepSequencer::retreat`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetreatOutcome {
    MovedBack { to: StepId },
    /// Already at the first step — the embedder decides what cancelling
    /// the flow means.
    CancelRequested,
    /// A side effect is in flight; nothing happened.
    Ignored,
}

/// Drives one signup session through its step plan.
pub struct StepSequencer {
    session_id: Uuid,
    plan: FlowPlan,
    form: FormState,
    nav: NavigationState,
    client: Arc<dyn RegistrationClient>,
    store: Arc<dyn SessionStore>,
}

impl StepSequencer {
    /// The plan comes from the embedder ([`FlowPlan::for_role`] is the
    /// stock shape); the form arrives pre-seeded with role and country.
    pub fn new(plan: FlowPlan, form: FormState, client: Arc<dyn RegistrationClient>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            plan,
            form,
            nav: NavigationState::default(),
            client,
            store: Arc::new(NullSessionStore),
        }
    }

    /// Attach a durable session sink (write-only hand-off).
    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    // ── Read surface ────────────────────────────────────────────────

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.nav.errors
    }

    pub fn loading(&self) -> bool {
        self.nav.loading
    }

    pub fn completed(&self) -> bool {
        self.nav.completed
    }

    pub fn active_index(&self) -> usize {
        self.nav.active_step
    }

    pub fn active_step(&self) -> Option<&StepDescriptor> {
        self.plan.step(self.nav.active_step)
    }

    pub fn plan(&self) -> &FlowPlan {
        &self.plan
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Try to move past the active step.
    ///
    /// Validation failures and gate failures both leave `active_step`
    /// untouched and are reported through the errors map; retrying is
    /// just calling `advance` again. `loading` is reset on every exit
    /// path, success or not.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        if self.nav.loading || self.nav.completed {
            return AdvanceOutcome::Ignored;
        }
        self.nav.errors.clear();

        let Some(step) = self.plan.step(self.nav.active_step) else {
            return AdvanceOutcome::Ignored;
        };
        let (step_id, strategy, validate) = (step.id, step.strategy, step.validate);

        match strategy {
            AdvanceStrategy::ValidateOnly | AdvanceStrategy::ValidateAndRegister => {
                if let Some(validate) = validate {
                    let errors = validate(&self.form);
                    if !errors.is_empty() {
                        tracing::debug!(step = %step_id, ?errors, "validation rejected advance");
                        self.nav.errors = errors;
                        return AdvanceOutcome::Rejected;
                    }
                }
            }
            AdvanceStrategy::TrustChildSave => {}
        }

        if strategy == AdvanceStrategy::ValidateAndRegister {
            if self.form.access_token.is_some() {
                // Re-entry after a completed gate: the account exists,
                // registering again would duplicate it.
                tracing::debug!(step = %step_id, "session token present; skipping registration");
            } else {
                self.nav.loading = true;
                let result = self.run_registration_gate().await;
                self.nav.loading = false;
                if let Err(e) = result {
                    tracing::warn!(step = %step_id, error = %e, "registration gate failed");
                    self.nav.errors
                        .insert(fields::SUBMIT.to_string(), e.to_string());
                    return AdvanceOutcome::SubmitFailed;
                }
            }
        }

        self.commit_forward()
    }

    /// Move back one step, or report a cancel request at the first step.
    pub fn retreat(&mut self) -> RetreatOutcome {
        if self.nav.loading {
            return RetreatOutcome::Ignored;
        }
        self.nav.errors.clear();

        if self.nav.active_step == 0 {
            return RetreatOutcome::CancelRequested;
        }
        self.nav.active_step -= 1;
        match self.plan.step(self.nav.active_step) {
            Some(step) => {
                tracing::debug!(step = %step.id, "retreated");
                RetreatOutcome::MovedBack { to: step.id }
            }
            // Unreachable with a non-empty plan.
            None => RetreatOutcome::Ignored,
        }
    }

    /// Direct navigation by step id. Runs no validation — callers own
    /// the decision that the jump is safe (e.g. editing an earlier step
    /// from a review screen).
    pub fn jump_to(&mut self, id: StepId) -> Result<(), FlowError> {
        let index = self
            .plan
            .index_of(id)
            .ok_or(FlowError::UnknownStep { id })?;
        self.nav.errors.clear();
        self.nav.active_step = index;
        tracing::debug!(step = %id, index, "jumped");
        Ok(())
    }

    /// Shallow-merge a patch into the form; error entries for the
    /// touched fields are cleared.
    pub fn update_form(&mut self, patch: FormPatch) {
        for key in self.form.apply(patch) {
            self.nav.errors.remove(key);
        }
    }

    // ── Collection edits ────────────────────────────────────────────

    /// Add (`index: None`) or replace (`index: Some`) a work-experience
    /// entry; returns its index.
    pub fn upsert_experience(
        &mut self,
        index: Option<usize>,
        entry: ExperienceEntry,
    ) -> Result<usize, FlowError> {
        match index {
            None => {
                self.form.experience.push(entry);
                Ok(self.form.experience.len() - 1)
            }
            Some(i) => {
                let len = self.form.experience.len();
                let slot = self.form.experience.get_mut(i).ok_or(
                    FlowError::EntryOutOfRange {
                        collection: "experience",
                        index: i,
                        len,
                    },
                )?;
                *slot = entry;
                Ok(i)
            }
        }
    }

    pub fn remove_experience(&mut self, index: usize) -> Result<ExperienceEntry, FlowError> {
        let len = self.form.experience.len();
        if index >= len {
            return Err(FlowError::EntryOutOfRange {
                collection: "experience",
                index,
                len,
            });
        }
        Ok(self.form.experience.remove(index))
    }

    /// Record the step's save-success signal for an entry.
    pub fn mark_experience_saved(
        &mut self,
        index: usize,
        remote_id: impl Into<String>,
    ) -> Result<(), FlowError> {
        let len = self.form.experience.len();
        let entry = self
            .form
            .experience
            .get_mut(index)
            .ok_or(FlowError::EntryOutOfRange {
                collection: "experience",
                index,
                len,
            })?;
        entry.remote_id = Some(remote_id.into());
        entry.saved = true;
        Ok(())
    }

    pub fn upsert_education(
        &mut self,
        index: Option<usize>,
        entry: EducationEntry,
    ) -> Result<usize, FlowError> {
        match index {
            None => {
                self.form.education.push(entry);
                Ok(self.form.education.len() - 1)
            }
            Some(i) => {
                let len = self.form.education.len();
                let slot = self.form.education.get_mut(i).ok_or(
                    FlowError::EntryOutOfRange {
                        collection: "education",
                        index: i,
                        len,
                    },
                )?;
                *slot = entry;
                Ok(i)
            }
        }
    }

    pub fn remove_education(&mut self, index: usize) -> Result<EducationEntry, FlowError> {
        let len = self.form.education.len();
        if index >= len {
            return Err(FlowError::EntryOutOfRange {
                collection: "education",
                index,
                len,
            });
        }
        Ok(self.form.education.remove(index))
    }

    pub fn mark_education_saved(
        &mut self,
        index: usize,
        remote_id: impl Into<String>,
    ) -> Result<(), FlowError> {
        let len = self.form.education.len();
        let entry = self
            .form
            .education
            .get_mut(index)
            .ok_or(FlowError::EntryOutOfRange {
                collection: "education",
                index,
                len,
            })?;
        entry.remote_id = Some(remote_id.into());
        entry.saved = true;
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────

    /// The personal-step side effect: register, then exchange
    /// credentials, then hand the session to durable storage.
    ///
    /// `register` must succeed for the transition to commit. The
    /// credential exchange and the session write are both best-effort:
    /// the account already exists, so their failures are recorded and
    /// logged but never block the flow.
    async fn run_registration_gate(&mut self) -> Result<(), RegistrationError> {
        let payload = RegisterPayload::from_form(&self.form);
        let registered = self.client.register(&payload).await?;
        tracing::info!(user_id = %registered.user_id, "registration committed");

        self.form.user_id = Some(registered.user_id);
        self.form.access_token = registered.token;
        self.form.register_response = Some(registered.raw);

        match self
            .client
            .exchange_credentials(&payload.email, &payload.password)
            .await
        {
            Ok(auth) => {
                self.form.access_token = Some(auth.access_token);
            }
            Err(e) => {
                tracing::warn!(error = %e, "credential exchange failed; user can authenticate later");
                self.form.exchange_error = Some(e.to_string());
            }
        }

        if let (Some(user_id), Some(token)) =
            (self.form.user_id.clone(), self.form.access_token.clone())
        {
            let session = AuthSession {
                session_id: self.session_id,
                user_id,
                access_token: token,
                obtained_at: chrono::Utc::now(),
            };
            if let Err(e) = self.store.put_session(&session).await {
                tracing::warn!(error = %e, "session hand-off failed");
            }
        }

        Ok(())
    }

    /// Move to the next index, or complete at the end of the plan.
    fn commit_forward(&mut self) -> AdvanceOutcome {
        let next = self.nav.active_step + 1;
        match self.plan.step(next) {
            Some(step) => {
                let to = step.id;
                self.nav.active_step = next;
                tracing::debug!(step = %to, index = next, "advanced");
                AdvanceOutcome::Advanced { to }
            }
            None => {
                self.nav.completed = true;
                tracing::info!(session = %self.session_id, "signup flow completed");
                AdvanceOutcome::Completed
            }
        }
    }
}
