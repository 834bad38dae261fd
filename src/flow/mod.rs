//! The signup wizard: form state, step plans, and the sequencer that
//! drives one session through them.

pub mod form;
pub mod sequencer;
pub mod step;

pub use form::{fields, EducationEntry, ExperienceEntry, FormPatch, FormState};
pub use sequencer::{AdvanceOutcome, NavigationState, RetreatOutcome, StepSequencer};
pub use step::{AdvanceStrategy, FlowPlan, StepDescriptor, StepId};
