//! Signup flow core — the multi-step onboarding engine.
//!
//! Owns the wizard control flow for one signup session: an ordered step
//! plan, per-step validation, the registration gate (register + credential
//! exchange), and locale-driven normalization of dates and government IDs.
//! Rendering and the backend endpoints live outside this crate; the backend
//! is reached through the [`registration::RegistrationClient`] trait and the
//! UI consumes [`flow::StepSequencer`]'s public surface.

pub mod error;
pub mod flow;
pub mod locale;
pub mod normalize;
pub mod registration;
pub mod store;
pub mod validate;
