//! Registration payload construction.

use secrecy::ExposeSecret;
use serde::Serialize;

use crate::flow::form::FormState;
use crate::locale::Role;
use crate::normalize::{extract_gov_id, normalize_date};

/// Body of `POST /register`.
///
/// Built from the accumulated form state after the personal step
/// validates; the normalizers run here, so the orchestrator never ships
/// raw user input to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Canonical `YYYY-MM-DD`, or empty when the raw input was
    /// unrecoverable (validation upstream decides whether that is fatal).
    pub dob: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    /// Last four characters of the identity document.
    pub gov_id: String,
    /// ISO 3166-1 alpha-3.
    pub country: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_authorization: Option<String>,
}

impl RegisterPayload {
    /// Build the wire payload from the current form state. Total: missing
    /// optional fields become empty strings rather than failing here.
    pub fn from_form(form: &FormState) -> Self {
        let owned = |v: &Option<String>| v.clone().unwrap_or_default();
        let secret = |v: &Option<secrecy::SecretString>| {
            v.as_ref()
                .map(|s| s.expose_secret().to_string())
                .unwrap_or_default()
        };

        Self {
            email: owned(&form.email),
            first_name: owned(&form.first_name),
            last_name: owned(&form.last_name),
            dob: normalize_date(
                form.dob.as_deref().unwrap_or(""),
                form.country.date_order(),
            ),
            password: secret(&form.password),
            confirm_password: secret(&form.confirm_password),
            role: form.role,
            gov_id: extract_gov_id(form.document.as_ref(), form.country.document_kind()),
            country: form.country.alpha3().to_string(),
            address: owned(&form.address),
            work_authorization: form.work_authorization.clone(),
        }
    }
}
