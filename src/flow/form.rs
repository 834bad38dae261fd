//! Accumulated signup form state and the patch reducer.
//!
//! One `FormState` per signup session, created with the pre-seeded role
//! and country and grown field-by-field as steps render. Scalar edits go
//! through [`FormState::apply`] (a shallow merge that reports which
//! fields were touched, so the sequencer can clear matching errors);
//! collection entries are edited through the sequencer's dedicated
//! operations.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::locale::{Country, GovDocument, Role};

/// Field keys used in error maps and patch-touch reporting.
///
/// These are the names the rendering layer keys its inline messages on.
pub mod fields {
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const DOB: &str = "dob";
    pub const ADDRESS: &str = "address";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm_password";
    pub const DOCUMENT: &str = "document";
    pub const WORK_AUTHORIZATION: &str = "work_authorization";
    pub const COMPANY_NAME: &str = "company_name";
    pub const SCHOOL_NAME: &str = "school_name";
    pub const WEBSITE: &str = "website";
    pub const JOB_TITLE: &str = "job_title";
    pub const COMPANY: &str = "company";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const SCHOOL: &str = "school";
    pub const DEGREE: &str = "degree";
    pub const START_YEAR: &str = "start_year";
    pub const END_YEAR: &str = "end_year";
    /// Reserved key for side-effect (submit) failures.
    pub const SUBMIT: &str = "submit";
}

/// One work-experience record, created/edited within its own step.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    /// As typed; canonicalized by the step's save path.
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Current position — no end date required.
    #[serde(default)]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned by the step's own persistence endpoint once saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    /// Mirror of the external step's save-success signal.
    #[serde(default)]
    pub saved: bool,
}

/// One education record.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    #[serde(default)]
    pub saved: bool,
}

/// The single accumulated record of everything the user entered this
/// session, plus what the registration gate captured from the backend.
#[derive(Debug, Clone)]
pub struct FormState {
    pub role: Role,
    pub country: Country,

    // Personal
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Date of birth as typed; canonicalized at payload build.
    pub dob: Option<String>,
    pub address: Option<String>,
    /// Phone capture explicitly skipped by the user.
    pub skip_phone: bool,
    /// US work-authorization status, when the flow asks for it.
    pub work_authorization: Option<String>,

    // Credentials
    pub password: Option<SecretString>,
    pub confirm_password: Option<SecretString>,

    // Verification
    pub email_verified: bool,
    pub phone_verified: bool,

    /// At most one identity document, selected by country. Holding it as
    /// a single option (not one field per kind) makes the exclusivity
    /// invariant structural.
    pub document: Option<GovDocument>,

    // Company / school details
    pub company_name: Option<String>,
    pub school_name: Option<String>,
    pub website: Option<String>,

    // Collections
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,

    // Captured from the registration gate
    pub user_id: Option<String>,
    pub access_token: Option<String>,
    /// Raw `/register` response echo, kept for later steps.
    pub register_response: Option<serde_json::Value>,
    /// Recorded non-fatal credential-exchange failure.
    pub exchange_error: Option<String>,
}

impl FormState {
    /// Fresh state for one signup session; role and country are
    /// pre-seeded by the flow entry point.
    pub fn new(role: Role, country: Country) -> Self {
        Self {
            role,
            country,
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            dob: None,
            address: None,
            skip_phone: false,
            work_authorization: None,
            password: None,
            confirm_password: None,
            email_verified: false,
            phone_verified: false,
            document: None,
            company_name: None,
            school_name: None,
            website: None,
            experience: Vec::new(),
            education: Vec::new(),
            user_id: None,
            access_token: None,
            register_response: None,
            exchange_error: None,
        }
    }

    /// Shallow-merge a patch; only populated patch fields are applied.
    /// Returns the keys that were touched so callers can clear matching
    /// error entries.
    pub fn apply(&mut self, patch: FormPatch) -> Vec<&'static str> {
        let mut touched = Vec::new();

        if let Some(v) = patch.first_name {
            self.first_name = Some(v);
            touched.push(fields::FIRST_NAME);
        }
        if let Some(v) = patch.last_name {
            self.last_name = Some(v);
            touched.push(fields::LAST_NAME);
        }
        if let Some(v) = patch.email {
            self.email = Some(v);
            touched.push(fields::EMAIL);
        }
        if let Some(v) = patch.phone {
            self.phone = Some(v);
            touched.push(fields::PHONE);
        }
        if let Some(v) = patch.dob {
            self.dob = Some(v);
            touched.push(fields::DOB);
        }
        if let Some(v) = patch.address {
            self.address = Some(v);
            touched.push(fields::ADDRESS);
        }
        if let Some(v) = patch.work_authorization {
            self.work_authorization = Some(v);
            touched.push(fields::WORK_AUTHORIZATION);
        }
        if let Some(v) = patch.password {
            self.password = Some(v);
            touched.push(fields::PASSWORD);
        }
        if let Some(v) = patch.confirm_password {
            self.confirm_password = Some(v);
            touched.push(fields::CONFIRM_PASSWORD);
        }
        if let Some(v) = patch.company_name {
            self.company_name = Some(v);
            touched.push(fields::COMPANY_NAME);
        }
        if let Some(v) = patch.school_name {
            self.school_name = Some(v);
            touched.push(fields::SCHOOL_NAME);
        }
        if let Some(v) = patch.website {
            self.website = Some(v);
            touched.push(fields::WEBSITE);
        }
        if let Some(v) = patch.document {
            self.document = Some(v);
            touched.push(fields::DOCUMENT);
        }
        if let Some(v) = patch.skip_phone {
            self.skip_phone = v;
            touched.push(fields::PHONE);
        }
        if let Some(v) = patch.email_verified {
            self.email_verified = v;
        }
        if let Some(v) = patch.phone_verified {
            self.phone_verified = v;
        }

        touched
    }
}

/// Shallow-merge input for [`FormState::apply`]: one option per scalar
/// field, `None` meaning "leave as is".
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    pub skip_phone: Option<bool>,
    pub work_authorization: Option<String>,
    pub password: Option<SecretString>,
    pub confirm_password: Option<SecretString>,
    pub email_verified: Option<bool>,
    pub phone_verified: Option<bool>,
    pub document: Option<GovDocument>,
    pub company_name: Option<String>,
    pub school_name: Option<String>,
    pub website: Option<String>,
}
