//! Per-step validation over the accumulated form state.
//!
//! Every validator is pure and returns a field→message map — empty means
//! pass; nothing here throws or returns `Err`. The personal-information
//! validator is sequential and short-circuiting (one error at a time, in
//! a fixed order); the entry/detail validators aggregate every violation
//! at once, since they run from the step's own "save" action where the
//! whole sub-form is on screen.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::ExposeSecret;

use crate::flow::form::{fields, EducationEntry, ExperienceEntry, FormState};
use crate::locale::DateOrder;
use crate::normalize::normalize_date;

/// Field-keyed validation messages. Empty map = pass.
pub type FieldErrors = BTreeMap<String, String>;

static LETTERS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static WEBSITE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://)?[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}").unwrap());

/// Symbols accepted by the password policy.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>/?";

/// Minimum password length.
const PASSWORD_MIN_LEN: usize = 8;

fn single(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.to_string());
    errors
}

fn is_blank(value: Option<&String>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Personal-information step: sequential, short-circuiting.
///
/// Checks in fixed order — names, email, phone (unless skipped),
/// password, confirmation — and returns at the first failing rule.
pub fn validate_personal(form: &FormState) -> FieldErrors {
    let first = form.first_name.as_deref().unwrap_or("").trim();
    if first.is_empty() {
        return single(fields::FIRST_NAME, "First name is required");
    }
    if !LETTERS_ONLY.is_match(first) {
        return single(fields::FIRST_NAME, "First name may only contain letters");
    }

    let last = form.last_name.as_deref().unwrap_or("").trim();
    if last.is_empty() {
        return single(fields::LAST_NAME, "Last name is required");
    }
    if !LETTERS_ONLY.is_match(last) {
        return single(fields::LAST_NAME, "Last name may only contain letters");
    }

    let email = form.email.as_deref().unwrap_or("").trim();
    if email.is_empty() {
        return single(fields::EMAIL, "Email is required");
    }
    if !EMAIL_SHAPE.is_match(email) {
        return single(fields::EMAIL, "Enter a valid email address");
    }

    if !form.skip_phone && is_blank(form.phone.as_ref()) {
        return single(fields::PHONE, "Phone number is required");
    }

    let Some(password) = form.password.as_ref() else {
        return single(fields::PASSWORD, "Password is required");
    };
    if let Some(message) = password_policy(password.expose_secret()) {
        return single(fields::PASSWORD, message);
    }

    let confirm = form
        .confirm_password
        .as_ref()
        .map(|c| c.expose_secret().to_string())
        .unwrap_or_default();
    if confirm != password.expose_secret() {
        return single(fields::CONFIRM_PASSWORD, "Passwords do not match");
    }

    FieldErrors::new()
}

/// Password strength policy. Returns the first violated rule, or `None`
/// when the password passes.
pub fn password_policy(password: &str) -> Option<&'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Some("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain a digit");
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Some("Password must contain a symbol");
    }
    None
}

/// Work-experience entry: aggregate, every violation at once.
pub fn validate_experience_entry(entry: &ExperienceEntry, order: DateOrder) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if entry.job_title.trim().is_empty() {
        errors.insert(fields::JOB_TITLE.into(), "Job title is required".into());
    }
    if entry.company.trim().is_empty() {
        errors.insert(fields::COMPANY.into(), "Company is required".into());
    }

    let start = normalize_date(&entry.start_date, order);
    if start.is_empty() {
        errors.insert(fields::START_DATE.into(), "Enter a valid start date".into());
    }

    match (&entry.end_date, entry.is_current) {
        (None, false) => {
            errors.insert(
                fields::END_DATE.into(),
                "End date is required unless this is your current position".into(),
            );
        }
        (Some(raw), _) => {
            let end = normalize_date(raw, order);
            if end.is_empty() {
                errors.insert(fields::END_DATE.into(), "Enter a valid end date".into());
            } else if !start.is_empty() && end < start {
                // Canonical dates compare correctly as strings.
                errors.insert(
                    fields::END_DATE.into(),
                    "End date must not be before the start date".into(),
                );
            }
        }
        (None, true) => {}
    }

    errors
}

/// Education entry: aggregate.
pub fn validate_education_entry(entry: &EducationEntry) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if entry.school.trim().is_empty() {
        errors.insert(fields::SCHOOL.into(), "School is required".into());
    }
    if entry.degree.trim().is_empty() {
        errors.insert(fields::DEGREE.into(), "Degree is required".into());
    }

    match entry.start_year {
        None => {
            errors.insert(fields::START_YEAR.into(), "Start year is required".into());
        }
        Some(year) if !(1900..=2100).contains(&year) => {
            errors.insert(fields::START_YEAR.into(), "Enter a valid start year".into());
        }
        Some(start) => {
            if let Some(end) = entry.end_year {
                if !(1900..=2100).contains(&end) {
                    errors.insert(fields::END_YEAR.into(), "Enter a valid end year".into());
                } else if end < start {
                    errors.insert(
                        fields::END_YEAR.into(),
                        "End year must not be before the start year".into(),
                    );
                }
            }
        }
    }

    errors
}

/// Company-details step: aggregate; runs from the step's own save.
pub fn validate_company_details(form: &FormState) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(form.company_name.as_ref()) {
        errors.insert(fields::COMPANY_NAME.into(), "Company name is required".into());
    }
    if is_blank(form.address.as_ref()) {
        errors.insert(fields::ADDRESS.into(), "Address is required".into());
    }
    if let Some(website) = form.website.as_deref() {
        if !website.trim().is_empty() && !WEBSITE_SHAPE.is_match(website.trim()) {
            errors.insert(fields::WEBSITE.into(), "Enter a valid website".into());
        }
    }

    errors
}

/// School-details step: aggregate; runs from the step's own save.
pub fn validate_school_details(form: &FormState) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(form.school_name.as_ref()) {
        errors.insert(fields::SCHOOL_NAME.into(), "School name is required".into());
    }
    if is_blank(form.address.as_ref()) {
        errors.insert(fields::ADDRESS.into(), "Address is required".into());
    }
    if let Some(website) = form.website.as_deref() {
        if !website.trim().is_empty() && !WEBSITE_SHAPE.is_match(website.trim()) {
            errors.insert(fields::WEBSITE.into(), "Enter a valid website".into());
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::form::FormPatch;
    use crate::locale::{Country, Role};
    use secrecy::SecretString;

    fn valid_personal() -> FormState {
        let mut form = FormState::new(Role::Techie, Country::Us);
        form.apply(FormPatch {
            first_name: Some("Jordan".into()),
            last_name: Some("Reyes".into()),
            email: Some("jordan@example.com".into()),
            phone: Some("+1 555 0100".into()),
            password: Some(SecretString::from("Longenough1!")),
            confirm_password: Some(SecretString::from("Longenough1!")),
            ..Default::default()
        });
        form
    }

    #[test]
    fn valid_personal_passes() {
        assert!(validate_personal(&valid_personal()).is_empty());
    }

    #[test]
    fn non_letter_first_name_is_rejected() {
        let mut form = valid_personal();
        form.first_name = Some("J0rdan".into());
        let errors = validate_personal(&form);
        assert!(errors.contains_key(fields::FIRST_NAME));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn short_circuits_at_first_failure() {
        // Both names bad — only the first is reported.
        let mut form = valid_personal();
        form.first_name = None;
        form.last_name = Some("R3yes".into());
        let errors = validate_personal(&form);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(fields::FIRST_NAME));
    }

    #[test]
    fn email_shape_is_checked_after_presence() {
        let mut form = valid_personal();
        form.email = Some("not-an-email".into());
        let errors = validate_personal(&form);
        assert!(errors.contains_key(fields::EMAIL));
    }

    #[test]
    fn phone_required_unless_skipped() {
        let mut form = valid_personal();
        form.phone = None;
        assert!(validate_personal(&form).contains_key(fields::PHONE));

        form.skip_phone = true;
        assert!(validate_personal(&form).is_empty());
    }

    #[test]
    fn password_policy_cases() {
        assert!(password_policy("short1!").is_some(), "too short");
        assert!(password_policy("longenough1").is_some(), "no upper/symbol");
        assert!(password_policy("LONGENOUGH1!").is_some(), "no lowercase");
        assert!(password_policy("Longenough!").is_some(), "no digit");
        assert!(password_policy("Longenough1").is_some(), "no symbol");
        assert!(password_policy("Longenough1!").is_none());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut form = valid_personal();
        form.confirm_password = Some(SecretString::from("Different1!"));
        let errors = validate_personal(&form);
        assert!(errors.contains_key(fields::CONFIRM_PASSWORD));
    }

    #[test]
    fn missing_confirmation_is_rejected() {
        let mut form = valid_personal();
        form.confirm_password = None;
        assert!(validate_personal(&form).contains_key(fields::CONFIRM_PASSWORD));
    }

    #[test]
    fn experience_validation_aggregates_all_violations() {
        let entry = ExperienceEntry {
            job_title: "".into(),
            company: "  ".into(),
            start_date: "not a date".into(),
            end_date: None,
            is_current: false,
            ..Default::default()
        };
        let errors = validate_experience_entry(&entry, DateOrder::MonthFirst);
        assert!(errors.contains_key(fields::JOB_TITLE));
        assert!(errors.contains_key(fields::COMPANY));
        assert!(errors.contains_key(fields::START_DATE));
        assert!(errors.contains_key(fields::END_DATE));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn current_position_needs_no_end_date() {
        let entry = ExperienceEntry {
            job_title: "Engineer".into(),
            company: "Acme".into(),
            start_date: "01/15/2020".into(),
            end_date: None,
            is_current: true,
            ..Default::default()
        };
        assert!(validate_experience_entry(&entry, DateOrder::MonthFirst).is_empty());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let entry = ExperienceEntry {
            job_title: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2021-06-01".into(),
            end_date: Some("2020-06-01".into()),
            ..Default::default()
        };
        let errors = validate_experience_entry(&entry, DateOrder::MonthFirst);
        assert!(errors.contains_key(fields::END_DATE));
    }

    #[test]
    fn education_year_rules() {
        let entry = EducationEntry {
            school: "MIT".into(),
            degree: "BSc".into(),
            start_year: Some(2018),
            end_year: Some(2016),
            ..Default::default()
        };
        let errors = validate_education_entry(&entry);
        assert!(errors.contains_key(fields::END_YEAR));

        let entry = EducationEntry {
            school: "MIT".into(),
            degree: "BSc".into(),
            start_year: None,
            ..Default::default()
        };
        assert!(validate_education_entry(&entry).contains_key(fields::START_YEAR));
    }

    #[test]
    fn company_details_rules() {
        let mut form = FormState::new(Role::Company, Country::Gb);
        let errors = validate_company_details(&form);
        assert!(errors.contains_key(fields::COMPANY_NAME));
        assert!(errors.contains_key(fields::ADDRESS));

        form.company_name = Some("Initech".into());
        form.address = Some("1 High St, London".into());
        form.website = Some("not a site".into());
        let errors = validate_company_details(&form);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(fields::WEBSITE));

        form.website = Some("https://initech.example.com".into());
        assert!(validate_company_details(&form).is_empty());
    }
}
