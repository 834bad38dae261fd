//! Canonical auth shapes for backend responses.
//!
//! The backend has grown several response formats over time; the access
//! token may sit at the top level or nested one container deep. That
//! probing happens exactly once, here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token field names the backend is known to use.
const TOKEN_KEYS: [&str; 3] = ["access", "access_token", "token"];

/// Containers the token may be nested under.
const CONTAINER_KEYS: [&str; 2] = ["data", "user_data"];

/// Canonical result of a credential exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResult {
    pub access_token: String,
    /// Raw response echo for downstream steps.
    pub raw: Value,
}

/// Pull the access token out of a raw login/register response.
///
/// Probes the known top-level keys first, then the same keys under each
/// known container. Returns `None` when nothing matches.
pub fn extract_access_token(raw: &Value) -> Option<String> {
    let probe = |obj: &Value| {
        TOKEN_KEYS
            .iter()
            .find_map(|key| obj.get(key).and_then(Value::as_str).map(String::from))
    };

    if let Some(token) = probe(raw) {
        return Some(token);
    }
    CONTAINER_KEYS
        .iter()
        .filter_map(|key| raw.get(key))
        .find_map(probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_keys_in_order() {
        assert_eq!(
            extract_access_token(&json!({"access": "a1"})).as_deref(),
            Some("a1")
        );
        assert_eq!(
            extract_access_token(&json!({"access_token": "a2"})).as_deref(),
            Some("a2")
        );
        assert_eq!(
            extract_access_token(&json!({"token": "a3"})).as_deref(),
            Some("a3")
        );
        // "access" wins over "token" when both are present.
        assert_eq!(
            extract_access_token(&json!({"token": "t", "access": "a"})).as_deref(),
            Some("a")
        );
    }

    #[test]
    fn nested_containers() {
        assert_eq!(
            extract_access_token(&json!({"data": {"access_token": "n1"}})).as_deref(),
            Some("n1")
        );
        assert_eq!(
            extract_access_token(&json!({"user_data": {"token": "n2"}})).as_deref(),
            Some("n2")
        );
    }

    #[test]
    fn missing_or_non_string_token() {
        assert!(extract_access_token(&json!({})).is_none());
        assert!(extract_access_token(&json!({"access": 42})).is_none());
        assert!(extract_access_token(&json!({"data": {"user": "x"}})).is_none());
    }
}
