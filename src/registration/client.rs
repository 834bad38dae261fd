//! The registration backend client.
//!
//! Both operations are single-shot: no internal retry, never invoked
//! concurrently with themselves (the sequencer's `loading` flag guards
//! that). `register` fires at most once per session — the sequencer
//! skips it whenever a token is already present.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RegistrationError;
use crate::registration::auth::{extract_access_token, AuthResult};
use crate::registration::payload::RegisterPayload;

/// User-id field names the backend is known to use.
const USER_ID_KEYS: [&str; 3] = ["user_id", "userId", "id"];

/// Canonical result of a successful `register` call.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub user_id: String,
    /// Some backends hand a token straight back from `/register`.
    pub token: Option<String>,
    /// Raw response echo, kept on the form for later steps.
    pub raw: Value,
}

/// The two network operations the sequencer depends on.
#[async_trait]
pub trait RegistrationClient: Send + Sync {
    /// Create the account. Called only from the personal-information
    /// gate, and only when no session token exists yet.
    async fn register(&self, payload: &RegisterPayload)
        -> Result<RegisteredUser, RegistrationError>;

    /// Exchange the just-registered credentials for an access token.
    /// Failure here is non-fatal to the flow — registration is already
    /// committed.
    async fn exchange_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResult, RegistrationError>;
}

/// Normalize a raw `/register` response into [`RegisteredUser`].
///
/// The user id may sit at the top level or under `data`; the token goes
/// through the shared extraction in [`crate::registration::auth`].
pub fn parse_registered(raw: Value) -> Result<RegisteredUser, RegistrationError> {
    let probe = |obj: &Value| {
        USER_ID_KEYS.iter().find_map(|key| {
            obj.get(key).and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        })
    };

    let user_id = probe(&raw)
        .or_else(|| raw.get("data").and_then(|data| probe(data)))
        .ok_or_else(|| {
            RegistrationError::InvalidResponse("register response has no user id".to_string())
        })?;

    let token = extract_access_token(&raw);
    Ok(RegisteredUser {
        user_id,
        token,
        raw,
    })
}

/// HTTP implementation over the platform's registration API.
pub struct HttpRegistrationClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRegistrationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// POST a JSON body, mapping transport and status failures into the
    /// registration error taxonomy.
    async fn post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, RegistrationError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    ["error", "message", "detail"]
                        .iter()
                        .find_map(|key| v.get(key).and_then(Value::as_str).map(String::from))
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RegistrationError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RegistrationClient for HttpRegistrationClient {
    async fn register(
        &self,
        payload: &RegisterPayload,
    ) -> Result<RegisteredUser, RegistrationError> {
        let raw = self.post_json("register", payload).await?;
        let registered = parse_registered(raw)?;
        tracing::info!(user_id = %registered.user_id, "register accepted");
        Ok(registered)
    }

    async fn exchange_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResult, RegistrationError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let raw = self.post_json("login", &body).await?;
        let access_token =
            extract_access_token(&raw).ok_or(RegistrationError::MissingToken)?;
        Ok(AuthResult { access_token, raw })
    }
}
