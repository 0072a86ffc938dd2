//! SupabaseAuthClient - REST client for the hosted auth provider.
//!
//! Implements the password grant and logout endpoints of the GoTrue API
//! and caches the resulting session in memory. `get_session` is a
//! one-shot read of that cache; there is no refresh or subscription.

use async_trait::async_trait;
use immify_core::{AuthService, BackendConfig, ImmifyError, Result, Session};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

const TOKEN_PATH: &str = "auth/v1/token?grant_type=password";
const LOGOUT_PATH: &str = "auth/v1/logout";

/// Auth provider client holding the process-local session.
pub struct SupabaseAuthClient {
    client: Client,
    url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
}

#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct PasswordGrantResponse {
    access_token: String,
    user: Option<UserInfo>,
}

#[derive(Deserialize)]
struct UserInfo {
    email: Option<String>,
}

impl SupabaseAuthClient {
    /// Creates a new client with no live session.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            session: RwLock::new(None),
        }
    }
}

#[async_trait]
impl AuthService for SupabaseAuthClient {
    async fn get_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .client
            .post(format!("{}/{}", self.url, TOKEN_PATH))
            .header("apikey", &self.anon_key)
            .header("content-type", "application/json")
            .json(&PasswordGrantRequest { email, password })
            .send()
            .await
            .map_err(|err| ImmifyError::auth(format!("sign-in request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImmifyError::auth(provider_message(status, &body)));
        }

        let grant: PasswordGrantResponse = response
            .json()
            .await
            .map_err(|err| ImmifyError::auth(format!("failed to parse sign-in response: {err}")))?;

        let session = Session {
            access_token: grant.access_token,
            user_email: grant.user.and_then(|user| user.email),
        };

        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };

        // Best-effort revocation; the local session is already gone.
        let outcome = self
            .client
            .post(format!("{}/{}", self.url, LOGOUT_PATH))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await;

        match outcome {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!(
                    status = response.status().as_u16(),
                    "sign-out returned an error status"
                );
            }
            Err(err) => {
                tracing::debug!(error = %err, "sign-out request failed");
            }
            Ok(_) => {}
        }

        Ok(())
    }
}

/// Extracts a user-facing message from a provider error body.
///
/// GoTrue has used several error shapes over time (`error_description`,
/// `msg`, `message`); fall through them in order and degrade to the raw
/// body or the HTTP status when nothing matches.
fn provider_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    if body.trim().is_empty() {
        format!("sign-in failed (HTTP {})", status.as_u16())
    } else {
        body.to_string()
    }
}
