//! AdvisorApiAgent - REST client for the hosted advisory inference function.
//!
//! The advisory logic runs behind `POST <base>/functions/v1/immify`; this
//! client performs the single question-in, answer-out exchange.

use async_trait::async_trait;
use immify_core::{AdvisorAgent, BackendConfig, ImmifyError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const FUNCTION_PATH: &str = "functions/v1/immify";

/// Agent implementation that talks to the hosted inference function.
#[derive(Clone)]
pub struct AdvisorApiAgent {
    client: Client,
    endpoint: String,
    anon_key: String,
}

#[derive(Serialize)]
struct AskRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    response: String,
}

impl AdvisorApiAgent {
    /// Creates a new agent addressing the configured backend.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/{}", config.url, FUNCTION_PATH),
            anon_key: config.anon_key.clone(),
        }
    }
}

#[async_trait]
impl AdvisorAgent for AdvisorApiAgent {
    async fn ask(&self, message: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.anon_key)
            .header("content-type", "application/json")
            .json(&AskRequest { message })
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "advisor request failed");
                ImmifyError::agent_transport(format!("advisor request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            // Any non-2xx is a failure outright; the body is not inspected.
            tracing::warn!(status = status.as_u16(), "advisor endpoint returned an error status");
            return Err(ImmifyError::agent_status(status.as_u16()));
        }

        let parsed: AskResponse = response.json().await.map_err(|err| {
            ImmifyError::agent_transport(format!("failed to parse advisor response: {err}"))
        })?;

        Ok(parsed.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_shape() {
        let body = serde_json::to_value(AskRequest {
            message: "What are F-1 visa requirements?",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "message": "What are F-1 visa requirements?" })
        );
    }

    #[test]
    fn response_body_exposes_the_reply_text() {
        let parsed: AskResponse =
            serde_json::from_str(r#"{"response":"You need Form I-20."}"#).unwrap();
        assert_eq!(parsed.response, "You need Form I-20.");
    }

    #[test]
    fn endpoint_is_built_from_the_base_url() {
        let agent = AdvisorApiAgent::new(&BackendConfig::new("https://proj.supabase.co/", "anon"));
        assert_eq!(
            agent.endpoint,
            "https://proj.supabase.co/functions/v1/immify"
        );
    }
}
