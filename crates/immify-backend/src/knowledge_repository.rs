//! SupabaseKnowledgeRepository - REST client for the hosted table storage.
//!
//! Inserts `knowledge_entries` records through the PostgREST endpoint.
//! Each call inserts exactly one record; batching is the caller's concern
//! (and is deliberately sequential there).

use std::sync::Arc;

use async_trait::async_trait;
use immify_core::{AuthService, BackendConfig, ImmifyError, KnowledgeEntry, KnowledgeRepository, Result};
use reqwest::{Client, StatusCode};

const TABLE_PATH: &str = "rest/v1/knowledge_entries";

/// Table storage client for the knowledge base.
pub struct SupabaseKnowledgeRepository {
    client: Client,
    endpoint: String,
    anon_key: String,
    auth: Option<Arc<dyn AuthService>>,
}

impl SupabaseKnowledgeRepository {
    /// Creates a new repository addressing the configured backend.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/{}", config.url, TABLE_PATH),
            anon_key: config.anon_key.clone(),
            auth: None,
        }
    }

    /// Attaches an auth service so inserts run under the live session's
    /// token when one exists. Without it, the anon key is used.
    pub fn with_auth(mut self, auth: Arc<dyn AuthService>) -> Self {
        self.auth = Some(auth);
        self
    }

    async fn bearer_token(&self) -> String {
        if let Some(auth) = &self.auth {
            if let Some(session) = auth.get_session().await {
                return session.access_token;
            }
        }
        self.anon_key.clone()
    }
}

#[async_trait]
impl KnowledgeRepository for SupabaseKnowledgeRepository {
    async fn insert(&self, entry: &KnowledgeEntry) -> Result<()> {
        let token = self.bearer_token().await;

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .header("content-type", "application/json")
            .header("prefer", "return=minimal")
            // PostgREST expects an array even for a single record.
            .json(&[entry])
            .send()
            .await
            .map_err(|err| ImmifyError::data_access(format!("insert request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImmifyError::data_access(storage_message(status, &body)));
        }

        tracing::debug!(category = %entry.category, "knowledge entry inserted");
        Ok(())
    }
}

/// Extracts a user-facing message from a PostgREST error body.
fn storage_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(|v| v.as_str())
    {
        return message.to_string();
    }

    if body.trim().is_empty() {
        format!("insert failed (HTTP {})", status.as_u16())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immify_core::parse_tags;

    #[test]
    fn record_serializes_as_a_one_element_array() {
        let entry = KnowledgeEntry::new(
            "Q",
            "A",
            "USA",
            parse_tags("visa, F-1 , requirements"),
        );
        let body = serde_json::to_value([&entry]).unwrap();
        assert_eq!(
            body,
            serde_json::json!([{
                "question": "Q",
                "answer": "A",
                "category": "USA",
                "tags": ["visa", "F-1", "requirements"]
            }])
        );
    }

    #[test]
    fn storage_message_reads_postgrest_shape() {
        let message = storage_message(
            StatusCode::CONFLICT,
            r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint"}"#,
        );
        assert_eq!(message, "duplicate key value violates unique constraint");
    }

    #[test]
    fn storage_message_degrades_to_status_for_empty_body() {
        assert_eq!(
            storage_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "insert failed (HTTP 500)"
        );
    }

    #[test]
    fn endpoint_targets_the_knowledge_entries_table() {
        let repo =
            SupabaseKnowledgeRepository::new(&BackendConfig::new("https://x.supabase.co", "anon"));
        assert_eq!(repo.endpoint, "https://x.supabase.co/rest/v1/knowledge_entries");
    }
}
