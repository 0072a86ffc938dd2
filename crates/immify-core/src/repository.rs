//! Knowledge base storage contract.

use crate::error::Result;
use crate::knowledge::KnowledgeEntry;

/// Contract for the hosted `knowledge_entries` table.
///
/// Only inserts are exercised by this application; entries are never read
/// back, updated, or deleted here.
#[async_trait::async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Inserts a single entry.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The record was accepted.
    /// - `Err(ImmifyError::DataAccess)`: The backend's error message,
    ///   verbatim.
    async fn insert(&self, entry: &KnowledgeEntry) -> Result<()>;
}
