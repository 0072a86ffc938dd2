//! Advisory inference contract.

use crate::error::Result;

/// Contract for the remote advisory inference endpoint.
///
/// The advisory logic itself lives behind a hosted function; this side of
/// the contract is a single question-in, answer-out exchange.
#[async_trait::async_trait]
pub trait AdvisorAgent: Send + Sync {
    /// Sends one user message and returns the advisor's reply text.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The reply text.
    /// - `Err(ImmifyError::Agent)`: Transport failure or non-2xx status.
    async fn ask(&self, message: &str) -> Result<String>;
}
