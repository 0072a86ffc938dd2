//! Authentication collaborator contract.
//!
//! The application never handles credentials itself; it only asks the
//! auth provider whether a live session exists and reacts to sign-in and
//! sign-out transitions.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// An opaque handle to a live authentication session.
///
/// The surfaces only ever test its presence; the token is forwarded to
/// the table storage backend on authenticated inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_email: Option<String>,
}

/// Contract for the hosted authentication provider.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Returns the current session, if any.
    ///
    /// This is a one-shot check, not a subscription: a session
    /// established or revoked elsewhere is not observed until the next
    /// call.
    async fn get_session(&self) -> Option<Session>;

    /// Signs in with an email/password pair.
    ///
    /// # Returns
    ///
    /// - `Ok(Session)`: Credentials accepted; the session is also cached
    ///   for subsequent `get_session` calls.
    /// - `Err(ImmifyError::Auth)`: The provider's error message, verbatim.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    /// Signs out of the current session, if any.
    ///
    /// Callers treat this as fire-and-forget: the local session is
    /// dropped regardless of the provider's response.
    async fn sign_out(&self) -> Result<()>;
}
