//! Admin surface controller.
//!
//! Gates knowledge base management behind a session check, then drives
//! single-shot entry inserts and the sample-data seeding action.

use std::sync::Arc;

use immify_core::{AuthService, KnowledgeEntry, KnowledgeRepository, parse_tags, sample_entries};
use tokio::sync::RwLock;

use crate::notify::Notifier;

const LOGIN_NOTICE: &str = "Logged in successfully";
const LOGOUT_NOTICE: &str = "Logged out successfully";
const ENTRY_ADDED_NOTICE: &str = "Entry added successfully";
const SEEDED_NOTICE: &str = "Test data added successfully";

/// Raw form state for a new knowledge entry.
///
/// `tags` holds the comma-separated input string; it is only parsed when
/// the entry is built. No field is validated client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub tags: String,
}

impl EntryForm {
    fn to_entry(&self) -> KnowledgeEntry {
        KnowledgeEntry::new(
            self.question.clone(),
            self.answer.clone(),
            self.category.clone(),
            parse_tags(&self.tags),
        )
    }
}

/// Drives the authentication gate and the knowledge-entry workflow.
pub struct AdminController {
    auth: Arc<dyn AuthService>,
    knowledge: Arc<dyn KnowledgeRepository>,
    notifier: Arc<dyn Notifier>,
    authenticated: RwLock<bool>,
    form: RwLock<EntryForm>,
}

impl AdminController {
    pub fn new(
        auth: Arc<dyn AuthService>,
        knowledge: Arc<dyn KnowledgeRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            knowledge,
            notifier,
            authenticated: RwLock::new(false),
            form: RwLock::new(EntryForm::default()),
        }
    }

    /// One-shot session check, run each time the surface is (re)entered.
    /// A session established or revoked elsewhere is not observed until
    /// the next call.
    pub async fn check_auth(&self) {
        let live = self.auth.get_session().await.is_some();
        *self.authenticated.write().await = live;
    }

    /// Whether the management form (vs. the login form) renders.
    pub async fn is_authenticated(&self) -> bool {
        *self.authenticated.read().await
    }

    /// Attempts a password sign-in. The provider's error message is
    /// surfaced verbatim on failure.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        match self.auth.sign_in_with_password(email, password).await {
            Ok(_) => {
                *self.authenticated.write().await = true;
                self.notifier.success(LOGIN_NOTICE);
                true
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Signs out unconditionally. The provider's outcome is discarded;
    /// the gate always returns to the login form.
    pub async fn logout(&self) {
        if let Err(err) = self.auth.sign_out().await {
            log::debug!("sign-out reported an error: {err}");
        }
        *self.authenticated.write().await = false;
        self.notifier.success(LOGOUT_NOTICE);
    }

    /// Returns a snapshot of the entry form.
    pub async fn form(&self) -> EntryForm {
        self.form.read().await.clone()
    }

    /// Replaces the entry form state.
    pub async fn set_form(&self, form: EntryForm) {
        *self.form.write().await = form;
    }

    /// Inserts the current form as one knowledge entry.
    ///
    /// On success the form is cleared; on failure it is preserved so the
    /// user can retry. Nothing is retried automatically.
    pub async fn add_entry(&self) -> bool {
        let entry = self.form.read().await.to_entry();

        match self.knowledge.insert(&entry).await {
            Ok(()) => {
                *self.form.write().await = EntryForm::default();
                self.notifier.success(ENTRY_ADDED_NOTICE);
                true
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Inserts the fixed sample entries one at a time, in order.
    ///
    /// The first failure notifies the error and aborts: remaining entries
    /// are not attempted. Partial application is expected; this is not a
    /// transaction.
    pub async fn seed_sample_entries(&self) -> bool {
        for entry in sample_entries() {
            if let Err(err) = self.knowledge.insert(&entry).await {
                self.notifier.error(&err.to_string());
                return false;
            }
        }

        self.notifier.success(SEEDED_NOTICE);
        true
    }
}
