//! Surface controllers for the Immify application.
//!
//! The chat and admin surfaces are independent; they share only the
//! collaborator traits from `immify-core` and the notification port.

pub mod admin_controller;
pub mod chat_controller;
pub mod notify;

pub use admin_controller::{AdminController, EntryForm};
pub use chat_controller::{ChatController, FALLBACK_REPLY, GREETING, SubmitOutcome};
pub use notify::Notifier;
