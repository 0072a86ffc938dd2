//! Transient user notification port.
//!
//! Controllers report outcomes through this trait instead of printing;
//! the frontend decides how a notification is rendered.

/// Sink for transient success/error notifications (the toast surface).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
