pub mod agent;
pub mod auth;
pub mod chat;
pub mod config;
pub mod destination;
pub mod error;
pub mod knowledge;
pub mod repository;

// Re-export common error type
pub use error::{ImmifyError, Result};

pub use agent::AdvisorAgent;
pub use auth::{AuthService, Session};
pub use chat::{ChatMessage, MessageRole};
pub use config::BackendConfig;
pub use destination::{Destination, PRODUCT_TAGLINE, PRODUCT_TITLE, featured_destinations};
pub use knowledge::{KnowledgeEntry, parse_tags, sample_entries};
pub use repository::KnowledgeRepository;
