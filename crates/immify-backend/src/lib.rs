//! HTTP clients for the hosted backend (auth, table storage, inference).

pub mod advisor_agent;
pub mod auth_client;
pub mod knowledge_repository;

pub use advisor_agent::AdvisorApiAgent;
pub use auth_client::SupabaseAuthClient;
pub use knowledge_repository::SupabaseKnowledgeRepository;
