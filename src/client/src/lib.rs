//! # Taskboard Client
//!
//! Talks to the task API on behalf of a signed-in user.
//!
//! - [`adapter`]: pure translation between the backend's wire shapes and the
//!   domain model (status vocabulary, dates, envelopes, partial updates)
//! - [`client::ApiClient`]: HTTP calls with bearer auth and 401 teardown
//! - [`session::SessionManager`]: login/restore/refresh/logout, feeding the
//!   authorization engine
//! - [`board`] and [`metrics`]: derived views over task listings

pub mod adapter;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod session;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use adapter::{Page, PageRequest, Profile, TaskDraft, TaskFilter, TaskPatch, UserDraft, UserPatch};
pub use board::KanbanBoard;
pub use client::{ApiClient, LoginGrant};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use metrics::{load_dashboard, Dashboard, TaskMetrics};
pub use session::SessionManager;
pub use store::{FileSessionStore, MemorySessionStore, PersistedSession, SessionStore};
pub use validation::ValidationErrors;
