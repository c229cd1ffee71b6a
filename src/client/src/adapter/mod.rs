//! Backend adapter
//!
//! Translation between the task API's wire representation and the domain
//! model. Everything here is pure; the HTTP client calls into it on every
//! boundary crossing.

pub mod dates;
pub mod envelope;
pub mod status;
pub mod task;
pub mod user;

pub use dates::{to_backend_instant, to_display_date};
pub use envelope::{last_page_for, Envelope, ListEnvelope, Page, PageRequest, DEFAULT_PAGE_LIMIT};
pub use status::{status_from_backend, status_to_backend, BackendStatus};
pub use task::{BackendTask, TaskDraft, TaskFilter, TaskPatch, TaskPayload};
pub use user::{LoginRequest, LoginResponse, Profile, UserDraft, UserPatch, UserPayload};
