//! # Taskboard Core
//!
//! Shared domain model for the taskboard client: users and their roles,
//! session permissions, and tasks. The authorization engine and the backend
//! adapter both speak these types, but neither depends on the other.

pub mod types;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    build_permission_key, Permission, PermissionAction, PermissionKey, PermissionModule,
    Priority, Role, Task, TaskStatus, TaskType, User, UserSummary,
};

pub type TaskId = String;
pub type UserId = String;
