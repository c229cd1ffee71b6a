//! Shared domain types

pub mod permission;
pub mod task;
pub mod user;

// Re-export commonly used types
pub use permission::{
    build_permission_key, Permission, PermissionAction, PermissionKey, PermissionModule,
};
pub use task::{Priority, Task, TaskStatus, TaskType};
pub use user::{Role, User, UserSummary};
