//! # Taskboard Authorization Engine
//!
//! Answers permission and role queries for the current session.
//!
//! ## Features
//!
//! - **O(1) lookups** over a permission index built once per session
//! - **Session-scoped memoization**: the lookup cache is owned by the session
//!   and discarded with it
//! - **Role normalization**: `employee` and `funcionario` are the same role
//! - **Render-agnostic gates** and route guards
//!
//! ## Example
//!
//! ```rust
//! use taskboard_authz::{AccessControl, AuthzEngine};
//! use taskboard_core::{Permission, PermissionKey, Role, User};
//!
//! let engine = AuthzEngine::new();
//! engine.login(
//!     User::new("u-1", "Ana", "ana@example.com", Role::Funcionario),
//!     vec![Permission::from_key(PermissionKey::TasksList)],
//! );
//!
//! let crud = engine.module_crud("TASKS");
//! assert!(crud.can_list);
//! assert!(!crud.can_delete);
//! assert!(engine.has_role("employee"));
//! ```

pub mod access;
pub mod cache;
pub mod engine;
pub mod error;
pub mod gate;
pub mod index;
pub mod session;

// Re-export commonly used types
pub use access::{AccessControl, ModuleCrud};
pub use cache::CacheStats;
pub use engine::AuthzEngine;
pub use error::{AuthzError, Result};
pub use gate::{AccessGate, DenialMode, GateOutcome, Requirement, RouteDecision, RouteGuard};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
