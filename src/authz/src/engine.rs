//! Authorization engine
//!
//! Holds the current session, if any, and answers access queries against it.
//!
//! ```text
//!   unauthenticated ──login──▶ authenticated ──logout──▶ unauthenticated
//!                                   │    ▲
//!                                   └────┘ refresh_permissions
//! ```
//!
//! Every transition swaps the whole [`Session`], which carries its own lookup
//! cache; there is no shared cache to clear.

use crate::access::AccessControl;
use crate::cache::CacheStats;
use crate::error::{AuthzError, Result};
use crate::session::Session;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use taskboard_core::{Permission, Role, User};
use tracing::info;

/// Session-scoped authorization engine
#[derive(Debug, Default)]
pub struct AuthzEngine {
    session: RwLock<Option<Arc<Session>>>,
}

impl AuthzEngine {
    /// Create an engine with no session
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user` with the permissions the backend issued
    ///
    /// Replaces any existing session.
    pub fn login(&self, user: User, permissions: Vec<Permission>) -> Arc<Session> {
        let session = Arc::new(Session::new(user, permissions));
        let previous = self.session.write().replace(Arc::clone(&session));

        if let Some(previous) = previous {
            info!("Session replaced: user={} -> user={}", previous.user().id, session.user().id);
        } else {
            info!(
                "Session started: user={} role={}",
                session.user().id,
                session.role()
            );
        }
        session
    }

    /// Swap in a new permission set for the current user
    pub fn refresh_permissions(&self, permissions: Vec<Permission>) -> Result<Arc<Session>> {
        let mut guard = self.session.write();
        let current = guard.as_ref().ok_or(AuthzError::NotAuthenticated)?;

        let session = Arc::new(current.with_permissions(permissions));
        info!(
            "Permissions refreshed: user={} permissions={}",
            session.user().id,
            session.permission_count()
        );
        *guard = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Replace the user record (profile refresh), keeping the permission set
    pub fn refresh_user(&self, user: User) -> Result<Arc<Session>> {
        let mut guard = self.session.write();
        let current = guard.as_ref().ok_or(AuthzError::NotAuthenticated)?;

        let permissions = current.permissions().cloned().collect();
        let session = Arc::new(Session::new(user, permissions));
        *guard = Some(Arc::clone(&session));
        Ok(session)
    }

    /// End the session; returns whether one was active
    pub fn logout(&self) -> bool {
        match self.session.write().take() {
            Some(session) => {
                info!("Session ended: user={}", session.user().id);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Option<Arc<Session>> {
        self.session.read().clone()
    }

    pub fn require_session(&self) -> Result<Arc<Session>> {
        self.session().ok_or(AuthzError::NotAuthenticated)
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().map(|session| session.user().clone())
    }

    pub fn permissions_by_group(&self) -> BTreeMap<String, Vec<Permission>> {
        self.session()
            .map(|session| session.permissions_by_group())
            .unwrap_or_default()
    }

    /// Lookup cache statistics of the current session
    pub fn lookup_stats(&self) -> Option<CacheStats> {
        self.session().map(|session| session.lookup_stats())
    }
}

impl AccessControl for AuthzEngine {
    fn check_permission(&self, key: &str) -> bool {
        self.session()
            .map(|session| session.check_permission(key))
            .unwrap_or(false)
    }

    fn current_role(&self) -> Option<Role> {
        self.session().map(|session| session.role())
    }

    fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }
}
