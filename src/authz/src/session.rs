//! Authenticated session state
//!
//! A `Session` is built on login (or permission refresh) and discarded on
//! logout. It owns the permission index and the lookup cache, so both live
//! exactly as long as the permission set they describe.

use crate::access::AccessControl;
use crate::cache::{CacheStats, LookupCache};
use crate::index::PermissionIndex;
use std::collections::BTreeMap;
use taskboard_core::{Permission, Role, User};
use tracing::debug;

#[derive(Debug)]
pub struct Session {
    user: User,
    index: PermissionIndex,
    lookups: LookupCache,
}

impl Session {
    pub fn new(user: User, permissions: Vec<Permission>) -> Self {
        let index = PermissionIndex::build(permissions);
        debug!(
            "Session built for user={} role={} permissions={}",
            user.id,
            user.role,
            index.len()
        );

        Self {
            user,
            index,
            lookups: LookupCache::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.index.iter()
    }

    pub fn permission_count(&self) -> usize {
        self.index.len()
    }

    pub fn permissions_by_group(&self) -> BTreeMap<String, Vec<Permission>> {
        self.index.by_group()
    }

    pub fn lookup_stats(&self) -> CacheStats {
        self.lookups.stats()
    }

    /// Same user with a new permission set and an empty lookup cache
    pub fn with_permissions(&self, permissions: Vec<Permission>) -> Self {
        Self::new(self.user.clone(), permissions)
    }
}

impl AccessControl for Session {
    fn check_permission(&self, key: &str) -> bool {
        let granted = self
            .lookups
            .get_or_insert_with(key, || self.index.contains(key));
        debug!("Permission lookup: key={} granted={}", key, granted);
        granted
    }

    fn current_role(&self) -> Option<Role> {
        Some(self.user.role)
    }

    fn is_authenticated(&self) -> bool {
        true
    }
}
