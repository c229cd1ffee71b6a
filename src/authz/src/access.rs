//! Access-check queries shared by sessions and the engine
//!
//! Implementors answer two primitive questions (is a permission key granted,
//! which role is active); every composite query is derived from those.

use serde::{Deserialize, Serialize};
use taskboard_core::{build_permission_key, PermissionAction, Role};

/// CRUD capabilities of the session on one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCrud {
    pub can_list: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

pub trait AccessControl {
    /// Whether `key` is granted; empty keys are never granted
    fn check_permission(&self, key: &str) -> bool;

    /// Normalized role of the session, if any
    fn current_role(&self) -> Option<Role>;

    fn is_authenticated(&self) -> bool;

    fn has_permission<K: AsRef<str>>(&self, key: K) -> bool {
        let key = key.as_ref();
        !key.is_empty() && self.check_permission(key)
    }

    /// OR over `keys`; an empty list grants nothing
    fn has_any_permission<K: AsRef<str>>(&self, keys: &[K]) -> bool {
        keys.iter().any(|key| self.has_permission(key))
    }

    /// AND over `keys`; an empty list grants nothing
    fn has_all_permissions<K: AsRef<str>>(&self, keys: &[K]) -> bool {
        !keys.is_empty() && keys.iter().all(|key| self.has_permission(key))
    }

    fn can_list(&self, module: &str) -> bool {
        self.has_permission(build_permission_key(module, PermissionAction::List.as_str()))
    }

    fn can_create(&self, module: &str) -> bool {
        self.has_permission(build_permission_key(module, PermissionAction::Create.as_str()))
    }

    fn can_update(&self, module: &str) -> bool {
        self.has_permission(build_permission_key(module, PermissionAction::Update.as_str()))
    }

    fn can_delete(&self, module: &str) -> bool {
        self.has_permission(build_permission_key(module, PermissionAction::Delete.as_str()))
    }

    /// Evaluate the four CRUD keys of `module` independently
    fn module_crud(&self, module: &str) -> ModuleCrud {
        ModuleCrud {
            can_list: self.can_list(module),
            can_create: self.can_create(module),
            can_update: self.can_update(module),
            can_delete: self.can_delete(module),
        }
    }

    /// Role equality with the `employee`/`funcionario` synonym folded
    ///
    /// Unknown role names never match.
    fn has_role<R: AsRef<str>>(&self, role: R) -> bool {
        match (self.current_role(), Role::normalize(role.as_ref())) {
            (Some(current), Some(wanted)) => current == wanted,
            _ => false,
        }
    }

    /// OR over `roles`; an empty list matches nothing
    fn has_any_role<R: AsRef<str>>(&self, roles: &[R]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    fn is_admin(&self) -> bool {
        self.current_role() == Some(Role::Admin)
    }

    fn is_employee(&self) -> bool {
        self.current_role() == Some(Role::Funcionario)
    }

    /// User management is admin-only
    fn can_create_users(&self) -> bool {
        self.is_admin()
    }

    fn can_delete_tasks(&self) -> bool {
        self.is_admin()
    }

    fn can_view_metrics(&self) -> bool {
        self.is_admin()
    }
}
