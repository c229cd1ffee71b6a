//! Permission keys and session permission records
//!
//! Every permission key follows the `<MODULE>_<ACTION>` convention, so a key
//! always decomposes into a `(module, action)` pair.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application module a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionModule {
    Tasks,
    Users,
    Dashboard,
    Metrics,
}

impl PermissionModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionModule::Tasks => "TASKS",
            PermissionModule::Users => "USERS",
            PermissionModule::Dashboard => "DASHBOARD",
            PermissionModule::Metrics => "METRICS",
        }
    }
}

impl fmt::Display for PermissionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a permission grants within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionAction {
    List,
    Create,
    Update,
    Delete,
    View,
}

impl PermissionAction {
    /// The four actions a CRUD module exposes
    pub const CRUD: [PermissionAction; 4] = [
        PermissionAction::List,
        PermissionAction::Create,
        PermissionAction::Update,
        PermissionAction::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::List => "LIST",
            PermissionAction::Create => "CREATE",
            PermissionAction::Update => "UPDATE",
            PermissionAction::Delete => "DELETE",
            PermissionAction::View => "VIEW",
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a permission key from a module name and an action name
///
/// Both parts are upper-cased, so `build_permission_key("tasks", "list")`
/// yields `"TASKS_LIST"`.
pub fn build_permission_key(module: &str, action: &str) -> String {
    format!("{}_{}", module.to_uppercase(), action.to_uppercase())
}

/// Closed set of permission keys issued by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKey {
    TasksList,
    TasksCreate,
    TasksUpdate,
    TasksDelete,
    UsersList,
    UsersCreate,
    UsersUpdate,
    UsersDelete,
    DashboardView,
    MetricsView,
}

impl PermissionKey {
    pub const ALL: [PermissionKey; 10] = [
        PermissionKey::TasksList,
        PermissionKey::TasksCreate,
        PermissionKey::TasksUpdate,
        PermissionKey::TasksDelete,
        PermissionKey::UsersList,
        PermissionKey::UsersCreate,
        PermissionKey::UsersUpdate,
        PermissionKey::UsersDelete,
        PermissionKey::DashboardView,
        PermissionKey::MetricsView,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKey::TasksList => "TASKS_LIST",
            PermissionKey::TasksCreate => "TASKS_CREATE",
            PermissionKey::TasksUpdate => "TASKS_UPDATE",
            PermissionKey::TasksDelete => "TASKS_DELETE",
            PermissionKey::UsersList => "USERS_LIST",
            PermissionKey::UsersCreate => "USERS_CREATE",
            PermissionKey::UsersUpdate => "USERS_UPDATE",
            PermissionKey::UsersDelete => "USERS_DELETE",
            PermissionKey::DashboardView => "DASHBOARD_VIEW",
            PermissionKey::MetricsView => "METRICS_VIEW",
        }
    }

    /// Module half of the key
    pub fn module(&self) -> PermissionModule {
        match self {
            PermissionKey::TasksList
            | PermissionKey::TasksCreate
            | PermissionKey::TasksUpdate
            | PermissionKey::TasksDelete => PermissionModule::Tasks,
            PermissionKey::UsersList
            | PermissionKey::UsersCreate
            | PermissionKey::UsersUpdate
            | PermissionKey::UsersDelete => PermissionModule::Users,
            PermissionKey::DashboardView => PermissionModule::Dashboard,
            PermissionKey::MetricsView => PermissionModule::Metrics,
        }
    }

    /// Action half of the key
    pub fn action(&self) -> PermissionAction {
        match self {
            PermissionKey::TasksList | PermissionKey::UsersList => PermissionAction::List,
            PermissionKey::TasksCreate | PermissionKey::UsersCreate => PermissionAction::Create,
            PermissionKey::TasksUpdate | PermissionKey::UsersUpdate => PermissionAction::Update,
            PermissionKey::TasksDelete | PermissionKey::UsersDelete => PermissionAction::Delete,
            PermissionKey::DashboardView | PermissionKey::MetricsView => PermissionAction::View,
        }
    }

    /// Decompose into `(module, action)`
    pub fn decompose(&self) -> (PermissionModule, PermissionAction) {
        (self.module(), self.action())
    }

    /// Find the key for a module/action pair, if one is defined
    pub fn compose(module: PermissionModule, action: PermissionAction) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.decompose() == (module, action))
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PermissionKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for PermissionKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPermissionKey(s.to_string()))
    }
}

/// A permission issued to the session by the backend
///
/// The key is kept as the raw wire string; keys outside [`PermissionKey`]
/// are still indexed so that newer backends do not lose grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub key: String,

    /// Grouping used by permission management screens
    #[serde(default)]
    pub key_group: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Permission {
    pub fn new(key: impl Into<String>, key_group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_group: key_group.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Build a permission record for a known key, grouped by its module
    pub fn from_key(key: PermissionKey) -> Self {
        Self::new(key.as_str(), key.module().as_str(), key.as_str())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse the wire key into the closed key set
    pub fn known_key(&self) -> Option<PermissionKey> {
        self.key.parse().ok()
    }
}
