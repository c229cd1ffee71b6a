//! Render gating and route guards
//!
//! Gates turn an access answer into a render path without knowing anything
//! about the UI that consumes it.

use crate::access::AccessControl;
use crate::error::{AuthzError, Result};
use std::str::FromStr;
use taskboard_core::{PermissionKey, Role};

/// Route unauthenticated sessions are sent to
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Default route for authenticated sessions that lack access
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Notice shown on disabled content
pub const ACCESS_DENIED_NOTICE: &str = "Access denied";

/// What a gate requires; lists use OR semantics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Permission(Vec<String>),
    Role(Vec<String>),
}

impl Requirement {
    pub fn permission(key: impl AsRef<str>) -> Self {
        Requirement::Permission(vec![key.as_ref().to_string()])
    }

    pub fn any_permission<K: AsRef<str>>(keys: &[K]) -> Self {
        Requirement::Permission(keys.iter().map(|k| k.as_ref().to_string()).collect())
    }

    pub fn role(role: impl AsRef<str>) -> Self {
        Requirement::Role(vec![role.as_ref().to_string()])
    }

    pub fn any_role<R: AsRef<str>>(roles: &[R]) -> Self {
        Requirement::Role(roles.iter().map(|r| r.as_ref().to_string()).collect())
    }

    pub fn is_satisfied<A: AccessControl>(&self, access: &A) -> bool {
        match self {
            Requirement::Permission(keys) => access.has_any_permission(keys.as_slice()),
            Requirement::Role(roles) => access.has_any_role(roles.as_slice()),
        }
    }
}

impl From<PermissionKey> for Requirement {
    fn from(key: PermissionKey) -> Self {
        Requirement::permission(key)
    }
}

impl From<Role> for Requirement {
    fn from(role: Role) -> Self {
        Requirement::role(role)
    }
}

/// How denied content is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DenialMode {
    /// Render nothing
    #[default]
    Hide,
    /// Render the content non-interactive with an access-denied notice
    Disable,
    /// Render the fallback, or nothing when there is none
    Remove,
}

impl FromStr for DenialMode {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hide" => Ok(DenialMode::Hide),
            "disable" => Ok(DenialMode::Disable),
            "remove" => Ok(DenialMode::Remove),
            other => Err(AuthzError::InvalidInput(format!("unknown denial mode '{}'", other))),
        }
    }
}

/// Render path selected by a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Render,
    Hidden,
    Disabled { notice: &'static str },
    Fallback,
}

/// Gate around a piece of protected content
#[derive(Debug, Clone)]
pub struct AccessGate {
    requirement: Requirement,
    mode: DenialMode,
    has_fallback: bool,
}

impl AccessGate {
    pub fn new(requirement: impl Into<Requirement>) -> Self {
        Self {
            requirement: requirement.into(),
            mode: DenialMode::default(),
            has_fallback: false,
        }
    }

    pub fn mode(mut self, mode: DenialMode) -> Self {
        self.mode = mode;
        self
    }

    /// Declare that the caller supplies fallback content
    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    pub fn evaluate<A: AccessControl>(&self, access: &A) -> GateOutcome {
        if self.requirement.is_satisfied(access) {
            return GateOutcome::Render;
        }

        match self.mode {
            DenialMode::Hide => GateOutcome::Hidden,
            DenialMode::Disable => GateOutcome::Disabled {
                notice: ACCESS_DENIED_NOTICE,
            },
            DenialMode::Remove if self.has_fallback => GateOutcome::Fallback,
            DenialMode::Remove => GateOutcome::Hidden,
        }
    }
}

/// Outcome of a route guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Guard in front of a route
///
/// Unauthenticated sessions always go to [`LOGIN_ROUTE`]; authenticated
/// sessions that fail the requirement go to the guard's redirect target.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirement: Option<Requirement>,
    redirect_to: String,
}

impl RouteGuard {
    /// Only requires an authenticated session
    pub fn authenticated() -> Self {
        Self {
            requirement: None,
            redirect_to: LOGIN_ROUTE.to_string(),
        }
    }

    pub fn require(requirement: impl Into<Requirement>) -> Self {
        Self {
            requirement: Some(requirement.into()),
            redirect_to: DASHBOARD_ROUTE.to_string(),
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    pub fn check<A: AccessControl>(&self, access: &A) -> RouteDecision {
        if !access.is_authenticated() {
            return RouteDecision::Redirect(LOGIN_ROUTE.to_string());
        }

        match &self.requirement {
            Some(requirement) if !requirement.is_satisfied(access) => {
                RouteDecision::Redirect(self.redirect_to.clone())
            }
            _ => RouteDecision::Allow,
        }
    }
}
