//! Users and roles

use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Principal class of a user
///
/// The backend spells the non-admin class `funcionario`; older payloads and
/// forms use `employee`. Both parse to [`Role::Funcionario`], and the role is
/// always written back in the canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Funcionario,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Funcionario];

    /// Canonical wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Funcionario => "funcionario",
        }
    }

    /// Normalize a role string, folding the `employee` synonym
    pub fn normalize(value: &str) -> Option<Role> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "funcionario" | "employee" => Some(Role::Funcionario),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Role::normalize(s).ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity record of an authenticated or listed user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            position: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Denormalized summary embedded in other records
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Denormalized user reference (id + display fields)
///
/// Summaries are derived data; the id is the authoritative reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_synonym() {
        assert_eq!(Role::normalize("employee"), Some(Role::Funcionario));
        assert_eq!(Role::normalize("funcionario"), Some(Role::Funcionario));
        assert_eq!(Role::normalize(" Admin "), Some(Role::Admin));
        assert_eq!(Role::normalize("manager"), None);
    }

    #[test]
    fn test_role_serializes_canonical() {
        let role: Role = serde_json::from_str("\"employee\"").unwrap();
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"funcionario\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = serde_json::from_str::<Role>("\"guest\"").unwrap_err();
        assert!(err.to_string().contains("Unknown role: guest"));
    }

    #[test]
    fn test_user_deserialize() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","name":"Ana","email":"ana@example.com","role":"employee"}"#,
        )
        .unwrap();

        assert_eq!(user.role, Role::Funcionario);
        assert!(user.position.is_none());
        assert_eq!(user.summary().name, "Ana");
    }
}
