//! User payloads and the profile response shapes

use super::task::non_empty;
use crate::validation::{is_valid_email, ValidationErrors};
use serde::{Deserialize, Serialize};
use taskboard_core::{Permission, Role, User};

/// Outbound user body; the role is always written in canonical form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl UserPayload {
    pub fn is_empty(&self) -> bool {
        *self == UserPayload::default()
    }
}

/// User form submission for creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
    pub position: Option<String>,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: None,
            role,
            position: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Form rules for a new user; unlike a patch, a new user needs a password
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.min_chars("name", &self.name, 3, "Name");
        if !is_valid_email(&self.email) {
            errors.add("email", "Email must be a valid address");
        }
        match self.password.as_deref().filter(|p| !p.is_empty()) {
            None => errors.add("password", "Password is required for new users"),
            Some(password) if password.chars().count() < 6 => {
                errors.add("password", "Password must be at least 6 characters")
            }
            Some(_) => {}
        }
        errors.into_result()
    }

    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            // passwords are sent verbatim, never trimmed
            password: self.password.clone().filter(|p| !p.is_empty()),
            role: Some(self.role),
            position: non_empty(&self.position),
        }
    }
}

/// Partial user update; same omission rules as task patches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub position: Option<String>,
}

impl UserPatch {
    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            name: non_empty(&self.name),
            email: non_empty(&self.email),
            password: self.password.clone().filter(|p| !p.is_empty()),
            role: self.role,
            position: non_empty(&self.position),
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub user: Option<User>,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

/// `GET /auth/me` in any of the shapes the backend produces:
/// a bare user, `{ data: user }`, or `{ user, permissions }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProfileResponse {
    Wrapped {
        user: User,
        #[serde(default)]
        permissions: Option<Vec<Permission>>,
    },
    Enveloped {
        data: ProfileData,
    },
    Bare(ProfileData),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileData {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

/// Current user and, when the backend sent them, their permissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub permissions: Option<Vec<Permission>>,
}

impl From<ProfileResponse> for Profile {
    fn from(response: ProfileResponse) -> Self {
        match response {
            ProfileResponse::Wrapped { user, permissions } => Profile { user, permissions },
            ProfileResponse::Enveloped { data } | ProfileResponse::Bare(data) => Profile {
                user: data.user,
                permissions: data.permissions,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: serde_json::Value) -> Profile {
        serde_json::from_value::<ProfileResponse>(value).unwrap().into()
    }

    #[test]
    fn test_outbound_role_is_canonical() {
        let employee: Role = "employee".parse().unwrap();
        let body = serde_json::to_value(UserDraft::new("Ana", "ana@x.com", employee).to_payload()).unwrap();
        assert_eq!(body["role"], "funcionario");
        assert!(body.get("password").is_none());
    }

    #[test]
    fn test_draft_validation() {
        let errors = UserDraft::new("Al", "not-an-email", Role::Admin)
            .with_password("123")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 3);

        let draft = UserDraft::new("Alice", "alice@example.com", Role::Funcionario);
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("password"), Some("Password is required for new users"));

        let errors = draft.clone().with_password("").validate().unwrap_err();
        assert!(errors.get("password").is_some(), "empty password counts as missing");

        assert!(draft.with_password("secret1").validate().is_ok());
    }

    #[test]
    fn test_patch_omits_empty_fields() {
        let patch = UserPatch {
            name: Some("  ".to_string()),
            position: Some("Designer".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(patch.to_payload()).unwrap(), json!({ "position": "Designer" }));
        assert!(UserPatch::default().to_payload().is_empty());
    }

    #[test]
    fn test_profile_shapes() {
        let bare = profile(json!({ "id": "u1", "name": "Ana", "email": "a@x.com", "role": "admin" }));
        assert_eq!(bare.user.role, Role::Admin);
        assert!(bare.permissions.is_none());

        let enveloped = profile(json!({
            "success": true,
            "data": {
                "id": "u2", "name": "Bia", "email": "b@x.com", "role": "employee",
                "permissions": [{ "key": "TASKS_LIST" }]
            }
        }));
        assert_eq!(enveloped.user.id, "u2");
        assert_eq!(enveloped.user.role, Role::Funcionario);
        assert_eq!(enveloped.permissions.unwrap()[0].key, "TASKS_LIST");

        let wrapped = profile(json!({
            "user": { "id": "u3", "name": "Caio", "email": "c@x.com", "role": "funcionario" },
            "permissions": []
        }));
        assert_eq!(wrapped.user.id, "u3");
        assert_eq!(wrapped.permissions, Some(Vec::new()));
    }

    #[test]
    fn test_login_response_without_token() {
        let response: LoginResponse = serde_json::from_value(json!({ "user": null })).unwrap();
        assert!(response.access_token.is_none());
    }
}
