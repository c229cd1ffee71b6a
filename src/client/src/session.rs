//! Ties the HTTP client, the persisted session and the authorization engine together

use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use std::future::Future;
use std::sync::Arc;
use taskboard_authz::{AuthzEngine, Session};
use taskboard_core::User;
use tracing::{info, warn};

pub struct SessionManager {
    api: ApiClient,
    engine: Arc<AuthzEngine>,
}

impl SessionManager {
    pub fn new(api: ApiClient, engine: Arc<AuthzEngine>) -> Self {
        Self { api, engine }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn engine(&self) -> &Arc<AuthzEngine> {
        &self.engine
    }

    /// Authenticate, fetch the profile and start an engine session
    ///
    /// The profile is authoritative for the user record; permissions come
    /// from the profile when present, otherwise from the login response.
    pub async fn login(&self, email: &str, password: &str) -> Result<Arc<Session>> {
        let grant = self.api.login(email, password).await?;
        let profile = self.guarded(self.api.profile()).await?;

        self.api.store().save_user(&profile.user)?;
        let permissions = profile
            .permissions
            .or(grant.permissions)
            .unwrap_or_default();

        info!("Signed in as {}", profile.user.email);
        Ok(self.engine.login(profile.user, permissions))
    }

    /// Resume from the persisted session without touching the network
    ///
    /// Needs both a token and a user; permissions start empty until
    /// [`refresh`](Self::refresh) fetches them.
    pub fn restore(&self) -> Result<Option<Arc<Session>>> {
        let Some(persisted) = self.api.store().load()? else {
            return Ok(None);
        };

        match (persisted.token, persisted.user) {
            (Some(_), Some(user)) => {
                info!("Restored session for {}", user.email);
                Ok(Some(self.engine.login(user, Vec::new())))
            }
            _ => {
                warn!("Persisted session is incomplete, ignoring it");
                Ok(None)
            }
        }
    }

    /// Re-fetch the profile and swap in a fresh engine session
    pub async fn refresh(&self) -> Result<Arc<Session>> {
        let profile = self.guarded(self.api.profile()).await?;
        self.api.store().save_user(&profile.user)?;

        let same_user = self
            .engine
            .session()
            .is_some_and(|current| current.user().id == profile.user.id);

        match profile.permissions {
            // profile without permissions: keep the grants already held
            None if same_user => Ok(self.engine.refresh_user(profile.user)?),
            permissions => Ok(self.engine.login(profile.user, permissions.unwrap_or_default())),
        }
    }

    pub fn logout(&self) -> Result<()> {
        if self.engine.logout() {
            info!("Signed out");
        }
        self.api.store().clear()
    }

    pub fn current_user(&self) -> Option<User> {
        self.engine.current_user()
    }

    /// Await a backend call, tearing the session down if the token was rejected
    pub async fn guarded<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match call.await {
            Err(ClientError::Unauthorized) => {
                self.engine.logout();
                warn!("Session expired, sign in again");
                Err(ClientError::Unauthorized)
            }
            other => other,
        }
    }
}
