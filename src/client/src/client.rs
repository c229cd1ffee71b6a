//! HTTP client for the task API
//!
//! Every response passes through the adapter before it reaches the caller,
//! and every request body is built by it.

use crate::adapter::{
    BackendTask, Envelope, ListEnvelope, LoginRequest, LoginResponse, Page, PageRequest, Profile,
    TaskDraft, TaskFilter, TaskPatch, UserDraft, UserPatch,
};
use crate::adapter::user::ProfileResponse;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::store::SessionStore;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::{Permission, Task, TaskStatus, User};
use tracing::{debug, warn};

/// Successful login: the token is already persisted
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: String,
    pub user: Option<User>,
    pub permissions: Option<Vec<Permission>>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request without credentials
    fn anonymous(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    /// Request carrying the stored bearer token, if any
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.anonymous(method, path);
        Ok(match self.store.token()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Backend rejected the session, clearing persisted credentials");
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear persisted session: {}", e);
                }
                Err(ClientError::Unauthorized)
            }
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(error_message(status, &body))),
            _ => Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            }),
        }
    }

    async fn call<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.execute(builder).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // Authentication

    /// Exchange credentials for a bearer token and persist it
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginGrant> {
        let builder = self
            .anonymous(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password });
        let response: LoginResponse = self.call(builder).await?;

        let token = response
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ClientError::MissingField("access_token"))?;
        self.store.save_token(&token)?;

        Ok(LoginGrant {
            token,
            user: response.user,
            permissions: response.permissions,
        })
    }

    /// Profile of the token holder
    pub async fn profile(&self) -> Result<Profile> {
        let response: ProfileResponse = self.call(self.request(Method::GET, "/auth/me")?).await?;
        Ok(response.into())
    }

    // Tasks

    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let builder = self.request(Method::GET, "/tasks")?.query(&filter.to_query());
        let envelope: ListEnvelope<BackendTask> = self.call(builder).await?;
        Ok(envelope.into_items().into_iter().map(BackendTask::into_task).collect())
    }

    pub async fn list_tasks_page(&self, filter: &TaskFilter, request: PageRequest) -> Result<Page<Task>> {
        let mut query = filter.to_query();
        query.push(("page", request.page.to_string()));
        query.push(("limit", request.limit.to_string()));

        let builder = self.request(Method::GET, "/tasks")?.query(&query);
        let envelope: ListEnvelope<BackendTask> = self.call(builder).await?;
        Ok(envelope.into_page(request).map(BackendTask::into_task))
    }

    /// Fetch one task; `None` when the server answered without data
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let builder = self.request(Method::GET, &format!("/tasks/{}", id))?;
        let envelope: Envelope<BackendTask> = self.call(builder).await?;
        Ok(envelope.into_data().map(BackendTask::into_task))
    }

    /// Validate and create a task
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Option<Task>> {
        draft.validate()?;
        let builder = self.request(Method::POST, "/tasks")?.json(&draft.to_payload());
        let envelope: Envelope<BackendTask> = self.call(builder).await?;
        Ok(envelope.into_data().map(BackendTask::into_task))
    }

    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>> {
        let builder = self
            .request(Method::PUT, &format!("/tasks/{}", id))?
            .json(&patch.to_payload());
        let envelope: Envelope<BackendTask> = self.call(builder).await?;
        Ok(envelope.into_data().map(BackendTask::into_task))
    }

    /// Move a task to another board column
    pub async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<Option<Task>> {
        self.update_task(id, &TaskPatch::status(status)).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, &format!("/tasks/{}", id))?)
            .await
            .map(|_| ())
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let envelope: ListEnvelope<User> = self.call(self.request(Method::GET, "/users")?).await?;
        Ok(envelope.into_items())
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let builder = self.request(Method::GET, &format!("/users/{}", id))?;
        let envelope: Envelope<User> = self.call(builder).await?;
        Ok(envelope.into_data())
    }

    /// Validate and create a user
    pub async fn create_user(&self, draft: &UserDraft) -> Result<Option<User>> {
        draft.validate()?;
        let builder = self.request(Method::POST, "/users")?.json(&draft.to_payload());
        let envelope: Envelope<User> = self.call(builder).await?;
        Ok(envelope.into_data())
    }

    pub async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<Option<User>> {
        let builder = self
            .request(Method::PUT, &format!("/users/{}", id))?
            .json(&patch.to_payload());
        let envelope: Envelope<User> = self.call(builder).await?;
        Ok(envelope.into_data())
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, &format!("/users/{}", id))?)
            .await
            .map(|_| ())
    }
}

/// Server-provided `message`, falling back to the raw body and then the status reason
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }

    status.canonical_reason().unwrap_or("request failed").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_sources() {
        let status = StatusCode::UNPROCESSABLE_ENTITY;
        assert_eq!(error_message(status, br#"{"message":"title taken"}"#), "title taken");
        assert_eq!(error_message(status, b"plain failure"), "plain failure");
        assert_eq!(error_message(status, b""), "Unprocessable Entity");
    }
}
