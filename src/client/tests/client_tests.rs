//! HTTP client tests against an in-process stub of the task API

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{NaiveDate, SecondsFormat};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use taskboard_authz::{AccessControl, AuthzEngine};
use taskboard_client::adapter::dates::local_midnight;
use taskboard_client::{
    load_dashboard, ApiClient, ClientConfig, ClientError, MemorySessionStore, PageRequest,
    SessionManager, SessionStore, TaskDraft, TaskFilter, TaskPatch,
};
use taskboard_core::{Role, TaskStatus, User};

const TOKEN: &str = "tok-1";

#[derive(Clone, Default)]
struct Recorder {
    bodies: Arc<Mutex<Vec<Value>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    login_headers: Arc<Mutex<Vec<bool>>>,
}

fn backend_task(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Task {}", id),
        "description": "Something to do",
        "status": status,
        "responsible_id": "u1",
        "responsible_name": "Ana",
        "responsible_email": "ana@example.com",
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-01T12:00:00Z",
        "due_date": "2024-05-10T00:00:00",
        "priority": "high",
        "type": "api"
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(&format!("Bearer {}", TOKEN)[..])
}

/// Stub of the full API; every route except login requires the bearer token
fn api(recorder: Recorder) -> Router {
    Router::new()
        .route(
            "/auth/login",
            post(|State(rec): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>| async move {
                rec.login_headers.lock().push(headers.contains_key("authorization"));
                if body["email"] == "notoken@example.com" {
                    Json(json!({ "user": null }))
                } else {
                    Json(json!({ "access_token": TOKEN }))
                }
            }),
        )
        .route(
            "/auth/me",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                Ok(Json(json!({
                    "success": true,
                    "data": {
                        "id": "u1",
                        "name": "Ana",
                        "email": "ana@example.com",
                        "role": "employee",
                        "permissions": [
                            { "key": "TASKS_LIST", "key_group": "tasks", "name": "List tasks" },
                            { "key": "TASKS_CREATE", "key_group": "tasks", "name": "Create tasks" }
                        ]
                    }
                })))
            }),
        )
        .route(
            "/tasks",
            get(
                |State(rec): State<Recorder>,
                 headers: HeaderMap,
                 Query(query): Query<HashMap<String, String>>| async move {
                    if !authorized(&headers) {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    let paged = query.contains_key("page");
                    rec.queries.lock().push(query);
                    if paged {
                        Ok(Json(json!({
                            "success": true,
                            "data": [backend_task("t1", "pendente")],
                            "total": 21,
                            "page": 2,
                            "limit": 10
                        })))
                    } else {
                        Ok(Json(json!({
                            "success": true,
                            "data": [
                                backend_task("t1", "pendente"),
                                backend_task("t2", "concluido")
                            ]
                        })))
                    }
                },
            )
            .post(
                |State(rec): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    if !authorized(&headers) {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    rec.bodies.lock().push(body);
                    Ok(Json(json!({ "success": true, "data": backend_task("t9", "pendente") })))
                },
            ),
        )
        .route(
            "/tasks/:id",
            put(
                |State(rec): State<Recorder>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    let status = body["status"].as_str().unwrap_or("pendente").to_string();
                    rec.bodies.lock().push(body);
                    if id == "acknowledged" {
                        // write accepted, entity not echoed back
                        return Json(json!({ "success": true }));
                    }
                    Json(json!({ "success": true, "data": backend_task(&id, &status) }))
                },
            )
            .get(|Path(id): Path<String>| async move {
                if id == "missing" {
                    Err((StatusCode::NOT_FOUND, Json(json!({ "message": "Task not found" }))))
                } else {
                    Ok(Json(json!({ "success": true, "data": backend_task(&id, "fazendo") })))
                }
            })
            .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/users",
            get(|| async {
                // envelope without data
                Json(json!({ "success": true }))
            }),
        )
        .with_state(recorder)
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str, store: Arc<dyn SessionStore>) -> ApiClient {
    let mut config = ClientConfig::default();
    config.api.base_url = base_url.to_string();
    ApiClient::new(&config, store).unwrap()
}

async fn signed_in(recorder: Recorder) -> (ApiClient, Arc<MemorySessionStore>) {
    let base_url = spawn(api(recorder)).await;
    let store = Arc::new(MemorySessionStore::new());
    store.save_token(TOKEN).unwrap();
    (client(&base_url, store.clone()), store)
}

fn valid_draft() -> TaskDraft {
    TaskDraft {
        description: Some("Ship the landing page".to_string()),
        assigned_to: Some("u1".to_string()),
        due_date: Some("2024-05-10".to_string()),
        ..TaskDraft::new("Landing page")
    }
}

#[tokio::test]
async fn test_login_persists_session_and_feeds_engine() {
    let base_url = spawn(api(Recorder::default())).await;
    let store = Arc::new(MemorySessionStore::new());
    let manager = SessionManager::new(client(&base_url, store.clone()), Arc::new(AuthzEngine::new()));

    let session = manager.login("ana@example.com", "secret1").await.unwrap();

    assert_eq!(session.role(), Role::Funcionario);
    assert_eq!(store.token().unwrap().as_deref(), Some(TOKEN));
    assert_eq!(store.load().unwrap().unwrap().user.unwrap().id, "u1");

    let engine = manager.engine();
    assert!(engine.is_authenticated());
    assert!(engine.has_permission("TASKS_CREATE"));
    assert!(!engine.has_permission("TASKS_DELETE"));
    assert!(engine.has_role("funcionario"));
}

#[tokio::test]
async fn test_login_without_token_fails() {
    let base_url = spawn(api(Recorder::default())).await;
    let store = Arc::new(MemorySessionStore::new());
    let api = client(&base_url, store.clone());

    let result = api.login("notoken@example.com", "secret1").await;

    assert!(matches!(result, Err(ClientError::MissingField("access_token"))));
    assert_eq!(store.token().unwrap(), None);
}

#[tokio::test]
async fn test_login_never_sends_stored_token() {
    let recorder = Recorder::default();
    let base_url = spawn(api(recorder.clone())).await;
    let store = Arc::new(MemorySessionStore::new());
    store.save_token("stale-token").unwrap();
    let api = client(&base_url, store.clone());

    api.login("ana@example.com", "secret1").await.unwrap();

    assert_eq!(*recorder.login_headers.lock(), vec![false]);
    assert_eq!(store.token().unwrap().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_unauthorized_tears_down_session() {
    let base_url = spawn(api(Recorder::default())).await;
    let store = Arc::new(MemorySessionStore::new());
    store.save_token("stale-token").unwrap();
    store
        .save_user(&User::new("u1", "Ana", "ana@example.com", Role::Admin))
        .unwrap();

    let manager = SessionManager::new(client(&base_url, store.clone()), Arc::new(AuthzEngine::new()));
    assert!(manager.restore().unwrap().is_some());
    assert!(manager.engine().is_authenticated());

    let result = manager
        .guarded(manager.api().list_tasks(&TaskFilter::default()))
        .await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(store.load().unwrap(), None);
    assert!(!manager.engine().is_authenticated());
}

#[tokio::test]
async fn test_list_maps_backend_vocabulary() {
    let (api, _store) = signed_in(Recorder::default()).await;

    let tasks = api.list_tasks(&TaskFilter::default()).await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].status, TaskStatus::Todo);
    assert_eq!(tasks[1].status, TaskStatus::Completed);
    assert_eq!(tasks[0].assigned_user.as_ref().unwrap().name, "Ana");
    assert_eq!(tasks[0].due_date.as_deref(), Some("2024-05-10"));
}

#[tokio::test]
async fn test_envelope_without_data_is_empty_list() {
    let (api, _store) = signed_in(Recorder::default()).await;
    assert!(api.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_sends_full_instant() {
    let recorder = Recorder::default();
    let (api, _store) = signed_in(recorder.clone()).await;

    let task = api.create_task(&valid_draft()).await.unwrap().unwrap();
    assert_eq!(task.id, "t9");

    let bodies = recorder.bodies.lock();
    let body = &bodies[0];
    let expected = local_midnight(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    assert_eq!(body["due_date"], expected.as_str());
    assert_eq!(body["responsible_id"], "u1");
    assert_eq!(body["status"], "pendente");
    assert_eq!(body["type"], "edicao");
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_backend() {
    let recorder = Recorder::default();
    let (api, _store) = signed_in(recorder.clone()).await;

    let result = api.create_task(&TaskDraft::new("ab")).await;

    match result {
        Err(ClientError::Validation(errors)) => {
            assert!(errors.get("title").is_some());
            assert!(errors.get("due_date").is_some());
        }
        other => panic!("expected validation errors, got {:?}", other.map(|t| t.map(|t| t.id))),
    }
    assert!(recorder.bodies.lock().is_empty());
}

#[tokio::test]
async fn test_paginated_listing() {
    let recorder = Recorder::default();
    let (api, _store) = signed_in(recorder.clone()).await;

    let filter = TaskFilter::default().with_status(TaskStatus::InProgress);
    let page = api
        .list_tasks_page(&filter, PageRequest::new(2, 10))
        .await
        .unwrap();

    assert_eq!(page.total, 21);
    assert_eq!(page.page, 2);
    assert_eq!(page.last_page, 3);
    assert!(page.has_next());

    let queries = recorder.queries.lock();
    assert_eq!(queries[0].get("status").map(String::as_str), Some("fazendo"));
    assert_eq!(queries[0].get("page").map(String::as_str), Some("2"));
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn test_status_transition() {
    let recorder = Recorder::default();
    let (api, _store) = signed_in(recorder.clone()).await;

    let task = api.update_task_status("t1", TaskStatus::Completed).await.unwrap();

    assert_eq!(task.map(|t| t.status), Some(TaskStatus::Completed));
    assert_eq!(recorder.bodies.lock()[0], json!({ "status": "concluido" }));
}

#[tokio::test]
async fn test_update_acknowledged_without_data() {
    let recorder = Recorder::default();
    let (api, _store) = signed_in(recorder.clone()).await;

    let result = api
        .update_task("acknowledged", &TaskPatch::status(TaskStatus::Completed))
        .await;

    assert!(matches!(result, Ok(None)), "accepted write must not fail");
    assert_eq!(recorder.bodies.lock()[0], json!({ "status": "concluido" }));
}

#[tokio::test]
async fn test_not_found_and_delete() {
    let (api, _store) = signed_in(Recorder::default()).await;

    match api.get_task("missing").await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "Task not found"),
        other => panic!("expected not found, got {:?}", other.map(|t| t.map(|t| t.id))),
    }
    let task = api.get_task("t3").await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert!(api.delete_task("t3").await.is_ok());
}

#[tokio::test]
async fn test_dashboard_joins_both_loads() {
    let (api, _store) = signed_in(Recorder::default()).await;

    let dashboard = load_dashboard(&api, &TaskFilter::default()).await.unwrap();

    assert_eq!(dashboard.tasks.len(), 2);
    assert!(dashboard.users.is_empty());
    assert_eq!(dashboard.metrics.completion_rate, 50.0);
}

#[tokio::test]
async fn test_dashboard_fails_when_one_load_fails() {
    let app = Router::new()
        .route("/tasks", get(|| async { Json(json!({ "success": true, "data": [] })) }))
        .route(
            "/users",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "db down" }))) }),
        );
    let base_url = spawn(app).await;
    let api = client(&base_url, Arc::new(MemorySessionStore::new()));

    match load_dashboard(&api, &TaskFilter::default()).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("expected API error, got {:?}", other.map(|d| d.tasks.len())),
    }
}
