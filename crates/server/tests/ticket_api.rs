//! In-process API tests against the full router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tickethealth_core::{Config, FileMedium, LocalTicketRepo, MemoryMedium, StorageAdapter};
use tickethealth_server::{create_router, AppState};

fn test_app() -> Router {
    let adapter = StorageAdapter::probe(Box::new(MemoryMedium::new()));
    let repo = LocalTicketRepo::new(adapter);
    let state = Arc::new(AppState::new(Config::default(), repo));
    create_router(state)
}

fn file_app(dir: &std::path::Path) -> Router {
    let medium = FileMedium::new(dir).unwrap();
    let repo = LocalTicketRepo::new(StorageAdapter::probe(Box::new(medium)));
    let state = Arc::new(AppState::new(Config::default(), repo));
    create_router(state)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn first_ticket_id(app: &Router) -> String {
    let (status, body) = request(app, "GET", "/api/v1/tickets", None).await;
    assert_eq!(status, StatusCode::OK);
    body["tickets"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = request(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_get_config_reports_defaults() {
    let app = test_app();
    let (status, body) = request(&app, "GET", "/api/v1/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["server"]["port"], 3333);
    assert_eq!(body["storage"]["backend"], "file");
}

#[tokio::test]
async fn test_list_starts_with_demo_seed() {
    let app = test_app();
    let (status, body) = request(&app, "GET", "/api/v1/tickets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["tickets"][0]["user_name"], "Fernanda");
    assert_eq!(body["tickets"][1]["status"], "closed");
}

#[tokio::test]
async fn test_create_and_list() {
    let app = test_app();
    let (status, created) = request(
        &app,
        "POST",
        "/api/v1/tickets",
        Some(json!({
            "equipment": "  Impressora   HP ",
            "user_name": "Marina",
            "description": "Não imprime nada.",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["equipment"], "Impressora HP");
    assert_eq!(created["status"], "open");
    assert!(created["id"].as_str().unwrap().starts_with("t_"));
    assert!(created["closed_at"].is_null());

    let (_, body) = request(&app, "GET", "/api/v1/tickets", None).await;
    assert_eq!(body["total"], 4);
    assert_eq!(body["tickets"][0]["id"], created["id"]);
}

#[tokio::test]
async fn test_create_validation_failure() {
    let app = test_app();
    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/tickets",
        Some(json!({"equipment": "ab", "description": "Descrição ok."})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Informe equipamento/local com pelo menos 3 caracteres."
    );

    let (_, list) = request(&app, "GET", "/api/v1/tickets", None).await;
    assert_eq!(list["total"], 3);
}

#[tokio::test]
async fn test_list_status_filter() {
    let app = test_app();

    let (_, body) = request(&app, "GET", "/api/v1/tickets?status=closed", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["tickets"][0]["status"], "closed");

    let (_, body) = request(&app, "GET", "/api/v1/tickets?status=open", None).await;
    assert_eq!(body["total"], 2);

    // Unknown filter values are ignored rather than rejected
    let (status, body) = request(&app, "GET", "/api/v1/tickets?status=bogus", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_list_search() {
    let app = test_app();

    let (_, body) = request(&app, "GET", "/api/v1/tickets?search=dell", None).await;
    assert_eq!(body["total"], 1);
    assert!(body["tickets"][0]["equipment"]
        .as_str()
        .unwrap()
        .contains("Monitor Dell"));

    let (_, body) = request(&app, "GET", "/api/v1/tickets?search=carlos", None).await;
    assert_eq!(body["total"], 1);

    let (_, body) = request(&app, "GET", "/api/v1/tickets?search=zzz", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_update_ticket() {
    let app = test_app();
    let id = first_ticket_id(&app).await;

    let (status, body) = request(
        &app,
        "PATCH",
        &format!("/api/v1/tickets/{id}"),
        Some(json!({"description": "Sem sinal de vídeo, cabo já trocado."})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Sem sinal de vídeo, cabo já trocado.");
    // Untouched fields are preserved
    assert_eq!(body["user_name"], "Fernanda");
}

#[tokio::test]
async fn test_update_unknown_ticket_is_404() {
    let app = test_app();
    let (status, body) = request(
        &app,
        "PATCH",
        "/api/v1/tickets/ghost",
        Some(json!({"description": "Qualquer coisa aqui."})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Chamado não encontrado para atualização.");
}

#[tokio::test]
async fn test_close_ticket() {
    let app = test_app();
    let id = first_ticket_id(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/v1/tickets/{id}/close"),
        Some(json!({"solution": "Cabo de vídeo substituído."})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "closed");
    assert_eq!(body["solution"], "Cabo de vídeo substituído.");
    assert!(body["closed_at"].is_string());
}

#[tokio::test]
async fn test_close_with_short_solution_is_422() {
    let app = test_app();
    let id = first_ticket_id(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/v1/tickets/{id}/close"),
        Some(json!({"solution": "ok"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "A solução precisa ter pelo menos 5 caracteres.");
}

#[tokio::test]
async fn test_close_unknown_ticket_is_404() {
    let app = test_app();
    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/tickets/ghost/close",
        Some(json!({"solution": "Solução longa o bastante."})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Chamado não encontrado para encerramento.");
}

#[tokio::test]
async fn test_delete_ticket() {
    let app = test_app();
    let id = first_ticket_id(&app).await;

    let (status, _) = request(&app, "DELETE", &format!("/api/v1/tickets/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = request(&app, "DELETE", &format!("/api/v1/tickets/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Chamado não encontrado para remoção.");

    let (_, list) = request(&app, "GET", "/api/v1/tickets", None).await;
    assert_eq!(list["total"], 2);
}

#[tokio::test]
async fn test_reset_seed_restores_demo_data() {
    let app = test_app();

    let (_, created) = request(
        &app,
        "POST",
        "/api/v1/tickets",
        Some(json!({"equipment": "Projetor", "description": "Lâmpada queimada."})),
    )
    .await;

    let (status, body) = request(&app, "POST", "/api/v1/tickets/seed/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let (_, list) = request(&app, "GET", "/api/v1/tickets", None).await;
    assert_eq!(list["total"], 3);
    assert!(list["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["id"] != created["id"]));
}

#[tokio::test]
async fn test_file_backend_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let app = file_app(dir.path());
    let (status, created) = request(
        &app,
        "POST",
        "/api/v1/tickets",
        Some(json!({"equipment": "Nobreak", "description": "Bateria não segura carga."})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    drop(app);

    let app = file_app(dir.path());
    let (_, list) = request(&app, "GET", "/api/v1/tickets", None).await;
    assert_eq!(list["total"], 4);
    assert_eq!(list["tickets"][0]["id"], created["id"]);
}

#[tokio::test]
async fn test_storage_status_is_healthy_on_memory_backend() {
    let app = test_app();
    let (status, body) = request(&app, "GET", "/api/v1/storage/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "persistent");
    assert!(body["issue"].is_null());
}
