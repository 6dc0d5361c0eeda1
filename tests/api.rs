use std::time::{Duration, SystemTime};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use voluntariado::{
    rest::{router, AppState},
    storage::SqliteStorage,
};

fn temp_storage() -> (TempDir, SqliteStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::new(dir.path().join("voluntariado.sqlite"));
    storage.init().unwrap();
    (dir, storage)
}

fn app_for(storage: SqliteStorage) -> Router {
    router(AppState {
        storage,
        storage_timeout: Duration::from_secs(5),
        started_at: SystemTime::now(),
    })
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn ana_scenario() {
    let (_dir, storage) = temp_storage();
    let app = app_for(storage);

    let payload = json!({
        "nome": "Ana",
        "idade": 22,
        "telefone": 912345678u64,
        "genero": "Feminino"
    });
    let (status, body) = send(app.clone(), "POST", "/addVoluntario", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "Ana");
    assert!(body["id"].is_i64());

    let (status, body) = send(
        app.clone(),
        "GET",
        "/voluntariosByGenero?genero=Feminino",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert!(list.iter().any(|record| record["nome"] == "Ana"));

    let (status, body) = send(app, "GET", "/searchVoluntarios", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["telefone"], 912345678u64);
}

#[tokio::test]
async fn cruz_vermelha_scenario() {
    let (_dir, storage) = temp_storage();
    let app = app_for(storage);

    let payload = json!({
        "nome": "Cruz Vermelha",
        "telefone": 211234567u64,
        "morada": "Lisboa",
        "tarefas": "Distribuir alimentos"
    });
    let (status, _body) = send(app.clone(), "POST", "/addInstituicao", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "GET",
        "/getInstituicaoByName?nome=Cruz%20Vermelha",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["tarefas"], "Distribuir alimentos");
}

#[tokio::test]
async fn count_increases_with_each_insert() {
    let (_dir, storage) = temp_storage();
    let app = app_for(storage);

    let (status, body) = send(app.clone(), "GET", "/countVoluntarios", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(0));

    for i in 0..3 {
        let payload = json!({ "nome": format!("Voluntario {i}") });
        let (status, _) = send(app.clone(), "POST", "/addVoluntario", Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(app, "GET", "/countVoluntarios", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(3));
}

#[tokio::test]
async fn deleting_missing_volunteer_is_an_error() {
    let (_dir, storage) = temp_storage();
    let app = app_for(storage);

    let (status, body) = send(app, "DELETE", "/deleteVoluntario?nome=Ninguem", None).await;
    assert_ne!(status, StatusCode::OK);
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("msg").is_some());
}

#[tokio::test]
async fn records_survive_a_new_service_instance() {
    let (_dir, storage) = temp_storage();

    let app = app_for(storage.clone());
    let payload = json!({ "nome": "Bombeiros Voluntarios", "morada": "Coimbra" });
    let (status, _) = send(app, "POST", "/addInstituicao", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    // Same database file, fresh router.
    let app = app_for(storage);
    let (status, body) = send(app, "GET", "/searchInstituicao", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["nome"], "Bombeiros Voluntarios");
}

#[tokio::test]
async fn update_then_add_tarefa_roundtrip() {
    let (_dir, storage) = temp_storage();
    let app = app_for(storage);

    let payload = json!({ "nome": "Cruz Vermelha", "morada": "Lisboa" });
    send(app.clone(), "POST", "/addInstituicao", Some(payload)).await;

    let replacement = json!({ "nome": "Cruz Vermelha", "morada": "Porto" });
    let (status, body) = send(
        app.clone(),
        "PUT",
        "/updateInstituicao?nome=Cruz%20Vermelha",
        Some(replacement),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["morada"], "Porto");

    let (status, body) = send(
        app.clone(),
        "PUT",
        "/addTarefa?nome=Cruz%20Vermelha",
        Some(json!({ "tarefa": "Distribuir alimentos" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tarefas"], "Distribuir alimentos");

    let (status, body) = send(
        app,
        "PUT",
        "/addTarefa?nome=Cruz%20Vermelha",
        Some(json!({ "tarefa": "Recolher roupa" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tarefas"], "Distribuir alimentos; Recolher roupa");
}
