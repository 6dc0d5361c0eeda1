use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    storage::{Storage, StoreResult},
    types::{Instituicao, InstituicaoFilter, Stored, Voluntario, VoluntarioFilter},
};

use super::{
    error::ApiError,
    extract::{Json, Query},
    models::{ErrorResponse, GeneroQuery, HealthResponse, NomeQuery, TarefaRequest},
    AppState,
};

/// Runs one synchronous storage operation off the async runtime, bounded by
/// the per-request timeout. A call that outlives the timeout answers 503;
/// the blocking task itself cannot be cancelled and is left to finish.
async fn run_storage<T, F>(timeout: Duration, op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(op);
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(join_err)) => Err(ApiError::Persistence(format!(
            "storage task failed: {join_err}"
        ))),
        Err(_) => Err(ApiError::Timeout),
    }
}

const EMPTY_FILTER_MSG: &str = "at least one filter field is required in the query string";

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        axum::Json(HealthResponse {
            status: "ok",
            uptime_secs,
        }),
    )
}

pub async fn add_voluntario<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(record): Json<Voluntario>,
) -> Result<Json<Stored<Voluntario>>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let stored = run_storage(storage_timeout, move || storage.insert_voluntario(record)).await?;
    log::info!("voluntario {} created with id {}", stored.record.nome, stored.id);
    Ok(Json(stored))
}

pub async fn update_voluntario<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(filter): Query<VoluntarioFilter>,
    Json(record): Json<Voluntario>,
) -> Result<Json<Stored<Voluntario>>, ApiError> {
    if filter.is_empty() {
        return Err(ApiError::validation(EMPTY_FILTER_MSG));
    }
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let stored = run_storage(storage_timeout, move || {
        storage.update_voluntario(&filter, record)
    })
    .await?;
    Ok(Json(stored))
}

pub async fn delete_voluntario<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(filter): Query<VoluntarioFilter>,
) -> Result<Json<Stored<Voluntario>>, ApiError> {
    if filter.is_empty() {
        return Err(ApiError::validation(EMPTY_FILTER_MSG));
    }
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let stored = run_storage(storage_timeout, move || storage.delete_voluntario(&filter)).await?;
    log::info!("voluntario {} deleted", stored.id);
    Ok(Json(stored))
}

pub async fn search_voluntarios<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Stored<Voluntario>>>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let records = run_storage(storage_timeout, move || storage.list_voluntarios()).await?;
    Ok(Json(records))
}

pub async fn search_voluntario_by_name<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<NomeQuery>,
) -> Result<Json<Vec<Stored<Voluntario>>>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let filter = VoluntarioFilter::by_nome(query.nome);
    let records = run_storage(storage_timeout, move || storage.find_voluntarios(&filter)).await?;
    Ok(Json(records))
}

pub async fn count_voluntarios<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<u64>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let count = run_storage(storage_timeout, move || storage.count_voluntarios()).await?;
    Ok(Json(count))
}

pub async fn voluntarios_by_genero<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<GeneroQuery>,
) -> Result<Json<Vec<Stored<Voluntario>>>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let filter = VoluntarioFilter {
        genero: Some(query.genero),
        ..VoluntarioFilter::default()
    };
    let records = run_storage(storage_timeout, move || storage.find_voluntarios(&filter)).await?;
    Ok(Json(records))
}

pub async fn add_instituicao<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(record): Json<Instituicao>,
) -> Result<Json<Stored<Instituicao>>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let stored = run_storage(storage_timeout, move || storage.insert_instituicao(record)).await?;
    log::info!(
        "instituicao {} created with id {}",
        stored.record.nome,
        stored.id
    );
    Ok(Json(stored))
}

pub async fn update_instituicao<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(filter): Query<InstituicaoFilter>,
    Json(record): Json<Instituicao>,
) -> Result<Json<Stored<Instituicao>>, ApiError> {
    if filter.is_empty() {
        return Err(ApiError::validation(EMPTY_FILTER_MSG));
    }
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let stored = run_storage(storage_timeout, move || {
        storage.update_instituicao(&filter, record)
    })
    .await?;
    Ok(Json(stored))
}

pub async fn delete_instituicao<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(filter): Query<InstituicaoFilter>,
) -> Result<Json<Stored<Instituicao>>, ApiError> {
    if filter.is_empty() {
        return Err(ApiError::validation(EMPTY_FILTER_MSG));
    }
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let stored = run_storage(storage_timeout, move || storage.delete_instituicao(&filter)).await?;
    log::info!("instituicao {} deleted", stored.id);
    Ok(Json(stored))
}

pub async fn add_tarefa<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(filter): Query<InstituicaoFilter>,
    Json(body): Json<TarefaRequest>,
) -> Result<Json<Stored<Instituicao>>, ApiError> {
    if filter.is_empty() {
        return Err(ApiError::validation(EMPTY_FILTER_MSG));
    }
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let stored = run_storage(storage_timeout, move || {
        storage.add_tarefa(&filter, &body.tarefa)
    })
    .await?;
    Ok(Json(stored))
}

pub async fn search_instituicoes<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Stored<Instituicao>>>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let records = run_storage(storage_timeout, move || storage.list_instituicoes()).await?;
    Ok(Json(records))
}

pub async fn get_instituicao_by_name<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<NomeQuery>,
) -> Result<Json<Vec<Stored<Instituicao>>>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let filter = InstituicaoFilter::by_nome(query.nome);
    let records = run_storage(storage_timeout, move || storage.find_instituicoes(&filter)).await?;
    Ok(Json(records))
}

pub async fn count_instituicoes<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<u64>, ApiError> {
    let AppState {
        storage,
        storage_timeout,
        ..
    } = state;
    let count = run_storage(storage_timeout, move || storage.count_instituicoes()).await?;
    Ok(Json(count))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        axum::Json(ErrorResponse {
            msg: "endpoint not found".to_string(),
        }),
    )
}
