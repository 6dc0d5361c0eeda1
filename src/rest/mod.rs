use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio_util::sync::CancellationToken;

use crate::storage::Storage;

mod error;
mod extract;
mod handlers;
mod models;

pub use error::ApiError;

use handlers::{
    add_instituicao, add_tarefa, add_voluntario, count_instituicoes, count_voluntarios,
    delete_instituicao, delete_voluntario, get_instituicao_by_name, health, not_found,
    search_instituicoes, search_voluntario_by_name, search_voluntarios, update_instituicao,
    update_voluntario, voluntarios_by_genero,
};

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub storage: S,
    pub storage_timeout: Duration,
    pub started_at: std::time::SystemTime,
}

/// Route spellings (including `/SearchVoluntarioByName`'s leading capital and
/// the singular `/searchInstituicao`) are part of the public contract.
pub fn router<S: Storage + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health::<S>))
        .route("/addVoluntario", post(add_voluntario::<S>))
        .route("/updateVoluntario", put(update_voluntario::<S>))
        .route("/deleteVoluntario", delete(delete_voluntario::<S>))
        .route("/searchVoluntarios", get(search_voluntarios::<S>))
        .route("/SearchVoluntarioByName", get(search_voluntario_by_name::<S>))
        .route("/countVoluntarios", get(count_voluntarios::<S>))
        .route("/voluntariosByGenero", get(voluntarios_by_genero::<S>))
        .route("/addInstituicao", post(add_instituicao::<S>))
        .route("/updateInstituicao", put(update_instituicao::<S>))
        .route("/deleteInstituicao", delete(delete_instituicao::<S>))
        .route("/addTarefa", put(add_tarefa::<S>))
        .route("/searchInstituicao", get(search_instituicoes::<S>))
        .route("/getInstituicaoByName", get(get_instituicao_by_name::<S>))
        .route("/countInstituicoes", get(count_instituicoes::<S>))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    storage_timeout: Duration,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(AppState {
        storage,
        storage_timeout,
        started_at: std::time::SystemTime::now(),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
