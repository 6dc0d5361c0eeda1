use serde::{Deserialize, Serialize};

/// Failure body shape shared by every route.
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
}

/// Query input of the by-name search routes.
#[derive(Serialize, Deserialize)]
pub struct NomeQuery {
    pub nome: String,
}

/// Query input of `/voluntariosByGenero`.
#[derive(Serialize, Deserialize)]
pub struct GeneroQuery {
    pub genero: String,
}

/// Body of `/addTarefa`.
#[derive(Serialize, Deserialize)]
pub struct TarefaRequest {
    pub tarefa: String,
}
