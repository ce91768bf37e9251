// src/handlers/congregacoes.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::congregacao::{Congregacao, NovaCongregacao},
};

// POST /api/congregacoes
#[utoipa::path(
    post,
    path = "/api/congregacoes",
    tag = "Congregações",
    request_body = NovaCongregacao,
    responses(
        (status = 201, description = "Congregação cadastrada", body = Congregacao),
        (status = 400, description = "Dados inválidos"),
        (status = 503, description = "Armazenamento indisponível")
    )
)]
pub async fn cadastrar_congregacao(
    State(app_state): State<AppState>,
    Json(payload): Json<NovaCongregacao>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let congregacao = app_state.congregacao_service.cadastrar(payload).await?;
    Ok((StatusCode::CREATED, Json(congregacao)))
}

// GET /api/congregacoes
#[utoipa::path(
    get,
    path = "/api/congregacoes",
    tag = "Congregações",
    responses(
        (status = 200, description = "Lista de congregações, da mais recente para a mais antiga", body = Vec<Congregacao>)
    )
)]
pub async fn listar_congregacoes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let congregacoes = app_state.congregacao_service.listar().await?;
    Ok((StatusCode::OK, Json(congregacoes)))
}
