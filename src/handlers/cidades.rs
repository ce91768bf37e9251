// src/handlers/cidades.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::cidade::{Cidade, NovaCidade},
};

// POST /api/cidades
#[utoipa::path(
    post,
    path = "/api/cidades",
    tag = "Cidades",
    request_body = NovaCidade,
    responses(
        (status = 201, description = "Cidade cadastrada", body = Cidade),
        (status = 400, description = "Dados inválidos"),
        (status = 503, description = "Armazenamento indisponível")
    )
)]
pub async fn cadastrar_cidade(
    State(app_state): State<AppState>,
    Json(payload): Json<NovaCidade>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let cidade = app_state.cidade_service.cadastrar(payload).await?;
    Ok((StatusCode::CREATED, Json(cidade)))
}

// GET /api/cidades
#[utoipa::path(
    get,
    path = "/api/cidades",
    tag = "Cidades",
    responses(
        (status = 200, description = "Lista de cidades", body = Vec<Cidade>)
    )
)]
pub async fn listar_cidades(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cidades = app_state.cidade_service.listar().await?;
    Ok((StatusCode::OK, Json(cidades)))
}
