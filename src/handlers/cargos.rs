// src/handlers/cargos.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::cargo::{CargoMinisterio, NovoCargo},
};

// POST /api/cargos
#[utoipa::path(
    post,
    path = "/api/cargos",
    tag = "Cargos e Ministérios",
    request_body = NovoCargo,
    responses(
        (status = 201, description = "Cargo ou ministério cadastrado", body = CargoMinisterio),
        (status = 400, description = "Dados inválidos"),
        (status = 503, description = "Armazenamento indisponível")
    )
)]
pub async fn cadastrar_cargo(
    State(app_state): State<AppState>,
    Json(payload): Json<NovoCargo>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let cargo = app_state.cargo_service.cadastrar(payload).await?;
    Ok((StatusCode::CREATED, Json(cargo)))
}

// GET /api/cargos
#[utoipa::path(
    get,
    path = "/api/cargos",
    tag = "Cargos e Ministérios",
    responses(
        (status = 200, description = "Lista de cargos e ministérios", body = Vec<CargoMinisterio>)
    )
)]
pub async fn listar_cargos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cargos = app_state.cargo_service.listar().await?;
    Ok((StatusCode::OK, Json(cargos)))
}

// GET /api/cargos/departamentos
#[utoipa::path(
    get,
    path = "/api/cargos/departamentos",
    tag = "Cargos e Ministérios",
    responses(
        (status = 200, description = "Departamentos disponíveis no formulário", body = Vec<String>)
    )
)]
pub async fn listar_departamentos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let departamentos = app_state.cargo_service.departamentos().await;
    Ok((StatusCode::OK, Json(departamentos)))
}
