// src/handlers/marcacoes.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::marcacao::{FiltroTipo, Marcacao, NovaMarcacao},
    views::FILTRO_TODAS,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltrosMarcacao {
    /// Tipo de marcação: todas, coleta, servico ou rjm.
    #[serde(default)]
    pub tipo: FiltroTipo,
    /// Nome exato da congregação, ou "todas".
    #[serde(default = "padrao_todas")]
    pub congregacao: String,
}

fn padrao_todas() -> String {
    FILTRO_TODAS.to_string()
}

// POST /api/marcacoes
#[utoipa::path(
    post,
    path = "/api/marcacoes",
    tag = "Marcações",
    request_body = NovaMarcacao,
    responses(
        (status = 201, description = "Marcação criada", body = Marcacao),
        (status = 400, description = "Dados inválidos"),
        (status = 503, description = "Armazenamento indisponível")
    )
)]
pub async fn cadastrar_marcacao(
    State(app_state): State<AppState>,
    Json(payload): Json<NovaMarcacao>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let marcacao = app_state.marcacao_service.cadastrar(payload).await?;
    Ok((StatusCode::CREATED, Json(marcacao)))
}

// GET /api/marcacoes?tipo=coleta&congregacao=todas
#[utoipa::path(
    get,
    path = "/api/marcacoes",
    tag = "Marcações",
    params(FiltrosMarcacao),
    responses(
        (status = 200, description = "Marcações filtradas, na ordem entregue pelo armazenamento", body = Vec<Marcacao>)
    )
)]
pub async fn listar_marcacoes(
    State(app_state): State<AppState>,
    Query(filtros): Query<FiltrosMarcacao>,
) -> Result<impl IntoResponse, AppError> {
    let marcacoes = app_state
        .marcacoes_view
        .filtrar(filtros.tipo, &filtros.congregacao);
    Ok((StatusCode::OK, Json(marcacoes)))
}

// GET /api/marcacoes/congregacoes
#[utoipa::path(
    get,
    path = "/api/marcacoes/congregacoes",
    tag = "Marcações",
    responses(
        (status = 200, description = "Nomes de congregação para o seletor do formulário", body = Vec<String>)
    )
)]
pub async fn listar_opcoes_congregacoes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let opcoes = app_state.marcacao_service.opcoes_congregacoes().await;
    Ok((StatusCode::OK, Json(opcoes)))
}
