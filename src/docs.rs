// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Congregações ---
        handlers::congregacoes::cadastrar_congregacao,
        handlers::congregacoes::listar_congregacoes,

        // --- Marcações ---
        handlers::marcacoes::cadastrar_marcacao,
        handlers::marcacoes::listar_marcacoes,
        handlers::marcacoes::listar_opcoes_congregacoes,

        // --- Cargos e Ministérios ---
        handlers::cargos::cadastrar_cargo,
        handlers::cargos::listar_cargos,
        handlers::cargos::listar_departamentos,

        // --- Cidades ---
        handlers::cidades::cadastrar_cidade,
        handlers::cidades::listar_cidades,
    ),
    components(
        schemas(
            // --- Congregações ---
            models::congregacao::Congregacao,
            models::congregacao::NovaCongregacao,
            models::congregacao::Endereco,
            models::congregacao::Ensaio,
            models::congregacao::RjmDia,
            models::congregacao::DiaSemana,
            models::congregacao::TipoEnsaio,
            models::congregacao::SemanaDoMes,

            // --- Marcações ---
            models::marcacao::Marcacao,
            models::marcacao::NovaMarcacao,
            models::marcacao::TipoMarcacao,
            models::marcacao::FiltroTipo,

            // --- Cargos e Ministérios ---
            models::cargo::CargoMinisterio,
            models::cargo::NovoCargo,
            models::cargo::TipoCargo,

            // --- Cidades ---
            models::cidade::Cidade,
            models::cidade::NovaCidade,
        )
    ),
    tags(
        (name = "Congregações", description = "Cadastro e listagem de congregações"),
        (name = "Marcações", description = "Marcações de coletas, serviços e RJM"),
        (name = "Cargos e Ministérios", description = "Cadastro de cargos e ministérios"),
        (name = "Cidades", description = "Cadastro de cidades e UF"),
    )
)]
pub struct ApiDoc;
