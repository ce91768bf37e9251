// src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use agenda_backend::config::AppState;
use agenda_backend::docs::ApiDoc;
use agenda_backend::handlers;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let congregacao_routes = Router::new().route(
        "/",
        post(handlers::congregacoes::cadastrar_congregacao)
            .get(handlers::congregacoes::listar_congregacoes),
    );

    let marcacao_routes = Router::new()
        .route(
            "/",
            post(handlers::marcacoes::cadastrar_marcacao)
                .get(handlers::marcacoes::listar_marcacoes),
        )
        .route(
            "/congregacoes",
            get(handlers::marcacoes::listar_opcoes_congregacoes),
        );

    let cargo_routes = Router::new()
        .route(
            "/",
            post(handlers::cargos::cadastrar_cargo).get(handlers::cargos::listar_cargos),
        )
        .route("/departamentos", get(handlers::cargos::listar_departamentos));

    let cidade_routes = Router::new().route(
        "/",
        post(handlers::cidades::cadastrar_cidade).get(handlers::cidades::listar_cidades),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/congregacoes", congregacao_routes)
        .nest("/api/marcacoes", marcacao_routes)
        .nest("/api/cargos", cargo_routes)
        .nest("/api/cidades", cidade_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
