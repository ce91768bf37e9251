// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::services::{CargoService, CidadeService, CongregacaoService, MarcacaoService};
use crate::store::{Direcao, DocumentStore, PgDocumentStore};
use crate::views::MarcacoesView;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub store: Arc<dyn DocumentStore>,
    pub congregacao_service: CongregacaoService,
    pub marcacao_service: MarcacaoService,
    pub cargo_service: CargoService,
    pub cidade_service: CidadeService,
    pub marcacoes_view: MarcacoesView,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Migrações antes de qualquer consulta: a view de marcações abre uma
        // consulta ao vivo já na montagem do estado.
        sqlx::migrate!().run(&db_pool).await?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        // --- Monta o gráfico de dependências ---
        let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(db_pool.clone()));
        let congregacao_service = CongregacaoService::new(store.clone());
        let marcacao_service = MarcacaoService::new(store.clone());
        let cargo_service = CargoService::new(store.clone());
        let cidade_service = CidadeService::new(store.clone());

        let consulta = store
            .consultar_ordenado("marcacoes", "createdAt", Direcao::Desc)
            .await?;
        let marcacoes_view = MarcacoesView::nova(consulta);

        Ok(Self {
            db_pool,
            store,
            congregacao_service,
            marcacao_service,
            cargo_service,
            cidade_service,
            marcacoes_view,
        })
    }
}
