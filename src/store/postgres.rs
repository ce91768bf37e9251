// src/store/postgres.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::store::{ChaveConsulta, ConsultaAoVivo, Direcao, DocumentStore, Documento};

const CAPACIDADE_CANAL: usize = 16;

/// Implementação de produção do `DocumentStore` sobre a tabela `documentos`
/// (uma linha por documento, conteúdo em JSONB). Depois de cada gravação, as
/// consultas abertas da coleção recebem o conjunto de resultados reexecutado.
pub struct PgDocumentStore {
    pool: PgPool,
    canais: Mutex<HashMap<ChaveConsulta, broadcast::Sender<Vec<Documento>>>>,
}

#[derive(FromRow)]
struct Linha {
    id: Uuid,
    dados: Value,
    created_at: DateTime<Utc>,
}

impl From<Linha> for Documento {
    fn from(linha: Linha) -> Self {
        Documento {
            id: linha.id.to_string(),
            dados: linha.dados,
            created_at: linha.created_at,
        }
    }
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            canais: Mutex::new(HashMap::new()),
        }
    }

    async fn snapshot(&self, chave: &ChaveConsulta) -> Result<Vec<Documento>, AppError> {
        // `campo` e `direcao` vêm de chamadas internas, nunca de entrada do
        // usuário; só `colecao` é parâmetro da query.
        let direcao = match chave.direcao {
            Direcao::Asc => "ASC",
            Direcao::Desc => "DESC",
        };
        let ordem = match chave.campo.as_str() {
            "createdAt" => "created_at".to_string(),
            outro => format!("dados->>'{}'", outro.replace('\'', "")),
        };
        let sql = format!(
            "SELECT id, dados, created_at FROM documentos WHERE colecao = $1 ORDER BY {ordem} {direcao}"
        );
        let linhas = sqlx::query_as::<_, Linha>(&sql)
            .bind(&chave.colecao)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(linhas.into_iter().map(Documento::from).collect())
    }

    async fn publicar(&self, colecao: &str) {
        let chaves: Vec<(ChaveConsulta, broadcast::Sender<Vec<Documento>>)> = {
            let canais = self.canais.lock().unwrap_or_else(|e| e.into_inner());
            canais
                .iter()
                .filter(|(chave, _)| chave.colecao == colecao)
                .map(|(chave, tx)| (chave.clone(), tx.clone()))
                .collect()
        };
        for (chave, tx) in chaves {
            match self.snapshot(&chave).await {
                Ok(docs) => {
                    let _ = tx.send(docs);
                }
                Err(e) => {
                    tracing::error!("Falha ao reemitir snapshot de {}: {}", colecao, e);
                }
            }
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn criar(&self, colecao: &str, dados: Value) -> Result<Documento, AppError> {
        let linha = sqlx::query_as::<_, Linha>(
            "INSERT INTO documentos (colecao, dados) VALUES ($1, $2) RETURNING id, dados, created_at",
        )
        .bind(colecao)
        .bind(&dados)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        self.publicar(colecao).await;
        Ok(linha.into())
    }

    async fn consultar_ordenado(
        &self,
        colecao: &str,
        campo: &str,
        direcao: Direcao,
    ) -> Result<ConsultaAoVivo, AppError> {
        let chave = ChaveConsulta {
            colecao: colecao.to_string(),
            campo: campo.to_string(),
            direcao,
        };
        let snapshot = self.snapshot(&chave).await?;
        let rx = {
            let mut canais = self.canais.lock().unwrap_or_else(|e| e.into_inner());
            canais
                .entry(chave)
                .or_insert_with(|| broadcast::channel(CAPACIDADE_CANAL).0)
                .subscribe()
        };
        Ok(ConsultaAoVivo::new(snapshot, rx))
    }

    async fn listar(&self, colecao: &str) -> Result<Vec<Documento>, AppError> {
        let linhas = sqlx::query_as::<_, Linha>(
            "SELECT id, dados, created_at FROM documentos WHERE colecao = $1 ORDER BY created_at ASC",
        )
        .bind(colecao)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(linhas.into_iter().map(Documento::from).collect())
    }
}
