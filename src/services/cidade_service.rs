// src/services/cidade_service.rs

use std::sync::Arc;

use serde_json::json;

use crate::common::error::AppError;
use crate::models::cidade::{Cidade, NovaCidade};
use crate::models::decode::{decodificar_cidade, registrar_coercoes};
use crate::store::DocumentStore;

pub const COLECAO: &str = "cidades";

#[derive(Clone)]
pub struct CidadeService {
    store: Arc<dyn DocumentStore>,
}

impl CidadeService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn cadastrar(&self, payload: NovaCidade) -> Result<Cidade, AppError> {
        let dados = json!({
            "nome": payload.nome,
            "uf": payload.uf,
        });
        let doc = self.store.criar(COLECAO, dados).await?;
        tracing::info!("Cidade cadastrada: id={} • {}/{}", doc.id, payload.nome, payload.uf);
        Ok(Cidade {
            id: doc.id,
            nome: payload.nome,
            uf: payload.uf,
            created_at: Some(doc.created_at),
        })
    }

    pub async fn listar(&self) -> Result<Vec<Cidade>, AppError> {
        let docs = self.store.listar(COLECAO).await?;
        Ok(docs
            .iter()
            .map(|doc| {
                let decodificado = decodificar_cidade(doc);
                registrar_coercoes(COLECAO, &doc.id, &decodificado.coercoes);
                decodificado.valor
            })
            .collect())
    }
}
