// src/services/marcacao_service.rs

use std::sync::Arc;

use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::models::marcacao::{Marcacao, NovaMarcacao, CONGREGACOES_PADRAO};
use crate::store::DocumentStore;

pub const COLECAO: &str = "marcacoes";

#[derive(Clone)]
pub struct MarcacaoService {
    store: Arc<dyn DocumentStore>,
}

impl MarcacaoService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn cadastrar(&self, payload: NovaMarcacao) -> Result<Marcacao, AppError> {
        let dados = json!({
            "tipo": payload.tipo,
            "congregacao": payload.congregacao,
            "data": payload.data,
            "hora": payload.hora,
        });
        let doc = self.store.criar(COLECAO, dados).await?;
        tracing::info!(
            "Marcação de {} criada: id={} {} • {} {}",
            payload.tipo.rotulo(),
            doc.id,
            payload.congregacao,
            payload.data,
            payload.hora
        );
        Ok(Marcacao {
            id: doc.id,
            tipo: payload.tipo,
            congregacao: payload.congregacao,
            data: payload.data,
            hora: payload.hora,
            created_at: Some(doc.created_at),
        })
    }

    /// Nomes de congregação para o seletor do formulário. A leitura é única e
    /// tolerante: coleção vazia ou store fora do ar caem no conjunto padrão.
    pub async fn opcoes_congregacoes(&self) -> Vec<String> {
        match self.store.listar("congregacoes").await {
            Ok(docs) if !docs.is_empty() => docs
                .iter()
                .map(|d| {
                    d.dados
                        .get("nome")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| d.id.clone())
                })
                .collect(),
            _ => CONGREGACOES_PADRAO.iter().map(|n| n.to_string()).collect(),
        }
    }
}
