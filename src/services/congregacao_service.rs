// src/services/congregacao_service.rs

use std::sync::Arc;

use serde_json::json;

use crate::common::error::AppError;
use crate::models::congregacao::{Congregacao, Endereco, NovaCongregacao};
use crate::models::decode::{decodificar_congregacao, registrar_coercoes};
use crate::store::{Direcao, DocumentStore};

pub const COLECAO: &str = "congregacoes";

#[derive(Clone)]
pub struct CongregacaoService {
    store: Arc<dyn DocumentStore>,
}

impl CongregacaoService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn cadastrar(&self, payload: NovaCongregacao) -> Result<Congregacao, AppError> {
        let dados = json!({
            "codigo": payload.codigo,
            "endereco": {
                "rua": payload.rua,
                "numero": payload.numero,
                "bairro": payload.bairro,
                "cep": payload.cep,
            },
            "cultosDias": payload.cultos_dias,
            "ensaios": payload.ensaios,
            "rjm": payload.rjm,
        });
        let doc = self.store.criar(COLECAO, dados).await?;
        tracing::info!("Congregação cadastrada: id={} código={}", doc.id, payload.codigo);
        Ok(Congregacao {
            id: doc.id,
            codigo: payload.codigo,
            endereco: Endereco {
                rua: payload.rua,
                numero: payload.numero,
                bairro: payload.bairro,
                cep: payload.cep,
            },
            cultos_dias: payload.cultos_dias,
            ensaios: payload.ensaios,
            rjm: payload.rjm,
            created_at: Some(doc.created_at),
        })
    }

    /// Lista as congregações da mais recente para a mais antiga, normalizando
    /// documentos malformados na leitura.
    pub async fn listar(&self) -> Result<Vec<Congregacao>, AppError> {
        let consulta = self
            .store
            .consultar_ordenado(COLECAO, "createdAt", Direcao::Desc)
            .await?;
        Ok(consulta
            .snapshot()
            .iter()
            .map(|doc| {
                let decodificado = decodificar_congregacao(doc);
                registrar_coercoes(COLECAO, &doc.id, &decodificado.coercoes);
                decodificado.valor
            })
            .collect())
    }
}
