// src/services/cargo_service.rs

use std::sync::Arc;

use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::models::cargo::{CargoMinisterio, NovoCargo, DEPARTAMENTOS_PADRAO};
use crate::models::decode::{decodificar_cargo, registrar_coercoes};
use crate::store::DocumentStore;

pub const COLECAO: &str = "cargos_ministerios";

#[derive(Clone)]
pub struct CargoService {
    store: Arc<dyn DocumentStore>,
}

impl CargoService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn cadastrar(&self, payload: NovoCargo) -> Result<CargoMinisterio, AppError> {
        let dados = json!({
            "nome": payload.nome,
            "tipo": payload.tipo,
            "departamentos": payload.departamentos,
        });
        let doc = self.store.criar(COLECAO, dados).await?;
        tracing::info!("Cadastro salvo: id={} • {:?} • {}", doc.id, payload.tipo, payload.nome);
        Ok(CargoMinisterio {
            id: doc.id,
            nome: payload.nome,
            tipo: payload.tipo,
            departamentos: payload.departamentos,
            created_at: Some(doc.created_at),
        })
    }

    pub async fn listar(&self) -> Result<Vec<CargoMinisterio>, AppError> {
        let docs = self.store.listar(COLECAO).await?;
        Ok(docs
            .iter()
            .map(|doc| {
                let decodificado = decodificar_cargo(doc);
                registrar_coercoes(COLECAO, &doc.id, &decodificado.coercoes);
                decodificado.valor
            })
            .collect())
    }

    /// Departamentos oferecidos no formulário. A coleção `departamentos` ainda
    /// é opcional: vazia ou indisponível, valem os padrões.
    pub async fn departamentos(&self) -> Vec<String> {
        match self.store.listar("departamentos").await {
            Ok(docs) if !docs.is_empty() => docs
                .iter()
                .filter_map(|d| {
                    d.dados
                        .get("nome")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect(),
            _ => DEPARTAMENTOS_PADRAO.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cargo::TipoCargo;
    use crate::store::{DocumentStore, MemDocumentStore};

    #[tokio::test]
    async fn cadastrar_e_listar_preserva_os_campos() {
        let store = Arc::new(MemDocumentStore::new());
        let service = CargoService::new(store);
        let criado = service
            .cadastrar(NovoCargo {
                nome: "Regente".into(),
                tipo: TipoCargo::Cargo,
                departamentos: vec!["Música".into(), "Orquestra".into()],
            })
            .await
            .unwrap();

        let lista = service.listar().await.unwrap();
        assert_eq!(lista, vec![criado]);
    }

    #[tokio::test]
    async fn departamentos_caem_no_padrao_com_colecao_vazia() {
        let store = Arc::new(MemDocumentStore::new());
        let service = CargoService::new(store);
        assert_eq!(service.departamentos().await, DEPARTAMENTOS_PADRAO.to_vec());
    }

    #[tokio::test]
    async fn departamentos_vem_da_colecao_quando_existe() {
        let store = Arc::new(MemDocumentStore::new());
        store
            .criar("departamentos", json!({"nome": "Portaria"}))
            .await
            .unwrap();
        let service = CargoService::new(store);
        assert_eq!(service.departamentos().await, vec!["Portaria".to_string()]);
    }
}
