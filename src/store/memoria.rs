// src/store/memoria.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::store::{ordenar, ChaveConsulta, ConsultaAoVivo, Direcao, DocumentStore, Documento};

const CAPACIDADE_CANAL: usize = 16;

/// Implementação em memória do `DocumentStore`, usada nos testes no lugar do
/// banco. O interruptor `indisponivel` simula queda do armazenamento.
#[derive(Default)]
pub struct MemDocumentStore {
    colecoes: Mutex<HashMap<String, Vec<Documento>>>,
    canais: Mutex<HashMap<ChaveConsulta, broadcast::Sender<Vec<Documento>>>>,
    ultimo_timestamp: Mutex<Option<DateTime<Utc>>>,
    indisponivel: AtomicBool,
}

impl MemDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faz todas as operações seguintes falharem com `StoreUnavailable`.
    pub fn derrubar(&self) {
        self.indisponivel.store(true, Ordering::SeqCst);
    }

    pub fn restaurar(&self) {
        self.indisponivel.store(false, Ordering::SeqCst);
    }

    fn verificar_disponivel(&self) -> Result<(), AppError> {
        if self.indisponivel.load(Ordering::SeqCst) {
            Err(AppError::StoreUnavailable(
                "armazenamento em memória derrubado".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    // Timestamps estritamente crescentes, para a ordenação por createdAt ser
    // determinística mesmo com gravações consecutivas.
    fn proximo_timestamp(&self) -> DateTime<Utc> {
        let mut ultimo = self
            .ultimo_timestamp
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let agora = Utc::now();
        let proximo = match *ultimo {
            Some(anterior) if agora <= anterior => anterior + Duration::microseconds(1),
            _ => agora,
        };
        *ultimo = Some(proximo);
        proximo
    }

    fn snapshot(&self, chave: &ChaveConsulta) -> Vec<Documento> {
        let colecoes = self.colecoes.lock().unwrap_or_else(|e| e.into_inner());
        let mut docs = colecoes.get(&chave.colecao).cloned().unwrap_or_default();
        ordenar(&mut docs, &chave.campo, chave.direcao);
        docs
    }

    fn publicar(&self, colecao: &str) {
        let chaves: Vec<(ChaveConsulta, broadcast::Sender<Vec<Documento>>)> = {
            let canais = self.canais.lock().unwrap_or_else(|e| e.into_inner());
            canais
                .iter()
                .filter(|(chave, _)| chave.colecao == colecao)
                .map(|(chave, tx)| (chave.clone(), tx.clone()))
                .collect()
        };
        for (chave, tx) in chaves {
            let _ = tx.send(self.snapshot(&chave));
        }
    }
}

#[async_trait]
impl DocumentStore for MemDocumentStore {
    async fn criar(&self, colecao: &str, dados: Value) -> Result<Documento, AppError> {
        self.verificar_disponivel()?;
        let doc = Documento {
            id: Uuid::new_v4().to_string(),
            dados,
            created_at: self.proximo_timestamp(),
        };
        {
            let mut colecoes = self.colecoes.lock().unwrap_or_else(|e| e.into_inner());
            colecoes
                .entry(colecao.to_string())
                .or_default()
                .push(doc.clone());
        }
        self.publicar(colecao);
        Ok(doc)
    }

    async fn consultar_ordenado(
        &self,
        colecao: &str,
        campo: &str,
        direcao: Direcao,
    ) -> Result<ConsultaAoVivo, AppError> {
        self.verificar_disponivel()?;
        let chave = ChaveConsulta {
            colecao: colecao.to_string(),
            campo: campo.to_string(),
            direcao,
        };
        let snapshot = self.snapshot(&chave);
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
        self.verificar_disponivel()?;
        let colecoes = self.colecoes.lock().unwrap_or_else(|e| e.into_inner());
        Ok(colecoes.get(colecao).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn criar_atribui_id_e_timestamp() {
        let store = MemDocumentStore::new();
        let doc = store
            .criar("cidades", json!({"nome": "São Paulo", "uf": "SP"}))
            .await
            .unwrap();
        assert!(!doc.id.is_empty());
        let docs = store.listar("cidades").await.unwrap();
        assert_eq!(docs, vec![doc]);
    }

    #[tokio::test]
    async fn colecao_ausente_lista_vazia() {
        let store = MemDocumentStore::new();
        assert!(store.listar("congregacoes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn consulta_ordenada_desc_traz_o_mais_recente_primeiro() {
        let store = MemDocumentStore::new();
        store.criar("marcacoes", json!({"n": 1})).await.unwrap();
        store.criar("marcacoes", json!({"n": 2})).await.unwrap();
        let consulta = store
            .consultar_ordenado("marcacoes", "createdAt", Direcao::Desc)
            .await
            .unwrap();
        let ns: Vec<_> = consulta
            .snapshot()
            .iter()
            .map(|d| d.dados["n"].as_u64().unwrap())
            .collect();
        assert_eq!(ns, [2, 1]);
    }

    #[tokio::test]
    async fn assinatura_recebe_snapshot_inicial_e_atualizacoes() {
        let store = Arc::new(MemDocumentStore::new());
        store.criar("marcacoes", json!({"n": 1})).await.unwrap();

        let recebidos = Arc::new(Mutex::new(Vec::new()));
        let alvo = recebidos.clone();
        let consulta = store
            .consultar_ordenado("marcacoes", "createdAt", Direcao::Desc)
            .await
            .unwrap();
        let _assinatura = consulta.assinar(move |docs| {
            alvo.lock().unwrap().push(docs.len());
        });

        store.criar("marcacoes", json!({"n": 2})).await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(50)).await;

        let tamanhos = recebidos.lock().unwrap().clone();
        assert_eq!(tamanhos, vec![1, 2]);
    }

    #[tokio::test]
    async fn cancelar_e_idempotente_e_interrompe_as_entregas() {
        let store = Arc::new(MemDocumentStore::new());
        let recebidos = Arc::new(Mutex::new(0usize));
        let alvo = recebidos.clone();
        let consulta = store
            .consultar_ordenado("marcacoes", "createdAt", Direcao::Desc)
            .await
            .unwrap();
        let assinatura = consulta.assinar(move |_| {
            *alvo.lock().unwrap() += 1;
        });
        tokio::time::sleep(StdDuration::from_millis(20)).await;

        assinatura.cancelar();
        assinatura.cancelar();
        assert!(assinatura.cancelada());

        store.criar("marcacoes", json!({"n": 1})).await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(50)).await;

        // Só o snapshot inicial chegou.
        assert_eq!(*recebidos.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn store_derrubado_falha_sem_perder_o_que_ja_existe() {
        let store = MemDocumentStore::new();
        store.criar("cidades", json!({"nome": "Santos"})).await.unwrap();

        store.derrubar();
        let erro = store.criar("cidades", json!({"nome": "Campinas"})).await;
        assert!(matches!(erro, Err(AppError::StoreUnavailable(_))));

        store.restaurar();
        assert_eq!(store.listar("cidades").await.unwrap().len(), 1);
    }
}
