// src/views.rs
//
// View de listagem de marcações: mantém o snapshot decodificado mais recente
// entregue pela consulta ao vivo e filtra em memória, sem reconsultar o
// armazenamento. Cada entrega substitui o snapshot inteiro.

use std::sync::{Arc, RwLock};

use crate::models::decode::{decodificar_marcacao, registrar_coercoes};
use crate::models::marcacao::{FiltroTipo, Marcacao};
use crate::services::marcacao_service::COLECAO;
use crate::store::{Assinatura, ConsultaAoVivo};

/// Valor sentinela do filtro de congregação: não restringe nada.
pub const FILTRO_TODAS: &str = "todas";

#[derive(Clone)]
pub struct MarcacoesView {
    marcacoes: Arc<RwLock<Vec<Marcacao>>>,
    // A assinatura vive enquanto a view existir; o drop cancela a entrega.
    _assinatura: Arc<Assinatura>,
}

impl MarcacoesView {
    pub fn nova(consulta: ConsultaAoVivo) -> Self {
        let marcacoes: Arc<RwLock<Vec<Marcacao>>> = Arc::new(RwLock::new(Vec::new()));
        let alvo = marcacoes.clone();
        let assinatura = consulta.assinar(move |docs| {
            let decodificadas = docs
                .iter()
                .map(|doc| {
                    let decodificado = decodificar_marcacao(doc);
                    registrar_coercoes(COLECAO, &doc.id, &decodificado.coercoes);
                    decodificado.valor
                })
                .collect();
            let mut atual = alvo.write().unwrap_or_else(|e| e.into_inner());
            *atual = decodificadas;
        });
        Self {
            marcacoes,
            _assinatura: Arc::new(assinatura),
        }
    }

    /// Aplica os dois filtros combinados por E lógico, preservando a ordem de
    /// entrega do armazenamento.
    pub fn filtrar(&self, tipo: FiltroTipo, congregacao: &str) -> Vec<Marcacao> {
        let atual = self.marcacoes.read().unwrap_or_else(|e| e.into_inner());
        atual
            .iter()
            .filter(|m| {
                tipo.aceita(m.tipo) && (congregacao == FILTRO_TODAS || m.congregacao == congregacao)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::marcacao::{NovaMarcacao, TipoMarcacao};
    use crate::services::MarcacaoService;
    use crate::store::{Direcao, DocumentStore, MemDocumentStore};
    use std::time::Duration;

    async fn view_com_marcacoes() -> (Arc<MemDocumentStore>, MarcacoesView) {
        let store = Arc::new(MemDocumentStore::new());
        let service = MarcacaoService::new(store.clone());
        for (tipo, congregacao) in [
            (TipoMarcacao::Coleta, "Congregação Central"),
            (TipoMarcacao::Servico, "Congregação Central"),
            (TipoMarcacao::Coleta, "Congregação Vila Nova"),
        ] {
            service
                .cadastrar(NovaMarcacao {
                    tipo,
                    congregacao: congregacao.into(),
                    data: "2026-03-14".into(),
                    hora: "09:30".into(),
                })
                .await
                .unwrap();
        }
        let consulta = store
            .consultar_ordenado("marcacoes", "createdAt", Direcao::Desc)
            .await
            .unwrap();
        let view = MarcacoesView::nova(consulta);
        tokio::time::sleep(Duration::from_millis(50)).await;
        (store, view)
    }

    #[tokio::test]
    async fn filtro_de_tipo_com_congregacao_todas() {
        let (_store, view) = view_com_marcacoes().await;
        let coletas = view.filtrar(FiltroTipo::Coleta, FILTRO_TODAS);
        assert_eq!(coletas.len(), 2);
        assert!(coletas.iter().all(|m| m.tipo == TipoMarcacao::Coleta));
        // Ordem de entrega do armazenamento: mais recente primeiro.
        assert_eq!(coletas[0].congregacao, "Congregação Vila Nova");
        assert_eq!(coletas[1].congregacao, "Congregação Central");
    }

    #[tokio::test]
    async fn os_dois_filtros_combinam_por_e_logico() {
        let (_store, view) = view_com_marcacoes().await;
        let resultado = view.filtrar(FiltroTipo::Coleta, "Congregação Central");
        assert_eq!(resultado.len(), 1);
        assert_eq!(resultado[0].tipo, TipoMarcacao::Coleta);
        assert_eq!(resultado[0].congregacao, "Congregação Central");
    }

    #[tokio::test]
    async fn sem_filtros_devolve_tudo() {
        let (_store, view) = view_com_marcacoes().await;
        assert_eq!(view.filtrar(FiltroTipo::Todas, FILTRO_TODAS).len(), 3);
    }

    #[tokio::test]
    async fn view_acompanha_gravacoes_posteriores() {
        let (store, view) = view_com_marcacoes().await;
        store
            .criar(
                "marcacoes",
                serde_json::json!({
                    "tipo": "rjm",
                    "congregacao": "Congregação Central",
                    "data": "2026-03-21",
                    "hora": "19:30",
                }),
            )
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let rjm = view.filtrar(FiltroTipo::Rjm, FILTRO_TODAS);
        assert_eq!(rjm.len(), 1);
        assert_eq!(rjm[0].data, "2026-03-21");
    }

    #[tokio::test]
    async fn documento_sem_hora_nao_derruba_a_listagem() {
        let store = Arc::new(MemDocumentStore::new());
        store
            .criar(
                "marcacoes",
                serde_json::json!({
                    "tipo": "coleta",
                    "congregacao": "Congregação Central",
                    "data": "2026-03-14",
                }),
            )
            .await
            .unwrap();
        let consulta = store
            .consultar_ordenado("marcacoes", "createdAt", Direcao::Desc)
            .await
            .unwrap();
        let view = MarcacoesView::nova(consulta);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let todas = view.filtrar(FiltroTipo::Todas, FILTRO_TODAS);
        assert_eq!(todas.len(), 1);
        assert_eq!(todas[0].hora, "00:00");
        assert_eq!(todas[0].congregacao, "Congregação Central");
    }
}
