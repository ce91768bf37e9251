// src/store.rs
//
// Adaptador do armazenamento de documentos. O restante da aplicação só conhece
// o trait `DocumentStore`; a implementação de produção fica em `postgres` e a
// de testes em `memoria`.

pub mod assinatura;
pub mod memoria;
pub mod postgres;

pub use assinatura::{Assinatura, ConsultaAoVivo};
pub use memoria::MemDocumentStore;
pub use postgres::PgDocumentStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direcao {
    Asc,
    Desc,
}

/// Um documento persistido: id e timestamp atribuídos pelo servidor, conteúdo
/// livre em JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Documento {
    pub id: String,
    pub dados: Value,
    pub created_at: DateTime<Utc>,
}

/// Identidade de uma consulta ordenada; cada chave tem seu próprio canal de
/// snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChaveConsulta {
    pub colecao: String,
    pub campo: String,
    pub direcao: Direcao,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Grava um documento novo na coleção. O id e o `createdAt` são atribuídos
    /// pelo servidor. Falha com `StoreUnavailable` quando o armazenamento não
    /// responde.
    async fn criar(&self, colecao: &str, dados: Value) -> Result<Documento, AppError>;

    /// Abre uma consulta ordenada com entrega ao vivo: o snapshot inicial vem
    /// na resposta e cada gravação posterior na coleção reemite o conjunto de
    /// resultados completo (substituição integral, nunca um delta).
    async fn consultar_ordenado(
        &self,
        colecao: &str,
        campo: &str,
        direcao: Direcao,
    ) -> Result<ConsultaAoVivo, AppError>;

    /// Leitura única, em ordem de inserção. Coleção ausente resulta em lista
    /// vazia; os chamadores aplicam seus conjuntos padrão.
    async fn listar(&self, colecao: &str) -> Result<Vec<Documento>, AppError>;
}

/// Ordena um snapshot pelo campo pedido. `createdAt` usa o timestamp do
/// servidor; os demais campos comparam o valor textual dentro de `dados`.
pub fn ordenar(docs: &mut [Documento], campo: &str, direcao: Direcao) {
    match campo {
        "createdAt" => docs.sort_by_key(|d| d.created_at),
        outro => docs.sort_by(|a, b| chave_textual(a, outro).cmp(&chave_textual(b, outro))),
    }
    if direcao == Direcao::Desc {
        docs.reverse();
    }
}

fn chave_textual(doc: &Documento, campo: &str) -> String {
    doc.dados
        .get(campo)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn doc(id: &str, segundos: i64, dados: Value) -> Documento {
        Documento {
            id: id.to_string(),
            dados,
            created_at: Utc.timestamp_opt(segundos, 0).unwrap(),
        }
    }

    #[test]
    fn ordena_por_created_at_desc() {
        let mut docs = vec![
            doc("a", 10, json!({})),
            doc("b", 30, json!({})),
            doc("c", 20, json!({})),
        ];
        ordenar(&mut docs, "createdAt", Direcao::Desc);
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn ordena_por_campo_textual_asc() {
        let mut docs = vec![
            doc("a", 1, json!({"nome": "Vila Nova"})),
            doc("b", 2, json!({"nome": "Central"})),
        ];
        ordenar(&mut docs, "nome", Direcao::Asc);
        assert_eq!(docs[0].id, "b");
    }
}
