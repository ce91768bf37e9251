// src/models/cidade.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// As 27 unidades federativas brasileiras.
pub const UFS: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cidade {
    pub id: String,
    #[schema(example = "São Paulo")]
    pub nome: String,
    #[schema(example = "SP")]
    pub uf: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaCidade {
    #[validate(length(min = 2, message = "Informe o nome da cidade"))]
    #[schema(example = "São Paulo")]
    pub nome: String,
    #[validate(custom(function = uf_valida))]
    #[schema(example = "SP")]
    pub uf: String,
}

fn uf_valida(uf: &str) -> Result<(), ValidationError> {
    if UFS.contains(&uf) {
        Ok(())
    } else {
        Err(ValidationError::new("uf").with_message("Selecione uma UF válida".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uf_conhecida_e_aceita() {
        let payload = NovaCidade {
            nome: "São Paulo".into(),
            uf: "SP".into(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn uf_desconhecida_e_rejeitada() {
        let payload = NovaCidade {
            nome: "Atlantis".into(),
            uf: "XX".into(),
        };
        let erros = payload.validate().unwrap_err();
        assert!(erros.field_errors().contains_key("uf"));
    }

    #[test]
    fn nome_curto_e_rejeitado() {
        let payload = NovaCidade {
            nome: "A".into(),
            uf: "SP".into(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn lista_de_ufs_tem_27_entradas_unicas() {
        let mut ordenadas = UFS.to_vec();
        ordenadas.sort_unstable();
        ordenadas.dedup();
        assert_eq!(ordenadas.len(), 27);
    }
}
