// src/models/cargo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

/// Departamentos oferecidos no formulário enquanto a coleção `departamentos`
/// ainda não tem documentos.
pub const DEPARTAMENTOS_PADRAO: [&str; 5] = ["Música", "Orquestra", "Limpeza", "Som", "Recepção"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoCargo {
    Cargo,
    Ministerio,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CargoMinisterio {
    pub id: String,
    #[schema(example = "Regente")]
    pub nome: String,
    pub tipo: TipoCargo,
    #[schema(example = json!(["Música", "Orquestra"]))]
    pub departamentos: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoCargo {
    #[validate(length(min = 2, message = "Informe o nome"))]
    #[schema(example = "Regente")]
    pub nome: String,
    pub tipo: TipoCargo,
    #[serde(default)]
    #[schema(example = json!(["Música"]))]
    pub departamentos: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nome_de_uma_letra_e_rejeitado() {
        let payload = NovoCargo {
            nome: "R".into(),
            tipo: TipoCargo::Cargo,
            departamentos: vec![],
        };
        let erros = payload.validate().unwrap_err();
        assert!(erros.field_errors().contains_key("nome"));
    }

    #[test]
    fn departamentos_podem_ficar_vazios() {
        let payload = NovoCargo {
            nome: "Diácono".into(),
            tipo: TipoCargo::Ministerio,
            departamentos: vec![],
        };
        assert!(payload.validate().is_ok());
    }
}
