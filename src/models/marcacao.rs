// src/models/marcacao.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::congregacao::HORA_RE;

/// Nomes de congregação exibidos nos seletores enquanto a coleção
/// `congregacoes` ainda não tem documentos.
pub const CONGREGACOES_PADRAO: [&str; 3] = [
    "Congregação Central",
    "Congregação Vila Nova",
    "Congregação Jardim América",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoMarcacao {
    Coleta,
    Servico,
    Rjm,
}

impl TipoMarcacao {
    pub fn rotulo(&self) -> &'static str {
        match self {
            TipoMarcacao::Coleta => "Coleta",
            TipoMarcacao::Servico => "Serviço",
            TipoMarcacao::Rjm => "RJM",
        }
    }
}

/// Marcação como lida do armazenamento. Imutável depois de criada: não existe
/// operação de atualização nem de remoção.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Marcacao {
    pub id: String,
    pub tipo: TipoMarcacao,
    #[schema(example = "Congregação Central")]
    pub congregacao: String,
    #[schema(example = "2026-03-14")]
    pub data: String,
    #[schema(example = "09:30")]
    pub hora: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaMarcacao {
    pub tipo: TipoMarcacao,
    #[validate(length(min = 1, message = "Selecione a congregação"))]
    #[schema(example = "Congregação Central")]
    pub congregacao: String,
    #[validate(length(min = 1, message = "Informe a data"))]
    #[schema(example = "2026-03-14")]
    pub data: String,
    #[validate(regex(path = *HORA_RE, message = "Informe o horário (HH:MM)"))]
    #[schema(example = "09:30")]
    pub hora: String,
}

/// Filtro de tipo da listagem de marcações (4 opções, "todas" é o padrão).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FiltroTipo {
    #[default]
    Todas,
    Coleta,
    Servico,
    Rjm,
}

impl FiltroTipo {
    pub fn aceita(&self, tipo: TipoMarcacao) -> bool {
        match self {
            FiltroTipo::Todas => true,
            FiltroTipo::Coleta => tipo == TipoMarcacao::Coleta,
            FiltroTipo::Servico => tipo == TipoMarcacao::Servico,
            FiltroTipo::Rjm => tipo == TipoMarcacao::Rjm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_serializa_em_minusculas() {
        assert_eq!(serde_json::to_value(TipoMarcacao::Coleta).unwrap(), "coleta");
        assert_eq!(serde_json::to_value(TipoMarcacao::Rjm).unwrap(), "rjm");
    }

    #[test]
    fn filtro_todas_aceita_qualquer_tipo() {
        for tipo in [TipoMarcacao::Coleta, TipoMarcacao::Servico, TipoMarcacao::Rjm] {
            assert!(FiltroTipo::Todas.aceita(tipo));
        }
    }

    #[test]
    fn filtro_especifico_aceita_apenas_o_proprio_tipo() {
        assert!(FiltroTipo::Coleta.aceita(TipoMarcacao::Coleta));
        assert!(!FiltroTipo::Coleta.aceita(TipoMarcacao::Servico));
        assert!(!FiltroTipo::Rjm.aceita(TipoMarcacao::Coleta));
    }

    #[test]
    fn marcacao_sem_horario_e_rejeitada() {
        let payload = NovaMarcacao {
            tipo: TipoMarcacao::Coleta,
            congregacao: "Congregação Central".into(),
            data: "2026-03-14".into(),
            hora: "".into(),
        };
        let erros = payload.validate().unwrap_err();
        assert!(erros.field_errors().contains_key("hora"));
    }
}
