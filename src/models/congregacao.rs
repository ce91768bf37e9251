// src/models/congregacao.rs

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// Padrões compartilhados pelos formulários (CEP no formato 00000-000, horário HH:MM)
pub static CEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("regex de CEP inválida"));
pub static HORA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("regex de horário inválida"));

/// Horário padrão sugerido ao adicionar um ensaio no formulário.
pub const HORA_ENSAIO_PADRAO: &str = "19:00";
/// Horário padrão sugerido ao adicionar um dia de RJM no formulário.
pub const HORA_RJM_PADRAO: &str = "19:30";

// --- Enums ---

/// Dia da semana, gravado com os tokens curtos usados nos documentos ("dom".."sab").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiaSemana {
    Dom,
    Seg,
    Ter,
    Qua,
    Qui,
    Sex,
    Sab,
}

impl DiaSemana {
    pub const TODOS: [DiaSemana; 7] = [
        DiaSemana::Dom,
        DiaSemana::Seg,
        DiaSemana::Ter,
        DiaSemana::Qua,
        DiaSemana::Qui,
        DiaSemana::Sex,
        DiaSemana::Sab,
    ];

    pub fn valor(&self) -> &'static str {
        match self {
            DiaSemana::Dom => "dom",
            DiaSemana::Seg => "seg",
            DiaSemana::Ter => "ter",
            DiaSemana::Qua => "qua",
            DiaSemana::Qui => "qui",
            DiaSemana::Sex => "sex",
            DiaSemana::Sab => "sab",
        }
    }

    pub fn rotulo(&self) -> &'static str {
        match self {
            DiaSemana::Dom => "Domingo",
            DiaSemana::Seg => "Segunda",
            DiaSemana::Ter => "Terça",
            DiaSemana::Qua => "Quarta",
            DiaSemana::Qui => "Quinta",
            DiaSemana::Sex => "Sexta",
            DiaSemana::Sab => "Sábado",
        }
    }
}

/// Tipo de ensaio. Os nomes gravados nos documentos têm espaços ("Geral por Familia"),
/// por isso os renames explícitos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TipoEnsaio {
    Regional,
    Local,
    #[serde(rename = "Geral por Familia")]
    GeralPorFamilia,
    #[serde(rename = "Geral por Categoria")]
    GeralPorCategoria,
    #[serde(rename = "DARPE")]
    Darpe,
}

/// Semana do mês em que o ensaio ocorre, gravada como string "1".."5".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SemanaDoMes {
    #[serde(rename = "1")]
    Primeira,
    #[serde(rename = "2")]
    Segunda,
    #[serde(rename = "3")]
    Terceira,
    #[serde(rename = "4")]
    Quarta,
    #[serde(rename = "5")]
    Quinta,
}

// --- Estruturas ---

/// Definição de um ensaio recorrente: semana do mês + dia da semana + horário,
/// restrito a um conjunto de meses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ensaio {
    pub tipo: TipoEnsaio,
    pub semana_do_mes: SemanaDoMes,
    pub dia_semana: DiaSemana,
    #[validate(regex(path = *HORA_RE, message = "Informe o horário (HH:MM)"))]
    #[schema(example = "19:00")]
    pub hora: String,
    #[validate(
        length(min = 1, message = "Selecione ao menos um mês"),
        custom(function = meses_validos)
    )]
    #[schema(example = json!([1, 7]))]
    pub meses: Vec<u8>,
}

/// Dia e horário de uma Reunião de Jovens e Menores (RJM) semanal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct RjmDia {
    pub dia: DiaSemana,
    #[validate(regex(path = *HORA_RE, message = "Informe o horário (HH:MM)"))]
    #[schema(example = "19:30")]
    pub horario: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Endereco {
    #[schema(example = "Rua das Flores")]
    pub rua: String,
    #[schema(example = "123")]
    pub numero: String,
    #[schema(example = "Centro")]
    pub bairro: String,
    #[schema(example = "01000-000")]
    pub cep: String,
}

/// Congregação como lida do armazenamento de documentos.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Congregacao {
    pub id: String,
    #[schema(example = "001")]
    pub codigo: String,
    pub endereco: Endereco,
    pub cultos_dias: Vec<DiaSemana>,
    pub ensaios: Vec<Ensaio>,
    pub rjm: Vec<RjmDia>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload de cadastro de congregação, com as mesmas regras do formulário.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaCongregacao {
    #[validate(length(min = 1, message = "Informe o código da igreja"))]
    #[schema(example = "001")]
    pub codigo: String,
    #[validate(length(min = 1, message = "Informe a rua"))]
    pub rua: String,
    #[validate(length(min = 1, message = "Informe o número"))]
    pub numero: String,
    #[validate(length(min = 1, message = "Informe o bairro"))]
    pub bairro: String,
    #[validate(regex(path = *CEP_RE, message = "Informe um CEP válido"))]
    #[schema(example = "01000-000")]
    pub cep: String,
    #[validate(length(min = 1, message = "Selecione ao menos um dia de culto"))]
    pub cultos_dias: Vec<DiaSemana>,
    #[validate(nested)]
    #[serde(default)]
    pub ensaios: Vec<Ensaio>,
    #[validate(nested)]
    #[serde(default)]
    pub rjm: Vec<RjmDia>,
}

fn meses_validos(meses: &Vec<u8>) -> Result<(), ValidationError> {
    if meses.iter().all(|m| (1..=12).contains(m)) {
        Ok(())
    } else {
        Err(ValidationError::new("meses").with_message("Os meses devem estar entre 1 e 12".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_valido() -> NovaCongregacao {
        NovaCongregacao {
            codigo: "001".into(),
            rua: "Rua das Flores".into(),
            numero: "123".into(),
            bairro: "Centro".into(),
            cep: "01000-000".into(),
            cultos_dias: vec![DiaSemana::Qua, DiaSemana::Dom],
            ensaios: vec![],
            rjm: vec![],
        }
    }

    #[test]
    fn cep_com_e_sem_hifen_e_aceito() {
        assert!(CEP_RE.is_match("01000-000"));
        assert!(CEP_RE.is_match("01000000"));
    }

    #[test]
    fn cep_curto_e_rejeitado() {
        let mut payload = payload_valido();
        payload.cep = "1000-000".into();
        let erros = payload.validate().unwrap_err();
        assert!(erros.field_errors().contains_key("cep"));
    }

    #[test]
    fn payload_completo_passa_na_validacao() {
        assert!(payload_valido().validate().is_ok());
    }

    #[test]
    fn sem_dia_de_culto_bloqueia_o_cadastro() {
        let mut payload = payload_valido();
        payload.cultos_dias.clear();
        let erros = payload.validate().unwrap_err();
        assert!(erros.field_errors().contains_key("cultos_dias"));
    }

    #[test]
    fn ensaio_sem_mes_selecionado_e_invalido() {
        let ensaio = Ensaio {
            tipo: TipoEnsaio::Local,
            semana_do_mes: SemanaDoMes::Primeira,
            dia_semana: DiaSemana::Dom,
            hora: "19:00".into(),
            meses: vec![],
        };
        assert!(ensaio.validate().is_err());
    }

    #[test]
    fn ensaio_com_mes_fora_do_intervalo_e_invalido() {
        let ensaio = Ensaio {
            tipo: TipoEnsaio::Local,
            semana_do_mes: SemanaDoMes::Primeira,
            dia_semana: DiaSemana::Dom,
            hora: "19:00".into(),
            meses: vec![1, 13],
        };
        assert!(ensaio.validate().is_err());
    }

    #[test]
    fn horario_fora_do_formato_e_invalido() {
        let rjm = RjmDia {
            dia: DiaSemana::Seg,
            horario: "7h30".into(),
        };
        assert!(rjm.validate().is_err());
    }

    #[test]
    fn tokens_dos_enums_batem_com_o_formato_gravado() {
        assert_eq!(serde_json::to_value(DiaSemana::Qua).unwrap(), "qua");
        assert_eq!(
            serde_json::to_value(TipoEnsaio::GeralPorFamilia).unwrap(),
            "Geral por Familia"
        );
        assert_eq!(serde_json::to_value(TipoEnsaio::Darpe).unwrap(), "DARPE");
        assert_eq!(serde_json::to_value(SemanaDoMes::Terceira).unwrap(), "3");
    }
}
