// src/models/decode.rs
//
// Desserialização tolerante a perdas: documentos malformados nunca são
// rejeitados na leitura. Cada campo é verificado individualmente e, quando o
// valor gravado não tem a forma esperada, entra o valor padrão seguro (string
// vazia, primeiro valor do enum, conjunto vazio). As substituições ficam
// registradas em `Decodificado::coercoes` para o chamador logar.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::cargo::{CargoMinisterio, TipoCargo};
use crate::models::cidade::{Cidade, UFS};
use crate::models::congregacao::{
    Congregacao, DiaSemana, Endereco, Ensaio, RjmDia, SemanaDoMes, TipoEnsaio, HORA_ENSAIO_PADRAO,
    HORA_RE, HORA_RJM_PADRAO,
};
use crate::models::marcacao::{Marcacao, TipoMarcacao};
use crate::store::Documento;

/// Resultado de uma decodificação: sempre carrega um valor utilizável, mais a
/// lista de campos que precisaram ser normalizados.
#[derive(Debug, Clone, PartialEq)]
pub struct Decodificado<T> {
    pub valor: T,
    pub coercoes: Vec<String>,
}

/// Loga as normalizações aplicadas a um documento, se houver alguma.
pub fn registrar_coercoes(colecao: &str, id: &str, coercoes: &[String]) {
    if !coercoes.is_empty() {
        tracing::warn!(
            "Documento {}/{} normalizado na leitura: campos {:?}",
            colecao,
            id,
            coercoes
        );
    }
}

fn texto(valor: Option<&Value>, padrao: &str, campo: &str, coercoes: &mut Vec<String>) -> String {
    match valor.and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => {
            coercoes.push(campo.to_string());
            padrao.to_string()
        }
    }
}

fn horario(valor: Option<&Value>, padrao: &str, campo: &str, coercoes: &mut Vec<String>) -> String {
    match valor.and_then(Value::as_str) {
        Some(s) if HORA_RE.is_match(s) => s.to_string(),
        _ => {
            coercoes.push(campo.to_string());
            padrao.to_string()
        }
    }
}

fn enumerado<T: DeserializeOwned>(
    valor: Option<&Value>,
    padrao: T,
    campo: &str,
    coercoes: &mut Vec<String>,
) -> T {
    match valor {
        Some(v) => match serde_json::from_value::<T>(v.clone()) {
            Ok(t) => t,
            Err(_) => {
                coercoes.push(campo.to_string());
                padrao
            }
        },
        None => {
            coercoes.push(campo.to_string());
            padrao
        }
    }
}

/// Retorna os elementos de um campo de array; array ausente conta como vazio
/// sem registrar coerção, qualquer outro tipo registra.
fn elementos<'a>(
    valor: Option<&'a Value>,
    campo: &str,
    coercoes: &mut Vec<String>,
) -> Vec<&'a Value> {
    match valor {
        None => vec![],
        Some(Value::Array(itens)) => itens.iter().collect(),
        Some(_) => {
            coercoes.push(campo.to_string());
            vec![]
        }
    }
}

pub fn decodificar_congregacao(doc: &Documento) -> Decodificado<Congregacao> {
    let mut coercoes = Vec::new();
    let dados = &doc.dados;

    // O código cai no id do documento quando ausente.
    let codigo = texto(dados.get("codigo"), &doc.id, "codigo", &mut coercoes);

    let endereco_raw = dados.get("endereco");
    let campo_endereco = |campo: &str| endereco_raw.and_then(|e| e.get(campo));
    let endereco = Endereco {
        rua: texto(campo_endereco("rua"), "", "endereco.rua", &mut coercoes),
        numero: texto(campo_endereco("numero"), "", "endereco.numero", &mut coercoes),
        bairro: texto(campo_endereco("bairro"), "", "endereco.bairro", &mut coercoes),
        cep: texto(campo_endereco("cep"), "", "endereco.cep", &mut coercoes),
    };

    let cultos_dias = elementos(dados.get("cultosDias"), "cultosDias", &mut coercoes)
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<DiaSemana>(v.clone()) {
            Ok(dia) => Some(dia),
            Err(_) => {
                coercoes.push("cultosDias".to_string());
                None
            }
        })
        .collect();

    let ensaios = elementos(dados.get("ensaios"), "ensaios", &mut coercoes)
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| {
            if !v.is_object() {
                coercoes.push(format!("ensaios[{i}]"));
                return None;
            }
            Some(decodificar_ensaio(v, i, &mut coercoes))
        })
        .collect();

    let rjm = elementos(dados.get("rjm"), "rjm", &mut coercoes)
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| {
            if !v.is_object() {
                coercoes.push(format!("rjm[{i}]"));
                return None;
            }
            Some(RjmDia {
                dia: enumerado(v.get("dia"), DiaSemana::Dom, &format!("rjm[{i}].dia"), &mut coercoes),
                horario: horario(
                    v.get("horario"),
                    HORA_RJM_PADRAO,
                    &format!("rjm[{i}].horario"),
                    &mut coercoes,
                ),
            })
        })
        .collect();

    Decodificado {
        valor: Congregacao {
            id: doc.id.clone(),
            codigo,
            endereco,
            cultos_dias,
            ensaios,
            rjm,
            created_at: Some(doc.created_at),
        },
        coercoes,
    }
}

fn decodificar_ensaio(v: &Value, i: usize, coercoes: &mut Vec<String>) -> Ensaio {
    let meses = elementos(v.get("meses"), &format!("ensaios[{i}].meses"), coercoes)
        .into_iter()
        .filter_map(|m| match m.as_u64() {
            Some(n) if (1..=12).contains(&n) => Some(n as u8),
            _ => {
                coercoes.push(format!("ensaios[{i}].meses"));
                None
            }
        })
        .collect();
    Ensaio {
        tipo: enumerado(
            v.get("tipo"),
            TipoEnsaio::Local,
            &format!("ensaios[{i}].tipo"),
            coercoes,
        ),
        semana_do_mes: enumerado(
            v.get("semanaDoMes"),
            SemanaDoMes::Primeira,
            &format!("ensaios[{i}].semanaDoMes"),
            coercoes,
        ),
        dia_semana: enumerado(
            v.get("diaSemana"),
            DiaSemana::Dom,
            &format!("ensaios[{i}].diaSemana"),
            coercoes,
        ),
        hora: horario(
            v.get("hora"),
            HORA_ENSAIO_PADRAO,
            &format!("ensaios[{i}].hora"),
            coercoes,
        ),
        meses,
    }
}

pub fn decodificar_marcacao(doc: &Documento) -> Decodificado<Marcacao> {
    let mut coercoes = Vec::new();
    let dados = &doc.dados;
    let valor = Marcacao {
        id: doc.id.clone(),
        tipo: enumerado(dados.get("tipo"), TipoMarcacao::Coleta, "tipo", &mut coercoes),
        congregacao: texto(dados.get("congregacao"), "", "congregacao", &mut coercoes),
        data: texto(dados.get("data"), "", "data", &mut coercoes),
        hora: horario(dados.get("hora"), "00:00", "hora", &mut coercoes),
        created_at: Some(doc.created_at),
    };
    Decodificado { valor, coercoes }
}

pub fn decodificar_cargo(doc: &Documento) -> Decodificado<CargoMinisterio> {
    let mut coercoes = Vec::new();
    let dados = &doc.dados;
    let departamentos = elementos(dados.get("departamentos"), "departamentos", &mut coercoes)
        .into_iter()
        .filter_map(|v| match v.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                coercoes.push("departamentos".to_string());
                None
            }
        })
        .collect();
    let valor = CargoMinisterio {
        id: doc.id.clone(),
        nome: texto(dados.get("nome"), &doc.id, "nome", &mut coercoes),
        tipo: enumerado(dados.get("tipo"), TipoCargo::Cargo, "tipo", &mut coercoes),
        departamentos,
        created_at: Some(doc.created_at),
    };
    Decodificado { valor, coercoes }
}

pub fn decodificar_cidade(doc: &Documento) -> Decodificado<Cidade> {
    let mut coercoes = Vec::new();
    let dados = &doc.dados;
    let uf = match dados.get("uf").and_then(Value::as_str) {
        Some(uf) if UFS.contains(&uf) => uf.to_string(),
        _ => {
            coercoes.push("uf".to_string());
            UFS[0].to_string()
        }
    };
    let valor = Cidade {
        id: doc.id.clone(),
        nome: texto(dados.get("nome"), &doc.id, "nome", &mut coercoes),
        uf,
        created_at: Some(doc.created_at),
    };
    Decodificado { valor, coercoes }
}
