// src/form.rs
//
// Estado do formulário de cadastro de congregação: os subformulários de
// ensaios e RJM são listas dinâmicas cujas entradas são endereçadas por um id
// estável, atribuído na inserção, e não pela posição. A validação roda a cada
// edição e controla a habilitação do envio.

use validator::{Validate, ValidationErrors};

use crate::models::congregacao::{
    DiaSemana, Ensaio, NovaCongregacao, RjmDia, SemanaDoMes, TipoEnsaio, HORA_ENSAIO_PADRAO,
    HORA_RJM_PADRAO,
};

/// Identidade estável de uma entrada de lista dinâmica. Nunca é reaproveitada
/// dentro do mesmo formulário.
pub type IdEntrada = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Entrada<T> {
    pub id: IdEntrada,
    pub valor: T,
}

#[derive(Debug, Default)]
pub struct FormCongregacao {
    pub codigo: String,
    pub rua: String,
    pub numero: String,
    pub bairro: String,
    pub cep: String,
    cultos_dias: Vec<DiaSemana>,
    ensaios: Vec<Entrada<Ensaio>>,
    rjm: Vec<Entrada<RjmDia>>,
    proximo_id: IdEntrada,
}

impl FormCongregacao {
    pub fn new() -> Self {
        Self::default()
    }

    fn novo_id(&mut self) -> IdEntrada {
        let id = self.proximo_id;
        self.proximo_id += 1;
        id
    }

    fn primeiro_dia_culto(&self) -> DiaSemana {
        self.cultos_dias.first().copied().unwrap_or(DiaSemana::Dom)
    }

    // --- Dias de culto ---

    pub fn cultos_dias(&self) -> &[DiaSemana] {
        &self.cultos_dias
    }

    /// Alterna a presença de um dia no conjunto de dias de culto: entra se
    /// ausente, sai se presente. A ordem de inserção dos demais é preservada.
    pub fn alternar_dia_culto(&mut self, dia: DiaSemana) {
        alternar(&mut self.cultos_dias, dia);
    }

    // --- Ensaios ---

    pub fn ensaios(&self) -> &[Entrada<Ensaio>] {
        &self.ensaios
    }

    /// Acrescenta um ensaio pré-preenchido: tipo Local, 1ª semana, primeiro
    /// dia de culto selecionado (ou domingo), 19:00, janeiro.
    pub fn adicionar_ensaio(&mut self) -> IdEntrada {
        let valor = Ensaio {
            tipo: TipoEnsaio::Local,
            semana_do_mes: SemanaDoMes::Primeira,
            dia_semana: self.primeiro_dia_culto(),
            hora: HORA_ENSAIO_PADRAO.to_string(),
            meses: vec![1],
        };
        let id = self.novo_id();
        self.ensaios.push(Entrada { id, valor });
        id
    }

    /// Remove a entrada com o id dado. As entradas irmãs mantêm seus valores e
    /// a ordem relativa.
    pub fn remover_ensaio(&mut self, id: IdEntrada) -> bool {
        let antes = self.ensaios.len();
        self.ensaios.retain(|e| e.id != id);
        self.ensaios.len() != antes
    }

    pub fn ensaio_mut(&mut self, id: IdEntrada) -> Option<&mut Ensaio> {
        self.ensaios
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.valor)
    }

    /// Alterna um mês (1..12) no conjunto de meses do ensaio indicado.
    pub fn alternar_mes(&mut self, id: IdEntrada, mes: u8) {
        if let Some(ensaio) = self.ensaio_mut(id) {
            alternar(&mut ensaio.meses, mes);
        }
    }

    // --- RJM ---

    pub fn rjm(&self) -> &[Entrada<RjmDia>] {
        &self.rjm
    }

    /// Acrescenta um dia de RJM pré-preenchido: primeiro dia de culto
    /// selecionado (ou domingo), 19:30.
    pub fn adicionar_rjm(&mut self) -> IdEntrada {
        let valor = RjmDia {
            dia: self.primeiro_dia_culto(),
            horario: HORA_RJM_PADRAO.to_string(),
        };
        let id = self.novo_id();
        self.rjm.push(Entrada { id, valor });
        id
    }

    pub fn remover_rjm(&mut self, id: IdEntrada) -> bool {
        let antes = self.rjm.len();
        self.rjm.retain(|e| e.id != id);
        self.rjm.len() != antes
    }

    pub fn rjm_mut(&mut self, id: IdEntrada) -> Option<&mut RjmDia> {
        self.rjm
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.valor)
    }

    // --- Validação e envio ---

    /// Monta o payload de cadastro e aplica todas as regras de validação do
    /// formulário. Nenhum estado é alterado.
    pub fn validar(&self) -> Result<NovaCongregacao, ValidationErrors> {
        let payload = NovaCongregacao {
            codigo: self.codigo.clone(),
            rua: self.rua.clone(),
            numero: self.numero.clone(),
            bairro: self.bairro.clone(),
            cep: self.cep.clone(),
            cultos_dias: self.cultos_dias.clone(),
            ensaios: self.ensaios.iter().map(|e| e.valor.clone()).collect(),
            rjm: self.rjm.iter().map(|e| e.valor.clone()).collect(),
        };
        payload.validate()?;
        Ok(payload)
    }

    /// O envio só é habilitado quando todos os campos passam nas regras.
    pub fn pode_enviar(&self) -> bool {
        self.validar().is_ok()
    }

    /// Volta o formulário ao estado inicial depois de um envio bem-sucedido.
    pub fn limpar(&mut self) {
        *self = Self::new();
    }
}

/// Alterna a presença de um valor numa lista que se comporta como conjunto:
/// adiciona se ausente, remove se presente, preservando unicidade e ordem de
/// inserção dos demais elementos.
fn alternar<T: PartialEq + Copy>(lista: &mut Vec<T>, valor: T) {
    if let Some(posicao) = lista.iter().position(|v| *v == valor) {
        lista.remove(posicao);
    } else {
        lista.push(valor);
    }
}
