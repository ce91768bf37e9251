pub mod congregacao;
pub use congregacao::{
    Congregacao, DiaSemana, Endereco, Ensaio, NovaCongregacao, RjmDia, SemanaDoMes, TipoEnsaio,
};
pub mod marcacao;
pub use marcacao::{FiltroTipo, Marcacao, NovaMarcacao, TipoMarcacao};
pub mod cargo;
pub use cargo::{CargoMinisterio, NovoCargo, TipoCargo};
pub mod cidade;
pub use cidade::{Cidade, NovaCidade};
pub mod decode;
