pub mod cargos;
pub mod cidades;
pub mod congregacoes;
pub mod marcacoes;
