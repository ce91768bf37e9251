pub mod congregacao_service;
pub use congregacao_service::CongregacaoService;
pub mod marcacao_service;
pub use marcacao_service::MarcacaoService;
pub mod cargo_service;
pub use cargo_service::CargoService;
pub mod cidade_service;
pub use cidade_service::CidadeService;
