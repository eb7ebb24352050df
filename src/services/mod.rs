pub mod evento_service;
pub mod inscricao_service;
pub mod repositorio;
pub mod usuario_service;
