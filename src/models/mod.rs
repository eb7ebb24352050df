pub mod evento;
pub mod inscricao;
pub mod usuario;
