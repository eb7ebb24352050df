pub mod acoes;
pub mod sistema;
