// src/models/inscricao.rs
use serde::Deserialize;
use sqlx::FromRow;

pub const TAMANHOS_CAMISETA: &[&str] = &["PP", "P", "M", "G", "GG"];

/// Inscrição juntada com o nome do atleta, para a página de kits.
#[derive(Debug, Clone, FromRow)]
pub struct InscricaoKit {
    pub id: String,
    pub atleta_cpf: String,
    pub atleta_nome: String,
    pub tamanho_camiseta: String,
    pub kit_entregue: bool,
}

#[derive(Debug, Deserialize)]
pub struct NovaInscricaoForm {
    pub cpf: String,
    #[serde(default = "tamanho_padrao")]
    pub tamanho_camiseta: String,
}

fn tamanho_padrao() -> String {
    "M".to_string()
}

pub fn tamanho_valido(tamanho: &str) -> bool {
    TAMANHOS_CAMISETA.iter().any(|t| t.eq_ignore_ascii_case(tamanho))
}
