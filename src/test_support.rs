// src/test_support.rs
// Dados de apoio partilhados pelos testes.
use crate::{
    models::usuario::TipoUsuario,
    services::usuario_service::{self, NovoUsuario},
};
use sqlx::SqlitePool;

pub async fn seed_usuario(pool: &SqlitePool, cpf: &str, nome: &str, tipo: TipoUsuario) {
    usuario_service::create_usuario(
        pool,
        NovoUsuario {
            cpf,
            nome,
            email: "",
            tipo,
            telefone: None,
            data_nascimento: None,
        },
    )
    .await
    .expect("usuario");
}

/// Insere um evento sem passar pela validação de data, para simular registos antigos.
pub async fn seed_evento(pool: &SqlitePool, organizador_cpf: &str, nome: &str, data: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO eventos (organizador_cpf, nome, data, local) VALUES (?1, ?2, ?3, '') RETURNING id",
    )
    .bind(organizador_cpf)
    .bind(nome)
    .bind(data)
    .fetch_one(pool)
    .await
    .expect("evento")
}
