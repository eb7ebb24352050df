// src/services/evento_service.rs
use crate::{
    error::AppResult,
    models::evento::{parse_data_evento, DataInvalida, Evento},
};
use sqlx::SqlitePool;
use thiserror::Error;

/// Motivos para recusar um novo evento. O texto é o que o organizador vê.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventoInvalido {
    #[error("Informe o nome do evento.")]
    NomeVazio,
    #[error(transparent)]
    Data(#[from] DataInvalida),
}

/// Todos os eventos de um organizador, por ordem de criação.
pub async fn get_all_by_organizador(db_pool: &SqlitePool, organizador_cpf: &str) -> AppResult<Vec<Evento>> {
    let eventos = sqlx::query_as::<_, Evento>(
        r#"
        SELECT id, organizador_cpf, nome, data, local
        FROM eventos
        WHERE organizador_cpf = ?1
        ORDER BY id ASC
        "#,
    )
    .bind(organizador_cpf)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Organizador {} tem {} eventos.", organizador_cpf, eventos.len());
    Ok(eventos)
}

/// Busca um evento, mas só se pertencer ao organizador indicado.
pub async fn find_evento_do_organizador(
    db_pool: &SqlitePool,
    evento_id: i64,
    organizador_cpf: &str,
) -> AppResult<Option<Evento>> {
    // Evento de outro organizador conta como inexistente
    let evento = sqlx::query_as::<_, Evento>(
        r#"
        SELECT id, organizador_cpf, nome, data, local
        FROM eventos
        WHERE id = ?1 AND organizador_cpf = ?2
        "#,
    )
    .bind(evento_id)
    .bind(organizador_cpf)
    .fetch_optional(db_pool)
    .await?;
    Ok(evento)
}

/// Cria o evento e devolve o id gerado. A validação acontece antes de tocar na base.
pub async fn create_evento(
    db_pool: &SqlitePool,
    organizador_cpf: &str,
    nome: &str,
    data: &str,
    local: &str,
) -> AppResult<Result<i64, EventoInvalido>> {
    let nome = nome.trim();
    let data = data.trim();

    // 1. Validação (nome obrigatório, data dd/mm/aaaa)
    if nome.is_empty() {
        return Ok(Err(EventoInvalido::NomeVazio));
    }
    if let Err(e) = parse_data_evento(data) {
        tracing::warn!("Evento '{}' recusado: {}", nome, e);
        return Ok(Err(e.into()));
    }

    // 2. Insere e recebe o ID gerado
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO eventos (organizador_cpf, nome, data, local)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id
        "#,
    )
    .bind(organizador_cpf)
    .bind(nome)
    .bind(data)
    .bind(local.trim())
    .fetch_one(db_pool)
    .await?;

    tracing::info!("✅ Evento '{}' ({}) criado por {}.", nome, id, organizador_cpf);
    Ok(Ok(id))
}
