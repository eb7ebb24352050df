// src/services/inscricao_service.rs
use crate::{
    error::{AppError, AppResult},
    models::inscricao::InscricaoKit,
};
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn count_by_evento(db_pool: &SqlitePool, evento_id: i64) -> AppResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inscricoes WHERE evento_id = ?1")
        .bind(evento_id)
        .fetch_one(db_pool)
        .await?;
    Ok(total)
}

/// Inscrições de um evento com o nome de cada atleta, para a gestão de kits.
pub async fn list_kits_by_evento(db_pool: &SqlitePool, evento_id: i64) -> AppResult<Vec<InscricaoKit>> {
    let kits = sqlx::query_as::<_, InscricaoKit>(
        r#"
        SELECT i.id, i.atleta_cpf, u.nome AS atleta_nome, i.tamanho_camiseta, i.kit_entregue
        FROM inscricoes i
        JOIN usuarios u ON u.cpf = i.atleta_cpf
        WHERE i.evento_id = ?1
        ORDER BY u.nome ASC
        "#,
    )
    .bind(evento_id)
    .fetch_all(db_pool)
    .await?;
    Ok(kits)
}

/// Inscreve um atleta e devolve o ID (UUID) da nova inscrição.
/// O chamador garante que o CPF pertence a um atleta.
pub async fn create_inscricao(
    db_pool: &SqlitePool,
    evento_id: i64,
    atleta_cpf: &str,
    tamanho_camiseta: &str,
) -> AppResult<String> {
    let id = Uuid::new_v4().to_string();

    // Kit começa sempre por entregar
    let resultado = sqlx::query(
        r#"
        INSERT INTO inscricoes (id, evento_id, atleta_cpf, tamanho_camiseta, kit_entregue)
        VALUES (?1, ?2, ?3, ?4, FALSE)
        "#,
    )
    .bind(&id)
    .bind(evento_id)
    .bind(atleta_cpf)
    .bind(tamanho_camiseta.to_uppercase())
    .execute(db_pool)
    .await;

    match resultado {
        Ok(_) => {
            tracing::info!("✅ Atleta {} inscrito no evento {}.", atleta_cpf, evento_id);
            Ok(id)
        }
        Err(e) if AppError::is_unique_violation(&e) => {
            tracing::warn!("Atleta {} já inscrito no evento {}.", atleta_cpf, evento_id);
            Err(AppError::Conflito("Atleta já inscrito neste evento.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Marca/desmarca a entrega do kit. Devolve o novo estado.
pub async fn alternar_kit_entregue(
    db_pool: &SqlitePool,
    evento_id: i64,
    inscricao_id: &str,
) -> AppResult<bool> {
    let novo_estado: Option<bool> = sqlx::query_scalar(
        r#"
        UPDATE inscricoes
        SET kit_entregue = NOT kit_entregue
        WHERE id = ?1 AND evento_id = ?2
        RETURNING kit_entregue
        "#,
    )
    .bind(inscricao_id)
    .bind(evento_id)
    .fetch_optional(db_pool)
    .await?;

    match novo_estado {
        Some(entregue) => {
            tracing::info!("Kit da inscrição {} entregue = {}", inscricao_id, entregue);
            Ok(entregue)
        }
        None => {
            tracing::warn!("Inscrição {} não pertence ao evento {}.", inscricao_id, evento_id);
            Err(AppError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::test_pool,
        models::usuario::TipoUsuario,
        test_support::{seed_evento, seed_usuario},
    };

    async fn cenario() -> (SqlitePool, i64, i64) {
        let pool = test_pool().await;
        seed_usuario(&pool, "900", "Olga", TipoUsuario::Organizador).await;
        seed_usuario(&pool, "101", "Caio", TipoUsuario::Atleta).await;
        seed_usuario(&pool, "102", "Bia", TipoUsuario::Atleta).await;
        let maratona = seed_evento(&pool, "900", "Maratona", "10/10/2030").await;
        let triatlo = seed_evento(&pool, "900", "Triatlo", "11/10/2030").await;
        (pool, maratona, triatlo)
    }

    #[tokio::test]
    async fn counts_per_event() {
        let (pool, maratona, triatlo) = cenario().await;
        create_inscricao(&pool, maratona, "101", "g").await.expect("inscricao");
        create_inscricao(&pool, maratona, "102", "P").await.expect("inscricao");

        assert_eq!(count_by_evento(&pool, maratona).await.expect("count"), 2);
        assert_eq!(count_by_evento(&pool, triatlo).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn duplicate_enrollment_is_a_conflict() {
        let (pool, maratona, _) = cenario().await;
        create_inscricao(&pool, maratona, "101", "M").await.expect("inscricao");
        let err = create_inscricao(&pool, maratona, "101", "M").await.expect_err("duplicada");
        assert!(matches!(err, AppError::Conflito(_)));
    }

    #[tokio::test]
    async fn kit_list_joins_names_and_toggles_delivery() {
        let (pool, maratona, triatlo) = cenario().await;
        let caio = create_inscricao(&pool, maratona, "101", "g").await.expect("inscricao");
        create_inscricao(&pool, maratona, "102", "P").await.expect("inscricao");

        let kits = list_kits_by_evento(&pool, maratona).await.expect("kits");
        let nomes: Vec<&str> = kits.iter().map(|k| k.atleta_nome.as_str()).collect();
        assert_eq!(nomes, vec!["Bia", "Caio"]);
        assert!(kits.iter().all(|k| !k.kit_entregue));
        assert_eq!(kits[1].tamanho_camiseta, "G");

        assert!(alternar_kit_entregue(&pool, maratona, &caio).await.expect("toggle"));
        assert!(!alternar_kit_entregue(&pool, maratona, &caio).await.expect("toggle"));

        let err = alternar_kit_entregue(&pool, triatlo, &caio).await.expect_err("outro evento");
        assert!(matches!(err, AppError::NotFound));
    }
}
