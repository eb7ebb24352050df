// src/services/usuario_service.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{TipoUsuario, Usuario, UsuarioRow},
};
use sqlx::SqlitePool;

/// Busca um utilizador pelo CPF (já normalizado).
pub async fn find_usuario_by_cpf(db_pool: &SqlitePool, cpf: &str) -> AppResult<Option<Usuario>> {
    tracing::debug!("Buscando utilizador por CPF: {}", cpf);
    let row = sqlx::query_as::<_, UsuarioRow>(
        r#"
        SELECT cpf, nome, email, tipo, telefone, data_nascimento
        FROM usuarios
        WHERE cpf = ?1
        "#,
    )
    .bind(cpf)
    .fetch_optional(db_pool)
    .await?;

    // A linha vira o enum Usuario aqui, uma única vez
    if row.is_some() {
        tracing::debug!("Utilizador '{}' encontrado.", cpf);
    } else {
        tracing::debug!("Utilizador '{}' não encontrado.", cpf);
    }
    Ok(row.map(Usuario::from))
}

/// Lista os utilizadores de um tipo, por nome.
pub async fn list_usuarios_by_tipo(db_pool: &SqlitePool, tipo: TipoUsuario) -> AppResult<Vec<Usuario>> {
    let rows = sqlx::query_as::<_, UsuarioRow>(
        r#"
        SELECT cpf, nome, email, tipo, telefone, data_nascimento
        FROM usuarios
        WHERE tipo = ?1
        ORDER BY nome ASC
        "#,
    )
    .bind(tipo.as_str())
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontrados {} utilizadores do tipo {}.", rows.len(), tipo.as_str());
    Ok(rows.into_iter().map(Usuario::from).collect())
}

// --- Cadastro ---

/// Dados de um novo atleta ou organizador, já normalizados pelo handler.
pub struct NovoUsuario<'a> {
    pub cpf: &'a str,
    pub nome: &'a str,
    pub email: &'a str,
    pub tipo: TipoUsuario,
    pub telefone: Option<&'a str>,
    pub data_nascimento: Option<&'a str>,
}

pub async fn create_usuario(db_pool: &SqlitePool, novo: NovoUsuario<'_>) -> AppResult<()> {
    tracing::info!("Tentando criar {}: {}", novo.tipo.as_str(), novo.cpf);

    let resultado = sqlx::query(
        r#"
        INSERT INTO usuarios (cpf, nome, email, tipo, telefone, data_nascimento)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(novo.cpf)
    .bind(novo.nome)
    .bind(novo.email)
    .bind(novo.tipo.as_str())
    .bind(novo.telefone)
    .bind(novo.data_nascimento)
    .execute(db_pool)
    .await;

    // CPF é a chave primária: repetido dá violação de UNIQUE
    match resultado {
        Ok(_) => {
            tracing::info!("✅ Utilizador '{}' criado com sucesso.", novo.cpf);
            Ok(())
        }
        Err(e) if AppError::is_unique_violation(&e) => {
            tracing::warn!("Falha ao criar utilizador: CPF '{}' já existe.", novo.cpf);
            Err(AppError::Conflito("CPF já cadastrado.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::test_support::seed_usuario as seed;

    #[tokio::test]
    async fn creates_and_finds_by_cpf() {
        let pool = test_pool().await;
        seed(&pool, "11122233344", "Bruna", TipoUsuario::Organizador).await;

        let usuario = find_usuario_by_cpf(&pool, "11122233344").await.expect("busca");
        assert!(matches!(usuario, Some(Usuario::Organizador(ref o)) if o.nome == "Bruna"));
        assert!(find_usuario_by_cpf(&pool, "00000000000").await.expect("busca").is_none());
    }

    #[tokio::test]
    async fn duplicate_cpf_is_a_conflict() {
        let pool = test_pool().await;
        seed(&pool, "11122233344", "Bruna", TipoUsuario::Atleta).await;
        let err = create_usuario(
            &pool,
            NovoUsuario {
                cpf: "11122233344",
                nome: "Outra",
                email: "",
                tipo: TipoUsuario::Organizador,
                telefone: None,
                data_nascimento: None,
            },
        )
        .await
        .expect_err("duplicado");
        assert!(matches!(err, AppError::Conflito(_)));
    }

    #[tokio::test]
    async fn lists_only_requested_tipo() {
        let pool = test_pool().await;
        seed(&pool, "1", "Zeca", TipoUsuario::Atleta).await;
        seed(&pool, "2", "Ana", TipoUsuario::Atleta).await;
        seed(&pool, "3", "Olga", TipoUsuario::Organizador).await;

        let atletas = list_usuarios_by_tipo(&pool, TipoUsuario::Atleta).await.expect("lista");
        let nomes: Vec<&str> = atletas.iter().map(Usuario::nome).collect();
        assert_eq!(nomes, vec!["Ana", "Zeca"]);
    }
}
