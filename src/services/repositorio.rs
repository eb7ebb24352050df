// src/services/repositorio.rs
//! Contratos de consulta de que o controlador depende.
//! A implementação real é o próprio `SqlitePool`; os testes usam versões em memória.
use crate::{
    error::AppResult,
    models::{evento::Evento, usuario::Usuario},
    services::{evento_service, inscricao_service, usuario_service},
};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait ConsultaUsuarios: Send + Sync {
    async fn get(&self, cpf: &str) -> AppResult<Option<Usuario>>;
}

#[async_trait]
pub trait ConsultaEventos: Send + Sync {
    async fn get_all_by_organizador(&self, organizador_cpf: &str) -> AppResult<Vec<Evento>>;
}

#[async_trait]
pub trait ContagemInscricoes: Send + Sync {
    async fn count_by_evento(&self, evento_id: i64) -> AppResult<i64>;
}

#[async_trait]
impl ConsultaUsuarios for SqlitePool {
    async fn get(&self, cpf: &str) -> AppResult<Option<Usuario>> {
        usuario_service::find_usuario_by_cpf(self, cpf).await
    }
}

#[async_trait]
impl ConsultaEventos for SqlitePool {
    async fn get_all_by_organizador(&self, organizador_cpf: &str) -> AppResult<Vec<Evento>> {
        evento_service::get_all_by_organizador(self, organizador_cpf).await
    }
}

#[async_trait]
impl ContagemInscricoes for SqlitePool {
    async fn count_by_evento(&self, evento_id: i64) -> AppResult<i64> {
        inscricao_service::count_by_evento(self, evento_id).await
    }
}
