// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro ao renderizar página: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    // Violação de UNIQUE (CPF repetido, atleta já inscrito, ...)
    #[error("{0}")]
    Conflito(String),

    #[error("Registo não encontrado")]
    NotFound,
}

impl AppError {
    /// Verdadeiro se o erro da base de dados for uma violação de UNIQUE/PRIMARY KEY.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            // Códigos SQLite: 19 (constraint), 2067 (unique), 1555 (primary key)
            sqlx::Error::Database(db_err) => db_err
                .code()
                .is_some_and(|c| c == "19" || c == "2067" || c == "1555"),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".to_string())
            }
            AppError::EnvVarError(_) | AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.".to_string())
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.".to_string())
            }
            AppError::Conflito(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Registo não encontrado.".to_string()),
            AppError::TemplateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Voltar</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
