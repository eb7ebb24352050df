// src/web/mw_auth.rs
use crate::error::AppError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Chave da sessão onde fica o CPF do organizador autenticado.
pub const SESSION_ORGANIZADOR: &str = "organizador_cpf";

/// CPF do organizador da sessão, posto nas extensões por [`require_organizador`].
#[derive(Clone, Debug)]
pub struct OrganizadorCpf(pub String);

// Só deixa passar quem abriu o painel do organizador pelo login
pub async fn require_organizador(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<String>(SESSION_ORGANIZADOR).await {
        Ok(Some(cpf)) => {
            tracing::debug!("Autenticação MW: organizador '{}' autenticado.", cpf);
            request.extensions_mut().insert(OrganizadorCpf(cpf));
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: sem organizador na sessão. Redirecionando para /login");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            tracing::error!("Autenticação MW: Erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}
