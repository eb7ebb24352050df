// src/web/auth_handlers.rs
use crate::{
    controle::{
        acoes::{AcaoLogin, LoginForm},
        sistema::ControladorSistema,
    },
    error::{AppError, AppResult},
    state::AppState,
    templates::{render, LoginPage},
    web::{aviso, mw_auth::SESSION_ORGANIZADOR},
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use tower_sessions::Session;

// GET /login
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
) -> AppResult<Response> {
    // Organizador já autenticado vai direto para o painel
    if session.get::<String>(SESSION_ORGANIZADOR).await.ok().flatten().is_some() {
        tracing::debug!("GET /login: organizador já logado, redirecionando para /painel");
        return Ok(Redirect::to("/painel").into_response());
    }

    let page = LoginPage {
        aviso: aviso::tomar(&cookies, &state.cookie_key),
        cpf: String::new(),
    };
    Ok(render(&page)?.into_response())
}

// POST /login: todos os botões do ecrã de login chegam aqui
pub async fn handle_login_screen(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    // Os botões de cadastro e listagem só encaminham para as páginas respetivas
    match form.acao {
        AcaoLogin::CadastroAtleta => Ok(Redirect::to("/atletas/novo").into_response()),
        AcaoLogin::CadastroOrganizador => Ok(Redirect::to("/organizadores/novo").into_response()),
        AcaoLogin::ListarAtletas => Ok(Redirect::to("/atletas").into_response()),
        AcaoLogin::ListarOrganizadores => Ok(Redirect::to("/organizadores").into_response()),
        AcaoLogin::Entrar => processar_login(&state, &session, form.cpf).await,
    }
}

async fn processar_login(state: &AppState, session: &Session, cpf_input: String) -> AppResult<Response> {
    let controlador = ControladorSistema::new(&state.db_pool);

    match controlador.processar_login(&cpf_input).await? {
        Ok(organizador) => {
            // Autentica a sessão: novo ID e CPF do organizador guardado
            session
                .cycle_id()
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
            session
                .insert(SESSION_ORGANIZADOR, &organizador.cpf)
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;
            Ok(Redirect::to("/painel").into_response())
        }
        Err(falha) => {
            // Volta ao ecrã de login com a mensagem e o CPF digitado
            let page = LoginPage {
                aviso: Some(aviso::Aviso::erro(falha.to_string())),
                cpf: cpf_input,
            };
            Ok(render(&page)?.into_response())
        }
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    encerrar_sessao(&session).await?;
    Ok(Redirect::to("/login"))
}

/// Fecha o painel: apaga a sessão e volta ao ecrã de login.
pub async fn encerrar_sessao(session: &Session) -> AppResult<()> {
    let cpf: Option<String> = session.get(SESSION_ORGANIZADOR).await.ok().flatten();

    // Apaga todos os dados da sessão atual
    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    match cpf {
        Some(cpf) => tracing::info!("🚪 Organizador '{}' saiu do painel.", cpf),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }
    Ok(())
}
