// src/web/painel_handlers.rs
use crate::{
    controle::{
        acoes::{AcaoPainel, PainelForm},
        sistema::{agora, ControladorSistema},
    },
    error::AppResult,
    models::{evento::NovoEventoForm, usuario::Organizador},
    services::evento_service,
    state::AppState,
    templates::{render, NovoEventoPage, PainelPage},
    web::{aviso, auth_handlers::encerrar_sessao, mw_auth::OrganizadorCpf},
};
use axum::{
    extract::{Extension, Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use tower_sessions::Session;

/// Organizador da sessão, ou um redirecionamento para o login se ele deixou de existir.
async fn organizador_da_sessao(
    state: &AppState,
    session: &Session,
    cpf: &str,
) -> AppResult<Result<Organizador, Response>> {
    match ControladorSistema::new(&state.db_pool).carregar_organizador(cpf).await? {
        Some(organizador) => Ok(Ok(organizador)),
        None => {
            tracing::error!("CPF '{}' da sessão já não é de um organizador.", cpf);
            encerrar_sessao(session).await?;
            Ok(Err(Redirect::to("/login").into_response()))
        }
    }
}

// --- Painel ---

// GET /painel
pub async fn show_painel(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
    Extension(OrganizadorCpf(cpf)): Extension<OrganizadorCpf>,
) -> AppResult<Response> {
    let organizador = match organizador_da_sessao(&state, &session, &cpf).await? {
        Ok(organizador) => organizador,
        Err(redirect) => return Ok(redirect),
    };

    // Lista sempre consultada de novo: contagens e estados nunca ficam velhos
    let painel = ControladorSistema::new(&state.db_pool)
        .abrir_painel(&organizador, agora())
        .await?;

    let page = PainelPage {
        aviso: aviso::tomar(&cookies, &state.cookie_key),
        nome_organizador: painel.nome_organizador,
        linhas: painel.linhas,
    };
    Ok(render(&page)?.into_response())
}

// POST /painel: botões do painel
pub async fn handle_painel_action(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
    Extension(OrganizadorCpf(cpf)): Extension<OrganizadorCpf>,
    Form(form): Form<PainelForm>,
) -> AppResult<Response> {
    let organizador = match organizador_da_sessao(&state, &session, &cpf).await? {
        Ok(organizador) => organizador,
        Err(redirect) => return Ok(redirect),
    };

    match form.acao {
        AcaoPainel::CriarEvento => Ok(Redirect::to("/painel/eventos/novo").into_response()),
        AcaoPainel::GerenciarKits => {
            // A linha escolhida chega como ID do evento e é validada contra a lista atual
            let selecao = ControladorSistema::new(&state.db_pool)
                .selecionar_evento_para_kits(&organizador, form.evento_id.as_deref())
                .await?;
            match selecao {
                Ok(evento) => {
                    tracing::debug!("Abrindo kits do evento {} ({}).", evento.id, evento.nome);
                    Ok(Redirect::to(&format!("/painel/eventos/{}/kits", evento.id)).into_response())
                }
                Err(falha) => {
                    tracing::warn!("Gerenciar kits recusado para {}: {}", organizador.cpf, falha);
                    aviso::exibir_erro(&cookies, &state.cookie_key, falha.to_string());
                    Ok(Redirect::to("/painel").into_response())
                }
            }
        }
        AcaoPainel::Sair => {
            // Fechar o painel volta ao ecrã de login
            encerrar_sessao(&session).await?;
            Ok(Redirect::to("/login").into_response())
        }
    }
}

// --- Criação de eventos ---

// GET /painel/eventos/novo
pub async fn show_novo_evento_form(State(state): State<AppState>, cookies: Cookies) -> AppResult<Response> {
    let page = NovoEventoPage {
        aviso: aviso::tomar(&cookies, &state.cookie_key),
        nome: String::new(),
        data: String::new(),
        local: String::new(),
    };
    Ok(render(&page)?.into_response())
}

// POST /painel/eventos/novo
pub async fn handle_novo_evento(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(OrganizadorCpf(cpf)): Extension<OrganizadorCpf>,
    Form(form): Form<NovoEventoForm>,
) -> AppResult<Response> {
    match evento_service::create_evento(&state.db_pool, &cpf, &form.nome, &form.data, &form.local).await? {
        Ok(_) => {
            // O painel volta a consultar e a formatar a lista inteira
            aviso::exibir_sucesso(&cookies, &state.cookie_key, "Evento criado com sucesso!");
            Ok(Redirect::to("/painel").into_response())
        }
        Err(invalido) => {
            // Formulário de volta com o que foi digitado
            let page = NovoEventoPage {
                aviso: Some(aviso::Aviso::erro(invalido.to_string())),
                nome: form.nome,
                data: form.data,
                local: form.local,
            };
            Ok(render(&page)?.into_response())
        }
    }
}
