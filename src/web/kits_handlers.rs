// src/web/kits_handlers.rs
use crate::{
    controle::sistema::normalizar_cpf,
    error::{AppError, AppResult},
    models::{
        inscricao::{tamanho_valido, NovaInscricaoForm},
        usuario::Usuario,
    },
    services::{evento_service, inscricao_service, usuario_service},
    state::AppState,
    templates::{render, KitsPage},
    web::{aviso, mw_auth::OrganizadorCpf},
};
use axum::{
    extract::{Extension, Form, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

fn url_kits(evento_id: i64) -> String {
    format!("/painel/eventos/{}/kits", evento_id)
}

// GET /painel/eventos/{id}/kits
pub async fn show_kits(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(OrganizadorCpf(cpf)): Extension<OrganizadorCpf>,
    Path(evento_id): Path<i64>,
) -> AppResult<Response> {
    // Só o organizador dono do evento vê os kits (o ID vem da URL)
    let Some(evento) = evento_service::find_evento_do_organizador(&state.db_pool, evento_id, &cpf).await? else {
        tracing::warn!("Organizador {} tentou abrir kits do evento {}.", cpf, evento_id);
        aviso::exibir_erro(&cookies, &state.cookie_key, "O evento selecionado já não existe.");
        return Ok(Redirect::to("/painel").into_response());
    };

    // Inscrições com o nome de cada atleta, ordenadas por nome
    let inscricoes = inscricao_service::list_kits_by_evento(&state.db_pool, evento.id).await?;
    let page = KitsPage::new(aviso::tomar(&cookies, &state.cookie_key), evento, inscricoes);
    Ok(render(&page)?.into_response())
}

// POST /painel/eventos/{id}/inscricoes
pub async fn handle_nova_inscricao(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(OrganizadorCpf(cpf)): Extension<OrganizadorCpf>,
    Path(evento_id): Path<i64>,
    Form(form): Form<NovaInscricaoForm>,
) -> AppResult<Response> {
    // 1. O evento tem de ser deste organizador
    if evento_service::find_evento_do_organizador(&state.db_pool, evento_id, &cpf).await?.is_none() {
        return Err(AppError::NotFound);
    }

    // 2. Valida CPF, tamanho e tipo de utilizador
    let atleta_cpf = normalizar_cpf(&form.cpf);
    let mensagem_erro = if atleta_cpf.is_empty() {
        Some("Por favor, insira um CPF.")
    } else if !tamanho_valido(&form.tamanho_camiseta) {
        Some("Tamanho de camiseta inválido.")
    } else {
        match usuario_service::find_usuario_by_cpf(&state.db_pool, &atleta_cpf).await? {
            Some(Usuario::Atleta(_)) => None,
            Some(_) => Some("O CPF informado não é de um atleta."),
            None => Some("CPF não encontrado."),
        }
    };

    if let Some(mensagem) = mensagem_erro {
        aviso::exibir_erro(&cookies, &state.cookie_key, mensagem);
        return Ok(Redirect::to(&url_kits(evento_id)).into_response());
    }

    // 3. Grava; inscrição repetida volta como aviso, não como página de erro
    match inscricao_service::create_inscricao(&state.db_pool, evento_id, &atleta_cpf, &form.tamanho_camiseta).await {
        Ok(_) => aviso::exibir_sucesso(&cookies, &state.cookie_key, "Atleta inscrito com sucesso!"),
        Err(AppError::Conflito(mensagem)) => aviso::exibir_erro(&cookies, &state.cookie_key, mensagem),
        Err(e) => return Err(e),
    }
    Ok(Redirect::to(&url_kits(evento_id)).into_response())
}

// POST /painel/eventos/{id}/kits/{inscricao_id}/entrega
pub async fn handle_alternar_entrega(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(OrganizadorCpf(cpf)): Extension<OrganizadorCpf>,
    Path((evento_id, inscricao_id)): Path<(i64, String)>,
) -> AppResult<Response> {
    if evento_service::find_evento_do_organizador(&state.db_pool, evento_id, &cpf).await?.is_none() {
        return Err(AppError::NotFound);
    }

    // Inscrição de outro evento dá NotFound no serviço
    let entregue = inscricao_service::alternar_kit_entregue(&state.db_pool, evento_id, &inscricao_id).await?;
    let mensagem = if entregue { "Kit marcado como entregue." } else { "Entrega do kit desfeita." };
    aviso::exibir_sucesso(&cookies, &state.cookie_key, mensagem);
    Ok(Redirect::to(&url_kits(evento_id)).into_response())
}
