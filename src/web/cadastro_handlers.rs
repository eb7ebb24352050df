// src/web/cadastro_handlers.rs
use crate::{
    controle::sistema::normalizar_cpf,
    error::{AppError, AppResult},
    models::usuario::{CadastroForm, TipoUsuario},
    services::usuario_service::{self, NovoUsuario},
    state::AppState,
    templates::{render, CadastroPage, ListaUsuariosPage},
    web::aviso::{self, Aviso},
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

fn pagina_cadastro(tipo: TipoUsuario, aviso: Option<Aviso>) -> CadastroPage {
    match tipo {
        TipoUsuario::Atleta => CadastroPage {
            aviso,
            titulo: "Cadastro de Atleta",
            acao_url: "/atletas/novo",
            is_atleta: true,
        },
        TipoUsuario::Organizador => CadastroPage {
            aviso,
            titulo: "Cadastro de Organizador",
            acao_url: "/organizadores/novo",
            is_atleta: false,
        },
    }
}

fn opcional(valor: &Option<String>) -> Option<&str> {
    valor.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

async fn cadastrar(state: &AppState, cookies: &Cookies, tipo: TipoUsuario, form: CadastroForm) -> AppResult<Response> {
    let cpf = normalizar_cpf(&form.cpf);
    let nome = form.nome.trim();

    // 1. Campos obrigatórios; 2. grava (CPF repetido volta como recusa)
    let recusa = if cpf.is_empty() {
        Some("Por favor, insira um CPF.".to_string())
    } else if nome.is_empty() {
        Some("Por favor, insira o nome.".to_string())
    } else {
        let novo = NovoUsuario {
            cpf: &cpf,
            nome,
            email: form.email.trim(),
            tipo,
            telefone: opcional(&form.telefone),
            data_nascimento: opcional(&form.data_nascimento),
        };
        match usuario_service::create_usuario(&state.db_pool, novo).await {
            Ok(()) => None,
            Err(AppError::Conflito(mensagem)) => Some(mensagem),
            Err(e) => return Err(e),
        }
    };

    match recusa {
        None => {
            // Depois do cadastro, o utilizador volta ao ecrã de login
            aviso::exibir_sucesso(cookies, &state.cookie_key, "Cadastro realizado com sucesso!");
            Ok(Redirect::to("/login").into_response())
        }
        Some(mensagem) => Ok(render(&pagina_cadastro(tipo, Some(Aviso::erro(mensagem))))?.into_response()),
    }
}

async fn listar(state: &AppState, cookies: &Cookies, tipo: TipoUsuario, titulo: &'static str) -> AppResult<Response> {
    let usuarios = usuario_service::list_usuarios_by_tipo(&state.db_pool, tipo).await?;
    let page = ListaUsuariosPage {
        aviso: aviso::tomar(cookies, &state.cookie_key),
        titulo,
        usuarios,
    };
    Ok(render(&page)?.into_response())
}

// --- Cadastros ---

// GET /atletas/novo
pub async fn show_cadastro_atleta(State(state): State<AppState>, cookies: Cookies) -> AppResult<Response> {
    let page = pagina_cadastro(TipoUsuario::Atleta, aviso::tomar(&cookies, &state.cookie_key));
    Ok(render(&page)?.into_response())
}

// POST /atletas/novo
pub async fn handle_cadastro_atleta(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CadastroForm>,
) -> AppResult<Response> {
    cadastrar(&state, &cookies, TipoUsuario::Atleta, form).await
}

// GET /organizadores/novo
pub async fn show_cadastro_organizador(State(state): State<AppState>, cookies: Cookies) -> AppResult<Response> {
    let page = pagina_cadastro(TipoUsuario::Organizador, aviso::tomar(&cookies, &state.cookie_key));
    Ok(render(&page)?.into_response())
}

// POST /organizadores/novo
pub async fn handle_cadastro_organizador(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CadastroForm>,
) -> AppResult<Response> {
    cadastrar(&state, &cookies, TipoUsuario::Organizador, form).await
}

// --- Listagens ---

// GET /atletas
pub async fn listar_atletas(State(state): State<AppState>, cookies: Cookies) -> AppResult<Response> {
    listar(&state, &cookies, TipoUsuario::Atleta, "Atletas").await
}

// GET /organizadores
pub async fn listar_organizadores(State(state): State<AppState>, cookies: Cookies) -> AppResult<Response> {
    listar(&state, &cookies, TipoUsuario::Organizador, "Organizadores").await
}
