// src/templates.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        evento::{Evento, LinhaPainel},
        inscricao::{InscricaoKit, TAMANHOS_CAMISETA},
        usuario::Usuario,
    },
    web::aviso::Aviso,
};
use askama::Template;
use axum::response::Html;

/// Renderiza um template, registando a falha antes de a devolver.
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template: {}", e);
        AppError::TemplateError(e)
    })
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub aviso: Option<Aviso>,
    // Mantém o que foi digitado quando o login é recusado
    pub cpf: String,
}

#[derive(Template)]
#[template(path = "painel.html")]
pub struct PainelPage {
    pub aviso: Option<Aviso>,
    pub nome_organizador: String,
    pub linhas: Vec<LinhaPainel>,
}

#[derive(Template)]
#[template(path = "novo_evento.html")]
pub struct NovoEventoPage {
    pub aviso: Option<Aviso>,
    pub nome: String,
    pub data: String,
    pub local: String,
}

#[derive(Template)]
#[template(path = "kits.html")]
pub struct KitsPage {
    pub aviso: Option<Aviso>,
    pub evento_id: i64,
    pub evento_nome: String,
    pub evento_data: String,
    pub evento_local: String,
    pub inscricoes: Vec<InscricaoKit>,
    pub tamanhos: &'static [&'static str],
}

impl KitsPage {
    pub fn new(aviso: Option<Aviso>, evento: Evento, inscricoes: Vec<InscricaoKit>) -> Self {
        Self {
            aviso,
            evento_id: evento.id,
            evento_nome: evento.nome,
            evento_data: evento.data,
            evento_local: evento.local,
            inscricoes,
            tamanhos: TAMANHOS_CAMISETA,
        }
    }

    pub fn entregues(&self) -> usize {
        self.inscricoes.iter().filter(|i| i.kit_entregue).count()
    }
}

#[derive(Template)]
#[template(path = "cadastro.html")]
pub struct CadastroPage {
    pub aviso: Option<Aviso>,
    pub titulo: &'static str,
    pub acao_url: &'static str,
    // Atleta pede data de nascimento, organizador pede telefone
    pub is_atleta: bool,
}

#[derive(Template)]
#[template(path = "lista_usuarios.html")]
pub struct ListaUsuariosPage {
    pub aviso: Option<Aviso>,
    pub titulo: &'static str,
    pub usuarios: Vec<Usuario>,
}
