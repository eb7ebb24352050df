// src/controle/acoes.rs
use serde::Deserialize;
use thiserror::Error;

/// Botões do ecrã de login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcaoLogin {
    Entrar,
    CadastroAtleta,
    CadastroOrganizador,
    ListarAtletas,
    ListarOrganizadores,
}

/// Botões do painel do organizador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcaoPainel {
    CriarEvento,
    GerenciarKits,
    Sair,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub acao: AcaoLogin,
    #[serde(default)]
    pub cpf: String,
}

#[derive(Debug, Deserialize)]
pub struct PainelForm {
    pub acao: AcaoPainel,
    // Linha selecionada na tabela: o id do evento, não a posição
    #[serde(default)]
    pub evento_id: Option<String>,
}

/// Tentativas de login que terminam num aviso em vez de abrir um painel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FalhaLogin {
    #[error("Por favor, insira um CPF.")]
    CpfVazio,
    #[error("CPF não encontrado.")]
    CpfNaoEncontrado,
    #[error("Painel do Atleta ainda não implementado.")]
    PainelAtletaNaoImplementado,
    #[error("Tipo de usuário desconhecido.")]
    TipoDesconhecido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FalhaPainel {
    #[error("Por favor, selecione um evento na tabela primeiro.")]
    NenhumEventoSelecionado,
    #[error("O evento selecionado já não existe.")]
    EventoNaoEncontrado,
}
