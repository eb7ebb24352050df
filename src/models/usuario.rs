// src/models/usuario.rs
use serde::Deserialize;
use sqlx::FromRow;

/// Linha lida da tabela `usuarios`. Só existe na fronteira com a base de dados:
/// o resto da aplicação trabalha com [`Usuario`].
#[derive(Debug, Clone, FromRow)]
pub struct UsuarioRow {
    pub cpf: String,
    pub nome: String,
    pub email: String,
    pub tipo: String,
    pub telefone: Option<String>,
    pub data_nascimento: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoUsuario {
    Organizador,
    Atleta,
}

impl TipoUsuario {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoUsuario::Organizador => "organizador",
            TipoUsuario::Atleta => "atleta",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organizador {
    pub cpf: String,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atleta {
    pub cpf: String,
    pub nome: String,
    pub email: String,
    pub data_nascimento: Option<String>,
}

/// Utilizador já classificado pelo seu papel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Usuario {
    Organizador(Organizador),
    Atleta(Atleta),
    // Tipo gravado na base que esta versão não conhece
    Desconhecido { cpf: String, nome: String, tipo: String },
}

impl Usuario {
    pub fn cpf(&self) -> &str {
        match self {
            Usuario::Organizador(o) => &o.cpf,
            Usuario::Atleta(a) => &a.cpf,
            Usuario::Desconhecido { cpf, .. } => cpf,
        }
    }

    pub fn nome(&self) -> &str {
        match self {
            Usuario::Organizador(o) => &o.nome,
            Usuario::Atleta(a) => &a.nome,
            Usuario::Desconhecido { nome, .. } => nome,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Usuario::Organizador(o) => &o.email,
            Usuario::Atleta(a) => &a.email,
            Usuario::Desconhecido { .. } => "",
        }
    }
}

impl From<UsuarioRow> for Usuario {
    fn from(row: UsuarioRow) -> Self {
        match row.tipo.as_str() {
            "organizador" => Usuario::Organizador(Organizador {
                cpf: row.cpf,
                nome: row.nome,
                email: row.email,
                telefone: row.telefone,
            }),
            "atleta" => Usuario::Atleta(Atleta {
                cpf: row.cpf,
                nome: row.nome,
                email: row.email,
                data_nascimento: row.data_nascimento,
            }),
            _ => Usuario::Desconhecido {
                cpf: row.cpf,
                nome: row.nome,
                tipo: row.tipo,
            },
        }
    }
}

/// Dados do formulário de cadastro (atleta ou organizador).
#[derive(Debug, Deserialize)]
pub struct CadastroForm {
    pub cpf: String,
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub data_nascimento: Option<String>,
}
