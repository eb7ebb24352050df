// src/models/evento.rs
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use sqlx::FromRow;
use std::fmt;
use thiserror::Error;

/// Formato em que as datas dos eventos são digitadas e guardadas.
pub const FORMATO_DATA_EVENTO: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Evento {
    pub id: i64,
    pub organizador_cpf: String,
    pub nome: String,
    pub data: String, // dd/mm/aaaa
    pub local: String,
}

#[derive(Debug, Deserialize)]
pub struct NovoEventoForm {
    pub nome: String,
    pub data: String,
    #[serde(default)]
    pub local: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Data inválida: '{0}' (use dd/mm/aaaa)")]
pub struct DataInvalida(pub String);

/// Dia e mês com 1 ou 2 dígitos, ano com exatamente 4, sem espaços.
/// O `%Y` do chrono sozinho aceitaria "10/10/30" como o ano 30.
fn formato_valido(data: &str) -> bool {
    fn digitos(parte: &str, min: usize, max: usize) -> bool {
        (min..=max).contains(&parte.len()) && parte.bytes().all(|b| b.is_ascii_digit())
    }

    match data.split('/').collect::<Vec<_>>().as_slice() {
        [dia, mes, ano] => digitos(dia, 1, 2) && digitos(mes, 1, 2) && digitos(ano, 4, 4),
        _ => false,
    }
}

pub fn parse_data_evento(data: &str) -> Result<NaiveDate, DataInvalida> {
    if !formato_valido(data) {
        return Err(DataInvalida(data.to_string()));
    }
    NaiveDate::parse_from_str(data, FORMATO_DATA_EVENTO).map_err(|_| DataInvalida(data.to_string()))
}

/// Estado de um evento no painel. Calculado a cada renderização, nunca guardado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvento {
    InscricoesAbertas,
    Concluido,
    DataInvalida,
}

impl StatusEvento {
    /// O evento conta a partir da meia-noite do dia: passa a `Concluido`
    /// assim que esse instante fica estritamente antes de `agora`.
    pub fn calcular(data: &str, agora: NaiveDateTime) -> Self {
        match parse_data_evento(data) {
            Ok(dia) if dia.and_time(NaiveTime::MIN) < agora => StatusEvento::Concluido,
            Ok(_) => StatusEvento::InscricoesAbertas,
            Err(_) => StatusEvento::DataInvalida,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusEvento::InscricoesAbertas => "Inscrições Abertas",
            StatusEvento::Concluido => "Concluído",
            StatusEvento::DataInvalida => "Data Inválida",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusEvento::InscricoesAbertas => "status-aberto",
            StatusEvento::Concluido => "status-concluido",
            StatusEvento::DataInvalida => "status-invalido",
        }
    }
}

impl fmt::Display for StatusEvento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uma linha da tabela do painel do organizador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinhaPainel {
    pub evento_id: i64,
    pub nome: String,
    pub data: String,
    pub inscritos: i64,
    pub status: StatusEvento,
}
