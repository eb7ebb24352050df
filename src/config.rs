// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};
use tower_cookies::Key;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_FILTER: &str =
    "inscricoes_esportivas=debug,tower_http=info,sqlx=warn,tower_sessions=info";

/// Configuração lida do ambiente (`.env` incluído).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_secret: String,
    pub session_inactivity_days: i64,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let session_secret = env::var("SESSION_SECRET")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR inválido: {}", e)))?;

        let session_inactivity_days = parse_or("SESSION_INACTIVITY_DAYS", 1)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 5)?;

        Ok(Self {
            database_url,
            bind_addr,
            session_secret,
            session_inactivity_days,
            db_max_connections,
        })
    }

    /// Chave que assina o cookie de avisos. O `cookie` exige pelo menos 64 bytes.
    pub fn cookie_key(&self) -> AppResult<Key> {
        Key::try_from(self.session_secret.as_bytes()).map_err(|_| {
            AppError::Config("SESSION_SECRET precisa de pelo menos 64 bytes".to_string())
        })
    }

    pub fn log_filter() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
    }
}

fn parse_or<T: std::str::FromStr>(var: &str, default: T) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("{} inválido: {}", var, e))),
        Err(_) => Ok(default),
    }
}
