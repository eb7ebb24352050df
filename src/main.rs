// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod controle;
mod db;
mod error;
mod models;
mod services;
mod state;
mod templates;
mod web;

#[cfg(test)]
mod test_support;

// --- Imports ---
use crate::{config::Settings, state::AppState};
use axum::serve;
use tokio::net::TcpListener;
use tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| Settings::log_filter().into()))
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando servidor de Inscrições Esportivas...");

    let settings = Settings::from_env()
        .map_err(|e| anyhow::anyhow!("Falha ao ler configuração: {}", e))?;
    let cookie_key = settings.cookie_key()?;

    // --- Configuração da Base de Dados ---
    let db_pool = match db::create_db_pool(&settings.database_url, settings.db_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };

    // --- Configuração das Sessões ---
    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
    session_store.migrate().await?;

    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let app_state = AppState { db_pool, cookie_key };

    // --- Configuração do Endereço e Listener ---
    tracing::info!("📡 Servidor escutando em http://{}", settings.bind_addr);
    let listener = match TcpListener::bind(settings.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", settings.bind_addr, e);
            return Err(e.into());
        }
    };

    let app = web::routes::build_app(app_state, session_store, settings.session_inactivity_days);
    tracing::info!("✅ Router e middlewares configurados.");

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
