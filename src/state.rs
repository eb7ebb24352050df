// src/state.rs
use sqlx::SqlitePool;
use tower_cookies::Key;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Assina o cookie dos avisos
    pub cookie_key: Key,
}
