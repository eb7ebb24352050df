// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, cadastro_handlers, kits_handlers, mw_auth, painel_handlers},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas: ecrã de login e os cadastros/listagens que ele abre ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login_screen))
        .route("/logout", get(auth_handlers::handle_logout))
        .route(
            "/atletas/novo",
            get(cadastro_handlers::show_cadastro_atleta).post(cadastro_handlers::handle_cadastro_atleta),
        )
        .route("/atletas", get(cadastro_handlers::listar_atletas))
        .route(
            "/organizadores/novo",
            get(cadastro_handlers::show_cadastro_organizador).post(cadastro_handlers::handle_cadastro_organizador),
        )
        .route("/organizadores", get(cadastro_handlers::listar_organizadores))
        .route("/", get(|| async { axum::response::Redirect::permanent("/login") }));

    // --- Painel do Organizador ---
    let painel_routes = Router::new()
        .route("/", get(painel_handlers::show_painel).post(painel_handlers::handle_painel_action))
        .route(
            "/eventos/novo",
            get(painel_handlers::show_novo_evento_form).post(painel_handlers::handle_novo_evento),
        )
        .route("/eventos/{id}/kits", get(kits_handlers::show_kits))
        .route("/eventos/{id}/inscricoes", post(kits_handlers::handle_nova_inscricao))
        .route(
            "/eventos/{id}/kits/{inscricao_id}/entrega",
            post(kits_handlers::handle_alternar_entrega),
        )
        .route_layer(middleware::from_fn(mw_auth::require_organizador));

    Router::new()
        .merge(public_routes)
        .nest("/painel", painel_routes)
        .with_state(app_state)
}

/// Router completo com as camadas de trace, cookies e sessão.
pub fn build_app<Store>(app_state: AppState, session_store: Store, inactivity_days: i64) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(inactivity_days)));

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CookieManagerLayer::new())
            .layer(session_layer),
    )
}
