pub mod auth_handlers;
pub mod aviso;
pub mod cadastro_handlers;
pub mod kits_handlers;
pub mod mw_auth;
pub mod painel_handlers;
pub mod routes;
