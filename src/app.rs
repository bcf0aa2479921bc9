use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use crate::{
    config::Config,
    handlers,
    middleware,
    services::CredentialService,
};

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub credentials: CredentialService,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let credentials = CredentialService::from_config(&config.auth);
        Self {
            db,
            config: Arc::new(config),
            credentials,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    // Session store setup; the cookie carries only the signed session id
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session.secure)
        .with_same_site(SameSite::Lax)
        .with_name(config.session.cookie_name.clone())
        .with_signed(config.session.signing_key());

    let public = Router::new()
        .route("/", get(handlers::home).post(handlers::add_guest_task))
        .route("/register", get(handlers::register_page).post(handlers::handle_register))
        .route("/login", get(handlers::login_page).post(handlers::handle_login))
        .route("/logout", get(handlers::handle_logout));

    let protected = Router::new()
        .route("/dashboard", get(handlers::serve_dashboard))
        .route("/add-task", get(handlers::add_task_page).post(handlers::add_task))
        .route("/edit/:task_id", get(handlers::edit_task_page).post(handlers::edit_task))
        .route("/delete/:task_id", get(handlers::delete_task).post(handlers::delete_task))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_login));

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service("/static", ServeDir::new("static"))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.server.body_limit))
        .with_state(state)
}
