//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page route sits behind the session guard, including the fallback,
//! so unknown paths also bounce unauthenticated visitors to `/login`. Health
//! checks and static assets are merged in outside the guard.

pub mod auth;
pub mod dashboard;
pub mod guard;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::auth::AuthSession;
use crate::state::AppState;
use crate::views;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/painel";
pub const VALIDATE_PATH: &str = "/painel/validar";
pub const IMPORT_PATH: &str = "/painel/membros/importar";

/// Guarded HTML pages.
fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(ROOT_PATH, get(root))
        .route(LOGIN_PATH, get(auth::login_page).post(auth::login_submit))
        .route("/logout", post(auth::logout))
        .route(DASHBOARD_PATH, get(dashboard::home))
        .route(VALIDATE_PATH, get(dashboard::validate_page).post(dashboard::validate_submit))
        .route(
            IMPORT_PATH,
            post(dashboard::import_members).layer(DefaultBodyLimit::max(state.config.import_max_bytes)),
        )
        .route("/painel/{resource}", get(dashboard::list_page))
        .route("/painel/{resource}/data", get(dashboard::list_data))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state, guard::require_session))
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/assets", ServeDir::new(assets_dir()))
        .merge(page_routes(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the static assets directory.
fn assets_dir() -> PathBuf {
    std::env::var("ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

/// The guard redirects `/` before this runs; kept so the route exists.
async fn root() -> Redirect {
    Redirect::temporary(DASHBOARD_PATH)
}

async fn not_found(auth: AuthSession) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::not_found(auth.user())))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
