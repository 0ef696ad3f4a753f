//! Route guard: session check before every page render.
//!
//! Per navigation:
//! - public path: allow without touching the session;
//! - otherwise read the cookie and verify the token; no valid session
//!   redirects to the login screen;
//! - a valid session at the site root redirects to the dashboard;
//! - anything else is allowed and the verified session rides along in the
//!   request extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use time::OffsetDateTime;

use super::{DASHBOARD_PATH, LOGIN_PATH, ROOT_PATH};
use crate::session::token::{expires_at, is_unexpired};
use crate::session::{VerifiedSession, store};
use crate::state::AppState;

/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

#[must_use]
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Decide one navigation. `session_valid` only runs for non-public paths.
pub fn decide(path: &str, session_valid: impl FnOnce() -> bool) -> GuardDecision {
    if is_public_path(path) {
        return GuardDecision::Allow;
    }
    if !session_valid() {
        return GuardDecision::Redirect(LOGIN_PATH);
    }
    if path == ROOT_PATH {
        return GuardDecision::Redirect(DASHBOARD_PATH);
    }
    GuardDecision::Allow
}

/// Read and verify the session cookie. Every failure is `None`.
#[must_use]
pub fn verify_session(state: &AppState, jar: &CookieJar) -> Option<VerifiedSession> {
    let session = store::read(&state.config, jar)?;
    let payload = match state.verifier.verify(&session.access_token) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(error = %e, "session token rejected");
            return None;
        }
    };
    if !is_unexpired(&payload, OffsetDateTime::now_utc()) {
        tracing::debug!(exp = payload.exp, "session token past expiry");
        return None;
    }
    Some(VerifiedSession { expires_at: expires_at(&payload), session })
}

/// Axum middleware applying [`decide`] to every request of the page router.
pub async fn require_session(State(state): State<AppState>, jar: CookieJar, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut verified = None;
    let decision = decide(&path, || {
        verified = verify_session(&state, &jar);
        verified.is_some()
    });

    match decision {
        GuardDecision::Allow => {
            if let Some(v) = verified {
                tracing::trace!(user_id = %v.session.user.id, expires_at = %v.expires_at, "session verified");
                req.extensions_mut().insert(v);
            }
            next.run(req).await
        }
        GuardDecision::Redirect(to) => {
            tracing::debug!(%path, to, "guard redirect");
            Redirect::temporary(to).into_response()
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
