//! Auth session provider: who is logged in, and signing in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Handlers obtain an `AuthSession` through the extractor below. Behind the
//! route guard it is built from the guard's `VerifiedSession`; elsewhere it
//! re-reads and verifies the cookie, and quietly falls back to anonymous on
//! any failure. `sign_in` is the only path that turns a backend failure into
//! an error, so the login form can show it inline.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::{Deserialize, Serialize};

use super::cpf;
use crate::api::client::{ApiClient, RequestResult};
use crate::routes::LOGIN_PATH;
use crate::routes::guard::verify_session;
use crate::session::{LoggedUser, Session, VerifiedSession};
use crate::state::AppState;

pub const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    /// The backend refused the credentials; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("login response did not include an access token")]
    MissingToken,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    cpf: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    user: LoggedUser,
}

pub struct AuthSession {
    user: Option<LoggedUser>,
    client: ApiClient,
}

impl AuthSession {
    #[must_use]
    pub fn anonymous(api: &ApiClient) -> Self {
        Self { user: None, client: api.clone() }
    }

    /// Rebuild the in-memory state from a stored session.
    #[must_use]
    pub fn restore(api: &ApiClient, session: Option<&Session>) -> Self {
        match session {
            Some(s) => Self { user: Some(s.user.clone()), client: api.with_token(&s.access_token) },
            None => Self::anonymous(api),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&LoggedUser> {
        self.user.as_ref()
    }

    /// The logged-in user, or a redirect to the login screen.
    ///
    /// # Errors
    ///
    /// Returns a redirect when no user is signed in.
    pub fn require_user(&self) -> Result<&LoggedUser, Redirect> {
        self.user.as_ref().ok_or_else(|| Redirect::to(LOGIN_PATH))
    }

    /// Client carrying this session's bearer token, if any.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Authenticate against the backend. On success the user and token are
    /// installed on `self` and the session to persist is returned.
    ///
    /// # Errors
    ///
    /// `Rejected` with the backend message on any failed call; `MissingToken`
    /// when the backend answers 2xx without an access token header.
    pub async fn sign_in(&mut self, cpf_input: &str, password: &str) -> Result<Session, AuthError> {
        let digits = cpf::normalize(cpf_input);
        let body = LoginRequest { cpf: &digits, password };
        match self
            .client
            .post::<LoginResponse>(LOGIN_ENDPOINT, &body)
            .await
        {
            RequestResult::Failure { message } => {
                tracing::info!(%message, "sign-in rejected");
                Err(AuthError::Rejected(message))
            }
            RequestResult::Success { data, headers, .. } => {
                let token = bearer_token(&headers).ok_or(AuthError::MissingToken)?;
                self.client = self.client.with_token(&token);
                self.user = Some(data.user.clone());
                tracing::info!(user_id = %data.user.id, "signed in");
                Ok(Session { access_token: token, user: data.user })
            }
        }
    }
}

/// Access token from the `Authorization` response header, with or without a
/// `Bearer ` prefix.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };
    (!token.is_empty()).then(|| token.to_owned())
}

impl<S> FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        if let Some(verified) = parts.extensions.get::<VerifiedSession>() {
            return Ok(Self::restore(&app_state.api, Some(&verified.session)));
        }
        let jar = CookieJar::from_headers(&parts.headers);
        let verified = verify_session(&app_state, &jar);
        Ok(Self::restore(&app_state.api, verified.as_ref().map(|v| &v.session)))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
