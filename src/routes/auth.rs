//! Login and logout routes.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::DASHBOARD_PATH;
use crate::services::auth::AuthSession;
use crate::services::cpf;
use crate::session::store;
use crate::state::AppState;
use crate::views::{self, LoginErrors, Toast};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Client-side checks; failures never reach the backend.
    #[must_use]
    pub fn validate(&self) -> LoginErrors {
        let cpf = if self.cpf.trim().is_empty() {
            Some("Informe o CPF".to_owned())
        } else if !cpf::is_valid(&self.cpf) {
            Some("CPF inválido".to_owned())
        } else {
            None
        };
        let password = self
            .password
            .is_empty()
            .then(|| "Informe a senha".to_owned());
        LoginErrors { cpf, password }
    }

    /// CPF as it should be echoed back into the form.
    fn display_cpf(&self) -> String {
        cpf::format(&self.cpf).unwrap_or_else(|| self.cpf.trim().to_owned())
    }
}

/// `GET /login`
pub async fn login_page() -> Html<String> {
    Html(views::login_page("", &LoginErrors::default(), None))
}

/// `POST /login`: sign in and persist the session.
pub async fn login_submit(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(views::login_page(&form.display_cpf(), &errors, None)))
            .into_response();
    }

    let mut auth = AuthSession::anonymous(&state.api);
    let session = match auth.sign_in(&form.cpf, &form.password).await {
        Ok(s) => s,
        Err(e) => {
            let toast = Toast::error(e.to_string());
            return (
                StatusCode::UNAUTHORIZED,
                Html(views::login_page(&form.display_cpf(), &LoginErrors::default(), Some(&toast))),
            )
                .into_response();
        }
    };

    match store::create(&state.config, &session) {
        Ok(cookie) => (jar.add(cookie), Redirect::to(DASHBOARD_PATH)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session cookie serialization failed");
            let toast = Toast::error(crate::api::client::FALLBACK_ERROR_MESSAGE);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::login_page(&form.display_cpf(), &LoginErrors::default(), Some(&toast))),
            )
                .into_response()
        }
    }
}

/// `POST /logout`: drop the cookie and return to the login screen.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    store::destroy(&state.config, jar)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
