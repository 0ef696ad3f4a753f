//! Login screen.

use leptos::prelude::*;

use super::shell::Shell;
use super::{Toast, render};
use crate::routes::LOGIN_PATH;

/// Inline field errors for the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub cpf: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cpf.is_none() && self.password.is_none()
    }
}

#[component]
pub fn FieldError(error: Option<String>) -> impl IntoView {
    error.map(|message| view! { <p class="field-error">{message}</p> })
}

#[component]
fn LoginForm(cpf: String, errors: LoginErrors) -> impl IntoView {
    view! {
        <h1>"Entrar"</h1>
        <form method="post" action=LOGIN_PATH class="login">
            <label>
                "CPF"
                <input name="cpf" inputmode="numeric" data-mask="cpf" autocomplete="username" value=cpf/>
            </label>
            <FieldError error=errors.cpf/>
            <label>
                "Senha"
                <input name="password" type="password" autocomplete="current-password"/>
            </label>
            <FieldError error=errors.password/>
            <button type="submit">"Entrar"</button>
        </form>
    }
}

/// `cpf` is echoed back into the form so a failed attempt keeps it.
#[must_use]
pub fn login_page(cpf: &str, errors: &LoginErrors, toast: Option<&Toast>) -> String {
    let cpf = cpf.to_owned();
    let errors = errors.clone();
    let toast = toast.cloned();
    render(move || {
        view! {
            <Shell title="Entrar".to_owned() user=None toast=toast>
                <LoginForm cpf=cpf errors=errors/>
            </Shell>
        }
    })
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
