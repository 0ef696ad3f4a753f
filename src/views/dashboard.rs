//! Landing page, code validation and the error pages.

use leptos::prelude::*;

use super::login::FieldError;
use super::shell::Shell;
use super::{Toast, render};
use crate::api::models::ResourceKind;
use crate::routes::{DASHBOARD_PATH, VALIDATE_PATH};
use crate::session::LoggedUser;

#[must_use]
pub fn home(user: &LoggedUser) -> String {
    let user = user.clone();
    let greeting = format!("Olá, {}", user.name);
    let cards = ResourceKind::ALL
        .into_iter()
        .filter(|kind| kind.visible_to(&user))
        .collect::<Vec<_>>();
    render(move || {
        view! {
            <Shell title="Painel".to_owned() user=Some(user) toast=None>
                <h1>{greeting}</h1>
                <ul class="cards">
                    {cards
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <li>
                                    <a href=format!("{DASHBOARD_PATH}/{}", kind.slug())>{kind.title()}</a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Shell>
        }
    })
}

/// `code` refills the input; `error` is the inline field message.
#[must_use]
pub fn validate_page(user: &LoggedUser, code: &str, error: Option<&String>, toast: Option<&Toast>) -> String {
    let user = user.clone();
    let code = code.to_owned();
    let error = error.cloned();
    let toast = toast.cloned();
    render(move || {
        view! {
            <Shell title="Validar código".to_owned() user=Some(user) toast=toast>
                <h1>"Validar código"</h1>
                <form method="post" action=VALIDATE_PATH>
                    <label>
                        "Código"
                        <input name="code" autocomplete="off" value=code/>
                    </label>
                    <FieldError error=error/>
                    <button type="submit">"Validar"</button>
                </form>
            </Shell>
        }
    })
}

#[must_use]
pub fn forbidden(user: &LoggedUser) -> String {
    let user = user.clone();
    render(move || {
        view! {
            <Shell title="Acesso negado".to_owned() user=Some(user) toast=None>
                <h1>"Acesso negado"</h1>
            </Shell>
        }
    })
}

#[must_use]
pub fn not_found(user: Option<&LoggedUser>) -> String {
    let user = user.cloned();
    render(move || {
        view! {
            <Shell title="Página não encontrada".to_owned() user=user toast=None>
                <h1>"Página não encontrada"</h1>
            </Shell>
        }
    })
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
