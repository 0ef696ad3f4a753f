//! Document shell and the signed-in header shared by every screen.

use leptos::prelude::*;

use super::{Toast, ToastBanner};
use crate::api::models::ResourceKind;
use crate::routes::{DASHBOARD_PATH, VALIDATE_PATH};
use crate::session::LoggedUser;

/// Full HTML document. The header only renders for a signed-in user.
#[component]
pub fn Shell(title: String, user: Option<LoggedUser>, toast: Option<Toast>, children: Children) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <link rel="stylesheet" href="/assets/app.css"/>
                <script defer="defer" src="/assets/app.js"></script>
            </head>
            <body>
                {user.map(|user| view! { <SiteHeader user=user/> })}
                <div class="toasts" id="toasts">
                    {toast.map(|toast| view! { <ToastBanner toast=toast/> })}
                </div>
                <main>{children()}</main>
            </body>
        </html>
    }
}

/// Navigation limited to the screens `user` may see, plus who is signed in.
#[component]
fn SiteHeader(user: LoggedUser) -> impl IntoView {
    let links = ResourceKind::ALL
        .into_iter()
        .filter(|kind| kind.visible_to(&user))
        .map(|kind| {
            view! { <a href=format!("{DASHBOARD_PATH}/{}", kind.slug())>{kind.title()}</a> }
        })
        .collect_view();
    let company = user
        .client
        .as_ref()
        .map(|client| view! { <span class="company">{client.fantasy_name.clone()}</span> });

    view! {
        <header>
            <nav>
                <a href=DASHBOARD_PATH>"Início"</a>
                {links}
                <a href=VALIDATE_PATH>"Validar código"</a>
            </nav>
            <div class="who">
                <span class="name">{user.name.clone()}</span>
                {company}
                <form method="post" action="/logout">
                    <button type="submit">"Sair"</button>
                </form>
            </div>
        </header>
    }
}
