//! Resource list screens.
//!
//! The list body (error toast, total, table, pagination) is its own
//! component so the live-filter endpoint can re-render exactly the part of
//! the page that depends on the query.

use leptos::prelude::*;

use super::shell::Shell;
use super::{Toast, ToastBanner, page_href, render};
use crate::api::list::{Filter, ListOutcome, ListQuery};
use crate::api::models::{ResourceKind, TableRow};
use crate::routes::{DASHBOARD_PATH, IMPORT_PATH};
use crate::session::LoggedUser;

/// Element id of the re-renderable list body.
pub const LIST_BODY_ID: &str = "list-body";

/// Everything a list screen shows, with rows already turned into cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub kind: ResourceKind,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
    pub total: u64,
    pub pages: u64,
    pub error: Option<String>,
    pub query: ListQuery,
}

impl ListSnapshot {
    #[must_use]
    pub fn new<T: TableRow>(kind: ResourceKind, outcome: &ListOutcome<T>, query: &ListQuery) -> Self {
        Self {
            kind,
            headers: T::HEADERS,
            rows: outcome.items.iter().map(TableRow::cells).collect(),
            total: outcome.total,
            pages: outcome.page_count(query.per_page),
            error: outcome.error.clone(),
            query: query.clone(),
        }
    }
}

fn filter_label(filter: Filter) -> &'static str {
    match filter {
        Filter::SearchInput => "Buscar",
        Filter::StatusId => "Status",
        Filter::StateId => "Estado",
        Filter::CityId => "Cidade",
        Filter::CategoryId => "Categoria",
        Filter::IsOnline => "Online",
        Filter::WasRedeemed => "Resgatado",
        Filter::ClientId => "Cliente",
    }
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[component]
fn FilterForm(kind: ResourceKind, query: ListQuery) -> impl IntoView {
    let inputs = kind
        .filters()
        .iter()
        .map(|filter| {
            let value = query.filter(*filter).unwrap_or_default().to_owned();
            view! {
                <label>
                    {filter_label(*filter)}
                    <input name=filter.key() value=value/>
                </label>
            }
        })
        .collect_view();
    view! {
        <form
            method="get"
            class="filters"
            data-live=format!("{DASHBOARD_PATH}/{}/data", kind.slug())
            data-target=LIST_BODY_ID
        >
            {inputs}
            <button type="submit">"Filtrar"</button>
        </form>
    }
}

#[component]
fn ImportForm() -> impl IntoView {
    view! {
        <form class="import" data-import=IMPORT_PATH>
            <label>
                "Importar CSV"
                <input type="file" accept=".csv,text/csv"/>
            </label>
        </form>
    }
}

#[component]
fn DataTable(headers: &'static [&'static str], rows: Vec<Vec<String>>) -> impl IntoView {
    let body = if rows.is_empty() {
        view! {
            <tr>
                <td colspan=headers.len().to_string()>"Nenhum registro encontrado"</td>
            </tr>
        }
        .into_any()
    } else {
        rows.into_iter()
            .map(|cells| {
                view! { <tr>{cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}</tr> }
            })
            .collect_view()
            .into_any()
    };
    view! {
        <table>
            <thead>
                <tr>{headers.iter().map(|header| view! { <th>{*header}</th> }).collect_view()}</tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}

/// Page position plus prev/next links carrying the current filters.
#[component]
fn Pagination(kind: ResourceKind, query: ListQuery, pages: u64) -> impl IntoView {
    let current = u64::from(query.page);
    let prev = (current > 1).then(|| page_href(kind, &query, current - 1));
    let next = (current < pages).then(|| page_href(kind, &query, current + 1));
    view! {
        <nav class="pagination">
            <span>{format!("Página {current} de {pages}")}</span>
            {prev.map(|href| view! { <a rel="prev" href=href>"Anterior"</a> })}
            {next.map(|href| view! { <a rel="next" href=href>"Próxima"</a> })}
        </nav>
    }
}

#[component]
fn ListBody(snapshot: ListSnapshot) -> impl IntoView {
    let ListSnapshot { kind, headers, rows, total, pages, error, query } = snapshot;
    view! {
        <section class="list-body" id=LIST_BODY_ID>
            {error.map(|message| view! { <ToastBanner toast=Toast::error(message)/> })}
            <p class="total">{format!("{total} registros")}</p>
            <div class="table">
                <DataTable headers=headers rows=rows/>
            </div>
            <Pagination kind=kind query=query pages=pages/>
        </section>
    }
}

// =============================================================================
// PAGES
// =============================================================================

#[must_use]
pub fn list_page(user: &LoggedUser, snapshot: &ListSnapshot) -> String {
    let user = user.clone();
    let snapshot = snapshot.clone();
    let kind = snapshot.kind;
    let query = snapshot.query.clone();
    render(move || {
        view! {
            <Shell title=kind.title().to_owned() user=Some(user) toast=None>
                <h1>{kind.title()}</h1>
                <FilterForm kind=kind query=query/>
                {(kind == ResourceKind::Members).then(|| view! { <ImportForm/> })}
                <ListBody snapshot=snapshot/>
            </Shell>
        }
    })
}

/// Only the list body, for swapping into an already rendered page.
#[must_use]
pub fn list_fragment(snapshot: &ListSnapshot) -> String {
    let snapshot = snapshot.clone();
    render(move || view! { <ListBody snapshot=snapshot/> })
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
