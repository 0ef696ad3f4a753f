//! Server-rendered HTML for the dashboard screens.
//!
//! DESIGN
//! ======
//! Screens are Leptos components rendered to a string once per request by
//! [`render`]. Handlers already hold the verified session and the backend
//! data when they render, so every page is a plain function of its props and
//! nothing hydrates in the browser. Leptos escapes text nodes and attribute
//! values; no markup is assembled by hand.

mod dashboard;
mod list;
mod login;
mod shell;

use leptos::prelude::*;

use crate::api::list::ListQuery;
use crate::api::models::ResourceKind;
use crate::routes::DASHBOARD_PATH;

pub use dashboard::{forbidden, home, not_found, validate_page};
pub use list::{ListSnapshot, list_fragment, list_page};
pub use login::{LoginErrors, login_page};

// =============================================================================
// TOASTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// One-shot notification rendered at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, message: message.into() }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[component]
pub fn ToastBanner(toast: Toast) -> impl IntoView {
    let class = toast.class();
    view! {
        <div class=class role="status">
            {toast.message}
        </div>
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Build and render a view under a fresh reactive owner.
pub fn render<V: IntoView>(page: impl FnOnce() -> V) -> String {
    let owner = Owner::new();
    owner.with(|| page().to_html())
}

/// Link to `page` of a list screen, keeping the active filters.
#[must_use]
pub fn page_href(kind: ResourceKind, query: &ListQuery, page: u64) -> String {
    let mut pairs = vec![("page", page.to_string())];
    pairs.extend(
        query
            .filters
            .iter()
            .map(|(filter, value)| (filter.key(), value.clone())),
    );
    let encoded = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!("{DASHBOARD_PATH}/{}?{encoded}", kind.slug())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
