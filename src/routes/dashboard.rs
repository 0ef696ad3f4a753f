//! Dashboard routes: landing page, resource lists, code validation, import.
//!
//! Every list screen goes through the same two generic functions; the only
//! per-resource knowledge lives in `ResourceKind` and the `TableRow` impls.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::client::{ApiClient, RequestOptions, RequestResult};
use crate::api::list::{ListError, ListQuery, fetch_list};
use crate::api::models::{Client, Establishment, Member, ResourceKind, TableRow, User, Voucher, VoucherCode};
use crate::services::auth::AuthSession;
use crate::session::LoggedUser;
use crate::state::AppState;
use crate::views::{self, ListSnapshot, Toast};

pub const VALIDATE_ENDPOINT: &str = "/voucher-codes/validate";
pub const IMPORT_ENDPOINT: &str = "/members/import";

/// `GET /painel`
pub async fn home(auth: AuthSession) -> Response {
    match auth.require_user() {
        Ok(user) => Html(views::home(user)).into_response(),
        Err(redirect) => redirect.into_response(),
    }
}

/// Resolve the slug and check the user may see it.
fn resolve(user: &LoggedUser, slug: &str) -> Result<ResourceKind, Response> {
    let Some(kind) = ResourceKind::from_slug(slug) else {
        return Err((StatusCode::NOT_FOUND, Html(views::not_found(Some(user)))).into_response());
    };
    if !kind.visible_to(user) {
        return Err((StatusCode::FORBIDDEN, Html(views::forbidden(user))).into_response());
    }
    Ok(kind)
}

// =============================================================================
// LIST PAGE
// =============================================================================

async fn render_list<T: DeserializeOwned + TableRow>(
    client: &ApiClient,
    user: &LoggedUser,
    kind: ResourceKind,
    query: &ListQuery,
) -> Html<String> {
    let outcome = fetch_list::<T>(client, kind.endpoint(), query).await;
    Html(views::list_page(user, &ListSnapshot::new(kind, &outcome, query)))
}

/// `GET /painel/{resource}`
pub async fn list_page(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let user = match auth.require_user() {
        Ok(u) => u,
        Err(redirect) => return redirect.into_response(),
    };
    let kind = match resolve(user, &slug) {
        Ok(k) => k,
        Err(resp) => return resp,
    };
    let query = ListQuery::from_params(&params, state.config.page_size, kind.filters());
    let client = auth.client();

    let html = match kind {
        ResourceKind::Members => render_list::<Member>(client, user, kind, &query).await,
        ResourceKind::Clients => render_list::<Client>(client, user, kind, &query).await,
        ResourceKind::Establishments => render_list::<Establishment>(client, user, kind, &query).await,
        ResourceKind::Vouchers => render_list::<Voucher>(client, user, kind, &query).await,
        ResourceKind::VoucherCodes => render_list::<VoucherCode>(client, user, kind, &query).await,
        ResourceKind::Users => render_list::<User>(client, user, kind, &query).await,
    };
    html.into_response()
}

// =============================================================================
// LIST DATA (live filtering)
// =============================================================================

/// Live-filter response: the re-rendered list body plus its counts.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListData {
    pub html: String,
    pub total: u64,
    pub pages: u64,
    pub error: Option<String>,
}

async fn list_rows<T: DeserializeOwned + TableRow>(client: ApiClient, kind: ResourceKind, query: ListQuery) -> ListData {
    let outcome = fetch_list::<T>(&client, kind.endpoint(), &query).await;
    let snapshot = ListSnapshot::new(kind, &outcome, &query);
    ListData {
        html: views::list_fragment(&snapshot),
        total: snapshot.total,
        pages: snapshot.pages,
        error: snapshot.error,
    }
}

/// `GET /painel/{resource}/data`. Newer requests from the same user for the
/// same list cancel older ones still in flight.
pub async fn list_data(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let user = match auth.require_user() {
        Ok(u) => u,
        Err(redirect) => return redirect.into_response(),
    };
    let kind = match resolve(user, &slug) {
        Ok(k) => k,
        Err(resp) => return resp,
    };
    let query = ListQuery::from_params(&params, state.config.page_size, kind.filters());
    let client = auth.client().clone();
    let key = format!("{}:{}", user.id, kind.slug());

    let result = match kind {
        ResourceKind::Members => {
            state
                .sequencer
                .run(key, list_rows::<Member>(client, kind, query))
                .await
        }
        ResourceKind::Clients => {
            state
                .sequencer
                .run(key, list_rows::<Client>(client, kind, query))
                .await
        }
        ResourceKind::Establishments => {
            state
                .sequencer
                .run(key, list_rows::<Establishment>(client, kind, query))
                .await
        }
        ResourceKind::Vouchers => {
            state
                .sequencer
                .run(key, list_rows::<Voucher>(client, kind, query))
                .await
        }
        ResourceKind::VoucherCodes => {
            state
                .sequencer
                .run(key, list_rows::<VoucherCode>(client, kind, query))
                .await
        }
        ResourceKind::Users => {
            state
                .sequencer
                .run(key, list_rows::<User>(client, kind, query))
                .await
        }
    };

    tracing::debug!(resource = kind.slug(), in_flight = state.sequencer.in_flight(), "live list request settled");
    match result {
        Ok(data) => Json(data).into_response(),
        Err(e @ ListError::Superseded) => {
            (StatusCode::CONFLICT, Json(json!({ "error": true, "message": e.to_string() }))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, resource = kind.slug(), "list task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": true, "message": e.to_string() }))).into_response()
        }
    }
}

// =============================================================================
// VOUCHER CODE VALIDATION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ValidateForm {
    #[serde(default)]
    pub code: String,
}

/// `GET /painel/validar`
pub async fn validate_page(auth: AuthSession) -> Response {
    match auth.require_user() {
        Ok(user) => Html(views::validate_page(user, "", None, None)).into_response(),
        Err(redirect) => redirect.into_response(),
    }
}

/// `POST /painel/validar`
pub async fn validate_submit(auth: AuthSession, Form(form): Form<ValidateForm>) -> Response {
    let user = match auth.require_user() {
        Ok(u) => u,
        Err(redirect) => return redirect.into_response(),
    };
    let code = form.code.trim();
    if code.is_empty() {
        let error = "Informe o código".to_owned();
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(views::validate_page(user, "", Some(&error), None)))
            .into_response();
    }

    match auth
        .client()
        .post::<Value>(VALIDATE_ENDPOINT, &json!({ "code": code }))
        .await
    {
        RequestResult::Success { message, .. } => {
            let toast = Toast::success(message.unwrap_or_else(|| "Código validado".to_owned()));
            Html(views::validate_page(user, "", None, Some(&toast))).into_response()
        }
        RequestResult::Failure { message } => {
            Html(views::validate_page(user, code, None, Some(&Toast::error(message)))).into_response()
        }
    }
}

// =============================================================================
// MEMBER IMPORT
// =============================================================================

/// `POST /painel/membros/importar`. The CSV body is forwarded as-is.
pub async fn import_members(auth: AuthSession, body: Bytes) -> Response {
    if let Err(redirect) = auth.require_user() {
        return redirect.into_response();
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": true, "message": "Arquivo vazio" })))
            .into_response();
    }

    let result = auth
        .client()
        .request::<Value>(Method::POST, IMPORT_ENDPOINT, RequestOptions::raw("text/csv", body))
        .await;
    let status = if result.is_error() { StatusCode::BAD_GATEWAY } else { StatusCode::OK };
    let message = result
        .message()
        .unwrap_or("Importação concluída")
        .to_owned();
    (status, Json(json!({ "error": result.is_error(), "message": message }))).into_response()
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
