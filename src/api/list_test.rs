use std::time::Duration;

use axum::Router;
use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;

use super::*;
use crate::state::test_helpers::spawn_backend;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// =============================================================================
// Filter
// =============================================================================

#[test]
fn filter_keys_round_trip() {
    for filter in Filter::ALL {
        assert_eq!(Filter::from_key(filter.key()), Some(filter));
    }
    assert_eq!(Filter::from_key("page"), None);
}

// =============================================================================
// ListQuery
// =============================================================================

#[test]
fn take_and_skip_follow_page() {
    let mut q = ListQuery::new(10);
    assert_eq!((q.take(), q.skip()), (10, 0));
    q.page = 3;
    assert_eq!((q.take(), q.skip()), (10, 20));
}

#[test]
fn new_clamps_zero_page_size() {
    assert_eq!(ListQuery::new(0).per_page, 1);
}

#[test]
fn from_params_keeps_only_allowed_non_blank_filters() {
    let q = ListQuery::from_params(
        &params(&[("page", "2"), ("search-input", " ana "), ("status-id", ""), ("city-id", "7"), ("bogus", "1")]),
        5,
        &[Filter::SearchInput, Filter::StatusId],
    );
    assert_eq!(q.page, 2);
    assert_eq!(q.per_page, 5);
    assert_eq!(q.filters, vec![(Filter::SearchInput, "ana".to_owned())]);
    assert_eq!(q.filter(Filter::SearchInput), Some("ana"));
    assert_eq!(q.filter(Filter::CityId), None);
}

#[test]
fn from_params_bad_page_defaults_to_one() {
    for raw in ["0", "-1", "abc", ""] {
        let q = ListQuery::from_params(&params(&[("page", raw)]), 10, &[]);
        assert_eq!(q.page, 1, "page {raw:?}");
    }
}

#[test]
fn to_query_pairs_orders_pagination_first() {
    let mut q = ListQuery::new(20);
    q.page = 2;
    q.filters.push((Filter::WasRedeemed, "true".into()));
    assert_eq!(
        q.to_query_pairs(),
        vec![
            ("take".to_owned(), "20".to_owned()),
            ("skip".to_owned(), "20".to_owned()),
            ("was-redeemed".to_owned(), "true".to_owned()),
        ]
    );
}

#[test]
fn page_count_rounds_up_and_is_at_least_one() {
    let outcome = ListOutcome::<u8> { items: Vec::new(), total: 21, error: None };
    assert_eq!(outcome.page_count(10), 3);
    let empty = ListOutcome::<u8> { items: Vec::new(), total: 0, error: None };
    assert_eq!(empty.page_count(10), 1);
}

// =============================================================================
// fetch_list
// =============================================================================

async fn backend() -> ApiClient {
    let router = Router::new()
        .route(
            "/api/wrapped",
            get(|RawQuery(q): RawQuery| async move {
                let q = q.unwrap_or_default();
                ([("x-total-count", "57")], axum::Json(json!({ "message": "ok", "data": [q] })))
            }),
        )
        .route("/api/bare", get(|| async { axum::Json(json!(["a", "b", "c"])) }))
        .route(
            "/api/forbidden",
            get(|| async { (StatusCode::FORBIDDEN, axum::Json(json!({ "message": "Sem permissão" }))) }),
        );
    let base = spawn_backend(router).await;
    ApiClient::new(&base, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn fetch_list_reads_total_count_and_sends_pagination() {
    let client = backend().await;
    let mut q = ListQuery::new(10);
    q.page = 2;
    q.filters.push((Filter::ClientId, "c1".into()));
    let outcome: ListOutcome<String> = fetch_list(&client, "/wrapped", &q).await;
    assert_eq!(outcome.total, 57);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.items, vec!["take=10&skip=10&client-id=c1".to_owned()]);
}

#[tokio::test]
async fn fetch_list_accepts_bare_arrays_without_total() {
    let client = backend().await;
    let outcome: ListOutcome<String> = fetch_list(&client, "/bare", &ListQuery::new(10)).await;
    assert_eq!(outcome.items.len(), 3);
    assert_eq!(outcome.total, 3);
}

#[tokio::test]
async fn fetch_list_failure_carries_message() {
    let client = backend().await;
    let outcome: ListOutcome<String> = fetch_list(&client, "/forbidden", &ListQuery::new(10)).await;
    assert!(outcome.items.is_empty());
    assert_eq!(outcome.total, 0);
    assert_eq!(outcome.error.as_deref(), Some("Sem permissão"));
}

// =============================================================================
// RequestSequencer
// =============================================================================

#[tokio::test]
async fn newer_request_supersedes_older_for_same_key() {
    let seq = RequestSequencer::default();
    let older = seq.run("user:membros", async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "older"
    });
    let newer = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        seq.run("user:membros", async { "newer" }).await
    };
    let (older, newer) = tokio::join!(older, newer);
    assert!(matches!(older, Err(ListError::Superseded)));
    assert_eq!(newer.unwrap(), "newer");
    assert_eq!(seq.in_flight(), 0);
}

#[tokio::test]
async fn different_keys_do_not_interfere() {
    let seq = RequestSequencer::default();
    let a = seq.run("a", async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        1
    });
    let b = seq.run("b", async { 2 });
    let (a, b) = tokio::join!(a, b);
    assert_eq!(a.unwrap(), 1);
    assert_eq!(b.unwrap(), 2);
}

#[tokio::test]
async fn completed_request_clears_its_slot() {
    let seq = RequestSequencer::default();
    assert_eq!(seq.run("k", async { 7 }).await.unwrap(), 7);
    assert_eq!(seq.in_flight(), 0);
}

#[tokio::test]
async fn late_arriving_older_request_does_not_abort_newer() {
    let seq = RequestSequencer::default();
    let newer = seq.run_as(2, "k".into(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        "newer"
    });
    let older = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        seq.run_as(1, "k".into(), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "older"
        })
        .await
    };
    let (newer, older) = tokio::join!(newer, older);
    assert_eq!(newer.unwrap(), "newer");
    assert!(matches!(older, Err(ListError::Superseded)));
    assert_eq!(seq.in_flight(), 0);
}
