//! Paginated list fetching shared by every list screen.
//!
//! DESIGN
//! ======
//! A list screen is endpoint + filters + page. `fetch_list` turns that into a
//! `take`/`skip` query, reads `x-total-count`, and returns items, total and an
//! optional error message in one value so screens never branch on transport
//! details.
//!
//! `RequestSequencer` covers live filtering: when a newer request arrives for
//! the same key, the older in-flight task is aborted and its caller gets
//! `ListError::Superseded`. The most recent input always wins.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tokio::task::AbortHandle;

use super::client::{ApiClient, RequestResult};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

// =============================================================================
// FILTERS
// =============================================================================

/// Query-string filters understood by the backend list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    SearchInput,
    StatusId,
    StateId,
    CityId,
    CategoryId,
    IsOnline,
    WasRedeemed,
    ClientId,
}

impl Filter {
    #[cfg(test)]
    pub const ALL: [Self; 8] = [
        Self::SearchInput,
        Self::StatusId,
        Self::StateId,
        Self::CityId,
        Self::CategoryId,
        Self::IsOnline,
        Self::WasRedeemed,
        Self::ClientId,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::SearchInput => "search-input",
            Self::StatusId => "status-id",
            Self::StateId => "state-id",
            Self::CityId => "city-id",
            Self::CategoryId => "category-id",
            Self::IsOnline => "is-online",
            Self::WasRedeemed => "was-redeemed",
            Self::ClientId => "client-id",
        }
    }

    #[cfg(test)]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

// =============================================================================
// QUERY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub filters: Vec<(Filter, String)>,
}

impl ListQuery {
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self { page: 1, per_page: per_page.max(1), filters: Vec::new() }
    }

    /// Build from raw query-string params. Only `allowed` filters are kept;
    /// blank values and unknown keys are dropped, bad page numbers become 1.
    #[must_use]
    pub fn from_params(params: &HashMap<String, String>, per_page: u32, allowed: &[Filter]) -> Self {
        let page = params
            .get("page")
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let filters = allowed
            .iter()
            .filter_map(|f| {
                let value = params.get(f.key())?.trim();
                (!value.is_empty()).then(|| (*f, value.to_owned()))
            })
            .collect();
        Self { page, filters, ..Self::new(per_page) }
    }

    #[must_use]
    pub fn take(&self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    #[must_use]
    pub fn filter(&self, filter: Filter) -> Option<&str> {
        self.filters
            .iter()
            .find(|(f, _)| *f == filter)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("take".to_owned(), self.take().to_string()), ("skip".to_owned(), self.skip().to_string())];
        pairs.extend(
            self.filters
                .iter()
                .map(|(f, v)| (f.key().to_owned(), v.clone())),
        );
        pairs
    }
}

// =============================================================================
// FETCH
// =============================================================================

/// List payloads arrive either bare or wrapped as `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// Items + total + error for one list screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListOutcome<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub error: Option<String>,
}

impl<T> ListOutcome<T> {
    #[must_use]
    pub fn page_count(&self, per_page: u32) -> u64 {
        self.total.div_ceil(u64::from(per_page.max(1))).max(1)
    }
}

pub async fn fetch_list<T: DeserializeOwned>(client: &ApiClient, endpoint: &str, query: &ListQuery) -> ListOutcome<T> {
    match client
        .get::<ListBody<T>>(endpoint, query.to_query_pairs())
        .await
    {
        RequestResult::Success { data, headers, .. } => {
            let items = data.into_items();
            let total = headers
                .get(TOTAL_COUNT_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(items.len() as u64);
            ListOutcome { items, total, error: None }
        }
        RequestResult::Failure { message } => ListOutcome { items: Vec::new(), total: 0, error: Some(message) },
    }
}

// =============================================================================
// SEQUENCER
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("superseded by a newer request")]
    Superseded,
    #[error("list task failed: {0}")]
    Task(String),
}

#[derive(Clone, Default)]
pub struct RequestSequencer {
    inflight: Arc<Mutex<HashMap<String, (u64, AbortHandle)>>>,
    next_id: Arc<AtomicU64>,
}

impl RequestSequencer {
    /// Run `fut` as the latest request for `key`, aborting any older one.
    ///
    /// # Errors
    ///
    /// `Superseded` when a newer request for the same key aborted this one.
    pub async fn run<F, T>(&self, key: impl Into<String>, fut: F) -> Result<T, ListError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.run_as(id, key.into(), fut).await
    }

    /// Ids are taken before the lock, so two racing calls can reach it in
    /// either order; the higher id always survives.
    async fn run_as<F, T>(&self, id: u64, key: String, fut: F) -> Result<T, ListError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(fut);
        {
            let mut inflight = self
                .inflight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let newer_running = inflight
                .get(&key)
                .is_some_and(|(current, _)| *current > id);
            if newer_running {
                handle.abort();
            } else if let Some((_, previous)) = inflight.insert(key.clone(), (id, handle.abort_handle())) {
                previous.abort();
            }
        }

        let outcome = handle.await;

        {
            let mut inflight = self
                .inflight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if inflight.get(&key).is_some_and(|(current, _)| *current == id) {
                inflight.remove(&key);
            }
        }

        match outcome {
            Ok(value) => Ok(value),
            Err(e) if e.is_cancelled() => Err(ListError::Superseded),
            Err(e) => Err(ListError::Task(e.to_string())),
        }
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
