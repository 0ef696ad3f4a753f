//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! read-only apart from the list sequencer: configuration, the token verifier
//! and an anonymous `ApiClient` that handlers derive token-bearing clients
//! from.

use std::sync::Arc;
use std::time::Duration;

use crate::api::client::ApiClient;
use crate::api::list::RequestSequencer;
use crate::config::Config;
use crate::session::token::TokenVerifier;

/// Clone is required by Axum; all inner fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub verifier: TokenVerifier,
    pub api: ApiClient,
    pub sequencer: RequestSequencer,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let api = ApiClient::new(&config.api_base_url, Duration::from_secs(config.connect_timeout_secs))?;
        let verifier = TokenVerifier::new(&config.jwt_secret);
        Ok(Self { config: Arc::new(config), verifier, api, sequencer: RequestSequencer::default() })
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
