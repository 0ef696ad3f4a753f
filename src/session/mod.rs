//! Session types shared by the cookie store, the token verifier and the guard.
//!
//! DESIGN
//! ======
//! The session lives entirely in one cookie: the backend's access token plus a
//! snapshot of the logged-in user. There is no server-side session table. A
//! session only counts once its token has been verified, which is what
//! `VerifiedSession` records.

pub mod store;
pub mod token;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Company a user belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: Uuid,
    pub fantasy_name: String,
}

/// Snapshot of the authenticated user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedUser {
    pub id: Uuid,
    pub name: String,
    pub role_id: i32,
    #[serde(default)]
    pub client: Option<ClientRef>,
}

/// Cookie payload: `{ "accessToken": ..., "user": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: LoggedUser,
}

/// A session whose access token passed signature and expiry checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub session: Session,
    pub expires_at: OffsetDateTime,
}
