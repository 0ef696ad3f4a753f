//! Session cookie store.
//!
//! The cookie value is plain JSON; integrity comes from the access token's own
//! signature, which the guard verifies on every navigation. `SameSite=Strict`
//! and `HttpOnly` keep the value away from other sites and page scripts.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::Session;
use crate::config::Config;
use crate::routes::LOGIN_PATH;

/// Lifetime of the session cookie.
pub const SESSION_MAX_AGE: Duration = Duration::hours(2);

/// Build the session cookie for `session`.
///
/// # Errors
///
/// Returns an error if the session cannot be serialized.
pub fn create(config: &Config, session: &Session) -> Result<Cookie<'static>, serde_json::Error> {
    let value = serde_json::to_string(session)?;
    Ok(Cookie::build((config.session_cookie_name.clone(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .max_age(SESSION_MAX_AGE)
        .build())
}

/// Read the session from the request cookies. Absent or malformed cookies
/// yield `None`.
#[must_use]
pub fn read(config: &Config, jar: &CookieJar) -> Option<Session> {
    jar.get(&config.session_cookie_name)
        .and_then(|cookie| parse(cookie.value()))
}

/// Parse a raw cookie value.
#[must_use]
pub fn parse(raw: &str) -> Option<Session> {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) if !session.access_token.is_empty() => Some(session),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "discarding malformed session cookie");
            None
        }
    }
}

/// Remove the session cookie and send the browser to the login screen.
#[must_use]
pub fn destroy(config: &Config, jar: CookieJar) -> (CookieJar, Redirect) {
    let removal = Cookie::build((config.session_cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .max_age(Duration::ZERO)
        .build();
    (jar.add(removal), Redirect::to(LOGIN_PATH))
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
