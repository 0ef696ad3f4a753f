//! Process configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and builds a single `Config` before the
//! router is assembled. Everything downstream receives it through `AppState`.

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "painel_session";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_IMPORT_MAX_BYTES: usize = 20 * 1024 * 1024;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required env var {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL without trailing slash. The dispatcher appends `/api`.
    pub api_base_url: String,
    /// Name of the session cookie.
    pub session_cookie_name: String,
    /// Shared HMAC secret used to verify access tokens.
    pub jwt_secret: String,
    pub port: u16,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    pub connect_timeout_secs: u64,
    /// Rows per page on list screens.
    pub page_size: u32,
    /// Largest member CSV accepted by the import route.
    pub import_max_bytes: usize,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Required: `API_BASE_URL`, `JWT_SECRET`.
    ///
    /// Optional:
    /// - `SESSION_COOKIE_NAME`: default `painel_session`
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: default inferred from an `https://` base URL
    /// - `API_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PAGE_SIZE`: default 10
    /// - `IMPORT_MAX_BYTES`: default 20 MiB
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_base_url = get("API_BASE_URL")
            .ok_or(ConfigError::Missing("API_BASE_URL"))?
            .trim_end_matches('/')
            .to_owned();
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let session_cookie_name = get("SESSION_COOKIE_NAME").unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_owned());

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let connect_timeout_secs =
            parse_or("API_CONNECT_TIMEOUT_SECS", get("API_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let page_size = parse_or("PAGE_SIZE", get("PAGE_SIZE"), DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid { var: "PAGE_SIZE", value: "0".into() });
        }

        let import_max_bytes = parse_or("IMPORT_MAX_BYTES", get("IMPORT_MAX_BYTES"), DEFAULT_IMPORT_MAX_BYTES)?;
        if import_max_bytes == 0 {
            return Err(ConfigError::Invalid { var: "IMPORT_MAX_BYTES", value: "0".into() });
        }

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => api_base_url.starts_with("https://"),
        };

        Ok(Self {
            api_base_url,
            session_cookie_name,
            jwt_secret,
            port,
            cookie_secure,
            connect_timeout_secs,
            page_size,
            import_max_bytes,
        })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
