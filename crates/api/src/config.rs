//! Process configuration read once at startup.
//!
//! Invalid values panic with the variable name: the server must not come up
//! half-configured.

use std::fmt::Display;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::str::FromStr;

use hrdesk_core::dashboard::{clamp_event_window, DEFAULT_EVENT_WINDOW_DAYS};

use crate::auth::jwt::JwtConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP server settings.
///
/// | Env var                | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `3000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS` | `30`                    |
/// | `UPCOMING_EVENTS_DAYS` | `30`, clamped to 1..=365 |
///
/// JWT settings come from [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`; blanks dropped.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Window used by `/dashboard/upcoming-events` when `?days=` is absent.
    pub upcoming_events_days: i64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let upcoming_events_days = setting("UPCOMING_EVENTS_DAYS", DEFAULT_EVENT_WINDOW_DAYS);

        Self {
            host: setting("HOST", DEFAULT_HOST.to_string()),
            port: setting("PORT", DEFAULT_PORT),
            cors_origins: split_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            ),
            request_timeout_secs: setting("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            upcoming_events_days: clamp_event_window(Some(upcoming_events_days), DEFAULT_EVENT_WINDOW_DAYS),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Address to bind the listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// Panics if the variable is set but does not parse.
pub(crate) fn setting<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    parse_setting(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_setting<T>(key: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match raw.map(str::trim) {
        None | Some("") => default,
        Some(value) => value
            .parse()
            .unwrap_or_else(|e| panic!("{key} has invalid value '{value}': {e}")),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
