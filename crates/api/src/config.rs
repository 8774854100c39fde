//! Server configuration.
//!
//! Every setting is read from the environment once at startup, with
//! defaults that suit local development; `main` loads a `.env` file first
//! so the same variables work there too.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `3000`).
    pub port: u16,
    /// Allowed CORS origins (`CORS_ORIGINS`, comma-separated).
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds (`REQUEST_TIMEOUT_SECS`, default `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    ///
    /// A value that does not parse aborts startup.
    pub fn from_env() -> Self {
        Self {
            host: string_var("HOST", "0.0.0.0"),
            port: parsed_var("PORT", 3000),
            cors_origins: list_var("CORS_ORIGINS", "http://localhost:5173"),
            request_timeout_secs: parsed_var("REQUEST_TIMEOUT_SECS", 30),
        }
    }
}

fn string_var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn list_var(name: &str, default: &str) -> Vec<String> {
    string_var(name, default)
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parsed_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{name}={raw:?} is not valid: {e}")),
        Err(_) => default,
    }
}
