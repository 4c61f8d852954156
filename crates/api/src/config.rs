//! Server configuration.

use std::str::FromStr;

/// HTTP server settings, read from the environment at startup.
///
/// Every field has a development-friendly default; deployments override
/// them via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default `0.0.0.0`).
    pub host: String,
    /// Bind port (default `3000`).
    pub port: u16,
    /// Allowed CORS origins, comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds (default `30`).
    pub request_timeout_secs: u64,
    /// Bound on post-serve cleanup (scheduler stop, queue drain) in
    /// seconds (default `30`).
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    ///
    /// Unparseable values panic; a misconfigured process should not
    /// come up.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parsed("PORT", 3000),
            cors_origins: split_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_parsed("SHUTDOWN_TIMEOUT_SECS", 30),
        }
    }

    /// The `host:port` pair the listener binds.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} is not valid: {e}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_split_on_commas_and_drop_blanks() {
        assert_eq!(
            split_origins("http://a.test, http://b.test ,, "),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_origins("").is_empty());
    }
}
