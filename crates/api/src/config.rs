use std::fmt::Debug;
use std::str::FromStr;

/// Server configuration, read once at startup.
///
/// Every field has a development default; production overrides come from the
/// environment (or a `.env` file via dotenvy).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, from the comma-separated `CORS_ORIGINS` var.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long a login session stays valid. Default is one week.
    pub session_ttl_hours: i64,
    /// Minimum password length for registration and password changes.
    pub password_min_length: usize,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `SESSION_TTL_HOURS`    | `168`                   |
    /// | `PASSWORD_MIN_LENGTH`  | `8`                     |
    ///
    /// Panics on unparseable values: a bad config should stop startup.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parsed("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", 30),
            session_ttl_hours: env_parsed("SESSION_TTL_HOURS", 168),
            password_min_length: env_parsed("PASSWORD_MIN_LENGTH", 8),
        }
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
fn env_parsed<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{name} is not valid: {e:?}")),
        Err(_) => default,
    }
}
