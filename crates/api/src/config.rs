use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds between recycle-bin expiry sweeps (default: `30`).
    pub sweep_interval_secs: u64,
    /// JWT session token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `5000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `NOTE_SWEEP_INTERVAL_SECS` | `30`                       |
    ///
    /// See [`JwtConfig::from_vars`] for the `JWT_*` variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values or a missing `JWT_SECRET`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sweep_interval_secs: u64 = var("NOTE_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("NOTE_SWEEP_INTERVAL_SECS must be a valid u64");
        assert!(
            sweep_interval_secs > 0,
            "NOTE_SWEEP_INTERVAL_SECS must be greater than zero"
        );

        let jwt = JwtConfig::from_vars(&var);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            sweep_interval_secs,
            jwt,
        }
    }
}
