use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the notes service, including the `/api` prefix.
    pub api_url: String,
    /// Where the login session is persisted between runs.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                  | Default                        |
    /// |--------------------------|--------------------------------|
    /// | `NOTECRYPT_API_URL`      | `http://localhost:5000/api`    |
    /// | `NOTECRYPT_SESSION_FILE` | `.notecrypt-session.json`      |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_url =
            var("NOTECRYPT_API_URL").unwrap_or_else(|| "http://localhost:5000/api".into());
        let session_file = var("NOTECRYPT_SESSION_FILE")
            .unwrap_or_else(|| ".notecrypt-session.json".into())
            .into();

        Self {
            api_url,
            session_file,
        }
    }
}
