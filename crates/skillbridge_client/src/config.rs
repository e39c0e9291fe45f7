//! Configuration for the SkillBridge API client.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default session file: `SKILLBRIDGE_SESSION_PATH`, else
/// `~/.skillbridge/session.json`, else `$TMPDIR/skillbridge_session.json`.
pub fn default_session_path() -> PathBuf {
    if let Ok(p) = std::env::var("SKILLBRIDGE_SESSION_PATH") {
        return PathBuf::from(p);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".skillbridge").join("session.json"),
        None => std::env::temp_dir().join("skillbridge_session.json"),
    }
}

#[derive(Clone, Debug)]
pub struct SkillBridgeConfig {
    /// Base URL including the `/api` prefix, no trailing slash
    pub api_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Where the session (token + cached user) is stored
    pub session_path: PathBuf,
}

impl Default for SkillBridgeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl SkillBridgeConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: trim_base(api_url.into()),
            timeout: None,
            session_path: default_session_path(),
        }
    }

    /// Create config from environment variables.
    ///
    /// Optional: `SKILLBRIDGE_API_URL` (default: http://localhost:8000/api)
    /// Optional: `SKILLBRIDGE_TIMEOUT_SECS` (default: none)
    /// Optional: `SKILLBRIDGE_SESSION_PATH`
    pub fn from_env() -> Result<Self, ClientError> {
        Self::resolve(None, |key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), but an explicit `api_url` replaces
    /// `SKILLBRIDGE_API_URL`, which is then not read at all.
    pub fn from_env_with_api_url(api_url: Option<String>) -> Result<Self, ClientError> {
        Self::resolve(api_url, |key| std::env::var(key).ok())
    }

    fn resolve(
        api_url: Option<String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ClientError> {
        let (api_url, source) = match api_url {
            Some(url) => (url, "API URL"),
            None => (
                var("SKILLBRIDGE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                "SKILLBRIDGE_API_URL",
            ),
        };
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "{} must be an http(s) URL, got '{}'",
                source, api_url
            )));
        }

        let timeout = match var("SKILLBRIDGE_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|_| {
                    ClientError::Config(format!("SKILLBRIDGE_TIMEOUT_SECS is not a number: '{}'", v))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url: trim_base(api_url),
            timeout,
            session_path: default_session_path(),
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn session_path(mut self, path: PathBuf) -> Self {
        self.session_path = path;
        self
    }

    /// Join an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
