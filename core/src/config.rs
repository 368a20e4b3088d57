use crate::error::ChatError;
use reqwest::Url;
use std::fmt;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
/// Sentinel project segment used when none is configured.
pub const PLACEHOLDER_PROJECT: &str = "your-project-dtag";
/// The server ignores the model name, but the request shape requires one.
pub const DEFAULT_MODEL: &str = "tenex";
/// Credential sent in place of a real key; the server does not authenticate.
pub const NO_AUTH_PLACEHOLDER: &str = "not-needed";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const SERVER_URL_VAR: &str = "SERVER_URL";
pub const PROJECT_VAR: &str = "PROJECT_DTAG";
const SERVER_URL_FALLBACK_VAR: &str = "TENEX_SERVER_URL";
const PROJECT_FALLBACK_VAR: &str = "TENEX_PROJECT_DTAG";

/// Where and how to reach the chat-completion server.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    base_url: String,
    project: String,
    model: String,
    auth_token: &'static str,
    timeout: Duration,
}

// The placeholder credential is not a secret, but keep it out of logs the
// same way a real key would be.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("project", &self.project)
            .field("model", &self.model)
            .field("auth_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            project: PLACEHOLDER_PROJECT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            auth_token: NO_AUTH_PLACEHOLDER,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ConnectionConfig {
    pub fn new(base_url: impl Into<String>, project: impl Into<String>) -> Self {
        Self::default()
            .with_base_url(base_url)
            .with_project(project)
    }

    /// Read `SERVER_URL` and `PROJECT_DTAG` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// The `TENEX_`-prefixed names are consulted when the plain names are
    /// unset. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |primary: &str, fallback: &str| {
            lookup(primary)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| lookup(fallback).filter(|v| !v.trim().is_empty()))
        };

        let mut config = Self::default();
        if let Some(url) = read(SERVER_URL_VAR, SERVER_URL_FALLBACK_VAR) {
            config = config.with_base_url(url);
        }
        match read(PROJECT_VAR, PROJECT_FALLBACK_VAR) {
            Some(project) => config = config.with_project(project),
            None => warn!(
                project = PLACEHOLDER_PROJECT,
                "{PROJECT_VAR} is not set, using placeholder project"
            ),
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into().trim().trim_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn server_url(&self) -> &str {
        &self.base_url
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn auth_token(&self) -> &str {
        self.auth_token
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn uses_placeholder_project(&self) -> bool {
        self.project == PLACEHOLDER_PROJECT
    }

    /// `{server_url}/{project}`, the root that endpoint paths are appended to.
    pub fn api_base(&self) -> String {
        format!("{}/{}", self.base_url, self.project)
    }

    /// Check that the config is structurally usable and return the parsed
    /// API base. Reachability is not tested.
    pub fn validate(&self) -> Result<Url, ChatError> {
        if self.project.is_empty() {
            return Err(ChatError::ConfigError(
                "project path segment must not be empty".to_string(),
            ));
        }
        if self.project.contains(['?', '#']) {
            return Err(ChatError::ConfigError(format!(
                "project path segment '{}' must not contain '?' or '#'",
                self.project
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ChatError::ConfigError(
                "model placeholder must not be empty".to_string(),
            ));
        }

        let base = Url::parse(&self.base_url).map_err(|e| {
            ChatError::ConfigError(format!("Invalid server URL '{}': {}", self.base_url, e))
        })?;
        match base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ChatError::ConfigError(format!(
                    "Unsupported URL scheme '{}' in '{}'",
                    other, self.base_url
                )));
            }
        }
        if base.host_str().is_none() {
            return Err(ChatError::ConfigError(format!(
                "Server URL '{}' has no host",
                self.base_url
            )));
        }
        // Endpoint paths are appended to the base, so a query or fragment
        // would swallow them.
        if base.query().is_some() || base.fragment().is_some() {
            return Err(ChatError::ConfigError(format!(
                "Server URL '{}' must not carry a query or fragment",
                self.base_url
            )));
        }

        Url::parse(&self.api_base()).map_err(|e| {
            ChatError::ConfigError(format!("Invalid API base '{}': {}", self.api_base(), e))
        })
    }
}
