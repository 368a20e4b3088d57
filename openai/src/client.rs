use reqwest::Client as HttpClient;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use streamchat_core::{ChatError, ConnectionConfig};

use crate::resources::chat::ChatResource;

#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) api_base: Url,
    pub(crate) model: String,
    pub(crate) timeout: Duration,
    pub(crate) headers: HeaderMap,
}

// Manually implement Debug to keep the bearer header out of logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Derive client settings from a connection config, rejecting it if the
    /// URL or project segment is structurally invalid.
    pub fn from_connection(connection: &ConnectionConfig) -> Result<Self, ChatError> {
        let api_base = connection.validate()?;

        let bearer = format!("Bearer {}", connection.auth_token());
        let auth_value = HeaderValue::from_str(&bearer)
            .map_err(|e| ChatError::ConfigError(format!("Invalid auth token: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            api_base,
            model: connection.model().to_string(),
            timeout: connection.timeout(),
            headers,
        })
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    /// The API base with `segments` appended as percent-encoded path
    /// segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ChatError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ChatError::ConfigError(format!("API base '{}' cannot take a path", self.api_base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    pub(crate) http_client: HttpClient,
    pub(crate) config: Arc<ClientConfig>,
}

impl Client {
    pub fn new(connection: &ConnectionConfig) -> Result<Self, ChatError> {
        let config = ClientConfig::from_connection(connection)?;
        Self::from_config(config)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, ChatError> {
        // Idle bound, not a total one: a slow agent may stream for minutes.
        let http_client = HttpClient::builder()
            .default_headers(config.headers.clone())
            .connect_timeout(config.timeout)
            .read_timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Access the Chat Completions resource.
    pub fn chat(&self) -> ChatResource {
        ChatResource::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_connection_joins_base_and_project() {
        let connection = ConnectionConfig::new("http://localhost:3000/", "demo");
        let config = ClientConfig::from_connection(&connection).unwrap();
        assert_eq!(config.api_base(), "http://localhost:3000/demo");
        assert_eq!(config.model(), "tenex");
        assert_eq!(
            config.headers.get(AUTHORIZATION).unwrap(),
            "Bearer not-needed"
        );
    }

    #[test]
    fn test_endpoint_appends_segments_after_project() {
        let connection = ConnectionConfig::new("http://localhost:3000/", "demo");
        let config = ClientConfig::from_connection(&connection).unwrap();
        let url = config.endpoint(&["chat", "completions"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/demo/chat/completions");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_from_connection_rejects_fragment_in_project() {
        let connection = ConnectionConfig::new("http://localhost:3000", "demo#x");
        let err = Client::new(&connection).unwrap_err();
        assert!(matches!(err, ChatError::ConfigError(_)));
    }

    #[test]
    fn test_from_connection_rejects_malformed_url() {
        let connection = ConnectionConfig::new("localhost:3000 oops", "demo");
        let err = Client::new(&connection).unwrap_err();
        assert!(matches!(err, ChatError::ConfigError(_)));
    }

    #[test]
    fn test_debug_redacts_auth_header() {
        let config = ClientConfig::from_connection(&ConnectionConfig::default()).unwrap();
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("Bearer"));
        assert!(debug_output.contains("[REDACTED]"));
    }
}
