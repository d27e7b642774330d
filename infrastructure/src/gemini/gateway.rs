//! Gemini LLM Gateway implementation

use super::error::Result;
use super::session::GeminiSession;
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use medichat_application::{ChatConfig, GatewayError, LlmGateway, LlmSession};
use medichat_domain::Model;
use tracing::{error, info};

/// LLM Gateway implementation for the Gemini REST API
pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiGateway {
    /// Create a gateway from the `[provider]` config section.
    ///
    /// The credential is looked up now but only checked when a session is
    /// created, so a missing key surfaces as a session failure.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.api_version,
            config.resolve_api_key(),
            &config.api_key_env,
        )
    }

    pub fn new(
        base_url: &str,
        api_version: &str,
        api_key: Option<String>,
        api_key_env: &str,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.trim_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: api_key_env.to_string(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Streaming endpoint for `model`.
    pub fn stream_endpoint(&self, model: &Model) -> String {
        format!(
            "{}/{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.api_version, model
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session(
        &self,
        config: &ChatConfig,
    ) -> std::result::Result<Box<dyn LlmSession>, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("No API key found in ${}", self.api_key_env);
            return Err(GatewayError::MissingCredential(self.api_key_env.clone()));
        };

        let endpoint = self.stream_endpoint(&config.model);
        info!("Creating Gemini session with model: {}", config.model);

        Ok(Box::new(GeminiSession::new(
            self.client.clone(),
            endpoint,
            api_key,
            config,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(api_key: Option<&str>) -> GeminiGateway {
        GeminiGateway::new(
            "https://generativelanguage.googleapis.com/",
            "v1beta",
            api_key.map(str::to_string),
            "API_KEY",
        )
        .unwrap()
    }

    #[test]
    fn test_stream_endpoint() {
        let gateway = gateway(Some("key"));
        assert_eq!(
            gateway.stream_endpoint(&Model::default()),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse"
        );
    }

    #[tokio::test]
    async fn test_missing_credential_names_variable() {
        let err = gateway(None)
            .create_session(&ChatConfig::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, GatewayError::MissingCredential(ref var) if var == "API_KEY"));
    }

    #[tokio::test]
    async fn test_blank_credential_counts_as_missing() {
        let gateway = gateway(Some("   "));
        assert!(!gateway.has_credential());
        assert!(gateway.create_session(&ChatConfig::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_session_uses_configured_model() {
        let session = gateway(Some("key"))
            .create_session(&ChatConfig::default())
            .await
            .unwrap();
        assert_eq!(session.model(), &Model::Gemini25Flash);
    }

    #[test]
    fn test_from_config_prefers_direct_key() {
        let config = FileProviderConfig {
            api_key: Some("direct".to_string()),
            api_key_env: "MEDICHAT_TEST_UNSET_VARIABLE".to_string(),
            ..Default::default()
        };
        assert!(GeminiGateway::from_config(&config).unwrap().has_credential());
    }
}
