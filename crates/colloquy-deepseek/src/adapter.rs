use std::{env, sync::Arc, time::Duration};

use colloquy_core::error::{ColloquyError, Result};

use crate::client::{DEFAULT_TIMEOUT, DeepSeekClient};

pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const BASE_URL_ENV: &str = "DEEPSEEK_BASE_URL";

/// Thin wrapper that wires the HTTP client [`DeepSeekClient`] into a value
/// that implements the `colloquy_core` provider traits.
///
/// Think of it as the **service locator** for the DeepSeek back-end:
///
/// * stores the API key and base URL,
/// * owns a shareable, connection-pooled `reqwest::Client`,
/// * is built through [`DeepSeekAdapterBuilder`] so callers don’t have to
///   juggle `Option<String>` manually.
///
/// All user-facing functionality sits on the generic
/// [`colloquy_core::ChatClient`] once the adapter is plugged in.
#[derive(Debug)]
pub struct DeepSeekAdapter {
    pub(crate) client: Arc<DeepSeekClient>,
}

impl DeepSeekAdapter {
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

/// Builder for [`DeepSeekAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use colloquy_deepseek::DeepSeekAdapterBuilder;
///
/// let backend = DeepSeekAdapterBuilder::new_from_env()
///     .build()
///     .expect("DEEPSEEK_API_KEY must be set");
/// ```
///
/// The environment is read exactly once, in [`Self::new_from_env`]; after
/// that the configuration is a plain value handed to [`Self::build`].
#[derive(Default)]
pub struct DeepSeekAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) timeout: Option<Duration>,
}

impl DeepSeekAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that loads `DEEPSEEK_API_KEY` and, if present,
    /// `DEEPSEEK_BASE_URL` from the environment.
    ///
    /// Missing keys only surface during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok(),
            base_url: env::var(BASE_URL_ENV).ok().filter(|url| !url.trim().is_empty()),
            timeout: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the adapter at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-request timeout; defaults to 30 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`ColloquyError::Configuration`] – if the API key is missing or
    ///   blank, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<DeepSeekAdapter> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ColloquyError::Configuration(format!("missing env variable: `{API_KEY_ENV}`"))
            })?;

        let client = DeepSeekClient::new(
            api_key.trim(),
            self.base_url,
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        )
        .map_err(|e| ColloquyError::Configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(DeepSeekAdapter {
            client: Arc::new(client),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = DeepSeekAdapterBuilder::new().build().unwrap_err();
        assert!(matches!(err, ColloquyError::Configuration(msg) if msg.contains(API_KEY_ENV)));

        let err = DeepSeekAdapterBuilder::new()
            .with_api_key("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ColloquyError::Configuration(_)));
    }

    #[test]
    fn base_url_defaults_and_overrides() {
        let adapter = DeepSeekAdapterBuilder::new()
            .with_api_key("sk-test")
            .build()
            .unwrap();
        assert_eq!(adapter.base_url(), "https://api.deepseek.com");

        let adapter = DeepSeekAdapterBuilder::new()
            .with_api_key("sk-test")
            .with_base_url("http://localhost:8080/v1/")
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(adapter.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let adapter = DeepSeekAdapterBuilder::new()
            .with_api_key("sk-very-secret")
            .build()
            .unwrap();
        let rendered = format!("{adapter:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
