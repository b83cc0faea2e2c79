use async_stream::try_stream;

use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::fmt;
use std::time::Duration;

use crate::{
    api_v1::{ChatCompletionChunkResponse, ChatCompletionRequest, ChatCompletionResponse},
    error::DeepSeekError,
    sse::{DONE, SseDecoder},
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimal HTTP client for the OpenAI-compatible *chat/completions* endpoint.
///
/// * Accepts and returns the `api_v1` request / response structs defined
///   in this crate.
/// * Shares a single `reqwest::Client`, so cloning `DeepSeekClient` is cheap.
#[derive(Clone)]
pub struct DeepSeekClient {
    api_key: String,
    http: HttpClient,
    base: String,
}

impl fmt::Debug for DeepSeekClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekClient")
            .field("api_key", &"<redacted>")
            .field("base", &self.base)
            .finish()
    }
}

impl DeepSeekClient {
    /// Build a default `reqwest` client with the given request timeout.
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DeepSeekError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self::with_http(api_key, http, base_url))
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            api_key: api_key.into(),
            http,
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn headers(&self) -> Result<HeaderMap, DeepSeekError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| DeepSeekError::Format("API key is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Perform a **non-streaming** chat completion.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, DeepSeekError> {
        let headers = self.headers()?;

        let url = format!("{}/chat/completions", self.base);
        #[cfg(feature = "tracing")]
        tracing::debug!(%url, model = %request.model, messages = request.messages.len(), "chat completion request");

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            #[cfg(feature = "tracing")]
            tracing::warn!(%status, "chat completion rejected");
            return Err(DeepSeekError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }

    /// Perform a **streaming** chat completion.
    ///
    /// The HTTP response is owned by the returned stream; dropping the stream
    /// closes the connection.
    pub fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> impl Stream<Item = Result<ChatCompletionChunkResponse, DeepSeekError>> + '_ {
        request.stream = Some(true);

        let url = format!("{}/chat/completions", self.base);

        try_stream! {
            let mut headers = self.headers()?;
            headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

            #[cfg(feature = "tracing")]
            tracing::debug!(%url, model = %request.model, messages = request.messages.len(), "chat completion stream request");

            let resp = self.http.post(url).headers(headers).json(&request).send().await?;

            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                #[cfg(feature = "tracing")]
                tracing::warn!(%status, "chat completion stream rejected");
                return Err::<(), _>(DeepSeekError::Api { status, body })?;
            }

            let mut bytes_stream = resp.bytes_stream();
            let mut decoder = SseDecoder::new();

            while let Some(chunk) = bytes_stream.next().await {
                decoder.push(&chunk?);

                while let Some(data) = decoder.next_data()? {
                    let data = data.trim();
                    if data == DONE {
                        return;
                    }

                    let parsed: ChatCompletionChunkResponse = serde_json::from_str(data)?;
                    yield parsed;
                }
            }

            // The body ended without `[DONE]`: the connection was cut.
            Err::<(), _>(DeepSeekError::Format("event stream ended before [DONE]".into()))?;
        }
    }
}
