use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use rattan_core::{GenerateRequest, GenerateResponse, ResponseFormat};
use reqwest::{header, Client as HttpClient};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{AuthConfig, ClientConfig};
use crate::error::{ClientError, Result, WireError};
use crate::wire::{utils, GeminiCodec, GenerateStream, WireCodec};

/// Seam for anything that can run a generation request.
///
/// `Client` is the real implementor; tests substitute mocks.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Run a request and return the complete response
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Run a request and stream the response
    async fn generate_stream(&self, request: GenerateRequest) -> Result<GenerateStream>;

    /// Validate the configuration
    async fn validate(&self) -> Result<()>;
}

/// Client for the generative-language API.
///
/// Forwards composed requests and surfaces service failures verbatim. In
/// particular, inline payload size is never checked locally: an over-limit
/// request goes out as composed and the service's rejection comes back as
/// `ClientError::Api`.
pub struct Client {
    pub(crate) config: ClientConfig,
    pub(crate) http: reqwest_middleware::ClientWithMiddleware,
    codec: GeminiCodec,
}

impl Client {
    /// Create a client with an API key and default configuration
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new().with_api_key(api_key))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        // Transient failures retry with exponential backoff
        let retry_policy = ExponentialBackoff::builder().base(2).build_with_max_retries(3);

        let http = reqwest_middleware::ClientBuilder::new(
            HttpClient::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| ClientError::Config(e.to_string()))?,
        )
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

        Ok(Self {
            config,
            http,
            codec: GeminiCodec::new(),
        })
    }

    /// Get the config
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build request headers
    pub(crate) fn build_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        match &self.config.auth {
            AuthConfig::ApiKey { key } => {
                let value = header::HeaderValue::from_str(key)
                    .map_err(|e| ClientError::Config(format!("Invalid api key: {}", e)))?;
                headers.insert("x-goog-api-key", value);
            }
            AuthConfig::Bearer { token } => {
                let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| ClientError::Config(format!("Invalid bearer token: {}", e)))?;
                headers.insert(header::AUTHORIZATION, value);
            }
            AuthConfig::None => {}
        }

        // Add custom headers from config
        for (key, value) in &self.config.headers {
            let header_name = header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ClientError::Config(format!("Invalid header name: {}", e)))?;
            let header_value = header::HeaderValue::from_str(value)
                .map_err(|e| ClientError::Config(format!("Invalid header value: {}", e)))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn model_url(&self, model: &str, operation: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            operation
        )
    }

    /// Send a non-streaming request
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let body = self.codec.encode_request(&request)?;
        let headers = self.build_headers()?;

        let url = self.model_url(&request.model, "generateContent");
        log::debug!("generate request: model={}", request.model);

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(self.codec.decode_response(&data)?)
    }

    /// Send a streaming request
    pub async fn generate_stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        let mut request = request;
        request.options.stream = true;

        let body = self.codec.encode_request(&request)?;
        let headers = self.build_headers()?;

        let url = format!(
            "{}?alt=sse",
            self.model_url(&request.model, "streamGenerateContent")
        );
        log::debug!("stream request: model={}", request.model);

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let codec = self.codec.clone();
        let stream = response
            .bytes_stream()
            .map_err(|e| ClientError::Network(e.to_string()))
            .filter_map(move |result| {
                let codec = codec.clone();
                async move {
                    match result {
                        Ok(bytes) => {
                            let text = String::from_utf8_lossy(&bytes);
                            // Handle SSE format (data: {...})
                            for line in text.lines() {
                                if let Some(data) = line.strip_prefix("data: ") {
                                    match codec.decode_stream_chunk(data.trim()) {
                                        Ok(Some(chunk)) => return Some(Ok(chunk)),
                                        Ok(None) => continue,
                                        Err(e) => return Some(Err(ClientError::Wire(e))),
                                    }
                                }
                            }
                            None
                        }
                        Err(e) => Some(Err(e)),
                    }
                }
            });

        Ok(Box::pin(stream))
    }

    /// Run a request and decode the response into `T` via the given schema.
    ///
    /// Structured output goes through the JSON response path
    /// (`ResponseFormat::JsonSchema`), not tool calling: the service rejects
    /// tool calls for requests carrying media parts, and the JSON path works
    /// for both text-only and multimodal input. Any `response_format` already
    /// on the request is replaced.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        request: GenerateRequest,
        schema: Value,
    ) -> Result<T> {
        let mut request = request;
        request.options.response_format = Some(ResponseFormat::JsonSchema { schema });

        let response = self.generate(request).await?;
        let text = response.text();
        let payload = utils::extract_json_text(&text);

        serde_json::from_str(payload).map_err(|e| ClientError::Wire(WireError::Json(e)))
    }
}

#[async_trait]
impl Generator for Client {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.generate(request).await
    }

    async fn generate_stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        self.generate_stream(request).await
    }

    async fn validate(&self) -> Result<()> {
        let _ = self.build_headers()?;
        Ok(())
    }
}

/// Map a non-2xx response to an error, surfacing the service's body verbatim
pub(crate) async fn status_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => ClientError::Auth(message),
        429 => {
            // Retry-after header is gone once the body is consumed
            ClientError::RateLimited { retry_after: 60 }
        }
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client() {
        let client = Client::new("test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_with_config() {
        let config = ClientConfig::new()
            .with_base_url("https://proxy.internal/v1beta")
            .with_bearer_token("token-123")
            .with_model("flash-8");
        let client = Client::with_config(config).unwrap();
        assert_eq!(client.config().model, "flash-8");
    }

    #[test]
    fn test_build_headers_api_key() {
        let client = Client::new("test-key").unwrap();
        let headers = client.build_headers().unwrap();
        assert_eq!(headers.get("x-goog-api-key").unwrap(), "test-key");
    }

    #[test]
    fn test_build_headers_rejects_bad_custom_header() {
        let config = ClientConfig::new().with_header("bad header name", "v");
        let client = Client::with_config(config).unwrap();
        assert!(matches!(
            client.build_headers(),
            Err(ClientError::Config(_))
        ));
    }
}
