//! TTS (Text-to-Speech) client for the hosted `text-to-speech/{voice_id}` endpoint.

use super::types::{SynthesisRequest, SynthesisResult};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Anything that can turn a [`SynthesisRequest`] into a [`SynthesisResult`].
///
/// Implementations never fail: transport and endpoint errors are folded into
/// [`SynthesisResult::Failure`].
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResult;
}

/// A successful endpoint response.
#[derive(Debug, Clone)]
pub struct AudioResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Client for text-to-speech synthesis.
pub struct TtsClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl TtsClient {
    pub fn builder() -> TtsClientBuilder {
        TtsClientBuilder::new()
    }

    /// Full endpoint URL for a voice. The voice id is percent-encoded as a single path segment.
    pub fn endpoint(&self, voice_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::configuration_with_context(
                    "Base URL cannot carry a path",
                    ErrorContext::new().with_details(self.base_url.to_string()),
                )
            })?
            .pop_if_empty()
            .extend(["v1", "text-to-speech", voice_id]);
        Ok(url)
    }

    /// POST the request and return the status with the raw audio body.
    ///
    /// Returns [`Error::Api`] for non-success statuses and [`Error::Network`]
    /// when no complete response could be read.
    pub async fn fetch_audio(&self, request: &SynthesisRequest) -> Result<AudioResponse> {
        let endpoint = self.endpoint(&request.voice_id)?;
        debug!(
            %endpoint,
            model = %request.model_id,
            chars = request.char_count(),
            "sending TTS request"
        );

        let response = self
            .http_client
            .post(endpoint)
            .header("Accept", "audio/mpeg")
            .header("Content-Type", "application/json")
            .header("xi-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("TTS request failed: {}", e),
                    ErrorContext::new().with_source("tts"),
                )
            })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            Error::network_with_context(
                format!("Failed to read TTS response: {}", e),
                ErrorContext::new().with_source("tts"),
            )
        })?;
        if !status.is_success() {
            let body_str = String::from_utf8_lossy(&bytes);
            return Err(Error::api(status.as_u16(), body_str.into_owned()));
        }
        Ok(AudioResponse {
            status: status.as_u16(),
            body: bytes,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for TtsClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResult {
        match self.fetch_audio(request).await {
            Ok(response) => SynthesisResult::success(response.status, response.body.to_vec()),
            Err(e) => e.into(),
        }
    }
}

pub struct TtsClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: u64,
}

impl TtsClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override base URL (primarily for testing with mock servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    pub fn build(self) -> Result<TtsClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key required",
                    ErrorContext::new().with_source("tts"),
                )
            })?;
        let raw_base = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_base).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new().with_details(raw_base.clone()),
            )
        })?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(TtsClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl Default for TtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
