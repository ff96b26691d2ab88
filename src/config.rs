//! Runner configuration: credential, endpoint, timeout and output location.
//!
//! Values come from (highest first) CLI flags, the environment, and built-in
//! defaults. The credential is looked up in the OS keychain before the
//! environment and is never compiled in.

use crate::tts::{SynthesisRequest, TtsClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const KEYRING_SERVICE: &str = "voiceover";
pub const KEYRING_USER: &str = "elevenlabs";

pub const ENV_API_KEY: &str = "ELEVENLABS_API_KEY";
pub const ENV_BASE_URL: &str = "VOICEOVER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "VOICEOVER_HTTP_TIMEOUT_SECS";
pub const ENV_OUTPUT_DIR: &str = "VOICEOVER_OUTPUT_DIR";

pub const DEFAULT_OUTPUT_DIR: &str = "voiceover_output";
pub const DEFAULT_LABEL: &str = "voiceover";

#[derive(Clone, PartialEq)]
pub struct RunnerConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
    pub label: String,
}

// Keeps the credential out of logs.
impl std::fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("api_key", &self.redacted_api_key())
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("label", &self.label)
            .finish()
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl RunnerConfig {
    /// Load from the process environment, preferring a keychain credential.
    pub fn from_env() -> Self {
        let mut config = Self::from_lookup(|key| env::var(key).ok());
        if let Some(key) = keyring_api_key() {
            config.api_key = Some(key);
        }
        config
    }

    /// Load from an arbitrary variable source. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_key: lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()),
            base_url: lookup(ENV_BASE_URL).unwrap_or(defaults.base_url),
            timeout_secs: lookup(ENV_TIMEOUT_SECS)
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
            output_dir: lookup(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            label: defaults.label,
        }
    }

    /// First few characters of the credential followed by an ellipsis.
    pub fn redacted_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(|k| format!("{}...", k.chars().take(6).collect::<String>()))
    }

    pub fn client_builder(&self) -> TtsClientBuilder {
        let mut builder = TtsClientBuilder::new()
            .base_url(self.base_url.clone())
            .timeout_secs(self.timeout_secs);
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.clone());
        }
        builder
    }
}

fn keyring_api_key() -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    entry.get_password().ok().filter(|k| !k.trim().is_empty())
}

/// Optional YAML voice profile overriding request defaults.
///
/// ```yaml
/// voice_id: EXAVITQu4vr4xnSDxMaL
/// model_id: eleven_monolingual_v1
/// stability: 0.5
/// similarity_boost: 0.75
/// label: video_1_silver_tiktok
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VoiceProfile {
    pub voice_id: Option<String>,
    pub model_id: Option<String>,
    pub stability: Option<f32>,
    pub similarity_boost: Option<f32>,
    pub label: Option<String>,
}

impl VoiceProfile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(raw)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Field-wise merge; values set in `overrides` win.
    pub fn merge(self, overrides: VoiceProfile) -> VoiceProfile {
        VoiceProfile {
            voice_id: overrides.voice_id.or(self.voice_id),
            model_id: overrides.model_id.or(self.model_id),
            stability: overrides.stability.or(self.stability),
            similarity_boost: overrides.similarity_boost.or(self.similarity_boost),
            label: overrides.label.or(self.label),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("stability", self.stability),
            ("similarity_boost", self.similarity_boost),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(Error::configuration_with_context(
                        "Voice setting must be between 0.0 and 1.0",
                        ErrorContext::new()
                            .with_field_path(format!("profile.{}", field))
                            .with_details(v.to_string()),
                    ));
                }
            }
        }
        if let Some(label) = &self.label {
            if label.is_empty() || label.contains(['/', '\\']) {
                return Err(Error::configuration_with_context(
                    "Label must be a non-empty file name fragment",
                    ErrorContext::new()
                        .with_field_path("profile.label")
                        .with_details(label.clone()),
                ));
            }
        }
        Ok(())
    }

    pub fn apply(&self, mut request: SynthesisRequest) -> SynthesisRequest {
        if let Some(voice_id) = &self.voice_id {
            request.voice_id = voice_id.clone();
        }
        if let Some(model_id) = &self.model_id {
            request.model_id = model_id.clone();
        }
        if let Some(stability) = self.stability {
            request.voice_settings.stability = stability;
        }
        if let Some(similarity) = self.similarity_boost {
            request.voice_settings.similarity_boost = similarity;
        }
        request
    }
}
