//! Speech synthesis request and result types.

use serde::{Deserialize, Serialize};

/// Voice "Bella" on the hosted endpoint.
pub const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

/// Voice tuning parameters sent alongside the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// One synthesis job. Built once per invocation and never mutated.
///
/// The voice id travels in the URL path, so it is skipped when the request
/// is serialized as the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    #[serde(skip)]
    pub voice_id: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
}

impl SynthesisRequest {
    /// Request with the default voice, model and tuning.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            voice_settings: VoiceSettings::default(),
        }
    }

    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = settings;
        self
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// First `max_chars` characters of the script, for console previews.
    pub fn preview(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}

/// Outcome of a single synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisResult {
    Success {
        status_code: u16,
        audio: Vec<u8>,
        size_bytes: usize,
    },
    /// `status_code` is `None` when no HTTP response was received.
    Failure {
        status_code: Option<u16>,
        message: String,
    },
}

impl SynthesisResult {
    pub fn success(status_code: u16, audio: Vec<u8>) -> Self {
        let size_bytes = audio.len();
        Self::Success {
            status_code,
            audio,
            size_bytes,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Success { status_code, .. } => Some(*status_code),
            Self::Failure { status_code, .. } => *status_code,
        }
    }
}

impl From<crate::Error> for SynthesisResult {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::Api { status, message } => Self::Failure {
                status_code: Some(status),
                message,
            },
            other => Self::Failure {
                status_code: None,
                message: other.to_string(),
            },
        }
    }
}
