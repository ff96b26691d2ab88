//! TTS module: sends a script to a hosted speech-synthesis endpoint and returns the audio.

mod client;
mod types;

pub use client::{
    AudioResponse, SpeechSynthesizer, TtsClient, TtsClientBuilder, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use types::{
    SynthesisRequest, SynthesisResult, VoiceSettings, DEFAULT_MODEL_ID, DEFAULT_VOICE_ID,
};
