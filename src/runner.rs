//! Generate-or-fallback workflow.
//!
//! One synthesis call per run. Whatever happens, the runner ends with
//! something useful for the operator: an audio file plus instructions, or a
//! manual fallback file plus printed guidance. Nothing is propagated as an
//! error and nothing is retried.

use crate::output::{OutputArtifact, OutputLayout, FALLBACK_GUIDANCE};
use crate::tts::{SpeechSynthesizer, SynthesisRequest, SynthesisResult};
use crate::Error;
use std::io::Write;
use tracing::{info, warn};

const PREVIEW_CHARS: usize = 100;
const ERROR_EXCERPT_CHARS: usize = 200;
const RULE: &str = "========================================";

pub struct AudioRequestRunner<S> {
    synthesizer: S,
    layout: OutputLayout,
    credential_hint: Option<String>,
}

impl<S: SpeechSynthesizer> AudioRequestRunner<S> {
    pub fn new(synthesizer: S, layout: OutputLayout) -> Self {
        Self {
            synthesizer,
            layout,
            credential_hint: None,
        }
    }

    /// Redacted credential prefix shown in the progress output.
    pub fn with_credential_hint(mut self, hint: Option<String>) -> Self {
        self.credential_hint = hint;
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub async fn run<W: Write>(
        &self,
        request: &SynthesisRequest,
        console: &mut W,
    ) -> OutputArtifact {
        print_header(request, console);
        say!(console, "🔧 Attempting API call...");
        say!(console, "   Voice: {}", request.voice_id);
        if let Some(hint) = &self.credential_hint {
            say!(console, "   API Key: {}", hint);
        }
        info!(voice = %request.voice_id, model = %request.model_id, "starting synthesis");

        let artifact = match self.synthesizer.synthesize(request).await {
            SynthesisResult::Success {
                status_code,
                audio,
                size_bytes,
            } => {
                say!(console, "   Status Code: {}", status_code);
                self.save_audio(request, &audio, size_bytes, console)
            }
            SynthesisResult::Failure {
                status_code: Some(status),
                message,
            } => {
                warn!(status, "endpoint reported failure");
                say!(console, "   Status Code: {}", status);
                say!(console, "❌ API Error: {}", status);
                say!(
                    console,
                    "   Response: {}",
                    excerpt(&message, ERROR_EXCERPT_CHARS)
                );
                fallback(&self.layout, request, Some(status), message, console)
            }
            SynthesisResult::Failure {
                status_code: None,
                message,
            } => {
                warn!(error = %message, "synthesis request did not complete");
                say!(console, "❌ Error: {}", message);
                fallback(&self.layout, request, None, message, console)
            }
        };

        print_footer(console);
        artifact
    }

    fn save_audio<W: Write>(
        &self,
        request: &SynthesisRequest,
        audio: &[u8],
        size_bytes: usize,
        console: &mut W,
    ) -> OutputArtifact {
        let audio_path = match self.layout.write_audio(&request.voice_id, audio) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "could not save audio");
                return fallback(
                    &self.layout,
                    request,
                    None,
                    format!("could not save audio: {}", e),
                    console,
                );
            }
        };
        say!(console, "✅ SUCCESS! Audio saved to: {}", audio_path.display());
        say!(console, "📏 File size: {:.2} KB", size_bytes as f64 / 1024.0);
        say!(console, "🔊 Play with: open {}", audio_path.display());

        let instructions_path = match self.layout.write_instructions(&audio_path, &request.text) {
            Ok(path) => {
                say!(console, "📄 Instructions saved to: {}", path.display());
                Some(path)
            }
            Err(e) => {
                // The audio is already on disk; report and carry on.
                warn!(error = %e, "could not save instructions");
                say!(console, "⚠️  Could not save instructions: {}", e);
                None
            }
        };

        OutputArtifact::Audio {
            audio_path,
            instructions_path,
            size_bytes,
        }
    }
}

/// Full console run for when no synthesizer could be built (e.g. no credential).
///
/// Prints the same header and footer as [`AudioRequestRunner::run`] around the
/// fallback.
pub fn fallback_without_client<W: Write>(
    layout: &OutputLayout,
    request: &SynthesisRequest,
    err: &Error,
    console: &mut W,
) -> OutputArtifact {
    warn!(error = %err, "no synthesizer available");
    print_header(request, console);
    say!(console, "❌ Error: {}", err);
    let artifact = fallback(layout, request, None, err.to_string(), console);
    print_footer(console);
    artifact
}

/// Print manual guidance and write the fallback file.
pub fn fallback<W: Write>(
    layout: &OutputLayout,
    request: &SynthesisRequest,
    status_code: Option<u16>,
    reason: String,
    console: &mut W,
) -> OutputArtifact {
    print_guidance(console);
    match layout.write_fallback(&request.text) {
        Ok(path) => {
            say!(console, "📄 Fallback instructions saved to: {}", path.display());
            OutputArtifact::Fallback {
                path,
                status_code,
                reason,
            }
        }
        Err(e) => {
            warn!(error = %e, "could not save fallback instructions");
            say!(console, "⚠️  Could not save fallback instructions: {}", e);
            OutputArtifact::PrintedOnly {
                status_code,
                reason,
            }
        }
    }
}

pub fn print_header<W: Write>(request: &SynthesisRequest, console: &mut W) {
    say!(console, "🎤 GENERATING AUDIO");
    say!(console, "{}", RULE);
    say!(console, "📝 Script length: {} characters", request.char_count());
    say!(
        console,
        "📋 First {} chars: {}...",
        PREVIEW_CHARS,
        request.preview(PREVIEW_CHARS)
    );
    say!(console);
}

pub fn print_footer<W: Write>(console: &mut W) {
    say!(console);
    say!(console, "{}", RULE);
    say!(console, "🎯 READY FOR NEXT STEP: Video Creation");
}

pub fn print_guidance<W: Write>(console: &mut W) {
    say!(console);
    say!(console, "🔧 FALLBACK INSTRUCTIONS:");
    for line in FALLBACK_GUIDANCE {
        say!(console, "{}", line);
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
