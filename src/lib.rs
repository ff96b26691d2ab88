//! # voiceover-rs
//!
//! Generate-or-fallback voiceover tooling for hosted text-to-speech APIs.
//!
//! ## Overview
//!
//! One script in, one artifact out. [`AudioRequestRunner`] posts a script to a
//! hosted speech-synthesis endpoint and saves the returned audio together with
//! an instructions file. When the endpoint refuses the request or cannot be
//! reached, it prints manual guidance and writes a fallback instructions file
//! instead. Failures never escape the runner.
//!
//! The [`piper`] module is a companion check for a local Piper install. It only
//! reports what a local run would do; it never synthesizes audio.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voiceover_rs::{AudioRequestRunner, OutputLayout, RunnerConfig, SynthesisRequest};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> voiceover_rs::Result<()> {
//!     let config = RunnerConfig::from_env();
//!     let client = config.client_builder().build()?;
//!     let layout = OutputLayout::new(&config.output_dir, &config.label);
//!     let runner = AudioRequestRunner::new(client, layout);
//!
//!     let request = SynthesisRequest::new("Silver prices are rising today.");
//!     let artifact = runner.run(&request, &mut std::io::stdout()).await;
//!     println!("{:?}", artifact);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Credential, endpoint, timeout, output dir; YAML voice profiles |
//! | [`tts`] | Request/result types and the HTTP client |
//! | [`output`] | File layout and operator-facing text artifacts |
//! | [`runner`] | The generate-or-fallback workflow |
//! | [`piper`] | Local Piper presence check and simulation report |

// Console output is best effort; a closed stdout must not abort a run.
macro_rules! say {
    ($out:expr) => {
        let _ = writeln!($out);
    };
    ($out:expr, $($arg:tt)*) => {
        let _ = writeln!($out, $($arg)*);
    };
}

pub mod config;
pub mod output;
pub mod piper;
pub mod runner;
pub mod tts;

// Re-export main types for convenience
pub use config::{RunnerConfig, VoiceProfile};
pub use output::{OutputArtifact, OutputLayout};
pub use runner::AudioRequestRunner;
pub use tts::{SpeechSynthesizer, SynthesisRequest, SynthesisResult, TtsClient, VoiceSettings};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
