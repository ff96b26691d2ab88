//! Local Piper engine check.
//!
//! Detects a `piper` executable and, when one is found, writes a simulation
//! report of what a local run would produce. No audio is ever synthesized
//! here; the "present" branch is a placeholder for a future integration.

use crate::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const ENV_PIPER_BIN: &str = "PIPER_BIN";
pub const DEFAULT_OUTPUT_DIR: &str = "piper_output";
pub const SIMULATION_FILE: &str = "simulation_test.txt";
pub const DEFAULT_TEST_TEXT: &str = "Silver prices are rising today. This is a test of local TTS.";

/// Rough output size per input character used by the simulation.
const BYTES_PER_CHAR: usize = 50;
const RULE: &str = "========================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiperVoice {
    pub name: &'static str,
    pub model: &'static str,
}

/// Commonly used Piper voices.
pub const VOICES: &[PiperVoice] = &[
    PiperVoice {
        name: "English (US) - Female",
        model: "en_US-lessac-medium",
    },
    PiperVoice {
        name: "English (UK) - Female",
        model: "en_GB-alba-medium",
    },
    PiperVoice {
        name: "English (US) - Male",
        model: "en_US-libritts-high",
    },
    PiperVoice {
        name: "Dutch - Female",
        model: "nl_NL-mls-medium",
    },
    PiperVoice {
        name: "German - Female",
        model: "de_DE-thorsten-medium",
    },
];

/// Locate the engine: an explicit path wins, otherwise search `PATH`.
pub fn detect(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        warn!(path = %path.display(), "configured piper binary does not exist");
        return None;
    }
    match which::which("piper") {
        Ok(path) => Some(path),
        Err(e) => {
            debug!(error = %e, "piper not found on PATH");
            None
        }
    }
}

/// Estimated report written by the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub text: String,
    pub char_count: usize,
    pub estimated_bytes: usize,
}

impl SimulationReport {
    pub fn for_text(text: &str) -> Self {
        let char_count = text.chars().count();
        Self {
            text: text.to_string(),
            char_count,
            estimated_bytes: char_count * BYTES_PER_CHAR,
        }
    }

    pub fn render(&self) -> String {
        format!(
            concat!(
                "Piper TTS Simulation\n",
                "Text: {}\n",
                "Would generate: {} characters\n",
                "Estimated file size: {} bytes\n",
            ),
            self.text, self.char_count, self.estimated_bytes
        )
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(SIMULATION_FILE);
        fs::write(&path, self.render())?;
        info!(path = %path.display(), "simulation written");
        Ok(path)
    }
}

/// The whole check, parameterised so it can run against a temp dir.
#[derive(Debug, Clone)]
pub struct PiperCheck {
    pub engine: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub text: String,
}

impl PiperCheck {
    pub fn new(engine: Option<PathBuf>) -> Self {
        Self {
            engine,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            text: DEFAULT_TEST_TEXT.to_string(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns the process exit code: 1 when the engine is missing, 0 otherwise.
    ///
    /// The missing-engine path only prints; it touches neither network nor disk.
    pub fn run<W: Write>(&self, console: &mut W) -> i32 {
        say!(console, "🎤 TESTING PIPER TTS (Local Alternative)");
        say!(console, "{}", RULE);

        let Some(engine) = &self.engine else {
            say!(console, "❌ Piper TTS not installed");
            print_install_steps(console);
            return 1;
        };
        say!(console, "✅ Piper TTS is installed ({})", engine.display());

        print_voices(console);
        let success = self.simulate(console);

        say!(console);
        say!(console, "{}", RULE);
        if success {
            say!(console, "✅ PIPER TTS READY FOR INTEGRATION");
            say!(console);
            say!(console, "🚀 NEXT STEPS:");
            say!(console, "1. Install piper-tts: pip install piper-tts");
            say!(console, "2. Download voice model from HuggingFace");
            say!(console, "3. Integrate with the voiceover runner");
            say!(console, "4. Generate local audio for videos");
        } else {
            say!(console, "❌ NEED TO INSTALL PIPER TTS");
        }
        print_quick_install(console);
        0
    }

    fn simulate<W: Write>(&self, console: &mut W) -> bool {
        say!(console);
        say!(console, "🧪 TESTING VOICE GENERATION...");
        let report = SimulationReport::for_text(&self.text);
        say!(console, "Text: {}", report.text);
        say!(console, "Length: {} characters", report.char_count);
        say!(console);
        say!(console, "📝 SIMULATION MODE (Piper would generate audio here)");
        say!(console, "   With real Piper TTS, you would get:");
        say!(console, "   - WAV audio file generated");
        say!(console, "   - ~1-2 seconds processing time");
        say!(console, "   - Local processing (no API calls)");
        say!(console, "   - Free forever");

        match report.write_to(&self.output_dir) {
            Ok(path) => {
                say!(console);
                say!(console, "💾 Simulation saved to: {}", path.display());
                true
            }
            Err(e) => {
                warn!(error = %e, "simulation failed");
                say!(console, "❌ Error: {}", e);
                false
            }
        }
    }
}

fn print_voices<W: Write>(console: &mut W) {
    say!(console);
    say!(console, "🔍 CHECKING AVAILABLE VOICES...");
    say!(console, "Found {} voice options", VOICES.len());
    for (i, voice) in VOICES.iter().enumerate() {
        say!(console, "  {}. {} ({})", i + 1, voice.name, voice.model);
    }
}

fn print_install_steps<W: Write>(console: &mut W) {
    say!(console);
    say!(console, "📦 INSTALLATION:");
    say!(console, "1. Install piper-tts:");
    say!(console, "   pip install piper-tts");
    say!(console, "2. Download a voice model:");
    say!(
        console,
        "   Download from: https://huggingface.co/rhasspy/piper-voices/tree/main"
    );
    say!(console, "3. Place .onnx file in voices/ directory");
    say!(console, "4. Make sure `piper` is on PATH, or set {}", ENV_PIPER_BIN);
}

fn print_quick_install<W: Write>(console: &mut W) {
    say!(console);
    say!(console, "📦 QUICK INSTALL COMMANDS:");
    say!(console, "pip install piper-tts");
    say!(console, "mkdir -p voices && cd voices");
    say!(console, "# Download a model from:");
    say!(
        console,
        "# https://huggingface.co/rhasspy/piper-voices/tree/main/en/en_US"
    );
    say!(console, "# Example: en_US-lessac-medium.onnx");
}
