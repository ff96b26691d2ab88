//! Output layout and the text artifacts written for the operator.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const INSTRUCTIONS_FILE: &str = "INSTRUCTIONS.txt";
pub const FALLBACK_FILE: &str = "MANUAL_INSTRUCTIONS.txt";
pub const MANUAL_SYNTHESIS_URL: &str = "https://elevenlabs.io/speech-synthesis";

/// Printed whenever automated synthesis did not produce audio.
pub const FALLBACK_GUIDANCE: &[&str] = &[
    "1. Go to: https://elevenlabs.io/speech-synthesis",
    "2. Paste the script above",
    "3. Click 'Generate'",
    "4. Download MP3",
    "5. Use in Canva",
];

/// What a run left on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputArtifact {
    /// `instructions_path` is `None` when the audio was saved but the
    /// instructions file could not be written.
    Audio {
        audio_path: PathBuf,
        instructions_path: Option<PathBuf>,
        size_bytes: usize,
    },
    Fallback {
        path: PathBuf,
        status_code: Option<u16>,
        reason: String,
    },
    /// Guidance went to the console but the fallback file could not be written.
    PrintedOnly {
        status_code: Option<u16>,
        reason: String,
    },
}

impl OutputArtifact {
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio { .. })
    }

    /// Every file this artifact consists of.
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            Self::Audio {
                audio_path,
                instructions_path,
                ..
            } => std::iter::once(audio_path.as_path())
                .chain(instructions_path.as_deref())
                .collect(),
            Self::Fallback { path, .. } => vec![path.as_path()],
            Self::PrintedOnly { .. } => Vec::new(),
        }
    }
}

/// Where files go and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    dir: PathBuf,
    label: String,
}

impl OutputLayout {
    pub fn new(dir: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            label: label.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{label}_{voice_id}.mp3`, with anything outside `[A-Za-z0-9_-]` replaced by `_`.
    pub fn audio_file_name(&self, voice_id: &str) -> String {
        let sanitize = |s: &str| -> String {
            s.chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect()
        };
        format!("{}_{}.mp3", sanitize(&self.label), sanitize(voice_id))
    }

    pub fn audio_path(&self, voice_id: &str) -> PathBuf {
        self.dir.join(self.audio_file_name(voice_id))
    }

    pub fn instructions_path(&self) -> PathBuf {
        self.dir.join(INSTRUCTIONS_FILE)
    }

    pub fn fallback_path(&self) -> PathBuf {
        self.dir.join(FALLBACK_FILE)
    }

    /// Create the directory if missing. Existing contents are left alone.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn write_audio(&self, voice_id: &str, audio: &[u8]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.audio_path(voice_id);
        fs::write(&path, audio)?;
        info!(path = %path.display(), bytes = audio.len(), "audio written");
        Ok(path)
    }

    pub fn write_instructions(&self, audio_path: &Path, script: &str) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.instructions_path();
        fs::write(&path, render_instructions(audio_path, script))?;
        info!(path = %path.display(), "instructions written");
        Ok(path)
    }

    pub fn write_fallback(&self, script: &str) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.fallback_path();
        fs::write(&path, render_fallback(script))?;
        info!(path = %path.display(), "fallback instructions written");
        Ok(path)
    }
}

/// Companion text saved next to a successful audio file.
pub fn render_instructions(audio_path: &Path, script: &str) -> String {
    let file_name = audio_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let location = fs::canonicalize(audio_path).unwrap_or_else(|_| audio_path.to_path_buf());
    format!(
        "🎬 AUDIO READY!

Audio file: {file_name}
Location: {location}

📋 NEXT STEPS:
1. Open Canva.com
2. Create 9:16 video
3. Upload this MP3 file
4. Add text overlays from script
5. Export as MP4
6. Upload to TikTok

Script used:
{script}
",
        location = location.display(),
    )
}

/// Manual steps written when synthesis could not complete.
pub fn render_fallback(script: &str) -> String {
    format!(
        "🎤 MANUAL AUDIO GENERATION NEEDED

The API call failed. Here's what to do:

1. OPEN: {MANUAL_SYNTHESIS_URL}
2. PASTE this script:
{script}
3. CLICK: \"Generate\"
4. DOWNLOAD: MP3 file
5. USE: In Canva for video creation

Time needed: ~3 minutes
"
    )
}
