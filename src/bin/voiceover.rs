//! voiceover — synthesize a script through the hosted TTS endpoint, or leave manual instructions.
//!
//! Usage:
//!   voiceover --text "Silver prices are rising today."
//!   voiceover --script script.txt --profile bella.yaml --label video_1_silver_tiktok
//!
//! The credential comes from the OS keychain (service `voiceover`, user
//! `elevenlabs`) or `ELEVENLABS_API_KEY`. Every synthesis outcome exits 0.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voiceover_rs::output::OutputLayout;
use voiceover_rs::{runner, AudioRequestRunner, RunnerConfig, SynthesisRequest, VoiceProfile};

#[derive(Parser, Debug)]
#[command(name = "voiceover")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate voiceover audio, falling back to manual instructions on failure")]
#[command(group(clap::ArgGroup::new("input").required(true).args(["text", "script"])))]
struct Args {
    /// Script text to synthesize
    #[arg(long)]
    text: Option<String>,

    /// Read the script from a file
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// YAML voice profile (voice_id, model_id, stability, similarity_boost, label)
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    #[arg(long)]
    voice_id: Option<String>,

    #[arg(long)]
    model_id: Option<String>,

    #[arg(long)]
    stability: Option<f32>,

    #[arg(long)]
    similarity_boost: Option<f32>,

    /// Prefix for the audio file name
    #[arg(long)]
    label: Option<String>,

    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Override the endpoint base URL
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    setup_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    let script = if let Some(text) = &args.text {
        text.clone()
    } else if let Some(path) = &args.script {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?
    } else {
        anyhow::bail!("either --text or --script is required");
    };
    if script.trim().is_empty() {
        anyhow::bail!("script is empty");
    }

    let profile = match &args.profile {
        Some(path) => VoiceProfile::load(path)
            .with_context(|| format!("loading profile {}", path.display()))?,
        None => VoiceProfile::default(),
    };
    let profile = profile.merge(flag_overrides(&args));
    profile.validate().context("invalid voice options")?;

    let mut config = RunnerConfig::from_env();
    if let Some(label) = profile.label.clone() {
        config.label = label;
    }
    if let Some(dir) = args.output_dir.clone() {
        config.output_dir = dir;
    }
    if let Some(url) = args.base_url.clone() {
        config.base_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    info!(?config, "configuration resolved");

    let request = profile.apply(SynthesisRequest::new(script));
    let layout = OutputLayout::new(&config.output_dir, &config.label);
    let mut stdout = std::io::stdout();

    let artifact = match config.client_builder().build() {
        Ok(client) => {
            AudioRequestRunner::new(client, layout)
                .with_credential_hint(config.redacted_api_key())
                .run(&request, &mut stdout)
                .await
        }
        Err(e) => {
            error!(error = %e, "cannot build TTS client");
            runner::fallback_without_client(&layout, &request, &e, &mut stdout)
        }
    };
    info!(?artifact, "run finished");
    Ok(())
}

/// Voice options given on the command line, layered over the profile file.
fn flag_overrides(args: &Args) -> VoiceProfile {
    VoiceProfile {
        voice_id: args.voice_id.clone(),
        model_id: args.model_id.clone(),
        stability: args.stability,
        similarity_boost: args.similarity_boost,
        label: args.label.clone(),
    }
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}
