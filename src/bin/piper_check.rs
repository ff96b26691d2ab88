//! piper-check — report whether a local Piper engine is available.
//!
//! Exits 1 when no engine is found. When one is found it writes a simulation
//! report to `piper_output/`; it never synthesizes audio.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voiceover_rs::piper::{self, PiperCheck, ENV_PIPER_BIN};

#[derive(Parser, Debug)]
#[command(name = "piper-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check for a local Piper TTS engine")]
struct Args {
    /// Explicit path to the piper executable (otherwise searched on PATH)
    #[arg(long, env = ENV_PIPER_BIN, value_name = "PATH")]
    piper_bin: Option<PathBuf>,

    #[arg(long, value_name = "DIR", default_value = piper::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Text used for the simulated run
    #[arg(long, default_value = piper::DEFAULT_TEST_TEXT)]
    text: String,
}

fn main() {
    setup_tracing();
    let args = Args::parse();

    let engine = piper::detect(args.piper_bin.as_deref());
    let code = PiperCheck::new(engine)
        .with_output_dir(args.output_dir)
        .with_text(args.text)
        .run(&mut std::io::stdout());
    std::process::exit(code);
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
