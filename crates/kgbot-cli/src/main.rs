//! kgbot CLI — entry point.
//!
//! # Commands
//!
//! - `kgbot ask (--text T | --audio FILE)` — answer one knowledge graph query
//! - `kgbot status` — show configuration and provider status
//! - `kgbot init` — write a default config

mod ask;
mod helpers;
mod init;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// kgbot — spoken answers from a knowledge graph provider
#[derive(Parser)]
#[command(name = "kgbot", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.kgbot/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the configured knowledge graph provider one question
    Ask {
        /// Question text (skips speech-to-text)
        #[arg(short, long, conflicts_with = "audio", required_unless_present = "audio")]
        text: Option<String>,

        /// Audio file with the spoken question (.wav, .ogg, .opus, .pcm)
        #[arg(short, long)]
        audio: Option<String>,

        /// Session identifier
        #[arg(short, long, default_value = "cli")]
        session: String,

        /// Device identifier
        #[arg(short, long, default_value = "cli:local")]
        device: String,

        /// Print the response message as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path: Option<PathBuf> = cli.config.as_deref().map(helpers::expand_tilde);

    match cli.command {
        Commands::Ask {
            text,
            audio,
            session,
            device,
            json,
            logs,
        } => {
            init_logging(logs);
            let input = match (text, audio) {
                (Some(text), _) => ask::Input::Text(text),
                (None, Some(audio)) => ask::Input::Audio(helpers::expand_tilde(&audio)),
                (None, None) => anyhow::bail!("either --text or --audio is required"),
            };
            ask::run(config_path.as_deref(), input, session, device, json).await
        }
        Commands::Status => status::run(config_path.as_deref()),
        Commands::Init { force } => init::run(config_path.as_deref(), force),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("kgbot=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
