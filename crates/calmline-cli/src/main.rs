//! Calmline CLI - talk to the wellness backend from a terminal.
//!
//! Every subcommand maps to one client call and prints the JSON result.
//! Endpoints with offline fallbacks still print a result when the backend
//! is down; look for `"offline": true`.

mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use calmline_core::{ApiClient, Config};

#[derive(Debug, Parser)]
#[command(name = "calmline", version, about = "Client for the calmline wellness backend")]
struct Cli {
    /// Backend base URL (overrides config file and CALMLINE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check backend health
    Health,
    /// Store a session token (prompts when omitted)
    Login {
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show base URL, token and connectivity state
    Status,
    /// Save a backend base URL to the config file
    SetUrl { url: String },
    /// List check-in questions
    Questions {
        /// List baseline questions instead
        #[arg(long)]
        baseline: bool,
    },
    /// Submit a daily check-in
    Checkin {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Answer as question_id=value, repeatable
        #[arg(long = "answer", value_parser = commands::parse_answer, required = true)]
        answers: Vec<(String, f64)>,
    },
    /// Analyze a journal entry given as text or a file to upload
    Journal {
        #[arg(required_unless_present = "file")]
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Score baseline answers
    Baseline {
        #[arg(long = "answer", value_parser = commands::parse_answer, required = true)]
        answers: Vec<(String, f64)>,
    },
    /// Rewrite text for sharing
    Rewrite { text: String },
    /// Show mood index history
    Series {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Fetch a guided exercise
    Exercise,
    /// Run a safety check on text
    Safety { text: String },
    /// Send a chat message
    Chat { session_id: String, message: String },
    /// Transcribe an audio file
    Stt { file: PathBuf },
    /// Synthesize speech
    Tts {
        text: String,
        #[arg(long)]
        voice: Option<String>,
        /// Where to write the audio
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing(log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_ref())?;

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = Some(url);
    }
    let mut client = ApiClient::from_config(&config)?;
    info!(base_url = %client.base_url(), "calmline starting");

    commands::run(&mut client, &mut config, cli.command).await
}
