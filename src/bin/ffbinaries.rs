//! ffbinaries CLI - fetch ffmpeg/ffprobe for this machine
//!
//! Usage:
//!   ffbinaries ffmpeg                         Latest ffmpeg into the current directory
//!   ffbinaries ffprobe --release 6.1 -d bin   ffprobe 6.1 into ./bin
//!
//! `FFBINARIES_API_URL` and `FFBINARIES_HTTP_TIMEOUT` are read first;
//! `--api-url` and `--timeout` override them.

use anyhow::{Context, Result};
use clap::Parser;
use ffbinaries::{Config, Fetcher, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffbinaries")]
#[command(about = "Download a prebuilt ffmpeg or ffprobe for this platform")]
#[command(version)]
struct Cli {
    /// Product to fetch (ffmpeg or ffprobe)
    product: String,

    /// Release tag to fetch (latest if not specified)
    #[arg(short, long, default_value = "")]
    release: String,

    /// Destination directory (current directory if not specified)
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Catalog base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Read timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Only print the resulting path
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(e) = run() {
        output::error(&render_chain(&e));
        std::process::exit(1);
    }
}

/// Join the error chain with ": ", skipping causes whose text an outer
/// message already carries.
fn render_chain(err: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_read_timeout_secs(secs);
    }

    let dest = cli
        .dest
        .as_deref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    let path = Fetcher::new(config)
        .download(&cli.product, &cli.release, &dest)
        .with_context(|| format!("Failed to fetch {}", cli.product))?;

    println!("{}", path.display());
    Ok(())
}
