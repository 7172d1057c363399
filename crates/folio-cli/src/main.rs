//! Folio CLI
//!
//! Headless companion to the portfolio page behaviors: preview the
//! typewriter animation and check site configuration without a browser.
//!
//! ## Usage
//!
//! ```bash
//! # Print the first 20 animation frames with their delays
//! folio frames --count 20
//!
//! # Animate the phrases in the terminal
//! folio play --cycles 3
//!
//! # Show the resolved configuration (defaults merged with an override)
//! folio --config site.json config
//!
//! # Read the image path out of a legacy inline trigger
//! folio extract "openCertificate('assets/cert.jpg')"
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_core::{extract_legacy_source, SiteConfig, Typewriter};
use tokio::time::Instant;

/// Folio - portfolio page behaviors, headless
#[derive(Parser)]
#[command(name = "folio")]
#[command(version = "0.1.0")]
#[command(about = "Preview portfolio page behaviors without a browser")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON file overriding the default site configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print typewriter frames as `<delay>ms<TAB><text>`
    Frames {
        /// Number of frames to print
        #[arg(short = 'n', long, default_value_t = 40)]
        count: usize,
    },

    /// Animate the typewriter in the terminal
    Play {
        /// Phrases to complete before exiting (default: one pass over the list)
        #[arg(long)]
        cycles: Option<usize>,
    },

    /// Print the resolved configuration as JSON
    Config,

    /// Print the image path embedded in a legacy inline trigger attribute
    Extract {
        /// Attribute text, e.g. "openCertificate('assets/cert.jpg')"
        text: String,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

/// Write `count` frames, one per line.
fn write_frames(typewriter: Typewriter, count: usize, out: &mut impl Write) -> Result<()> {
    for frame in typewriter.take(count) {
        writeln!(out, "{}ms\t{}", frame.delay.as_millis(), frame.text)?;
    }
    Ok(())
}

/// Animate until `cycles` phrases have been typed and deleted.
///
/// Each frame redraws the current line, then sleeps for the frame's delay.
/// Returns the time spent.
async fn play(mut typewriter: Typewriter, cycles: usize, out: &mut impl Write) -> Result<Duration> {
    let started = Instant::now();
    let mut completed = 0;

    while completed < cycles {
        let frame = typewriter.tick();
        write!(out, "\r\x1b[2K{}", frame.text)?;
        out.flush()?;

        let cursor = typewriter.cursor();
        if cursor.chars == 0 && !cursor.deleting {
            completed += 1;
            tracing::debug!(completed, "phrase cycle finished");
        }
        tokio::time::sleep(frame.delay).await;
    }

    writeln!(out)?;
    Ok(started.elapsed())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Frames { count } => {
            let typewriter = Typewriter::from_config(&config)?;
            write_frames(typewriter, count, &mut std::io::stdout().lock())?;
        }

        Commands::Play { cycles } => {
            let typewriter = Typewriter::from_config(&config)?;
            let cycles = cycles.unwrap_or(config.roles.len());
            let elapsed = play(typewriter, cycles, &mut std::io::stdout()).await?;
            tracing::info!(?elapsed, cycles, "playback finished");
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Extract { text } => match extract_legacy_source(&text) {
            Some(src) => println!("{}", src),
            None => bail!("no openCertificate('...') call found in {:?}", text),
        },
    }

    Ok(())
}
