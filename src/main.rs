//! Binary entrypoint for the snitchbot CLI.
//!
//! Commands:
//! - `post <FILE>` - extract the comments from a Python file and post them
//! - `scan <FILE>` - dry run: print what would be posted, no network calls
//! - `init` - create a starter `config.toml`
//!
//! See the library crate docs for module-level details: `snitchbot::`.

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{error, info, warn};

use snitchbot::api::HttpStatusClient;
use snitchbot::config::Config;
use snitchbot::extractor::{extract_comments, ExtractError};
use snitchbot::poster::StatusPoster;
use snitchbot::validation::validate_source_path;

#[derive(Parser)]
#[command(name = "snitchbot")]
#[command(about = "Posts the comment lines of a Python file as status updates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract comments from a Python file and post them as status updates
    Post {
        /// Python source file to scan
        file: String,
    },
    /// Extract comments and print them without posting anything
    Scan {
        /// Python source file to scan
        file: String,
    },
    /// Initialize a new snitchbot configuration
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes it)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Post { ref file } => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            if let Err(err) = run_post(file, &config).await {
                fail(err);
            }
        }
        Commands::Scan { ref file } => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            if let Err(err) = run_scan(file, &config).await {
                fail(err);
            }
        }
        Commands::Init => {
            info!("Initializing new snitchbot configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            info!("Set [api] api_key before running `snitchbot post`.");
        }
    }

    Ok(())
}

/// Single exit point for fatal conditions surfaced by the core components.
///
/// An empty extraction is a warning (there was simply nothing to do);
/// everything else is an error. Both terminate with a non-zero status.
fn fail(err: anyhow::Error) -> ! {
    if err.downcast_ref::<ExtractError>().is_some() {
        warn!("{}", err);
    } else {
        error!("{}", err);
    }
    std::process::exit(1);
}

async fn run_post(file: &str, config: &Config) -> Result<()> {
    let comments = collect_comments(file, config).await?;

    let client = HttpStatusClient::new(config.api.clone());
    if !client.is_configured() {
        bail!("No API credentials configured. Set api_key in the [api] section.");
    }

    let mut poster = StatusPoster::new(client, config.delivery.clone());
    poster.post(&comments).await?;

    let stats = poster.stats();
    info!(
        "Delivered {} comments ({} connection drops, {} cooldowns, {} unknown statuses)",
        stats.delivered, stats.connection_drops, stats.cooldowns, stats.unknown_statuses
    );
    Ok(())
}

async fn run_scan(file: &str, config: &Config) -> Result<()> {
    let comments = collect_comments(file, config).await?;

    info!("Dry run: {} comments would be posted from {}", comments.len(), file);
    for (index, comment) in comments.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, comments.len(), comment);
    }
    Ok(())
}

/// Shared front half of `post` and `scan`: validate the path, read the file
/// with line terminators intact, and run the extractor.
async fn collect_comments(file: &str, config: &Config) -> Result<Vec<String>> {
    validate_source_path(Path::new(file), &config.source)?;

    let content = tokio::fs::read_to_string(file).await?;
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    let comments = extract_comments(&lines)?;
    info!("Found {} comments in {}", comments.len(), file);
    Ok(comments)
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;

    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level.as_str())
            .unwrap_or("info")
            .parse()
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config.as_ref().and_then(|c| c.logging.file.clone());
    if let Some(ref file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            // When stdout is a terminal, mirror the log there as well
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
