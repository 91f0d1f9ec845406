//! Newsprobe command-line interface
//!
//! Drives discovery sessions against the configured origin and prints the
//! resulting articles as JSON lines. Run one command at a time: sessions
//! share the persisted cursor and are not safe to run concurrently.

use clap::{Parser, Subcommand};
use newsprobe::config::load_config_with_hash;
use newsprobe::crawler::{Article, Discoverer};
use newsprobe::storage::SqliteSettings;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Newsprobe: identifier-probing news discovery
///
/// The target site has no article listing, so newsprobe finds new articles
/// by probing identifiers adjacent to the last confirmed one.
#[derive(Parser, Debug)]
#[command(name = "newsprobe")]
#[command(version = "1.0.0")]
#[command(about = "Identifier-probing news discovery engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "newsprobe.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep forward from the stored cursor and advance it
    CatchUp,

    /// Collect the most recent articles as a category-balanced digest
    Digest {
        /// Maximum number of articles in the digest
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Collect the most recent N articles, unbalanced, newest first
    Recent {
        /// Number of articles to collect
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },

    /// Probe a single identifier and print the article, if any
    Probe {
        /// String-form identifier, e.g. A00000136232
        ident: String,
    },

    /// Probe every identifier in a closed range (no cursor movement)
    Range {
        /// First identifier of the range
        start: String,

        /// Last identifier of the range, inclusive
        end: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::debug!("Configuration hash: {}", config_hash);

    let store = SqliteSettings::open(Path::new(&config.storage.database_path))?;
    let mut discoverer = Discoverer::new(&config, store)?;

    match cli.command {
        Command::CatchUp => {
            let articles = discoverer.catch_up().await?;
            print_articles(&articles)?;
            tracing::info!("Total articles found: {}", articles.len());
        }

        Command::Digest { limit } => {
            let mut rng = rand::thread_rng();
            let articles = discoverer.latest_digest(limit, &mut rng).await?;
            print_articles(&articles)?;
            tracing::info!("Digest contains {} articles", articles.len());
        }

        Command::Recent { count } => {
            let articles = discoverer.recent_raw(count).await?;
            print_articles(&articles)?;
        }

        Command::Probe { ident } => match discoverer.probe_ident(&ident).await? {
            Some(article) => println!("{}", serde_json::to_string_pretty(&article)?),
            None => {
                tracing::warn!("{}: no article", ident);
                std::process::exit(1);
            }
        },

        Command::Range { start, end } => {
            let codec = newsprobe::IdentCodec::new(config.source.id_prefix, config.source.id_width);
            let start = codec.decode(&start)?;
            let end = codec.decode(&end)?;
            if end < start {
                anyhow::bail!("range end is before range start");
            }
            let articles = discoverer.sweep_range(start, end).await?;
            print_articles(&articles)?;
            tracing::info!("Range sweep found {} articles", articles.len());
        }
    }

    Ok(())
}

/// Prints articles to stdout as JSON lines
fn print_articles(articles: &[Article]) -> anyhow::Result<()> {
    for article in articles {
        println!("{}", serde_json::to_string(article)?);
    }
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("newsprobe=info,warn"),
            1 => EnvFilter::new("newsprobe=debug,info"),
            2 => EnvFilter::new("newsprobe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
