//! CLI entry point for the zotag tool.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zotag_core::{AnthropicClient, Config, TagVocabulary, Tagger, ZoteroClient};

mod cli;

use cli::Args;

/// Fixed log file name, written in the working directory.
const LOG_FILE: &str = "zotag.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Every line goes to the console and to a fixed-name log file.
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (file_writer, _log_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    debug!(?args, "CLI arguments parsed");
    info!("Zotag starting");

    // Fatal on missing credentials, before any catalog call.
    let config = Config::from_env()?;

    let options = args.processing_options();
    let vocab = match &options.tags_file {
        Some(path) => TagVocabulary::load(path)?,
        None => {
            info!("Starting with empty tag vocabulary (no tags file configured)");
            TagVocabulary::in_memory()
        }
    };

    let catalog = ZoteroClient::new(&config)?;
    let llm = AnthropicClient::new(&config.anthropic_api_key)?;
    let mut tagger = Tagger::new(catalog, llm, vocab, &options)?;

    let stats = tagger.run(args.limit).await?;

    info!(
        processed = stats.processed,
        tagged = stats.tagged,
        skipped = stats.skipped,
        failed = stats.failed,
        "Tagging complete"
    );

    Ok(())
}
