// src/main.rs
use std::process::exit;

use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};

use spiderwrap::cli::{self, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run(args).await {
        error!("{:#}", e);
        exit(1);
    }

    Ok(())
}
