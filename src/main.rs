// ============================================================================
// File: src/main.rs
// Entry point and CLI handling
// ============================================================================

mod chat_client;
mod config;
mod context;
mod models;
mod orchestrator;
mod search_client;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::orchestrator::AssistOrchestrator;

/// Command-line arguments for the assistant
#[derive(Parser, Debug)]
#[command(name = "harper-assist")]
#[command(about = "Answer a question from your search index with cited sources", long_about = None)]
struct Args {
    /// Path to the JSON settings file
    #[arg(short, long, default_value = "appsettings.json")]
    config: PathBuf,

    /// Enable verbose output (shows the outbound query and debug info)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration: settings file, optional local override, environment
    let config = Config::load(&args.config)?;

    // Run the single question/answer exchange
    let orchestrator = AssistOrchestrator::new(config, args.verbose);
    orchestrator.run().await?;

    Ok(())
}
