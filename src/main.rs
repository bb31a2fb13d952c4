//! vk-harvest CLI
//!
//! Searches VK posts and prints normalized records

use clap::Parser;
use vk_harvest::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the variables may come from the shell
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
