//! CLI argument parsing

use clap::Parser;

/// Search VK posts and print one normalized record per post
#[derive(Parser, Debug, Clone)]
#[command(name = "vk-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Search text
    #[arg(short, long, default_value = "POLARNET")]
    pub query: String,

    /// Posts per page (VK caps this at 200)
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: u32,

    /// Number of pages to print
    #[arg(short, long, default_value_t = 1)]
    pub pages: u32,

    /// Only posts published at or after this unix time
    #[arg(long)]
    pub start_time: Option<i64>,

    /// Only posts published at or before this unix time
    #[arg(long)]
    pub end_time: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Indented JSON
    Pretty,
}
