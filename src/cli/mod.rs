//! CLI module
//!
//! Command-line entry point: runs one newsfeed search and prints a
//! normalized record for every post found. With no arguments it searches
//! for `POLARNET`, 20 posts, one page.

mod commands;
mod runner;

pub use commands::{Cli, OutputFormat};
pub use runner::Runner;
