//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use harvester_core::{DEFAULT_CONCURRENCY, DEFAULT_MISS_THRESHOLD};

/// Discover and bulk-download numbered gallery images.
///
/// Given a listing page URL of the form `https://host/<name>/index.html`,
/// harvester enumerates the numbered images under `<name>/images/`, checks
/// which of them exist, and downloads the confirmed ones concurrently.
#[derive(Parser, Debug)]
#[command(name = "harvester")]
#[command(author, version, about)]
pub struct Args {
    /// Gallery listing URL (prompted for interactively when omitted on a terminal)
    pub url: Option<String>,

    /// Root directory downloads are placed under
    #[arg(short = 'o', long, default_value = "harvested")]
    pub output: PathBuf,

    /// Subfolder name inside the output root (defaults to the output root itself)
    #[arg(short = 'f', long)]
    pub folder: Option<String>,

    /// Generate and validate exactly N candidates instead of adaptive discovery
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<u32>,

    /// Consecutive misses that end adaptive discovery (1-100)
    #[arg(short = 't', long, default_value_t = DEFAULT_MISS_THRESHOLD, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub threshold: u32,

    /// Maximum concurrent probes/downloads (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
