//! CLI entry point for the harvester tool.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use clap::Parser;
use harvester_core::{DiscoveryMode, HarvestConfig, ProgressSink, run_harvest};
use tracing::{debug, info};

mod cli;
mod progress_ui;

use cli::Args;
use progress_ui::spawn_progress_ui;

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

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Harvester starting");

    // Resolve the listing URL: from the positional argument, or by prompting
    // when running interactively.
    let url = if let Some(url) = args.url {
        url
    } else if io::stdin().is_terminal() {
        prompt("Listing page URL: ")?
    } else {
        info!("No URL provided. Pass a listing page URL as an argument.");
        info!("Example: harvester https://example.com/gallery/event/index.html");
        return Ok(());
    };

    if url.trim().is_empty() {
        info!("No URL provided, nothing to do");
        return Ok(());
    }

    // Optional subfolder under the output root, prompted interactively when
    // neither a flag nor a pipe decided it.
    let folder = match args.folder {
        Some(folder) => Some(folder),
        None if io::stdin().is_terminal() => {
            let entered = prompt("Subfolder (blank for output root): ")?;
            if entered.is_empty() { None } else { Some(entered) }
        }
        None => None,
    };

    let dest_dir = match folder {
        Some(folder) => args.output.join(folder),
        None => args.output,
    };

    let mode = match args.count {
        Some(max_count) => DiscoveryMode::Bounded { max_count },
        None => DiscoveryMode::Adaptive {
            threshold: args.threshold,
        },
    };

    let config = HarvestConfig {
        url: url.trim().to_string(),
        dest_dir,
        mode,
        concurrency: usize::from(args.concurrency),
    };

    // Progress bar unless suppressed. Quiet implies no progress output.
    let show_progress = !args.no_progress && !args.quiet && io::stderr().is_terminal();
    let (progress, ui_task) = if show_progress {
        let (sink, rx) = ProgressSink::channel();
        (sink, Some(spawn_progress_ui(rx)))
    } else {
        (ProgressSink::disabled(), None)
    };

    let report = run_harvest(&config, &progress).await?;

    // Close the channel so the UI task drains and exits before the summary.
    drop(progress);
    if let Some(task) = ui_task {
        let _ = task.await;
    }

    info!(
        candidates = report.total_candidates(),
        valid = report.total_valid(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Harvest complete"
    );
    println!(
        "{} candidates, {} valid, {} downloaded, {} failed",
        report.total_candidates(),
        report.total_valid(),
        report.succeeded(),
        report.failed()
    );

    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
