//! Progress UI for harvest runs.
//!
//! Drains the pipeline's progress channel into an indicatif bar: a spinner
//! with running counters during discovery, switching to a determinate bar
//! once the valid set is known and downloading starts.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::UnboundedReceiver;

use harvester_core::ProgressEvent;

/// Spawns a task rendering progress events until the channel closes.
/// Returns the handle so the caller can await it after the pipeline ends.
pub(crate) fn spawn_progress_ui(
    mut rx: UnboundedReceiver<ProgressEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        let mut probed = 0u64;
        let mut hits = 0u64;
        let mut downloaded = 0u64;

        while let Some(event) = rx.recv().await {
            match event {
                ProgressEvent::Generated { total } => {
                    bar.set_message(format!("generated {total} candidates"));
                }
                ProgressEvent::Probed { valid, .. } => {
                    probed += 1;
                    if valid {
                        hits += 1;
                    }
                    bar.set_message(format!("probing: {probed} checked, {hits} found"));
                }
                ProgressEvent::Discovered { total_valid } => {
                    bar.finish_and_clear();
                    let download_bar = ProgressBar::new(total_valid as u64);
                    download_bar.set_style(
                        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_bar()),
                    );
                    download_bar.set_message("downloading");
                    render_downloads(&mut rx, download_bar, &mut downloaded).await;
                    return;
                }
                ProgressEvent::Downloaded { .. } => {
                    // Downloads without a preceding Discovered event: count silently.
                    downloaded += 1;
                }
            }
        }
        bar.finish_and_clear();
    })
}

async fn render_downloads(
    rx: &mut UnboundedReceiver<ProgressEvent>,
    bar: ProgressBar,
    downloaded: &mut u64,
) {
    while let Some(event) = rx.recv().await {
        if let ProgressEvent::Downloaded { .. } = event {
            *downloaded += 1;
            bar.inc(1);
        }
    }
    bar.finish_and_clear();
}
