//! Final tally of a harvest run.

use crate::download::DownloadOutcome;

/// Aggregated counters for one pipeline invocation.
///
/// Built incrementally as download outcomes arrive and finalized when all
/// work completes. The fold is pure addition, so the completion order of
/// outcomes never affects the final report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    total_candidates: usize,
    total_valid: usize,
    succeeded: usize,
    failed: usize,
}

impl RunReport {
    /// Creates a report for a run that generated `total_candidates` and
    /// confirmed `total_valid` of them, with no downloads recorded yet.
    #[must_use]
    pub fn new(total_candidates: usize, total_valid: usize) -> Self {
        Self {
            total_candidates,
            total_valid,
            succeeded: 0,
            failed: 0,
        }
    }

    /// Folds one terminal download outcome into the tally.
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        if outcome.succeeded {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Number of candidate URLs generated.
    #[must_use]
    pub fn total_candidates(&self) -> usize {
        self.total_candidates
    }

    /// Number of candidates confirmed to exist.
    #[must_use]
    pub fn total_valid(&self) -> usize {
        self.total_valid
    }

    /// Number of downloads that completed successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of downloads that reached a failed terminal outcome.
    /// Invalid candidates are not failures; only download attempts count.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn outcome(url: &str, succeeded: bool) -> DownloadOutcome {
        DownloadOutcome {
            url: url.to_string(),
            filename: url.rsplit('/').next().unwrap().to_string(),
            succeeded,
        }
    }

    #[test]
    fn test_new_report_has_zero_download_counters() {
        let report = RunReport::new(10, 4);
        assert_eq!(report.total_candidates(), 10);
        assert_eq!(report.total_valid(), 4);
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn test_record_splits_succeeded_and_failed() {
        let mut report = RunReport::new(3, 3);
        report.record(&outcome("https://h/images/a1.jpg", true));
        report.record(&outcome("https://h/images/a2.jpg", false));
        report.record(&outcome("https://h/images/a3.jpg", true));

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let outcomes = vec![
            outcome("https://h/images/a1.jpg", true),
            outcome("https://h/images/a2.jpg", false),
            outcome("https://h/images/a3.jpg", true),
            outcome("https://h/images/a4.jpg", false),
            outcome("https://h/images/a5.jpg", true),
        ];

        let mut forward = RunReport::new(5, 5);
        for o in &outcomes {
            forward.record(o);
        }

        let mut shuffled = RunReport::new(5, 5);
        for o in outcomes.iter().rev() {
            shuffled.record(o);
        }
        // A second permutation: middle-out
        let mut middle_out = RunReport::new(5, 5);
        for i in [2usize, 0, 4, 1, 3] {
            middle_out.record(&outcomes[i]);
        }

        assert_eq!(forward, shuffled);
        assert_eq!(forward, middle_out);
        assert_eq!(forward.succeeded() + forward.failed(), outcomes.len());
    }
}
