//! Run counters.
//!
//! The driver owns one [`RunStats`] per run and is the only writer. The
//! counters are intentionally simple: they exist to answer "what did this run
//! do" in tests and debug logs, not to feed any downstream decision.
//!
//! `post_validation_issues` is reserved: the current pipeline validates only
//! before transformation, so it stays zero unless a post-validation pass is
//! added.

use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunStats {
    /// Raw input lines seen.
    pub total_lines: usize,
    /// Lines that were neither blank nor comments.
    pub processed_lines: usize,
    /// Lines at least one rule rewrote.
    pub transformed_lines: usize,
    /// Issues found by validation before transformation.
    pub pre_validation_issues: usize,
    /// Reserved for a post-transformation validation pass.
    pub post_validation_issues: usize,
    /// Lines whose main command is deprecated.
    pub deprecated_commands: usize,
    /// Performance-mode cache hits.
    pub cache_hits: usize,
    /// Performance-mode cache misses.
    pub cache_misses: usize,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,

    confidence_sum: f64,
    confidence_samples: usize,
}

impl RunStats {
    pub(crate) fn record_confidence(&mut self, confidence: f64) {
        self.confidence_sum += confidence;
        self.confidence_samples += 1;
    }

    /// Mean per-line confidence over the run, 1.0 for an empty run.
    pub fn average_confidence(&self) -> f64 {
        if self.confidence_samples == 0 {
            return 1.0;
        }
        self.confidence_sum / self.confidence_samples as f64
    }

    /// Human-readable summary block.
    pub fn summary(&self) -> String {
        format!(
            "lines: {} total, {} processed, {} transformed\n\
             issues: {} pre-validation, {} post-validation, {} deprecated commands\n\
             cache: {} hits, {} misses\n\
             confidence: {:.2} average\n\
             elapsed: {:?}",
            self.total_lines,
            self.processed_lines,
            self.transformed_lines,
            self.pre_validation_issues,
            self.post_validation_issues,
            self.deprecated_commands,
            self.cache_hits,
            self.cache_misses,
            self.average_confidence(),
            self.elapsed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_confidence_defaults_to_one() {
        assert_eq!(RunStats::default().average_confidence(), 1.0);
    }

    #[test]
    fn average_confidence_is_the_mean() {
        let mut stats = RunStats::default();
        stats.record_confidence(1.0);
        stats.record_confidence(0.5);
        assert!((stats.average_confidence() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_mentions_every_counter() {
        let mut stats = RunStats::default();
        stats.total_lines = 7;
        stats.transformed_lines = 3;
        let summary = stats.summary();
        assert!(summary.contains("7 total"));
        assert!(summary.contains("3 transformed"));
        assert!(summary.contains("confidence"));
    }
}
