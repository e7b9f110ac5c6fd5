//! Metrics aggregation and report formatting
//!
//! Accumulates per-case and running totals and renders the per-case report
//! lines plus the final two summary lines. The accumulator is owned by the
//! run loop and threaded through by mutable reference; no global state.

use std::fmt;
use std::time::Duration;

use crate::corpus::TestCase;

/// Outcome of one verified test case.
///
/// Ephemeral: folded into [`AggregateMetrics`] and discarded.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub name: String,
    pub encoded_size: usize,
    pub elapsed: Duration,
    /// Encoded size minus the best reference's size.
    pub reference_delta: i64,
}

/// Process-wide running totals, monotonically increasing over the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateMetrics {
    pub total_encoded_size: u64,
    pub total_original_size: u64,
    pub total_best_reference_size: u64,
}

impl AggregateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one verified case into the totals.
    pub fn record(&mut self, encoded_size: usize, original_size: usize, reference_size: usize) {
        self.total_encoded_size += encoded_size as u64;
        self.total_original_size += original_size as u64;
        self.total_best_reference_size += reference_size as u64;
    }

    /// Final summary over everything recorded so far.
    pub fn summary(&self) -> Summary {
        let compression_ratio_pct = if self.total_original_size == 0 {
            None
        } else {
            Some(100.0 * self.total_encoded_size as f64 / self.total_original_size as f64)
        };
        let versus_best_pct = if self.total_encoded_size == 0 {
            None
        } else {
            Some(
                100.0 * self.total_best_reference_size as f64 / self.total_encoded_size as f64
                    - 100.0,
            )
        };

        Summary {
            total_encoded_size: self.total_encoded_size,
            total_original_size: self.total_original_size,
            total_best_reference_size: self.total_best_reference_size,
            compression_ratio_pct,
            versus_best_pct,
        }
    }
}

/// End-of-run summary.
///
/// Ratios are `None` when their denominator is zero (an all-empty or
/// all-skipped corpus) rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_encoded_size: u64,
    pub total_original_size: u64,
    pub total_best_reference_size: u64,
    /// Overall compression ratio, `100 * encoded / original`.
    pub compression_ratio_pct: Option<f64>,
    /// How the aggregate compares to the sum of per-case best references,
    /// `100 * best / encoded - 100`.
    pub versus_best_pct: Option<f64>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.compression_ratio_pct {
            Some(pct) => writeln!(
                f,
                "total {}/{} ({:.0}%)",
                self.total_encoded_size, self.total_original_size, pct
            )?,
            None => writeln!(
                f,
                "total {}/{} (n/a)",
                self.total_encoded_size, self.total_original_size
            )?,
        }
        match self.versus_best_pct {
            Some(pct) => writeln!(
                f,
                "combo-best {}/{} ({:+.1}%)",
                self.total_best_reference_size, self.total_encoded_size, pct
            ),
            None => writeln!(
                f,
                "combo-best {}/{} (n/a)",
                self.total_best_reference_size, self.total_encoded_size
            ),
        }
    }
}

/// Render one per-case report line:
/// `<name> <encoded-size> <elapsed-ms> <percent-of-original>% <reference> <+/-delta>`.
///
/// An empty case has no meaningful percentage and renders `--` instead.
pub fn per_case_line(case: &TestCase, result: &RunResult) -> String {
    let pct = if case.original_size == 0 {
        "--".to_string()
    } else {
        format!(
            "{:.0}%",
            100.0 * result.encoded_size as f64 / case.original_size as f64
        )
    };

    format!(
        "{} {} {:.3}ms {}, {} {:+}",
        result.name,
        result.encoded_size,
        result.elapsed.as_secs_f64() * 1000.0,
        pct,
        case.reference_source,
        result.reference_delta
    )
}
