// ABOUTME: Per-line workout metric calculation for progress aggregation
// ABOUTME: Computes volume, rep totals and the Epley one-rep-max estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Pure per-line metric calculation.
//!
//! Each logged exercise line (sets, reps, weight) reduces to a small set
//! of derived numbers that the aggregation engine folds into the
//! longitudinal [`ExerciseProgress`](crate::models::ExerciseProgress)
//! records. The functions here are stateless and total: degenerate input
//! (zero sets, missing weight) yields zero-valued metrics rather than an
//! error.

use crate::constants::physiology::EPLEY_REP_DIVISOR;
use serde::{Deserialize, Serialize};

/// Derived metrics for a single logged exercise line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetMetrics {
    /// Workload: weight x reps x sets
    pub volume: f64,
    /// Sets performed
    pub sets: u32,
    /// Total repetitions: reps x sets
    pub total_reps: u32,
    /// Average working weight of the line (the line's own weight)
    pub avg_weight: f64,
    /// Epley one-rep-max estimate: `w * (1 + reps / 30)`
    pub one_rep_max_est: f64,
}

impl SetMetrics {
    /// Compute the metrics for one logged line.
    ///
    /// A missing weight counts as 0 before any arithmetic, so bodyweight
    /// lines contribute reps and sets but no volume.
    #[must_use]
    pub fn from_line(sets: u32, reps: u32, weight: Option<f64>) -> Self {
        let weight = weight.unwrap_or(0.0);
        let volume = weight * f64::from(reps) * f64::from(sets);
        let one_rep_max_est = weight * (1.0 + f64::from(reps) / EPLEY_REP_DIVISOR);

        Self {
            volume,
            sets,
            total_reps: reps * sets,
            avg_weight: weight,
            one_rep_max_est,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_for_typical_line() {
        let metrics = SetMetrics::from_line(3, 8, Some(100.0));

        assert!((metrics.volume - 2400.0).abs() < f64::EPSILON);
        assert_eq!(metrics.sets, 3);
        assert_eq!(metrics.total_reps, 24);
        assert!((metrics.avg_weight - 100.0).abs() < f64::EPSILON);
        // 100 * (1 + 8/30) = 126.666...
        assert!((metrics.one_rep_max_est - 126.666_666_666_666_67).abs() < 1e-9);
    }

    #[test]
    fn test_missing_weight_counts_as_zero() {
        let metrics = SetMetrics::from_line(4, 12, None);

        assert!(metrics.volume.abs() < f64::EPSILON);
        assert!(metrics.avg_weight.abs() < f64::EPSILON);
        assert!(metrics.one_rep_max_est.abs() < f64::EPSILON);
        assert_eq!(metrics.total_reps, 48);
    }

    #[test]
    fn test_degenerate_line_yields_zeroes() {
        let metrics = SetMetrics::from_line(0, 0, Some(80.0));

        assert!(metrics.volume.abs() < f64::EPSILON);
        assert_eq!(metrics.sets, 0);
        assert_eq!(metrics.total_reps, 0);
        // One-rep-max still reflects the bar weight: 80 * (1 + 0/30)
        assert!((metrics.one_rep_max_est - 80.0).abs() < f64::EPSILON);
    }
}
