// gjbench - EMatch vs GenericJoin benchmark analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ratio statistics over the entries of one group comparison.

use crate::compare::GroupComparison;
use crate::config::BothTimedOutPolicy;
use crate::error::{AnalysisError, Result};
use crate::model::{BenchmarkName, Faster, InputSize, VariantIndex};
use serde::Serialize;

/// Summary statistics of a ratio population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioStatistics {
    /// Population size.
    pub count: usize,
    /// Harmonic mean.
    pub harmonic_mean: f64,
    /// Geometric mean.
    pub geometric_mean: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest ratio.
    pub min: f64,
    /// Median; mean of the two middle values for even counts.
    pub median: f64,
    /// Largest ratio.
    pub max: f64,
}

/// Computes all statistics of a ratio population.
///
/// # Arguments
///
/// * `ratios` - Strictly positive ratios, in any order
///
/// # Returns
///
/// `None` for an empty population.
pub fn ratio_statistics(ratios: &[f64]) -> Option<RatioStatistics> {
    let mut sorted = ratios.to_vec();
    sorted.sort_by(f64::total_cmp);
    let min = *sorted.first()?;
    let max = *sorted.last()?;
    Some(RatioStatistics {
        count: sorted.len(),
        harmonic_mean: harmonic_mean(&sorted)?,
        geometric_mean: geometric_mean(&sorted)?,
        mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        min,
        median: median_sorted(&sorted)?,
        max,
    })
}

/// `n / Σ(1/x)`, or `None` for an empty slice.
pub fn harmonic_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let reciprocal_sum: f64 = values.iter().map(|v| 1.0 / v).sum();
    Some(values.len() as f64 / reciprocal_sum)
}

/// `exp(mean(ln x))`, or `None` for an empty slice.
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    Some((log_sum / values.len() as f64).exp())
}

/// Median of an unsorted slice, or `None` if it is empty.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    median_sorted(&sorted)
}

fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Summary of one (benchmark, size, variant) comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Benchmark name.
    pub benchmark: BenchmarkName,
    /// Input size.
    pub size: InputSize,
    /// GenericJoin variant compared against EMatch.
    pub variant: VariantIndex,
    /// Entries won by EMatch, ties included.
    pub em_faster_count: usize,
    /// Entries won by GenericJoin.
    pub gj_faster_count: usize,
    /// Entries with at least one timed-out side.
    pub timeout_count: usize,
    /// Entries whose result sizes disagree.
    pub mismatch_count: usize,
    /// Ratio population size.
    pub sample_count: usize,
    /// `Σ em_time / Σ gj_time` over the ratio population.
    pub total_ratio: f64,
    /// Harmonic mean of the ratios.
    pub harmonic_mean: f64,
    /// Geometric mean of the ratios.
    pub geometric_mean: f64,
    /// Arithmetic mean of the ratios.
    pub mean: f64,
    /// Smallest ratio.
    pub min: f64,
    /// Median ratio.
    pub median: f64,
    /// Largest ratio.
    pub max: f64,
}

/// Turns group comparisons into [`GroupSummary`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    policy: BothTimedOutPolicy,
}

impl Aggregator {
    /// Creates an aggregator with the given both-timed-out policy.
    pub fn new(policy: BothTimedOutPolicy) -> Self {
        Self { policy }
    }

    /// Summarizes one group comparison.
    ///
    /// Entries where either side timed out are left out of the ratio
    /// population and counted in `timeout_count`. They still count towards
    /// the win counts unless both sides timed out and the policy is
    /// [`BothTimedOutPolicy::Exclude`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyRatioPopulation`] when no entry is left
    /// to compute statistics over.
    pub fn summarize(&self, comparison: &GroupComparison) -> Result<GroupSummary> {
        let mut em_faster_count = 0;
        let mut gj_faster_count = 0;
        let mut timeout_count = 0;
        let mut ratios = Vec::with_capacity(comparison.entries.len());
        let mut em_total: u128 = 0;
        let mut gj_total: u128 = 0;

        for entry in &comparison.entries {
            if entry.timed_out {
                timeout_count += 1;
            } else {
                ratios.push(entry.ratio);
                em_total += u128::from(entry.em_time);
                gj_total += u128::from(entry.gj_time);
            }

            if entry.both_timed_out() && self.policy == BothTimedOutPolicy::Exclude {
                continue;
            }
            match entry.faster {
                Faster::Em => em_faster_count += 1,
                Faster::Gj => gj_faster_count += 1,
            }
        }

        let stats =
            ratio_statistics(&ratios).ok_or_else(|| AnalysisError::EmptyRatioPopulation {
                benchmark: comparison.key.benchmark.to_string(),
                size: comparison.key.size.get(),
                variant: comparison.variant.get(),
                excluded: timeout_count,
            })?;

        Ok(GroupSummary {
            benchmark: comparison.key.benchmark.clone(),
            size: comparison.key.size,
            variant: comparison.variant,
            em_faster_count,
            gj_faster_count,
            timeout_count,
            mismatch_count: comparison.mismatch_count(),
            sample_count: stats.count,
            total_ratio: em_total as f64 / gj_total as f64,
            harmonic_mean: stats.harmonic_mean,
            geometric_mean: stats.geometric_mean,
            mean: stats.mean,
            min: stats.min,
            median: stats.median,
            max: stats.max,
        })
    }
}
