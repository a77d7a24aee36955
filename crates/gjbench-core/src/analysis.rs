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

//! End-to-end analysis over a grouping index.
//!
//! For each selected group and each configured GenericJoin variant, the
//! comparison and aggregation stages run in turn. A group-scoped error
//! ([`AnalysisError::is_group_scoped`]) is recorded as a [`GroupFailure`] and
//! the remaining groups continue.

use crate::aggregate::{Aggregator, GroupSummary};
use crate::compare::{ComparisonEntry, Comparator};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::index::GroupingIndex;
use crate::ingest::{Ingestor, RawRow};
use crate::model::{BenchmarkName, GroupKey, InputSize, VariantIndex};
use crate::warning::Warning;
use serde::Serialize;
use tracing::{info, warn};

/// Summary and entries of one analysed (group, variant).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    /// Aggregated statistics.
    pub summary: GroupSummary,
    /// Per-pattern entries, in first-seen pattern order.
    pub entries: Vec<ComparisonEntry>,
}

impl GroupReport {
    /// Identifies the analysed group.
    pub fn key(&self) -> GroupKey {
        GroupKey {
            benchmark: self.summary.benchmark.clone(),
            size: self.summary.size,
        }
    }
}

/// A (group, variant) without a summary because every entry timed out.
///
/// The entries are kept for per-pattern output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedOutGroup {
    /// Compared group.
    pub key: GroupKey,
    /// GenericJoin variant.
    pub variant: VariantIndex,
    /// Per-pattern entries, in first-seen pattern order.
    pub entries: Vec<ComparisonEntry>,
}

/// A (group, variant) that could not be analysed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupFailure {
    /// Benchmark name.
    pub benchmark: BenchmarkName,
    /// Input size.
    pub size: InputSize,
    /// GenericJoin variant.
    pub variant: VariantIndex,
    /// Error message.
    pub message: String,
    /// Underlying error.
    #[serde(skip)]
    pub error: AnalysisError,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Successful groups, benchmark first-seen order, sizes ascending, then
    /// variant.
    pub groups: Vec<GroupReport>,
    /// Groups whose entries all timed out, each also reported as a
    /// [`Warning::NoData`].
    pub timed_out: Vec<TimedOutGroup>,
    /// Every warning raised during the run.
    pub warnings: Vec<Warning>,
    /// Groups abandoned because of a group-scoped error.
    pub failures: Vec<GroupFailure>,
}

impl AnalysisReport {
    /// Returns `true` if any group failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Iterates the summaries of the successful groups.
    pub fn summaries(&self) -> impl Iterator<Item = &GroupSummary> {
        self.groups.iter().map(|g| &g.summary)
    }
}

/// Runs the comparison and aggregation stages over every selected group.
///
/// Groups with no patterns are skipped. Groups where every entry timed out
/// produce a [`Warning::NoData`] instead of a summary. A completed trial that
/// outlasts the timeout sentinel raises one
/// [`Warning::SentinelBelowCompletedTime`] for the run.
pub fn analyze(index: &GroupingIndex, config: &AnalysisConfig) -> AnalysisReport {
    let comparator = Comparator::new(index);
    let aggregator = Aggregator::new(config.both_timed_out);
    let mut report = AnalysisReport::default();
    if let Some(warning) = sentinel_check(index, config.timeout_sentinel_micros) {
        warn!(%warning, "timeout sentinel too small");
        report.warnings.push(warning);
    }

    for key in index.select(config.size_selection) {
        for &variant in &config.variants {
            let comparison = match comparator.compare(&key, variant) {
                Ok(comparison) => comparison,
                Err(error) => {
                    warn!(group = %key, variant = variant.get(), %error, "skipping group");
                    report.failures.push(GroupFailure {
                        benchmark: key.benchmark.clone(),
                        size: key.size,
                        variant,
                        message: error.to_string(),
                        error,
                    });
                    continue;
                }
            };
            report.warnings.extend(comparison.warnings.iter().cloned());
            if comparison.entries.is_empty() {
                continue;
            }

            match aggregator.summarize(&comparison) {
                Ok(summary) => report.groups.push(GroupReport {
                    summary,
                    entries: comparison.entries,
                }),
                Err(AnalysisError::EmptyRatioPopulation { excluded, .. }) => {
                    warn!(group = %key, variant = variant.get(), "no data, every entry timed out");
                    report.warnings.push(Warning::NoData {
                        benchmark: key.benchmark.clone(),
                        size: key.size,
                        variant,
                        timeout_count: excluded,
                    });
                    report.timed_out.push(TimedOutGroup {
                        key: key.clone(),
                        variant,
                        entries: comparison.entries,
                    });
                }
                Err(error) => {
                    warn!(group = %key, variant = variant.get(), %error, "skipping group");
                    report.failures.push(GroupFailure {
                        benchmark: key.benchmark.clone(),
                        size: key.size,
                        variant,
                        message: error.to_string(),
                        error,
                    });
                }
            }
        }
    }

    info!(
        groups = report.groups.len(),
        warnings = report.warnings.len(),
        failures = report.failures.len(),
        "analysis complete"
    );
    report
}

/// Finds the longest completed trial that outlasts the timeout sentinel.
fn sentinel_check(index: &GroupingIndex, timeout_sentinel_micros: u64) -> Option<Warning> {
    let longest = index
        .measurements()
        .filter(|m| !m.timed_out && m.time_micros > timeout_sentinel_micros)
        .reduce(|longest, m| if m.time_micros > longest.time_micros { m } else { longest })?;
    Some(Warning::SentinelBelowCompletedTime {
        benchmark: longest.benchmark.clone(),
        size: longest.input_size,
        pattern: longest.pattern.clone(),
        time_micros: longest.time_micros,
        timeout_sentinel_micros,
    })
}

/// Validates `config`, ingests `rows`, builds the index and analyses it.
///
/// # Errors
///
/// Returns an error for an invalid configuration or the first row that
/// cannot be ingested. Group-scoped problems end up in the report instead.
///
/// # Examples
///
/// ```
/// use gjbench_core::{analyze_rows, AnalysisConfig, RawRow, VariantIndex};
///
/// let rows = vec![
///     RawRow::new("math", "100", "?x+?y", "EMatch", "0", "50", "10"),
///     RawRow::new("math", "100", "?x+?y", "GenericJoin", "0", "30", "10"),
///     RawRow::new("math", "100", "?x*?y", "EMatch", "0", "200", "3"),
///     RawRow::new("math", "100", "?x*?y", "GenericJoin", "0", "500", "3"),
/// ];
/// let config = AnalysisConfig::default().with_variants(&[VariantIndex::ZERO]);
/// let report = analyze_rows(&rows, &config).unwrap();
///
/// let summary = &report.groups[0].summary;
/// assert_eq!(summary.gj_faster_count, 1);
/// assert!((summary.total_ratio - 250.0 / 530.0).abs() < 1e-9);
/// ```
pub fn analyze_rows<'a, I>(rows: I, config: &AnalysisConfig) -> Result<AnalysisReport>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    config.validate()?;
    let measurements = Ingestor::new(config).ingest_all(rows)?;
    let index = GroupingIndex::from_measurements(measurements);
    Ok(analyze(&index, config))
}
