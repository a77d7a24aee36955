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

//! Per-pattern comparison of EMatch against one GenericJoin variant.
//!
//! For every pattern of a group the comparator reduces both repeat lists to
//! their fastest trial, classifies which side won and computes
//! `ratio = em_time / gj_time`. A ratio above 1 means GenericJoin was faster.
//!
//! # Tie-break
//!
//! GenericJoin is classified faster only when its time is strictly smaller.
//! Equal times count as an EMatch win. This convention is part of the output
//! contract, not an accident of the implementation.
//!
//! A side that completed always beats a side that timed out, whatever the
//! sentinel duration of the timed-out side.

use crate::error::{AnalysisError, Result};
use crate::index::{GroupingIndex, PatternCell};
use crate::model::{Algorithm, Faster, GroupKey, Measurement, PatternText, VariantIndex};
use crate::reduce::RepeatList;
use crate::warning::Warning;
use serde::Serialize;
use tracing::{debug, warn};

/// Comparison of one pattern within a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    /// Pattern text.
    pub pattern: PatternText,
    /// Best EMatch time (sentinel if timed out).
    pub em_time: u64,
    /// Best GenericJoin time (sentinel if timed out).
    pub gj_time: u64,
    /// EMatch result size.
    pub em_result_size: u64,
    /// GenericJoin result size.
    pub gj_result_size: u64,
    /// `em_time / gj_time`.
    pub ratio: f64,
    /// Winner, ties favor EMatch.
    pub faster: Faster,
    /// EMatch representative timed out.
    pub em_timed_out: bool,
    /// GenericJoin representative timed out.
    pub gj_timed_out: bool,
    /// Either side timed out.
    pub timed_out: bool,
    /// Result sizes differ while neither side timed out.
    pub mismatched: bool,
}

impl ComparisonEntry {
    /// Builds an entry from the two representative trials.
    pub fn from_pair(pattern: PatternText, em: &Measurement, gj: &Measurement) -> Self {
        let faster = match (em.timed_out, gj.timed_out) {
            (false, true) => Faster::Em,
            (true, false) => Faster::Gj,
            _ if gj.time_micros < em.time_micros => Faster::Gj,
            _ => Faster::Em,
        };
        let timed_out = em.timed_out || gj.timed_out;
        Self {
            pattern,
            em_time: em.time_micros,
            gj_time: gj.time_micros,
            em_result_size: em.result_size,
            gj_result_size: gj.result_size,
            ratio: em.time_micros as f64 / gj.time_micros as f64,
            faster,
            em_timed_out: em.timed_out,
            gj_timed_out: gj.timed_out,
            timed_out,
            mismatched: !timed_out && em.result_size != gj.result_size,
        }
    }

    /// Both sides timed out.
    pub fn both_timed_out(&self) -> bool {
        self.em_timed_out && self.gj_timed_out
    }
}

/// All entries of one (group, variant) comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    /// Compared group.
    pub key: GroupKey,
    /// GenericJoin variant compared against EMatch.
    pub variant: VariantIndex,
    /// One entry per pattern, in first-seen pattern order.
    pub entries: Vec<ComparisonEntry>,
    /// Mismatches and inconsistent repeats found while comparing.
    pub warnings: Vec<Warning>,
}

impl GroupComparison {
    /// Number of mismatched entries.
    pub fn mismatch_count(&self) -> usize {
        self.entries.iter().filter(|e| e.mismatched).count()
    }
}

/// Pairs EMatch and GenericJoin representatives within the groups of an index.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'a> {
    index: &'a GroupingIndex,
}

impl<'a> Comparator<'a> {
    /// Creates a comparator over `index`.
    pub fn new(index: &'a GroupingIndex) -> Self {
        Self { index }
    }

    /// Compares every pattern of `key` against GenericJoin `variant`.
    ///
    /// A group that is absent or has no patterns yields no entries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingCounterpart`] if a pattern has no
    /// EMatch repeats or no repeats for the chosen GenericJoin variant. The
    /// whole group is abandoned in that case.
    pub fn compare(&self, key: &GroupKey, variant: VariantIndex) -> Result<GroupComparison> {
        let mut comparison = GroupComparison {
            key: key.clone(),
            variant,
            entries: Vec::new(),
            warnings: Vec::new(),
        };
        let Some(node) = self.index.group(key) else {
            debug!(group = %key, "group not present in index");
            return Ok(comparison);
        };

        for (pattern, cell) in node.patterns() {
            let entry = self.compare_pattern(key, variant, pattern, cell, &mut comparison.warnings)?;
            comparison.entries.push(entry);
        }

        debug!(
            group = %key,
            variant = variant.get(),
            entries = comparison.entries.len(),
            "compared group"
        );
        Ok(comparison)
    }

    fn compare_pattern(
        &self,
        key: &GroupKey,
        variant: VariantIndex,
        pattern: &PatternText,
        cell: &PatternCell,
        warnings: &mut Vec<Warning>,
    ) -> Result<ComparisonEntry> {
        let em_repeats = cell.repeats(Algorithm::EMatch, variant);
        let gj_repeats = cell.repeats(Algorithm::GenericJoin, variant);
        let em = representative(key, pattern, em_repeats, "EMatch".to_string())?;
        let gj = representative(
            key,
            pattern,
            gj_repeats,
            format!("GenericJoin variant {}", variant),
        )?;

        check_repeats(key, pattern, em_repeats, "EMatch", warnings);
        check_repeats(
            key,
            pattern,
            gj_repeats,
            &format!("GenericJoin variant {}", variant),
            warnings,
        );

        let entry = ComparisonEntry::from_pair(pattern.clone(), em, gj);
        if entry.mismatched {
            warn!(
                benchmark = %key.benchmark,
                size = key.size.get(),
                variant = variant.get(),
                pattern = %pattern,
                em_result_size = entry.em_result_size,
                gj_result_size = entry.gj_result_size,
                "EMatch and GenericJoin disagree on result size"
            );
            warnings.push(Warning::ResultMismatch {
                benchmark: key.benchmark.clone(),
                size: key.size,
                variant,
                pattern: pattern.clone(),
                em_result_size: entry.em_result_size,
                gj_result_size: entry.gj_result_size,
            });
        }
        Ok(entry)
    }
}

fn representative<'r>(
    key: &GroupKey,
    pattern: &PatternText,
    repeats: &'r RepeatList,
    configuration: String,
) -> Result<&'r Measurement> {
    repeats.best().ok_or_else(|| AnalysisError::MissingCounterpart {
        benchmark: key.benchmark.to_string(),
        size: key.size.get(),
        pattern: pattern.to_string(),
        missing: configuration,
    })
}

fn check_repeats(
    key: &GroupKey,
    pattern: &PatternText,
    repeats: &RepeatList,
    configuration: &str,
    warnings: &mut Vec<Warning>,
) {
    let sizes = repeats.completed_result_sizes();
    if sizes.len() > 1 {
        warn!(
            benchmark = %key.benchmark,
            size = key.size.get(),
            pattern = %pattern,
            configuration,
            "repeats disagree on result size"
        );
        warnings.push(Warning::InconsistentRepeats {
            benchmark: key.benchmark.clone(),
            size: key.size,
            pattern: pattern.clone(),
            configuration: configuration.to_string(),
            result_sizes: sizes.into_iter().collect(),
        });
    }
}
