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

//! CSV export of group summaries and per-pattern entries.

use crate::error::Result;
use gjbench_core::{
    BenchmarkName, ComparisonEntry, Faster, GroupKey, GroupSummary, InputSize, PatternMetadata,
    PatternText, VariantIndex,
};
use serde::Serialize;
use std::io::Write;

/// One flattened comparison entry, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRow {
    /// Benchmark name.
    pub benchmark: BenchmarkName,
    /// Input size.
    pub size: InputSize,
    /// GenericJoin variant.
    pub variant: VariantIndex,
    /// Pattern text.
    pub pattern: PatternText,
    /// Root arity, if known.
    pub arity: Option<usize>,
    /// Distinct variables, if known.
    pub variables: Option<usize>,
    /// Best EMatch time in microseconds.
    pub em_time: u64,
    /// Best GenericJoin time in microseconds.
    pub gj_time: u64,
    /// EMatch result size.
    pub em_result_size: u64,
    /// GenericJoin result size.
    pub gj_result_size: u64,
    /// `em_time / gj_time`.
    pub ratio: f64,
    /// Faster side.
    pub faster: Faster,
    /// EMatch timed out.
    pub em_timed_out: bool,
    /// GenericJoin timed out.
    pub gj_timed_out: bool,
    /// Result sizes disagree.
    pub mismatched: bool,
}

impl EntryRow {
    /// Flattens `entry` of group `key` compared against `variant`, optionally
    /// annotated with pattern metadata.
    pub fn new(
        key: &GroupKey,
        variant: VariantIndex,
        entry: &ComparisonEntry,
        metadata: Option<PatternMetadata>,
    ) -> Self {
        Self {
            benchmark: key.benchmark.clone(),
            size: key.size,
            variant,
            pattern: entry.pattern.clone(),
            arity: metadata.map(|m| m.arity),
            variables: metadata.map(|m| m.variables),
            em_time: entry.em_time,
            gj_time: entry.gj_time,
            em_result_size: entry.em_result_size,
            gj_result_size: entry.gj_result_size,
            ratio: entry.ratio,
            faster: entry.faster,
            em_timed_out: entry.em_timed_out,
            gj_timed_out: entry.gj_timed_out,
            mismatched: entry.mismatched,
        }
    }
}

/// Writes one CSV row per group summary, with a header row.
///
/// # Examples
///
/// ```
/// use gjbench_core::{analyze_rows, AnalysisConfig, RawRow, VariantIndex};
/// use gjbench_csv::write_summaries;
///
/// let rows = vec![
///     RawRow::new("math", "100", "p", "EMatch", "0", "50", "1"),
///     RawRow::new("math", "100", "p", "GenericJoin", "0", "25", "1"),
/// ];
/// let config = AnalysisConfig::default().with_variants(&[VariantIndex::ZERO]);
/// let report = analyze_rows(&rows, &config).unwrap();
///
/// let mut out = Vec::new();
/// write_summaries(&mut out, report.summaries()).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("benchmark,size,variant,"));
/// ```
pub fn write_summaries<'a, W, I>(writer: W, summaries: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a GroupSummary>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for summary in summaries {
        wtr.serialize(summary)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one CSV row per entry, with a header row.
pub fn write_entries<'a, W, I>(writer: W, entries: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a EntryRow>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in entries {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gjbench_core::{analyze_rows, AnalysisConfig, RawRow};

    fn report() -> gjbench_core::AnalysisReport {
        let rows = vec![
            RawRow::new("math", "100", "(+ ?a ?b)", "EMatch", "0", "50", "4"),
            RawRow::new("math", "100", "(+ ?a ?b)", "GenericJoin", "0", "25", "4"),
        ];
        let config = AnalysisConfig::default().with_variants(&[VariantIndex::ZERO]);
        analyze_rows(&rows, &config).unwrap()
    }

    #[test]
    fn test_write_summaries_columns() {
        let report = report();
        let mut out = Vec::new();
        write_summaries(&mut out, report.summaries()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "benchmark,size,variant,em_faster_count,gj_faster_count,timeout_count,\
             mismatch_count,sample_count,total_ratio,harmonic_mean,geometric_mean,mean,\
             min,median,max"
        );
        assert!(lines.next().unwrap().starts_with("math,100,0,0,1,0,0,1,2.0,"));
    }

    #[test]
    fn test_write_entries_with_and_without_metadata() {
        let report = report();
        let group = &report.groups[0];
        let key = group.key();
        let variant = group.summary.variant;
        let rows = vec![
            EntryRow::new(&key, variant, &group.entries[0], Some(PatternMetadata::new(2, 2))),
            EntryRow::new(&key, variant, &group.entries[0], None),
        ];
        let mut out = Vec::new();
        write_entries(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("benchmark,size,variant,pattern,arity,variables,em_time"));
        assert_eq!(lines[1], "math,100,0,(+ ?a ?b),2,2,50,25,4,4,2.0,GJ,false,false,false");
        assert_eq!(lines[2], "math,100,0,(+ ?a ?b),,,50,25,4,4,2.0,GJ,false,false,false");
    }
}
