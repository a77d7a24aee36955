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

//! Conversion of raw tabular rows into [`Measurement`]s.
//!
//! The ingestor performs no I/O. Loading rows from a file is the job of the
//! `gjbench-csv` crate; this module only interprets their text.
//!
//! # Time field
//!
//! | Text            | Result                                           |
//! |-----------------|--------------------------------------------------|
//! | `1234`          | 1234 µs                                          |
//! | `0`             | 1 µs (clamped so ratios and logs stay defined)   |
//! | timeout marker  | timed out, sentinel duration (strict mode: error)|
//! | `-60000000`     | timed out, max(60 s, sentinel)                   |
//! | anything else   | [`AnalysisError::MalformedInput`]                |

use crate::config::{AnalysisConfig, IngestMode};
use crate::error::{AnalysisError, Result};
use crate::model::{Algorithm, BenchmarkName, InputSize, Measurement, PatternText, VariantIndex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One unparsed measurement row.
///
/// Field names match the column names written by the benchmark harness.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRow {
    /// Benchmark suite name.
    pub benchmark: String,
    /// Input size (e-graph node count).
    pub node_size: String,
    /// Pattern text.
    pub pattern: String,
    /// `EMatch` or `GenericJoin`.
    pub algo: String,
    /// GenericJoin variant index, or the repeat index for EMatch.
    pub repeat_time: String,
    /// Microseconds, or a timeout marker.
    pub time: String,
    /// Number of matches.
    pub result_size: String,
}

impl RawRow {
    /// Convenience constructor, mostly for tests and fixtures.
    pub fn new(
        benchmark: &str,
        node_size: &str,
        pattern: &str,
        algo: &str,
        repeat_time: &str,
        time: &str,
        result_size: &str,
    ) -> Self {
        Self {
            benchmark: benchmark.to_string(),
            node_size: node_size.to_string(),
            pattern: pattern.to_string(),
            algo: algo.to_string(),
            repeat_time: repeat_time.to_string(),
            time: time.to_string(),
            result_size: result_size.to_string(),
        }
    }
}

enum TimeField {
    Micros(u64),
    /// Carries the budget when the row records one.
    TimedOut(Option<u64>),
}

/// Converts [`RawRow`]s into [`Measurement`]s under one configuration.
#[derive(Debug, Clone)]
pub struct Ingestor {
    timeout_sentinel_micros: u64,
    timeout_marker: String,
    mode: IngestMode,
}

impl Ingestor {
    /// Creates an ingestor from the timeout-related parts of `config`.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            timeout_sentinel_micros: config.timeout_sentinel_micros,
            timeout_marker: config.timeout_marker.trim().to_string(),
            mode: config.ingest_mode,
        }
    }

    /// Returns the ingestion mode.
    pub fn mode(&self) -> IngestMode {
        self.mode
    }

    /// Converts one row. `row` is the 1-based data row number used in errors.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::MalformedInput`] for a non-numeric size, repeat,
    ///   time or result size, an unknown algorithm, or a GenericJoin variant
    ///   other than 0 or 1
    /// - [`AnalysisError::TimeoutSentinelEncountered`] for a timeout in
    ///   strict mode
    pub fn ingest(&self, row: usize, raw: &RawRow) -> Result<Measurement> {
        let benchmark = raw.benchmark.trim();
        let pattern = raw.pattern.trim();

        let input_size = parse_integer(row, "node_size", &raw.node_size)?;
        let algo = raw.algo.trim();
        let algorithm = Algorithm::parse(algo).ok_or_else(|| {
            AnalysisError::malformed(row, "algo", algo, "expected 'EMatch' or 'GenericJoin'")
        })?;
        let repeat_id = parse_integer(row, "repeat_time", &raw.repeat_time)?;
        let variant_index = match algorithm {
            Algorithm::EMatch => VariantIndex::ZERO,
            Algorithm::GenericJoin => VariantIndex::new(repeat_id).ok_or_else(|| {
                AnalysisError::malformed(
                    row,
                    "repeat_time",
                    raw.repeat_time.trim(),
                    "GenericJoin variant must be 0 or 1",
                )
            })?,
        };

        let (time_micros, timed_out) = match self.parse_time(row, &raw.time)? {
            TimeField::Micros(micros) => (micros.max(1), false),
            TimeField::TimedOut(budget) => {
                if self.mode == IngestMode::Strict {
                    return Err(AnalysisError::TimeoutSentinelEncountered {
                        row,
                        benchmark: benchmark.to_string(),
                        pattern: pattern.to_string(),
                    });
                }
                let sentinel = budget.map_or(self.timeout_sentinel_micros, |budget| {
                    budget.max(self.timeout_sentinel_micros)
                });
                (sentinel, true)
            }
        };

        let result_size = parse_integer(row, "result_size", &raw.result_size)?;

        Ok(Measurement {
            benchmark: BenchmarkName::new(benchmark),
            input_size: InputSize::new(input_size),
            pattern: PatternText::new(pattern),
            algorithm,
            variant_index,
            repeat_id,
            time_micros,
            result_size,
            timed_out,
        })
    }

    /// Converts every row, stopping at the first error.
    ///
    /// Rows are numbered from 1 in iteration order.
    pub fn ingest_all<'a, I>(&self, rows: I) -> Result<Vec<Measurement>>
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let measurements = rows
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| self.ingest(idx + 1, raw))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = measurements.len(), "ingested measurements");
        Ok(measurements)
    }

    fn parse_time(&self, row: usize, text: &str) -> Result<TimeField> {
        let text = text.trim();
        if text == self.timeout_marker {
            return Ok(TimeField::TimedOut(None));
        }
        if let Some(magnitude) = text.strip_prefix('-') {
            // The harness writes timeouts as the negated time budget.
            if let Ok(budget) = magnitude.parse::<u64>() {
                return Ok(TimeField::TimedOut(Some(budget)));
            }
        }
        text.parse::<u64>().map(TimeField::Micros).map_err(|_| {
            AnalysisError::malformed(
                row,
                "time",
                text,
                format!(
                    "expected microseconds or the timeout marker '{}'",
                    self.timeout_marker
                ),
            )
        })
    }
}

fn parse_integer(row: usize, column: &str, text: &str) -> Result<u64> {
    let text = text.trim();
    text.parse::<u64>()
        .map_err(|_| AnalysisError::malformed(row, column, text, "expected a non-negative integer"))
}
