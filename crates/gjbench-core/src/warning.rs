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

//! Recoverable conditions surfaced next to the analysis output.

use crate::model::{BenchmarkName, InputSize, PatternText, VariantIndex};
use serde::Serialize;
use std::fmt;

/// A condition worth reporting that does not stop the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// EMatch and GenericJoin returned different result sizes for the same
    /// pattern while neither timed out.
    ResultMismatch {
        /// Benchmark name.
        benchmark: BenchmarkName,
        /// Input size.
        size: InputSize,
        /// GenericJoin variant that was compared.
        variant: VariantIndex,
        /// Pattern text.
        pattern: PatternText,
        /// EMatch result size.
        em_result_size: u64,
        /// GenericJoin result size.
        gj_result_size: u64,
    },

    /// Completed repeats of one configuration disagree on the result size.
    InconsistentRepeats {
        /// Benchmark name.
        benchmark: BenchmarkName,
        /// Input size.
        size: InputSize,
        /// Pattern text.
        pattern: PatternText,
        /// Configuration label, e.g. `GenericJoin variant 0`.
        configuration: String,
        /// Distinct result sizes, ascending.
        result_sizes: Vec<u64>,
    },

    /// Every entry of the group was excluded by timeout.
    NoData {
        /// Benchmark name.
        benchmark: BenchmarkName,
        /// Input size.
        size: InputSize,
        /// GenericJoin variant that was compared.
        variant: VariantIndex,
        /// Number of timed-out entries.
        timeout_count: usize,
    },

    /// A completed trial ran longer than the timeout sentinel, so a timed-out
    /// trial with the sentinel duration would look faster than it.
    ///
    /// Raised once per run for the longest such trial.
    SentinelBelowCompletedTime {
        /// Benchmark name.
        benchmark: BenchmarkName,
        /// Input size.
        size: InputSize,
        /// Pattern text.
        pattern: PatternText,
        /// Duration of the completed trial.
        time_micros: u64,
        /// Configured timeout sentinel.
        timeout_sentinel_micros: u64,
    },

    /// A measured pattern has no row in the pattern table.
    UncataloguedPattern {
        /// Pattern text.
        pattern: PatternText,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ResultMismatch {
                benchmark,
                size,
                variant,
                pattern,
                em_result_size,
                gj_result_size,
            } => write!(
                f,
                "result mismatch in {} at size {} (variant {}): pattern '{}' EMatch={} GenericJoin={}",
                benchmark, size, variant, pattern, em_result_size, gj_result_size
            ),
            Warning::InconsistentRepeats {
                benchmark,
                size,
                pattern,
                configuration,
                result_sizes,
            } => write!(
                f,
                "repeats of {} disagree in {} at size {}: pattern '{}' result sizes {:?}",
                configuration, benchmark, size, pattern, result_sizes
            ),
            Warning::NoData {
                benchmark,
                size,
                variant,
                timeout_count,
            } => write!(
                f,
                "no data for {} at size {} (variant {}): all {} entries timed out",
                benchmark, size, variant, timeout_count
            ),
            Warning::SentinelBelowCompletedTime {
                benchmark,
                size,
                pattern,
                time_micros,
                timeout_sentinel_micros,
            } => write!(
                f,
                "completed trial of {} µs in {} at size {} (pattern '{}') exceeds the timeout \
                 sentinel of {} µs; raise the sentinel to keep timeouts slower than completed trials",
                time_micros, benchmark, size, pattern, timeout_sentinel_micros
            ),
            Warning::UncataloguedPattern { pattern } => {
                write!(f, "pattern '{}' is not in the pattern table", pattern)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display_and_json() {
        let warning = Warning::ResultMismatch {
            benchmark: BenchmarkName::new("math"),
            size: InputSize::new(100),
            variant: VariantIndex::ZERO,
            pattern: PatternText::new("(* ?a ?b)"),
            em_result_size: 5,
            gj_result_size: 7,
        };
        let text = warning.to_string();
        assert!(text.contains("EMatch=5"));
        assert!(text.contains("GenericJoin=7"));

        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "result_mismatch");
        assert_eq!(json["pattern"], "(* ?a ?b)");
    }

    #[test]
    fn test_sentinel_warning_names_both_durations() {
        let warning = Warning::SentinelBelowCompletedTime {
            benchmark: BenchmarkName::new("math"),
            size: InputSize::new(100),
            pattern: PatternText::new("(* ?a ?b)"),
            time_micros: 10_000_000,
            timeout_sentinel_micros: 4_000_000,
        };
        let text = warning.to_string();
        assert!(text.contains("10000000 µs"));
        assert!(text.contains("4000000 µs"));

        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "sentinel_below_completed_time");
    }
}
