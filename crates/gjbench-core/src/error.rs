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

//! Error types for benchmark analysis.
//!
//! Fatal conditions are represented by [`AnalysisError`]. Recoverable
//! conditions (result mismatches, groups without ratio data) are not errors;
//! they are collected as [`Warning`](crate::Warning) values alongside the
//! otherwise complete output.

use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while ingesting or comparing measurements.
///
/// # Examples
///
/// ```
/// use gjbench_core::AnalysisError;
///
/// let err = AnalysisError::malformed(3, "node_size", "abc", "expected an integer");
/// assert_eq!(
///     err.to_string(),
///     "Malformed input at row 3, column 'node_size': expected an integer (got 'abc')"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A field that must be numeric (or an enumerated value) could not be parsed.
    ///
    /// Aborts ingestion of the whole dataset.
    #[error("Malformed input at row {row}, column '{column}': {reason} (got '{value}')")]
    MalformedInput {
        /// Data row number (1-based, header excluded).
        row: usize,
        /// Column name.
        column: String,
        /// Offending field text.
        value: String,
        /// What was expected.
        reason: String,
    },

    /// A timeout marker was read while ingesting in strict mode.
    #[error(
        "Timeout marker encountered at row {row} (benchmark '{benchmark}', pattern '{pattern}') \
         while ingesting in strict mode"
    )]
    TimeoutSentinelEncountered {
        /// Data row number (1-based, header excluded).
        row: usize,
        /// Benchmark of the offending row.
        benchmark: String,
        /// Pattern of the offending row.
        pattern: String,
    },

    /// A pattern has measurements for one algorithm but not the other.
    ///
    /// Fatal for the affected group only.
    #[error(
        "Pattern '{pattern}' in benchmark '{benchmark}' at size {size} has no {missing} measurements"
    )]
    MissingCounterpart {
        /// Benchmark name.
        benchmark: String,
        /// Input size of the group.
        size: u64,
        /// Pattern text.
        pattern: String,
        /// The configuration without measurements, e.g. `GenericJoin variant 1`.
        missing: String,
    },

    /// Every entry of a group was excluded from the ratio population.
    #[error(
        "No ratio data for benchmark '{benchmark}' at size {size} (GenericJoin variant {variant}): \
         {excluded} entries excluded by timeout"
    )]
    EmptyRatioPopulation {
        /// Benchmark name.
        benchmark: String,
        /// Input size of the group.
        size: u64,
        /// GenericJoin variant compared against EMatch.
        variant: u8,
        /// Number of entries dropped because a side timed out.
        excluded: usize,
    },

    /// The same pattern was catalogued twice with different metadata.
    #[error("Conflicting metadata for pattern '{pattern}': {existing} vs {conflicting}")]
    ConflictingPatternMetadata {
        /// Pattern text.
        pattern: String,
        /// Metadata already in the catalog.
        existing: String,
        /// Metadata of the rejected row.
        conflicting: String,
    },

    /// Invalid configuration parameter.
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        parameter: String,
        /// Reason for invalidity.
        reason: String,
    },
}

impl AnalysisError {
    /// Creates a [`AnalysisError::MalformedInput`] error.
    pub fn malformed(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedInput {
            row,
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`AnalysisError::InvalidConfig`] error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error only invalidates a single group rather than
    /// the whole run.
    pub fn is_group_scoped(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingCounterpart { .. } | AnalysisError::EmptyRatioPopulation { .. }
        )
    }
}
