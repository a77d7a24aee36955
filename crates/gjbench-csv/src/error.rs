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

//! Error types for CSV loading and export.

use gjbench_core::AnalysisError;
use std::path::PathBuf;
use thiserror::Error;

/// CSV loading and export errors.
///
/// # Examples
///
/// ```
/// use gjbench_csv::CsvError;
///
/// let err = CsvError::MissingColumn("result_size".to_string());
/// assert_eq!(err.to_string(), "Missing required column: result_size");
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// I/O error during reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// The header row lacks a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Row count exceeded the configured limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use gjbench_csv::CsvError;
    ///
    /// let err = CsvError::SecurityLimit {
    ///     limit: 1_000_000,
    ///     actual: 1_000_001,
    /// };
    /// assert!(err.to_string().contains("Security limit"));
    /// ```
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Row count at which loading stopped.
        actual: usize,
    },

    /// Input file is larger than the configured maximum.
    #[error(
        "File '{path}' is too large ({size} bytes, maximum {limit} bytes). \
         Set GJBENCH_MAX_FILE_SIZE to raise the limit."
    )]
    FileTooLarge {
        /// Offending file.
        path: PathBuf,
        /// File size in bytes.
        size: u64,
        /// Configured maximum in bytes.
        limit: u64,
    },

    /// A row was read but could not be interpreted.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_is_transparent() {
        let err: CsvError = AnalysisError::malformed(2, "time", "x", "expected a number").into();
        assert_eq!(
            err.to_string(),
            "Malformed input at row 2, column 'time': expected a number (got 'x')"
        );
    }

    #[test]
    fn test_file_too_large_message() {
        let err = CsvError::FileTooLarge {
            path: PathBuf::from("runs.csv"),
            size: 2048,
            limit: 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("runs.csv"));
        assert!(msg.contains("GJBENCH_MAX_FILE_SIZE"));
    }
}
