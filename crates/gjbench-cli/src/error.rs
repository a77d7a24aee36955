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

//! Structured error types for the gjbench CLI.
//!
//! Every command returns `Result<T, CliError>`; `main` prints the error and
//! exits with status 1.

use gjbench_core::AnalysisError;
use gjbench_csv::CsvError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// CLI error type.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O error on a named file or stream.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// File or stream the error relates to.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Reading or writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The input could not be analysed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Some groups were abandoned; the rest of the output was written.
    #[error("{count} group(s) could not be analysed")]
    GroupsFailed {
        /// Number of failed (group, variant) pairs.
        count: usize,
    },

    /// Invalid command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Creates an I/O error for `path`.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Converts a loading error, attaching `path` to I/O failures.
    pub fn from_load(path: impl Into<PathBuf>, source: CsvError) -> Self {
        match source {
            CsvError::Io(e) => Self::io_error(path, e),
            other => other.into(),
        }
    }
}

impl From<CsvError> for CliError {
    fn from(source: CsvError) -> Self {
        match source {
            CsvError::Analysis(e) => Self::Analysis(e),
            other => Self::Csv(other.to_string()),
        }
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "runs.csv",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("runs.csv"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_from_load_keeps_path() {
        let err = CliError::from_load(
            "runs.csv",
            CsvError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        );
        assert!(matches!(err, CliError::Io { ref path, .. } if path == &PathBuf::from("runs.csv")));
    }

    #[test]
    fn test_analysis_errors_unwrapped() {
        let inner = AnalysisError::malformed(1, "time", "x", "expected microseconds");
        let err: CliError = CsvError::Analysis(inner.clone()).into();
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_csv_error_conversion() {
        let err: CliError = CsvError::MissingColumn("algo".to_string()).into();
        assert_eq!(err.to_string(), "CSV error: Missing required column: algo");
    }

    #[test]
    fn test_groups_failed_display() {
        assert_eq!(
            CliError::GroupsFailed { count: 2 }.to_string(),
            "2 group(s) could not be analysed"
        );
    }
}
