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

//! Command implementations.
//!
//! Each command loads the measurement file, runs the analysis and renders the
//! result. Output goes to stdout unless `--output` names a file.

mod completion;
mod entries;
mod summary;

pub use completion::completion;
pub use entries::{entries, entry_rows, pattern_tables, PatternTables};
pub use summary::summary;

use crate::cli::AnalysisArgs;
use crate::error::{CliError, Result};
use gjbench_core::{analyze, AnalysisReport, GroupingIndex, Ingestor};
use gjbench_csv::load_measurements_from_path;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads, ingests, indexes and analyses the input file of `args`.
///
/// # Errors
///
/// Returns `Err` for an invalid configuration, an unreadable file, or the
/// first row that cannot be ingested.
pub fn run_analysis(args: &AnalysisArgs) -> Result<AnalysisReport> {
    let config = args.analysis_config();
    config.validate()?;
    let load_config = args.load_config()?;

    let measurements =
        load_measurements_from_path(&args.file, &load_config, &Ingestor::new(&config))
            .map_err(|e| CliError::from_load(&args.file, e))?;
    let index = GroupingIndex::from_measurements(measurements);
    info!(
        file = %args.file.display(),
        measurements = index.measurement_count(),
        "loaded measurements"
    );
    Ok(analyze(&index, &config))
}

/// Buffered output sink with a label for error messages.
pub(crate) struct Output {
    writer: Box<dyn Write>,
    label: PathBuf,
}

impl Output {
    pub(crate) fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let file = File::create(path).map_err(|e| CliError::io_error(path, e))?;
                Ok(Self {
                    writer: Box::new(BufWriter::new(file)),
                    label: path.to_path_buf(),
                })
            }
            None => Ok(Self {
                writer: Box::new(BufWriter::new(io::stdout())),
                label: PathBuf::from("<stdout>"),
            }),
        }
    }

    pub(crate) fn writer(&mut self) -> &mut dyn Write {
        &mut *self.writer
    }

    pub(crate) fn io_error(&self, source: io::Error) -> CliError {
        CliError::io_error(&self.label, source)
    }

    pub(crate) fn finish(mut self) -> Result<()> {
        let label = self.label.clone();
        self.writer
            .flush()
            .map_err(|e| CliError::io_error(label, e))
    }
}

/// Turns recorded group failures into the command's exit status.
pub(crate) fn check_failures(report: &AnalysisReport) -> Result<()> {
    if report.has_failures() {
        return Err(CliError::GroupsFailed {
            count: report.failures.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_errors_name_the_output_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entries.json");
        let out = Output::open(Some(&path)).unwrap();
        let err = out.io_error(io::Error::new(io::ErrorKind::Other, "disk full"));
        let msg = err.to_string();
        assert!(msg.contains("entries.json"));
        assert!(msg.contains("disk full"));
        assert!(!msg.contains("<output>"));
    }

    #[test]
    fn test_stdout_errors_are_labelled() {
        let out = Output::open(None).unwrap();
        let err = out.io_error(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(err.to_string().contains("<stdout>"));
    }
}
