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

//! Reading measurement files and pattern tables.

use crate::error::{CsvError, Result};
use gjbench_core::{Ingestor, Measurement, PatternCatalog, PatternMetadata, PatternText, RawRow};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Default maximum number of data rows per file.
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Default maximum file size in bytes (1 GiB).
///
/// Can be overridden via the `GJBENCH_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Columns every measurement file must provide. Other columns are ignored.
pub const MEASUREMENT_COLUMNS: [&str; 7] = [
    "benchmark",
    "node_size",
    "pattern",
    "algo",
    "repeat_time",
    "time",
    "result_size",
];

/// Columns every pattern table must provide.
pub const CATALOG_COLUMNS: [&str; 3] = ["pattern", "arity", "variables"];

/// Options for reading CSV input.
///
/// # Examples
///
/// ```
/// use gjbench_csv::LoadConfig;
///
/// let config = LoadConfig {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// assert_eq!(config.max_rows, 1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Trim whitespace around headers and fields (default: `true`).
    pub trim: bool,
    /// Maximum number of data rows (default: 1,000,000).
    pub max_rows: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl LoadConfig {
    fn reader<R: Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader)
    }
}

fn require_columns<R: Read>(reader: &mut csv::Reader<R>, columns: &[&str]) -> Result<()> {
    let headers = reader.headers()?;
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(CsvError::MissingColumn((*column).to_string()));
        }
    }
    Ok(())
}

fn check_limit(index: usize, config: &LoadConfig) -> Result<()> {
    if index >= config.max_rows {
        return Err(CsvError::SecurityLimit {
            limit: config.max_rows,
            actual: index + 1,
        });
    }
    Ok(())
}

/// Reads raw measurement rows.
///
/// # Errors
///
/// - [`CsvError::MissingColumn`] if a column of [`MEASUREMENT_COLUMNS`] is absent
/// - [`CsvError::SecurityLimit`] if the file has more than `max_rows` data rows
/// - [`CsvError::CsvLib`] for malformed CSV
///
/// # Examples
///
/// ```
/// use gjbench_csv::{load_rows, LoadConfig};
///
/// let data = "benchmark,node_size,class_size,pattern,algo,repeat_time,time,result_size\n\
///             math,100,40,(* ?a 1),EMatch,0,52,7\n";
/// let rows = load_rows(data.as_bytes(), &LoadConfig::default()).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].pattern, "(* ?a 1)");
/// ```
pub fn load_rows<R: Read>(reader: R, config: &LoadConfig) -> Result<Vec<RawRow>> {
    let mut csv_reader = config.reader(reader);
    require_columns(&mut csv_reader, &MEASUREMENT_COLUMNS)?;

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.deserialize::<RawRow>().enumerate() {
        check_limit(idx, config)?;
        rows.push(result?);
    }
    debug!(rows = rows.len(), "loaded measurement rows");
    Ok(rows)
}

/// Reads raw measurement rows from a file, see [`load_rows`].
///
/// # Errors
///
/// Additionally returns [`CsvError::FileTooLarge`] if the file exceeds the
/// size limit, and [`CsvError::Io`] if it cannot be read.
pub fn load_rows_from_path(path: impl AsRef<Path>, config: &LoadConfig) -> Result<Vec<RawRow>> {
    let content = read_file(path.as_ref())?;
    load_rows(content.as_bytes(), config)
}

/// Reads measurement rows and ingests them as they are read.
///
/// Data rows are numbered from 1 in error messages. The first row that
/// cannot be ingested aborts loading.
pub fn load_measurements<R: Read>(
    reader: R,
    config: &LoadConfig,
    ingestor: &Ingestor,
) -> Result<Vec<Measurement>> {
    let mut csv_reader = config.reader(reader);
    require_columns(&mut csv_reader, &MEASUREMENT_COLUMNS)?;

    let mut measurements = Vec::new();
    for (idx, result) in csv_reader.deserialize::<RawRow>().enumerate() {
        check_limit(idx, config)?;
        let raw = result?;
        measurements.push(ingestor.ingest(idx + 1, &raw)?);
    }
    debug!(count = measurements.len(), "loaded measurements");
    Ok(measurements)
}

/// Reads and ingests a measurement file, see [`load_measurements`].
pub fn load_measurements_from_path(
    path: impl AsRef<Path>,
    config: &LoadConfig,
    ingestor: &Ingestor,
) -> Result<Vec<Measurement>> {
    let content = read_file(path.as_ref())?;
    load_measurements(content.as_bytes(), config, ingestor)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    pattern: String,
    arity: usize,
    variables: usize,
    #[serde(default)]
    benchmark: Option<String>,
}

/// Reads a pattern table.
///
/// Lines starting with `#` are comments. Duplicate patterns must agree on
/// their metadata.
///
/// # Errors
///
/// - [`CsvError::MissingColumn`] if a column of [`CATALOG_COLUMNS`] is absent
/// - [`CsvError::Analysis`] wrapping
///   [`AnalysisError::ConflictingPatternMetadata`](gjbench_core::AnalysisError)
///   for disagreeing duplicates
///
/// # Examples
///
/// ```
/// use gjbench_csv::{load_catalog, LoadConfig};
///
/// let data = "# generated by the harness\npattern,arity,variables\n(+ ?a ?b),2,2\n";
/// let catalog = load_catalog(data.as_bytes(), &LoadConfig::default()).unwrap();
/// assert_eq!(catalog.get("(+ ?a ?b)").map(|m| m.arity), Some(2));
/// ```
pub fn load_catalog<R: Read>(reader: R, config: &LoadConfig) -> Result<PatternCatalog> {
    read_catalog(reader, config, None)
}

/// Reads the part of a pattern table that applies to one benchmark.
///
/// Rows without a `benchmark` value apply to every benchmark.
pub fn load_catalog_for_benchmark<R: Read>(
    reader: R,
    config: &LoadConfig,
    benchmark: &str,
) -> Result<PatternCatalog> {
    read_catalog(reader, config, Some(benchmark))
}

/// Reads a pattern table from a file, see [`load_catalog`].
pub fn load_catalog_from_path(path: impl AsRef<Path>, config: &LoadConfig) -> Result<PatternCatalog> {
    let content = read_file(path.as_ref())?;
    load_catalog(content.as_bytes(), config)
}

fn read_catalog<R: Read>(
    reader: R,
    config: &LoadConfig,
    benchmark: Option<&str>,
) -> Result<PatternCatalog> {
    let mut csv_reader = config.reader(reader);
    require_columns(&mut csv_reader, &CATALOG_COLUMNS)?;

    let mut catalog = PatternCatalog::new();
    let mut skipped = 0usize;
    for (idx, result) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        check_limit(idx, config)?;
        let row = result?;
        let applies = match (benchmark, row.benchmark.as_deref()) {
            (Some(wanted), Some(actual)) if !actual.is_empty() => wanted == actual,
            _ => true,
        };
        if !applies {
            skipped += 1;
            continue;
        }
        catalog.insert(
            PatternText::new(row.pattern),
            PatternMetadata::new(row.arity, row.variables),
        )?;
    }
    debug!(patterns = catalog.len(), skipped, "loaded pattern table");
    Ok(catalog)
}

fn max_file_size() -> u64 {
    std::env::var("GJBENCH_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Reads a file into a string after checking its size.
///
/// The limit is [`DEFAULT_MAX_FILE_SIZE`] unless `GJBENCH_MAX_FILE_SIZE`
/// holds a valid byte count.
///
/// # Errors
///
/// [`CsvError::FileTooLarge`] above the limit, [`CsvError::Io`] when the file
/// cannot be read or is not valid UTF-8.
pub fn read_file(path: &Path) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    let limit = max_file_size();
    if size > limit {
        return Err(CsvError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gjbench_core::{AnalysisConfig, AnalysisError, IngestMode};

    const HEADER: &str = "benchmark,node_size,class_size,pattern,algo,repeat_time,time,result_size";

    fn data(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_load_rows_ignores_extra_columns() {
        let input = data(&["math,100,40,(+ ?a ?b),GenericJoin,1,35,9"]);
        let rows = load_rows(input.as_bytes(), &LoadConfig::default()).unwrap();
        assert_eq!(
            rows,
            vec![RawRow::new("math", "100", "(+ ?a ?b)", "GenericJoin", "1", "35", "9")]
        );
    }

    #[test]
    fn test_missing_column() {
        let input = "benchmark,node_size,pattern,algo,repeat_time,time\nmath,1,p,EMatch,0,1\n";
        let err = load_rows(input.as_bytes(), &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(ref c) if c == "result_size"));
    }

    #[test]
    fn test_row_limit() {
        let input = data(&[
            "math,1,1,p,EMatch,0,1,1",
            "math,1,1,p,EMatch,1,1,1",
            "math,1,1,p,EMatch,2,1,1",
        ]);
        let config = LoadConfig {
            max_rows: 2,
            ..Default::default()
        };
        let err = load_rows(input.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, CsvError::SecurityLimit { limit: 2, actual: 3 }));
    }

    #[test]
    fn test_tab_delimiter_and_trim() {
        let input = "benchmark\tnode_size\tpattern\talgo\trepeat_time\ttime\tresult_size\n\
                     math \t 10\tp\tEMatch\t0\t 5 \t1\n";
        let config = LoadConfig {
            delimiter: b'\t',
            ..Default::default()
        };
        let rows = load_rows(input.as_bytes(), &config).unwrap();
        assert_eq!(rows[0].benchmark, "math");
        assert_eq!(rows[0].time, "5");
    }

    #[test]
    fn test_load_measurements_reports_row() {
        let input = data(&["math,1,1,p,EMatch,0,5,1", "math,1,1,p,EMatch,1,fast,1"]);
        let ingestor = Ingestor::new(&AnalysisConfig::default());
        let err = load_measurements(input.as_bytes(), &LoadConfig::default(), &ingestor).unwrap_err();
        assert!(matches!(
            err,
            CsvError::Analysis(AnalysisError::MalformedInput { row: 2, .. })
        ));
    }

    #[test]
    fn test_load_measurements_strict_timeout() {
        let input = data(&["math,1,1,p,EMatch,0,TO,0"]);
        let config = AnalysisConfig::default().with_ingest_mode(IngestMode::Strict);
        let err = load_measurements(input.as_bytes(), &LoadConfig::default(), &Ingestor::new(&config))
            .unwrap_err();
        assert!(matches!(
            err,
            CsvError::Analysis(AnalysisError::TimeoutSentinelEncountered { row: 1, .. })
        ));
    }

    #[test]
    fn test_catalog_comments_and_duplicates() {
        let input = "# pattern table\n\
                     pattern,arity,variables\n\
                     (+ ?a ?b),2,2\n\
                     # repeated entries must agree\n\
                     (+ ?a ?b),2,2\n\
                     (neg ?a),1,1\n";
        let catalog = load_catalog(input.as_bytes(), &LoadConfig::default()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_catalog_conflict() {
        let input = "pattern,arity,variables\n(+ ?a ?b),2,2\n(+ ?a ?b),2,1\n";
        let err = load_catalog(input.as_bytes(), &LoadConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CsvError::Analysis(AnalysisError::ConflictingPatternMetadata { .. })
        ));
    }

    #[test]
    fn test_catalog_benchmark_filter() {
        let input = "pattern,arity,variables,benchmark\n\
                     (f ?a),1,1,math\n\
                     (f ?a),3,1,lambda\n\
                     (g ?a ?b),2,2,\n";
        let math = load_catalog_for_benchmark(input.as_bytes(), &LoadConfig::default(), "math").unwrap();
        assert_eq!(math.get("(f ?a)").map(|m| m.arity), Some(1));
        assert_eq!(math.len(), 2);

        let err = load_catalog(input.as_bytes(), &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, CsvError::Analysis(_)));
    }
}
