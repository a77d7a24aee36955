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

//! Entries command - per-pattern comparisons for charting

use super::{check_failures, run_analysis, Output};
use crate::cli::{AnalysisArgs, OutputArgs, OutputFormat};
use crate::error::{CliError, Result};
use crate::reporters::{json, print_diagnostics, table};
use gjbench_core::{
    AnalysisReport, BenchmarkName, PatternCatalog, PatternMetadata, PatternText, Warning,
};
use gjbench_csv::{load_catalog_for_benchmark, read_file, EntryRow, LoadConfig};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Pattern tables keyed by the benchmark they apply to.
pub type PatternTables = BTreeMap<BenchmarkName, PatternCatalog>;

/// Flattens every entry of `report`, annotated with pattern metadata.
///
/// Summarized groups come first, then the groups whose entries all timed
/// out. With pattern tables, each entry is looked up in the table of its
/// benchmark; uncatalogued patterns get inferred metadata and one
/// [`Warning::UncataloguedPattern`] each. Without tables all metadata is
/// inferred silently.
pub fn entry_rows(
    report: &AnalysisReport,
    tables: Option<&PatternTables>,
) -> (Vec<EntryRow>, Vec<Warning>) {
    let empty = PatternCatalog::new();
    let mut rows = Vec::new();
    let mut uncatalogued: BTreeSet<&PatternText> = BTreeSet::new();

    let groups = report
        .groups
        .iter()
        .map(|g| (g.key(), g.summary.variant, &g.entries))
        .chain(
            report
                .timed_out
                .iter()
                .map(|g| (g.key.clone(), g.variant, &g.entries)),
        );

    for (key, variant, entries) in groups {
        let catalog = tables.map(|tables| tables.get(&key.benchmark).unwrap_or(&empty));
        for entry in entries {
            let metadata = match catalog {
                Some(catalog) => {
                    let resolved = catalog.resolve(entry.pattern.as_str());
                    if resolved.inferred {
                        uncatalogued.insert(&entry.pattern);
                    }
                    resolved.metadata
                }
                None => PatternMetadata::infer(entry.pattern.as_str()),
            };
            rows.push(EntryRow::new(&key, variant, entry, Some(metadata)));
        }
    }

    let warnings = uncatalogued
        .into_iter()
        .map(|pattern| Warning::UncataloguedPattern {
            pattern: pattern.clone(),
        })
        .collect();
    (rows, warnings)
}

/// Parses the rows of a pattern table that apply to each benchmark of
/// `report`. Rows without a benchmark apply to all of them.
pub fn pattern_tables(
    content: &str,
    config: &LoadConfig,
    report: &AnalysisReport,
) -> gjbench_csv::Result<PatternTables> {
    let benchmarks = report
        .groups
        .iter()
        .map(|g| g.summary.benchmark.clone())
        .chain(report.timed_out.iter().map(|g| g.key.benchmark.clone()));

    let mut tables = PatternTables::new();
    for benchmark in benchmarks {
        if tables.contains_key(&benchmark) {
            continue;
        }
        let catalog = load_catalog_for_benchmark(content.as_bytes(), config, benchmark.as_str())?;
        debug!(%benchmark, patterns = catalog.len(), "loaded pattern table");
        tables.insert(benchmark, catalog);
    }
    Ok(tables)
}

/// Prints one row per compared pattern.
///
/// # Errors
///
/// Returns `Err` if the input or pattern table cannot be loaded, the output
/// cannot be written, or any group failed.
pub fn entries(args: &AnalysisArgs, patterns: Option<&Path>, output: &OutputArgs) -> Result<()> {
    let load_config = args.load_config()?;
    let table = patterns
        .map(|path| {
            read_file(path)
                .map(|content| (path, content))
                .map_err(|e| CliError::from_load(path, e))
        })
        .transpose()?;

    let report = run_analysis(args)?;
    let tables = match &table {
        Some((path, content)) => Some(
            pattern_tables(content, &load_config, &report)
                .map_err(|e| CliError::from_load(path, e))?,
        ),
        None => None,
    };

    let (rows, catalog_warnings) = entry_rows(&report, tables.as_ref());
    let mut warnings = report.warnings.clone();
    warnings.extend(catalog_warnings);

    let mut out = Output::open(output.output.as_deref())?;
    match output.format {
        OutputFormat::Table => table::write_entries(out.writer(), &rows, output.number_format())
            .map_err(|e| out.io_error(e))?,
        OutputFormat::Json => {
            json::write_entries(out.writer(), &rows, &warnings, &report.failures)
                .map_err(|e| out.io_error(e))?
        }
        OutputFormat::Csv => gjbench_csv::write_entries(out.writer(), &rows)?,
    }
    out.finish()?;

    if output.format != OutputFormat::Json {
        print_diagnostics(&warnings, &report.failures);
    }
    check_failures(&report)
}
