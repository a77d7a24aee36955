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

//! Argument groups shared by the analysis commands.

use crate::error::{CliError, Result};
use crate::format::NumberFormat;
use clap::{Args, ValueEnum};
use gjbench_core::{
    AnalysisConfig, BothTimedOutPolicy, IngestMode, SizeSelection, VariantIndex,
    DEFAULT_TIMEOUT_MARKER, DEFAULT_TIMEOUT_SENTINEL_MICROS,
};
use gjbench_csv::LoadConfig;
use std::path::PathBuf;

/// Classification of entries where both sides timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BothTimedOutArg {
    /// Leave them out of the win counts
    Exclude,
    /// Count them as a tie, i.e. an EMatch win
    Tie,
}

impl From<BothTimedOutArg> for BothTimedOutPolicy {
    fn from(arg: BothTimedOutArg) -> Self {
        match arg {
            BothTimedOutArg::Exclude => BothTimedOutPolicy::Exclude,
            BothTimedOutArg::Tie => BothTimedOutPolicy::CountAsTie,
        }
    }
}

/// Input file and interpretation options.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Measurement CSV written by the benchmark harness
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Compare every input size instead of only the biggest per benchmark
    #[arg(long)]
    pub all_sizes: bool,

    /// Abort on the first timed-out trial
    #[arg(long)]
    pub strict: bool,

    /// Time recorded for a timed-out trial, in microseconds
    #[arg(long, value_name = "MICROS", default_value_t = DEFAULT_TIMEOUT_SENTINEL_MICROS)]
    pub timeout_micros: u64,

    /// Text in the time column that marks a timed-out trial
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_TIMEOUT_MARKER)]
    pub timeout_marker: String,

    /// How to count entries where both algorithms timed out
    #[arg(long, value_enum, value_name = "POLICY", default_value_t = BothTimedOutArg::Exclude)]
    pub both_timed_out: BothTimedOutArg,

    /// GenericJoin variant to compare against EMatch (repeatable, default: 0 and 1)
    #[arg(
        long = "variant",
        value_name = "INDEX",
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub variants: Vec<u8>,

    /// Field delimiter of the input files
    #[arg(long, value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,
}

impl AnalysisArgs {
    /// Builds the analysis configuration.
    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::default()
            .with_timeout_sentinel(self.timeout_micros)
            .with_timeout_marker(self.timeout_marker.clone())
            .with_both_timed_out(self.both_timed_out.into());
        if self.strict {
            config = config.with_ingest_mode(IngestMode::Strict);
        }
        if self.all_sizes {
            config = config.with_size_selection(SizeSelection::All);
        }
        if !self.variants.is_empty() {
            let variants: Vec<VariantIndex> = self
                .variants
                .iter()
                .filter_map(|&v| VariantIndex::new(u64::from(v)))
                .collect();
            config = config.with_variants(&variants);
        }
        config
    }

    /// Builds the CSV loading configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidInput`] for a non-ASCII delimiter.
    pub fn load_config(&self) -> Result<LoadConfig> {
        if !self.delimiter.is_ascii() {
            return Err(CliError::invalid_input(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(LoadConfig {
            delimiter: self.delimiter as u8,
            ..Default::default()
        })
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, comma-separated text table
    Table,
    /// Pretty-printed JSON document
    Json,
    /// CSV with a header row
    Csv,
}

/// Output destination and number formatting.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Digits after the decimal point in table output
    #[arg(long, value_name = "DIGITS", default_value_t = 3)]
    pub precision: usize,

    /// Ratios at or above this value use scientific notation in table output
    #[arg(long, value_name = "RATIO", default_value_t = 1000.0)]
    pub sci_threshold: f64,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Number formatting for table output.
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(self.precision, self.sci_threshold)
    }
}
