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

//! CLI command definitions and argument parsing.
//!
//! - [`Commands::Summary`]: ratio statistics per group
//! - [`Commands::Entries`]: per-pattern comparisons
//! - [`Commands::Completion`]: shell completion scripts

mod args;

pub use args::{AnalysisArgs, BothTimedOutArg, OutputArgs, OutputFormat};

use crate::commands;
use crate::error::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// gjbench - EMatch vs GenericJoin benchmark analysis
///
/// # Examples
///
/// ```bash
/// # Biggest input size per benchmark, both GenericJoin variants
/// gjbench summary results.csv
///
/// # Every size, variant 1 only, as JSON
/// gjbench summary results.csv --all-sizes --variant 1 --format json
///
/// # Per-pattern entries joined with a pattern table
/// gjbench entries results.csv --patterns patterns.csv --format csv -o entries.csv
/// ```
#[derive(Parser, Debug)]
#[command(name = "gjbench")]
#[command(author, version, about = "EMatch vs GenericJoin benchmark analysis", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize ratio statistics per benchmark, size and GenericJoin variant
    Summary {
        #[command(flatten)]
        analysis: AnalysisArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the per-pattern comparison entries
    Entries {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Pattern table with arity and variable counts
        #[arg(long, value_name = "CATALOG")]
        patterns: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum, value_name = "SHELL")]
        shell: Shell,
    },
}

impl Commands {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Propagates the command's error; see the functions in [`commands`].
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Summary { analysis, output } => commands::summary(&analysis, &output),
            Commands::Entries {
                analysis,
                patterns,
                output,
            } => commands::entries(&analysis, patterns.as_deref(), &output),
            Commands::Completion { shell } => commands::completion(shell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summary_flags() {
        let cli = Cli::try_parse_from([
            "gjbench",
            "summary",
            "runs.csv",
            "--all-sizes",
            "--variant",
            "1",
            "--both-timed-out",
            "tie",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Summary { analysis, output } => {
                assert!(analysis.all_sizes);
                assert_eq!(analysis.variants, vec![1]);
                assert_eq!(analysis.both_timed_out, BothTimedOutArg::Tie);
                assert_eq!(output.format, OutputFormat::Json);
                assert_eq!(output.precision, 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_variant_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["gjbench", "summary", "runs.csv", "--variant", "2"]).is_err());
    }
}
