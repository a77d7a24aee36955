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

//! gjbench command-line library.
//!
//! Parses arguments, runs the analysis from `gjbench-core` over files loaded
//! with `gjbench-csv`, and renders the result as a table, JSON or CSV.
//!
//! # Commands
//!
//! - **summary**: win counts and ratio statistics per benchmark, size and
//!   GenericJoin variant
//! - **entries**: per-pattern comparison entries, optionally joined with a
//!   pattern table
//! - **completion**: shell completion scripts
//!
//! # Exit status
//!
//! `0` on success, `1` on any error, including runs where some groups could
//! not be analysed (the remaining output is still written).
//!
//! # Examples
//!
//! ```no_run
//! use gjbench_cli::cli::{AnalysisArgs, BothTimedOutArg};
//! use gjbench_cli::commands::run_analysis;
//!
//! # fn main() -> Result<(), gjbench_cli::CliError> {
//! let args = AnalysisArgs {
//!     file: "results.csv".into(),
//!     all_sizes: false,
//!     strict: false,
//!     timeout_micros: 4_000_000,
//!     timeout_marker: "TO".to_string(),
//!     both_timed_out: BothTimedOutArg::Exclude,
//!     variants: vec![0],
//!     delimiter: ',',
//! };
//! let report = run_analysis(&args)?;
//! println!("{} groups", report.groups.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod format;
pub mod logging;
pub mod reporters;

pub use error::{CliError, Result};
