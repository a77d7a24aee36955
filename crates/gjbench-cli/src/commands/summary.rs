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

//! Summary command - one row of ratio statistics per group

use super::{check_failures, run_analysis, Output};
use crate::cli::{AnalysisArgs, OutputArgs, OutputFormat};
use crate::error::Result;
use crate::reporters::{json, print_diagnostics, table};

/// Prints win counts and ratio statistics for every selected group.
///
/// # Errors
///
/// Returns `Err` if the input cannot be analysed, the output cannot be
/// written, or any group failed. In the last case the output for the
/// remaining groups is still written.
pub fn summary(args: &AnalysisArgs, output: &OutputArgs) -> Result<()> {
    let report = run_analysis(args)?;
    let mut out = Output::open(output.output.as_deref())?;

    match output.format {
        OutputFormat::Table => table::write_summaries(
            out.writer(),
            report.summaries(),
            output.number_format(),
        )
        .map_err(|e| out.io_error(e))?,
        OutputFormat::Json => {
            json::write_summaries(out.writer(), &report).map_err(|e| out.io_error(e))?
        }
        OutputFormat::Csv => gjbench_csv::write_summaries(out.writer(), report.summaries())?,
    }
    out.finish()?;

    if output.format != OutputFormat::Json {
        print_diagnostics(&report.warnings, &report.failures);
    }
    check_failures(&report)
}
