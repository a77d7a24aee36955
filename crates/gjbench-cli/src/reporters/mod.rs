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

//! Output rendering for the analysis commands.
//!
//! - [`table`]: aligned text for terminals
//! - [`json`]: one pretty-printed document
//! - CSV output goes through `gjbench_csv::write_summaries` and
//!   `gjbench_csv::write_entries`
//!
//! Warnings and group failures go to stderr for table and CSV output; the
//! JSON document carries them inline.

pub mod json;
pub mod table;

use colored::Colorize;
use gjbench_core::{GroupFailure, Warning};

/// Prints warnings and failures to stderr.
pub fn print_diagnostics(warnings: &[Warning], failures: &[GroupFailure]) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    for failure in failures {
        eprintln!(
            "{} {}@{} (variant {}): {}",
            "error:".red().bold(),
            failure.benchmark,
            failure.size,
            failure.variant,
            failure.message
        );
    }
}
