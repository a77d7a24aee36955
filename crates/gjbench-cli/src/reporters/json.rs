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

//! JSON documents.
//!
//! Writers return plain I/O errors; the caller labels them with the output
//! path.

use gjbench_core::{AnalysisReport, GroupFailure, GroupSummary, Warning};
use gjbench_csv::EntryRow;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct SummaryDocument<'a> {
    summaries: Vec<&'a GroupSummary>,
    warnings: &'a [Warning],
    failures: &'a [GroupFailure],
}

#[derive(Serialize)]
struct EntryDocument<'a> {
    entries: &'a [EntryRow],
    warnings: &'a [Warning],
    failures: &'a [GroupFailure],
}

/// Writes `{summaries, warnings, failures}` as pretty JSON.
pub fn write_summaries<W: Write + ?Sized>(out: &mut W, report: &AnalysisReport) -> io::Result<()> {
    let doc = SummaryDocument {
        summaries: report.summaries().collect(),
        warnings: &report.warnings,
        failures: &report.failures,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}

/// Writes `{entries, warnings, failures}` as pretty JSON.
pub fn write_entries<W: Write + ?Sized>(
    out: &mut W,
    entries: &[EntryRow],
    warnings: &[Warning],
    failures: &[GroupFailure],
) -> io::Result<()> {
    let doc = EntryDocument {
        entries,
        warnings,
        failures,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}
