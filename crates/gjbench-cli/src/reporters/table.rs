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

//! Aligned text tables.

use crate::format::NumberFormat;
use gjbench_core::GroupSummary;
use gjbench_csv::EntryRow;
use std::io::{self, Write};

/// Writes the summary table: a header row and one row per group.
///
/// `best`, `medn` and `worst` are the minimum, median and maximum ratio.
pub fn write_summaries<'a, W, I>(out: &mut W, summaries: I, fmt: NumberFormat) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a GroupSummary>,
{
    let w = fmt.width();
    writeln!(
        out,
        "{:>5}, {:>10}, {:>10}, {:>3}, {:>3}, {:>3}, {:>w$}, {:>w$}, {:>w$}, {:>w$}, {:>w$}, {:>w$}",
        "index", "bench", "size", "gj", "em", "TO", "total", "hmean", "gmean", "best", "medn", "worst",
    )?;
    for s in summaries {
        writeln!(
            out,
            "{:>5}, {:>10}, {:>10}, {:>3}, {:>3}, {:>3}, {:>w$}, {:>w$}, {:>w$}, {:>w$}, {:>w$}, {:>w$}",
            s.variant,
            s.benchmark,
            s.size,
            s.gj_faster_count,
            s.em_faster_count,
            s.timeout_count,
            fmt.ratio(s.total_ratio),
            fmt.ratio(s.harmonic_mean),
            fmt.ratio(s.geometric_mean),
            fmt.ratio(s.min),
            fmt.ratio(s.median),
            fmt.ratio(s.max),
        )?;
    }
    Ok(())
}

fn flags(row: &EntryRow) -> &'static str {
    match (row.em_timed_out || row.gj_timed_out, row.mismatched) {
        (true, _) => "TO",
        (false, true) => "MISMATCH",
        (false, false) => "",
    }
}

fn optional(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Writes the per-pattern entry table. The pattern comes last so that long
/// patterns do not break the alignment of the numeric columns.
pub fn write_entries<'a, W, I>(out: &mut W, rows: I, fmt: NumberFormat) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a EntryRow>,
{
    let w = fmt.width();
    writeln!(
        out,
        "{:>5}, {:>10}, {:>10}, {:>10}, {:>10}, {:>w$}, {:>3}, {:>5}, {:>4}, {:>8}, {}",
        "index", "bench", "size", "em", "gj", "ratio", "win", "arity", "vars", "flags", "pattern",
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>5}, {:>10}, {:>10}, {:>10}, {:>10}, {:>w$}, {:>3}, {:>5}, {:>4}, {:>8}, {}",
            row.variant,
            row.benchmark,
            row.size,
            row.em_time,
            row.gj_time,
            fmt.ratio(row.ratio),
            row.faster,
            optional(row.arity),
            optional(row.variables),
            flags(row),
            row.pattern,
        )?;
    }
    Ok(())
}
