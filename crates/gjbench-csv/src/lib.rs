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

//! CSV input and output for gjbench.
//!
//! Reads measurement files written by the benchmark harness and optional
//! pattern tables, and exports analysis results as CSV.
//!
//! # Input format
//!
//! A header row is required. Measurement files need the columns
//! `benchmark`, `node_size`, `pattern`, `algo`, `repeat_time`, `time` and
//! `result_size`; anything else (the harness also writes `class_size`) is
//! ignored:
//!
//! ```text
//! benchmark,node_size,class_size,pattern,algo,repeat_time,time,result_size
//! math,10000,3512,(* ?a (+ ?b ?c)),EMatch,0,1834,42
//! math,10000,3512,(* ?a (+ ?b ?c)),GenericJoin,0,911,42
//! math,10000,3512,(* ?a (+ ?b ?c)),GenericJoin,1,TO,0
//! ```
//!
//! Pattern tables have `pattern`, `arity`, `variables` and an optional
//! `benchmark` column. Lines starting with `#` are comments in both formats.
//!
//! # Limits
//!
//! - At most [`LoadConfig::max_rows`] data rows (default 1,000,000)
//! - At most `GJBENCH_MAX_FILE_SIZE` bytes per file (default 1 GiB)

mod error;
mod read;
mod write;

pub use error::{CsvError, Result};
pub use read::{
    load_catalog, load_catalog_for_benchmark, load_catalog_from_path, load_measurements,
    load_measurements_from_path, load_rows, load_rows_from_path, read_file, LoadConfig,
    CATALOG_COLUMNS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_ROWS, MEASUREMENT_COLUMNS,
};
pub use write::{write_entries, write_summaries, EntryRow};
