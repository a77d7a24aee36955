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

//! EMatch vs GenericJoin benchmark analysis.
//!
//! This crate turns raw benchmark rows into per-group comparisons of the two
//! matching algorithms and summarizes the time ratios of each group.
//!
//! # Pipeline
//!
//! 1. [`Ingestor`] parses [`RawRow`]s into typed [`Measurement`]s, handling
//!    timeout markers according to [`IngestMode`].
//! 2. [`GroupingIndex`] buckets measurements by benchmark, input size,
//!    pattern, algorithm and GenericJoin variant.
//! 3. [`Comparator`] reduces each repeat list to its fastest trial
//!    ([`reduce_repeats`]) and pairs EMatch with one GenericJoin variant.
//! 4. [`Aggregator`] computes win counts and ratio statistics per group.
//!
//! [`analyze`] and [`analyze_rows`] run the stages for every selected group.
//! File loading lives in `gjbench-csv`; the `gjbench` binary in `gjbench-cli`.
//!
//! # Ratios
//!
//! Every ratio is `em_time / gj_time`: values above 1 mean GenericJoin was
//! faster. Entries where either side timed out are left out of the ratio
//! statistics and counted separately.
//!
//! # Examples
//!
//! ```
//! use gjbench_core::{analyze, AnalysisConfig, GroupingIndex, Ingestor, RawRow};
//!
//! let rows = vec![
//!     RawRow::new("math", "100", "?x+?y", "EMatch", "0", "50", "10"),
//!     RawRow::new("math", "100", "?x+?y", "GenericJoin", "0", "30", "10"),
//!     RawRow::new("math", "100", "?x+?y", "GenericJoin", "1", "20", "10"),
//! ];
//! let config = AnalysisConfig::default();
//! let measurements = Ingestor::new(&config).ingest_all(&rows).unwrap();
//! let index = GroupingIndex::from_measurements(measurements);
//!
//! let report = analyze(&index, &config);
//! assert_eq!(report.groups.len(), 2);
//! assert!(report.groups.iter().all(|g| g.summary.gj_faster_count == 1));
//! ```

#![warn(missing_docs)]

mod aggregate;
mod analysis;
mod catalog;
mod compare;
mod config;
mod error;
mod index;
mod ingest;
mod model;
mod reduce;
mod warning;

pub use aggregate::{
    geometric_mean, harmonic_mean, median, ratio_statistics, Aggregator, GroupSummary,
    RatioStatistics,
};
pub use analysis::{
    analyze, analyze_rows, AnalysisReport, GroupFailure, GroupReport, TimedOutGroup,
};
pub use catalog::{PatternCatalog, PatternMetadata, ResolvedMetadata};
pub use compare::{Comparator, ComparisonEntry, GroupComparison};
pub use config::{
    AnalysisConfig, BothTimedOutPolicy, IngestMode, SizeSelection, DEFAULT_TIMEOUT_MARKER,
    DEFAULT_TIMEOUT_SENTINEL_MICROS,
};
pub use error::{AnalysisError, Result};
pub use index::{BenchmarkNode, GroupingIndex, PatternCell, SizeNode};
pub use ingest::{Ingestor, RawRow};
pub use model::{
    Algorithm, BenchmarkName, Faster, GroupKey, InputSize, Measurement, PatternText, VariantIndex,
};
pub use reduce::{reduce_repeats, RepeatList};
pub use warning::Warning;
