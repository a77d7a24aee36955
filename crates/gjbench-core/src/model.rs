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

//! Typed measurement records and grouping keys.
//!
//! Every level of the grouping hierarchy has its own key type so a size can
//! never be used where a pattern is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a benchmark suite (e.g. `math`, `lambda`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkName(String);

impl BenchmarkName {
    /// Creates a benchmark name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BenchmarkName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BenchmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for BenchmarkName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Input size of a benchmark run, in e-graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSize(u64);

impl InputSize {
    /// Creates an input size.
    pub const fn new(size: u64) -> Self {
        Self(size)
    }

    /// Returns the raw size.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for InputSize {
    fn from(size: u64) -> Self {
        Self(size)
    }
}

/// Textual representation of a query pattern, e.g. `(* ?a 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternText(String);

impl PatternText {
    /// Creates a pattern key.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the pattern as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PatternText {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PatternText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// The two compared matching algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Classic top-down e-matching.
    EMatch,
    /// Relational e-matching via generic join.
    GenericJoin,
}

impl Algorithm {
    /// Returns the spelling used in measurement files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::EMatch => "EMatch",
            Algorithm::GenericJoin => "GenericJoin",
        }
    }

    /// Parses the spelling used in measurement files. Matching is exact.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "EMatch" => Some(Algorithm::EMatch),
            "GenericJoin" => Some(Algorithm::GenericJoin),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One of GenericJoin's two measured configurations.
///
/// Only `0` and `1` are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantIndex(u8);

impl VariantIndex {
    /// Variant 0.
    pub const ZERO: VariantIndex = VariantIndex(0);
    /// Variant 1.
    pub const ONE: VariantIndex = VariantIndex(1);
    /// Both variants, in comparison order.
    pub const ALL: [VariantIndex; 2] = [VariantIndex::ZERO, VariantIndex::ONE];

    /// Returns the variant for `index`, or `None` if it is neither 0 nor 1.
    pub fn new(index: u64) -> Option<Self> {
        match index {
            0 => Some(Self::ZERO),
            1 => Some(Self::ONE),
            _ => None,
        }
    }

    /// Returns the raw index.
    pub const fn get(self) -> u8 {
        self.0
    }

    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VariantIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Which side of a comparison was faster.
///
/// Ties are classified as [`Faster::Em`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faster {
    /// EMatch was at least as fast as GenericJoin.
    #[serde(rename = "EM")]
    Em,
    /// GenericJoin was strictly faster.
    #[serde(rename = "GJ")]
    Gj,
}

impl Faster {
    /// Returns the short label (`EM` or `GJ`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Faster::Em => "EM",
            Faster::Gj => "GJ",
        }
    }
}

impl fmt::Display for Faster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Identifies one comparison context: a benchmark at one input size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    /// Benchmark name.
    pub benchmark: BenchmarkName,
    /// Input size.
    pub size: InputSize,
}

impl GroupKey {
    /// Creates a group key.
    pub fn new(benchmark: impl Into<BenchmarkName>, size: u64) -> Self {
        Self {
            benchmark: benchmark.into(),
            size: InputSize::new(size),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.benchmark, self.size)
    }
}

/// A single timed trial.
///
/// `time_micros` is always at least 1. A timed-out trial carries the
/// configured timeout sentinel instead of a real time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Benchmark suite.
    pub benchmark: BenchmarkName,
    /// Input size.
    pub input_size: InputSize,
    /// Query pattern.
    pub pattern: PatternText,
    /// Algorithm that was timed.
    pub algorithm: Algorithm,
    /// GenericJoin configuration; always [`VariantIndex::ZERO`] for EMatch.
    pub variant_index: VariantIndex,
    /// Repeat index as recorded in the input.
    pub repeat_id: u64,
    /// Duration in microseconds.
    pub time_micros: u64,
    /// Number of matches produced.
    pub result_size: u64,
    /// Whether the trial exceeded its time budget.
    pub timed_out: bool,
}

impl Measurement {
    /// Returns the group this measurement belongs to.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            benchmark: self.benchmark.clone(),
            size: self.input_size,
        }
    }
}
