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

//! Hierarchical grouping of measurements.
//!
//! ```text
//! GroupingIndex
//! └── BenchmarkNode      (per benchmark, first-seen order)
//!     └── SizeNode       (per input size, ascending)
//!         └── PatternCell (per pattern, first-seen order)
//!             ├── EMatch          RepeatList
//!             ├── GenericJoin #0  RepeatList
//!             └── GenericJoin #1  RepeatList
//! ```
//!
//! The index is built once and then queried read-only. It does not check
//! that every pattern has measurements for every algorithm; the comparator
//! reports that as [`AnalysisError::MissingCounterpart`](crate::AnalysisError).

use crate::config::SizeSelection;
use crate::model::{
    Algorithm, BenchmarkName, GroupKey, InputSize, Measurement, PatternText, VariantIndex,
};
use crate::reduce::RepeatList;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use tracing::debug;

/// Map that iterates in first-insertion order.
#[derive(Debug, Clone)]
struct FirstSeen<K, V> {
    entries: Vec<(K, V)>,
    positions: HashMap<K, usize>,
}

impl<K, V> Default for FirstSeen<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V: Default> FirstSeen<K, V> {
    fn entry(&mut self, key: &K) -> &mut V {
        let idx = match self.positions.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.positions.insert(key.clone(), idx);
                self.entries.push((key.clone(), V::default()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.positions.get(key).map(|&idx| &self.entries[idx].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Repeat lists of one pattern within a group.
#[derive(Debug, Clone, Default)]
pub struct PatternCell {
    ematch: RepeatList,
    generic_join: [RepeatList; 2],
}

impl PatternCell {
    /// EMatch repeats.
    pub fn ematch(&self) -> &RepeatList {
        &self.ematch
    }

    /// GenericJoin repeats for one variant.
    pub fn generic_join(&self, variant: VariantIndex) -> &RepeatList {
        &self.generic_join[variant.slot()]
    }

    /// Repeats for an algorithm; `variant` is ignored for EMatch.
    pub fn repeats(&self, algorithm: Algorithm, variant: VariantIndex) -> &RepeatList {
        match algorithm {
            Algorithm::EMatch => &self.ematch,
            Algorithm::GenericJoin => self.generic_join(variant),
        }
    }

    /// Iterates every repeat of the cell: EMatch, then GenericJoin variant 0
    /// and 1.
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.ematch
            .as_slice()
            .iter()
            .chain(self.generic_join.iter().flat_map(|list| list.as_slice()))
    }

    fn push(&mut self, measurement: Measurement) {
        match measurement.algorithm {
            Algorithm::EMatch => self.ematch.push(measurement),
            Algorithm::GenericJoin => {
                let slot = measurement.variant_index.slot();
                self.generic_join[slot].push(measurement);
            }
        }
    }
}

/// Patterns measured for one benchmark at one input size.
#[derive(Debug, Clone, Default)]
pub struct SizeNode {
    patterns: FirstSeen<PatternText, PatternCell>,
}

impl SizeNode {
    /// Iterates patterns in first-seen order.
    pub fn patterns(&self) -> impl Iterator<Item = (&PatternText, &PatternCell)> {
        self.patterns.iter()
    }

    /// Looks up one pattern.
    pub fn pattern(&self, text: &str) -> Option<&PatternCell> {
        self.patterns.get(text)
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if no pattern was measured.
    pub fn is_empty(&self) -> bool {
        self.patterns.len() == 0
    }
}

/// All sizes measured for one benchmark.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkNode {
    sizes: BTreeMap<InputSize, SizeNode>,
}

impl BenchmarkNode {
    /// Iterates sizes in ascending order.
    pub fn sizes(&self) -> impl Iterator<Item = (InputSize, &SizeNode)> {
        self.sizes.iter().map(|(size, node)| (*size, node))
    }

    /// Looks up one size.
    pub fn size(&self, size: InputSize) -> Option<&SizeNode> {
        self.sizes.get(&size)
    }

    /// The largest size measured for this benchmark.
    pub fn largest_size(&self) -> Option<InputSize> {
        self.sizes.keys().next_back().copied()
    }
}

/// Four-level index over all measurements of a run.
///
/// # Examples
///
/// ```
/// use gjbench_core::{AnalysisConfig, GroupingIndex, Ingestor, RawRow, SizeSelection};
///
/// let rows = vec![
///     RawRow::new("math", "10", "(* ?a 1)", "EMatch", "0", "50", "4"),
///     RawRow::new("math", "20", "(* ?a 1)", "EMatch", "0", "80", "9"),
/// ];
/// let measurements = Ingestor::new(&AnalysisConfig::default()).ingest_all(&rows).unwrap();
/// let index = GroupingIndex::from_measurements(measurements);
///
/// let keys = index.select(SizeSelection::Biggest);
/// assert_eq!(keys.len(), 1);
/// assert_eq!(keys[0].size.get(), 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GroupingIndex {
    benchmarks: FirstSeen<BenchmarkName, BenchmarkNode>,
    measurement_count: usize,
}

impl GroupingIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index in one pass.
    pub fn from_measurements<I>(measurements: I) -> Self
    where
        I: IntoIterator<Item = Measurement>,
    {
        let mut index = Self::new();
        for measurement in measurements {
            index.insert(measurement);
        }
        debug!(
            benchmarks = index.benchmarks.len(),
            measurements = index.measurement_count,
            "built grouping index"
        );
        index
    }

    /// Appends a measurement to its repeat list.
    ///
    /// Repeated `repeat_id`s are appended, never overwritten.
    pub fn insert(&mut self, measurement: Measurement) {
        let size = measurement.input_size;
        let pattern = measurement.pattern.clone();
        self.benchmarks
            .entry(&measurement.benchmark)
            .sizes
            .entry(size)
            .or_default()
            .patterns
            .entry(&pattern)
            .push(measurement);
        self.measurement_count += 1;
    }

    /// Iterates benchmarks in first-seen order.
    pub fn benchmarks(&self) -> impl Iterator<Item = (&BenchmarkName, &BenchmarkNode)> {
        self.benchmarks.iter()
    }

    /// Looks up one benchmark.
    pub fn benchmark(&self, name: &str) -> Option<&BenchmarkNode> {
        self.benchmarks.get(name)
    }

    /// Looks up the patterns of one group.
    pub fn group(&self, key: &GroupKey) -> Option<&SizeNode> {
        self.benchmark(key.benchmark.as_str())
            .and_then(|node| node.size(key.size))
    }

    /// Returns the groups to compare, benchmarks in first-seen order and
    /// sizes ascending.
    pub fn select(&self, selection: SizeSelection) -> Vec<GroupKey> {
        let mut keys = Vec::new();
        for (name, node) in self.benchmarks() {
            let largest = node.largest_size();
            for (size, _) in node.sizes() {
                if selection == SizeSelection::All || Some(size) == largest {
                    keys.push(GroupKey {
                        benchmark: name.clone(),
                        size,
                    });
                }
            }
        }
        keys
    }

    /// Iterates every inserted measurement, grouped by benchmark, size and
    /// pattern.
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.benchmarks().flat_map(|(_, node)| {
            node.sizes()
                .flat_map(|(_, size)| size.patterns().flat_map(|(_, cell)| cell.measurements()))
        })
    }

    /// Total number of inserted measurements.
    pub fn measurement_count(&self) -> usize {
        self.measurement_count
    }

    /// Returns `true` if nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.measurement_count == 0
    }
}
