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

//! Reduction of repeated trials to one representative measurement.
//!
//! The representative of a repeat list is the measurement with the smallest
//! `time_micros`. When several repeats share that time, the one that appears
//! first in the list wins. Repeat lists keep ingestion order, so the result is
//! reproducible for a given input file.
//!
//! A timed-out repeat is only chosen when no repeat of the list completed,
//! even if its sentinel duration is shorter than a completed time.

use crate::model::Measurement;
use serde::Serialize;
use std::collections::BTreeSet;

/// Returns the fastest completed measurement, preferring the earliest on
/// ties. Falls back to the timed-out repeats when none completed.
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use gjbench_core::reduce_repeats;
/// # use gjbench_core::{Algorithm, BenchmarkName, InputSize, Measurement, PatternText, VariantIndex};
/// # fn trial(repeat_id: u64, time_micros: u64) -> Measurement {
/// #     Measurement {
/// #         benchmark: BenchmarkName::new("math"),
/// #         input_size: InputSize::new(10),
/// #         pattern: PatternText::new("(* ?a 1)"),
/// #         algorithm: Algorithm::EMatch,
/// #         variant_index: VariantIndex::ZERO,
/// #         repeat_id,
/// #         time_micros,
/// #         result_size: 1,
/// #         timed_out: false,
/// #     }
/// # }
///
/// let repeats = vec![trial(0, 40), trial(1, 25), trial(2, 25)];
/// let best = reduce_repeats(&repeats).unwrap();
/// assert_eq!(best.repeat_id, 1);
/// ```
pub fn reduce_repeats(repeats: &[Measurement]) -> Option<&Measurement> {
    let mut best: Option<&Measurement> = None;
    for candidate in repeats {
        match best {
            // Strictly-less keeps the earlier repeat on ties.
            Some(current) if rank(candidate) >= rank(current) => {}
            _ => best = Some(candidate),
        }
    }
    best
}

fn rank(measurement: &Measurement) -> (bool, u64) {
    (measurement.timed_out, measurement.time_micros)
}

/// Stable-ordered list of repeats for one (benchmark, size, pattern,
/// algorithm, variant) cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RepeatList {
    repeats: Vec<Measurement>,
}

impl RepeatList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, measurement: Measurement) {
        self.repeats.push(measurement);
    }

    /// Returns the representative measurement, see [`reduce_repeats`].
    pub fn best(&self) -> Option<&Measurement> {
        reduce_repeats(&self.repeats)
    }

    /// Returns the repeats in ingestion order.
    pub fn as_slice(&self) -> &[Measurement] {
        &self.repeats
    }

    /// Number of repeats.
    pub fn len(&self) -> usize {
        self.repeats.len()
    }

    /// Returns `true` if there are no repeats.
    pub fn is_empty(&self) -> bool {
        self.repeats.is_empty()
    }

    /// Distinct result sizes among the repeats that completed.
    ///
    /// More than one value means the same configuration returned different
    /// answers on different trials.
    pub fn completed_result_sizes(&self) -> BTreeSet<u64> {
        self.repeats
            .iter()
            .filter(|m| !m.timed_out)
            .map(|m| m.result_size)
            .collect()
    }
}

impl FromIterator<Measurement> for RepeatList {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self {
            repeats: iter.into_iter().collect(),
        }
    }
}
