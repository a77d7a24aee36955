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

//! Property-based tests for repeat reduction and ratio statistics.

use gjbench_core::{
    ratio_statistics, reduce_repeats, AnalysisConfig, Algorithm, BenchmarkName, Ingestor,
    InputSize, Measurement, PatternText, RawRow, VariantIndex,
};
use proptest::prelude::*;

fn trial(repeat_id: u64, time_micros: u64) -> Measurement {
    Measurement {
        benchmark: BenchmarkName::new("math"),
        input_size: InputSize::new(100),
        pattern: PatternText::new("(* ?a ?b)"),
        algorithm: Algorithm::EMatch,
        variant_index: VariantIndex::ZERO,
        repeat_id,
        time_micros,
        result_size: 1,
        timed_out: false,
    }
}

fn relative_eps(value: f64) -> f64 {
    1e-9 * value.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the reducer returns a minimum-time repeat, the first one on ties.
    #[test]
    fn prop_reducer_selects_first_minimum(times in prop::collection::vec(1u64..50, 1..30)) {
        let repeats: Vec<Measurement> = times
            .iter()
            .enumerate()
            .map(|(i, &t)| trial(i as u64, t))
            .collect();

        let best = reduce_repeats(&repeats).unwrap();
        let min = *times.iter().min().unwrap();
        let first = times.iter().position(|&t| t == min).unwrap();

        prop_assert_eq!(best.time_micros, min);
        prop_assert_eq!(best.repeat_id, first as u64);
    }

    /// Property: reducing a singleton returns it unchanged.
    #[test]
    fn prop_singleton_reduction_is_identity(time in 1u64..10_000_000, id in 0u64..100) {
        let only = trial(id, time);
        let repeats = vec![only.clone()];
        prop_assert_eq!(reduce_repeats(&repeats), Some(&only));
    }

    /// Property: min <= harmonic <= geometric <= arithmetic <= max, and the
    /// median lies within [min, max].
    #[test]
    fn prop_mean_ordering(ratios in prop::collection::vec(1e-4f64..1e4, 1..50)) {
        let stats = ratio_statistics(&ratios).unwrap();

        prop_assert!(stats.min <= stats.harmonic_mean + relative_eps(stats.harmonic_mean));
        prop_assert!(stats.harmonic_mean <= stats.geometric_mean + relative_eps(stats.geometric_mean));
        prop_assert!(stats.geometric_mean <= stats.mean + relative_eps(stats.mean));
        prop_assert!(stats.mean <= stats.max + relative_eps(stats.max));
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert_eq!(stats.count, ratios.len());
    }

    /// Property: ingested times are never zero, so ratios stay finite.
    #[test]
    fn prop_ingested_time_is_positive(time in 0u64..1_000, gj_time in 0u64..1_000) {
        let ingestor = Ingestor::new(&AnalysisConfig::default());
        let em = ingestor
            .ingest(1, &RawRow::new("m", "1", "p", "EMatch", "0", &time.to_string(), "1"))
            .unwrap();
        let gj = ingestor
            .ingest(2, &RawRow::new("m", "1", "p", "GenericJoin", "0", &gj_time.to_string(), "1"))
            .unwrap();

        prop_assert_eq!(em.time_micros, time.max(1));
        let ratio = em.time_micros as f64 / gj.time_micros as f64;
        prop_assert!(ratio.is_finite() && ratio > 0.0);
    }
}

#[test]
fn test_empty_population_has_no_statistics() {
    assert!(ratio_statistics(&[]).is_none());
}
