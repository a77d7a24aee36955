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

//! Ingestion, indexing and comparison throughput.
//!
//! Synthetic runs mimic the harness output: a few benchmarks, several sizes,
//! three repeats per configuration and the occasional timeout.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gjbench_core::{
    analyze, AnalysisConfig, GroupingIndex, Ingestor, RawRow, SizeSelection,
};

const BENCHMARKS: [&str; 3] = ["math", "lambda", "jointree"];
const SIZES: [u64; 4] = [1_000, 10_000, 100_000, 1_000_000];
const REPEATS: u64 = 3;

fn synthetic_rows(patterns: usize) -> Vec<RawRow> {
    let mut rows = Vec::new();
    for bench in BENCHMARKS {
        for size in SIZES {
            for p in 0..patterns {
                let pattern = format!("(f{} ?a (g ?b ?c))", p);
                let base = (p as u64 + 1) * 17 + size / 1_000;
                for repeat in 0..REPEATS {
                    let em_time = if p % 50 == 7 {
                        "TO".to_string()
                    } else {
                        (base + repeat).to_string()
                    };
                    rows.push(RawRow::new(
                        bench,
                        &size.to_string(),
                        &pattern,
                        "EMatch",
                        &repeat.to_string(),
                        &em_time,
                        "12",
                    ));
                }
                for variant in 0..2u64 {
                    for repeat in 0..REPEATS {
                        rows.push(RawRow::new(
                            bench,
                            &size.to_string(),
                            &pattern,
                            "GenericJoin",
                            &variant.to_string(),
                            &(base / 2 + variant * 3 + repeat).to_string(),
                            "12",
                        ));
                    }
                }
            }
        }
    }
    rows
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    let config = AnalysisConfig::default();
    let ingestor = Ingestor::new(&config);

    for patterns in [10usize, 100, 500] {
        let rows = synthetic_rows(patterns);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(patterns), &rows, |b, rows| {
            b.iter(|| ingestor.ingest_all(black_box(rows)))
        });
    }
    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    let config = AnalysisConfig::default();

    for patterns in [10usize, 100, 500] {
        let measurements = match Ingestor::new(&config).ingest_all(&synthetic_rows(patterns)) {
            Ok(measurements) => measurements,
            Err(e) => panic!("synthetic rows must ingest: {}", e),
        };
        group.throughput(Throughput::Elements(measurements.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(patterns),
            &measurements,
            |b, measurements| {
                b.iter(|| GroupingIndex::from_measurements(black_box(measurements.clone())))
            },
        );
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for selection in [SizeSelection::Biggest, SizeSelection::All] {
        let config = AnalysisConfig::default().with_size_selection(selection);
        let measurements = match Ingestor::new(&config).ingest_all(&synthetic_rows(200)) {
            Ok(measurements) => measurements,
            Err(e) => panic!("synthetic rows must ingest: {}", e),
        };
        let index = GroupingIndex::from_measurements(measurements);
        let label = match selection {
            SizeSelection::Biggest => "biggest",
            SizeSelection::All => "all_sizes",
        };
        group.bench_function(label, |b| b.iter(|| analyze(black_box(&index), &config)));
    }
    group.finish();
}

criterion_group!(benches, bench_ingest, bench_index, bench_analyze);
criterion_main!(benches);
