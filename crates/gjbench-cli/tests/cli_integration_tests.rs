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

//! End-to-end tests of the gjbench binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

const RUN: &str = "\
benchmark,node_size,class_size,pattern,algo,repeat_time,time,result_size
math,100,40,?x+?y,EMatch,0,50,10
math,100,40,?x+?y,GenericJoin,0,30,10
math,100,40,?x+?y,GenericJoin,1,20,10
math,100,40,?x*?y,EMatch,0,200,3
math,100,40,?x*?y,GenericJoin,0,500,3
math,100,40,?x*?y,GenericJoin,1,400,3
math,10,4,?x*?y,EMatch,0,7,3
math,10,4,?x*?y,GenericJoin,0,9,3
math,10,4,?x*?y,GenericJoin,1,8,3
";

fn gjbench_cmd() -> Command {
    Command::cargo_bin("gjbench").expect("Failed to find gjbench binary")
}

fn write_input(content: &str) -> (TempDir, String) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("results.csv");
    fs::write(&path, content).expect("Failed to write input");
    (dir, path.to_str().unwrap().to_string())
}

#[test]
fn test_summary_table_biggest_size() {
    let (_dir, path) = write_input(RUN);
    gjbench_cmd()
        .args(["summary", &path, "--variant", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "index,      bench,       size,  gj,  em,  TO, total, hmean, gmean,  best,  medn, worst",
        ))
        .stdout(predicate::str::contains(
            "    0,       math,        100,   1,   1,   0,  .472,  .645,  .816,  .400, 1.033, 1.667",
        ))
        .stdout(predicate::str::contains("       10,").not());
}

#[test]
fn test_summary_all_sizes_and_variants() {
    let (_dir, path) = write_input(RUN);
    let output = gjbench_cmd()
        .args(["summary", &path, "--all-sizes"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // Header plus two sizes times two variants.
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn test_summary_json() {
    let (_dir, path) = write_input(RUN);
    let output = gjbench_cmd()
        .args(["summary", &path, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summaries = value["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["variant"], 0);
    assert_eq!(summaries[1]["variant"], 1);
    assert_eq!(summaries[0]["gj_faster_count"], 1);
}

#[test]
fn test_summary_csv_to_file() {
    let (dir, path) = write_input(RUN);
    let out = dir.path().join("summary.csv");
    gjbench_cmd()
        .args(["summary", &path, "--format", "csv", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("benchmark,size,variant,em_faster_count"));
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_mismatch_is_a_warning() {
    let (_dir, path) = write_input(
        "benchmark,node_size,pattern,algo,repeat_time,time,result_size\n\
         math,1,p,EMatch,0,10,5\n\
         math,1,p,GenericJoin,0,20,7\n",
    );
    gjbench_cmd()
        .args(["summary", &path, "--variant", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains("EMatch=5 GenericJoin=7"));
}

#[test]
fn test_missing_counterpart_exits_nonzero_but_reports_rest() {
    let (_dir, path) = write_input(
        "benchmark,node_size,pattern,algo,repeat_time,time,result_size\n\
         math,1,p,EMatch,0,10,1\n\
         math,1,p,GenericJoin,0,5,1\n",
    );
    gjbench_cmd()
        .args(["summary", &path])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("math"))
        .stderr(predicate::str::contains("GenericJoin variant 1"))
        .stderr(predicate::str::contains("Error: 1 group(s) could not be analysed"));
}

#[test]
fn test_malformed_input_is_fatal() {
    let (_dir, path) = write_input(
        "benchmark,node_size,pattern,algo,repeat_time,time,result_size\n\
         math,1,p,EMatch,0,fast,1\n",
    );
    gjbench_cmd()
        .args(["summary", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 1, column 'time'"));
}

#[test]
fn test_strict_mode_rejects_timeouts() {
    let (_dir, path) = write_input(
        "benchmark,node_size,pattern,algo,repeat_time,time,result_size\n\
         math,1,p,EMatch,0,TO,0\n\
         math,1,p,GenericJoin,0,5,1\n",
    );
    gjbench_cmd()
        .args(["summary", &path, "--variant", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no data"));

    gjbench_cmd()
        .args(["summary", &path, "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn test_missing_file() {
    gjbench_cmd()
        .args(["summary", "/nonexistent/results.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: I/O error for '/nonexistent/results.csv'"));
}

#[test]
fn test_entries_with_catalog() {
    let (dir, path) = write_input(RUN);
    let catalog = dir.path().join("patterns.csv");
    fs::write(&catalog, "# shapes\npattern,arity,variables\n?x+?y,2,2\n").unwrap();

    gjbench_cmd()
        .args([
            "entries",
            &path,
            "--variant",
            "0",
            "--patterns",
            catalog.to_str().unwrap(),
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("math,100,0,?x+?y,2,2,50,30,10,10,"))
        .stderr(predicate::str::contains("'?x*?y' is not in the pattern table"));
}

#[test]
fn test_entries_json_carries_warnings() {
    let (dir, path) = write_input(RUN);
    let catalog = dir.path().join("patterns.csv");
    fs::write(&catalog, "pattern,arity,variables\n").unwrap();

    let output = gjbench_cmd()
        .args([
            "entries",
            &path,
            "--patterns",
            catalog.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["entries"].as_array().unwrap().len(), 4);
    assert_eq!(value["warnings"].as_array().unwrap().len(), 2);
    assert_eq!(value["warnings"][0]["kind"], "uncatalogued_pattern");
}

#[test]
fn test_completion_bash() {
    gjbench_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gjbench"));
}

#[test]
fn test_invalid_timeout_marker() {
    let (_dir, path) = write_input(RUN);
    gjbench_cmd()
        .args(["summary", &path, "--timeout-marker", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_marker"));
}

#[test]
fn test_negative_budget_timeout_loses_to_slow_completion() {
    let (_dir, path) = write_input(
        "benchmark,node_size,pattern,algo,repeat_time,time,result_size\n\
         math,1,p,EMatch,0,10000000,5\n\
         math,1,p,GenericJoin,0,-60000000,0\n\
         math,1,q,EMatch,0,10,1\n\
         math,1,q,GenericJoin,0,5,1\n",
    );
    let output = gjbench_cmd()
        .args(["summary", &path, "--variant", "0", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summary = &value["summaries"][0];
    assert_eq!(summary["em_faster_count"], 1);
    assert_eq!(summary["gj_faster_count"], 1);
    assert_eq!(summary["timeout_count"], 1);
    assert_eq!(value["warnings"][0]["kind"], "sentinel_below_completed_time");
}

#[test]
fn test_entries_lists_groups_that_all_timed_out() {
    let (_dir, path) = write_input(
        "benchmark,node_size,pattern,algo,repeat_time,time,result_size\n\
         math,1,p,EMatch,0,TO,0\n\
         math,1,p,GenericJoin,0,5,1\n",
    );
    gjbench_cmd()
        .args(["entries", &path, "--variant", "0", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("math,1,0,p,0,0,4000000,5,0,1,"))
        .stderr(predicate::str::contains("no data"));
}

#[test]
fn test_entries_catalog_filtered_per_benchmark() {
    let (dir, path) = write_input(
        "benchmark,node_size,pattern,algo,repeat_time,time,result_size\n\
         math,1,(f ?a),EMatch,0,10,1\n\
         math,1,(f ?a),GenericJoin,0,5,1\n\
         lambda,1,(f ?a),EMatch,0,10,1\n\
         lambda,1,(f ?a),GenericJoin,0,5,1\n",
    );
    let catalog = dir.path().join("patterns.csv");
    fs::write(
        &catalog,
        "pattern,arity,variables,benchmark\n(f ?a),1,1,math\n(f ?a),3,4,lambda\n",
    )
    .unwrap();

    gjbench_cmd()
        .args([
            "entries",
            &path,
            "--variant",
            "0",
            "--patterns",
            catalog.to_str().unwrap(),
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("math,1,0,(f ?a),1,1,"))
        .stdout(predicate::str::contains("lambda,1,0,(f ?a),3,4,"))
        .stderr(predicate::str::contains("not in the pattern table").not());
}
