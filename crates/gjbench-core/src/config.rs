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

//! Analysis configuration.
//!
//! Every policy that changes how measurements are interpreted lives in
//! [`AnalysisConfig`] and is passed explicitly to the ingestor and the
//! analysis driver, so runs with different policies can coexist.

use crate::error::{AnalysisError, Result};
use crate::model::VariantIndex;
use serde::{Deserialize, Serialize};

/// Default duration substituted for a timed-out trial (4 seconds).
pub const DEFAULT_TIMEOUT_SENTINEL_MICROS: u64 = 4_000_000;

/// Default literal written in the `time` column for a timed-out trial.
pub const DEFAULT_TIMEOUT_MARKER: &str = "TO";

/// How the ingestor reacts to a timeout marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestMode {
    /// Any timeout marker aborts the run with
    /// [`AnalysisError::TimeoutSentinelEncountered`].
    Strict,
    /// Timeout markers become the configured sentinel duration.
    #[default]
    Lenient,
}

/// Classification of a pattern for which both algorithms timed out.
///
/// Either way the entry stays out of the ratio population and is counted in
/// the group's timeout count; the policy only decides the win counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BothTimedOutPolicy {
    /// Leave the entry out of both win counts.
    #[default]
    Exclude,
    /// Count the entry as a tie, which is an EMatch win.
    CountAsTie,
}

/// Which input sizes of each benchmark are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSelection {
    /// Only the largest size seen for each benchmark.
    #[default]
    Biggest,
    /// Every size.
    All,
}

/// Centralized analysis configuration.
///
/// # Example
///
/// ```
/// use gjbench_core::{AnalysisConfig, IngestMode, SizeSelection};
///
/// let config = AnalysisConfig::default()
///     .with_timeout_sentinel(60_000_000)
///     .with_ingest_mode(IngestMode::Strict)
///     .with_size_selection(SizeSelection::All);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Duration recorded for a timed-out trial, in microseconds.
    pub timeout_sentinel_micros: u64,
    /// Literal in the `time` column marking a timed-out trial.
    pub timeout_marker: String,
    /// Reaction to timeout markers.
    pub ingest_mode: IngestMode,
    /// Classification when both sides timed out.
    pub both_timed_out: BothTimedOutPolicy,
    /// Sizes compared per benchmark.
    pub size_selection: SizeSelection,
    /// GenericJoin variants compared against EMatch, in report order.
    pub variants: Vec<VariantIndex>,
}

impl AnalysisConfig {
    /// Sets the timeout sentinel.
    pub fn with_timeout_sentinel(mut self, micros: u64) -> Self {
        self.timeout_sentinel_micros = micros;
        self
    }

    /// Sets the timeout marker.
    pub fn with_timeout_marker(mut self, marker: impl Into<String>) -> Self {
        self.timeout_marker = marker.into();
        self
    }

    /// Sets the ingestion mode.
    pub fn with_ingest_mode(mut self, mode: IngestMode) -> Self {
        self.ingest_mode = mode;
        self
    }

    /// Sets the both-timed-out policy.
    pub fn with_both_timed_out(mut self, policy: BothTimedOutPolicy) -> Self {
        self.both_timed_out = policy;
        self
    }

    /// Sets the size selection.
    pub fn with_size_selection(mut self, selection: SizeSelection) -> Self {
        self.size_selection = selection;
        self
    }

    /// Sets the compared variants. Duplicates are dropped, order is kept.
    pub fn with_variants(mut self, variants: &[VariantIndex]) -> Self {
        self.variants.clear();
        for &variant in variants {
            if !self.variants.contains(&variant) {
                self.variants.push(variant);
            }
        }
        self
    }

    /// Checks the configuration for values that would make results meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] if:
    /// - the sentinel is zero
    /// - the marker is empty or would parse as a time
    /// - no variant is selected
    pub fn validate(&self) -> Result<()> {
        if self.timeout_sentinel_micros == 0 {
            return Err(AnalysisError::invalid_config(
                "timeout_sentinel_micros",
                "must be positive",
            ));
        }
        let marker = self.timeout_marker.trim();
        if marker.is_empty() {
            return Err(AnalysisError::invalid_config(
                "timeout_marker",
                "must not be empty",
            ));
        }
        if marker.parse::<i64>().is_ok() {
            return Err(AnalysisError::invalid_config(
                "timeout_marker",
                format!("'{}' is indistinguishable from a time value", marker),
            ));
        }
        if self.variants.is_empty() {
            return Err(AnalysisError::invalid_config(
                "variants",
                "at least one GenericJoin variant must be compared",
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            timeout_sentinel_micros: DEFAULT_TIMEOUT_SENTINEL_MICROS,
            timeout_marker: DEFAULT_TIMEOUT_MARKER.to_string(),
            ingest_mode: IngestMode::default(),
            both_timed_out: BothTimedOutPolicy::default(),
            size_selection: SizeSelection::default(),
            variants: VariantIndex::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.timeout_sentinel_micros, 4_000_000);
        assert_eq!(config.timeout_marker, "TO");
        assert_eq!(config.ingest_mode, IngestMode::Lenient);
        assert_eq!(config.size_selection, SizeSelection::Biggest);
        assert_eq!(config.variants, vec![VariantIndex::ZERO, VariantIndex::ONE]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_sentinel_rejected() {
        let err = AnalysisConfig::default()
            .with_timeout_sentinel(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("timeout_sentinel_micros"));
    }

    #[test]
    fn test_numeric_marker_rejected() {
        let config = AnalysisConfig::default().with_timeout_marker("-1");
        assert!(config.validate().is_err());

        let config = AnalysisConfig::default().with_timeout_marker("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_variants_dedups() {
        let config = AnalysisConfig::default().with_variants(&[
            VariantIndex::ONE,
            VariantIndex::ONE,
            VariantIndex::ZERO,
        ]);
        assert_eq!(config.variants, vec![VariantIndex::ONE, VariantIndex::ZERO]);

        let config = AnalysisConfig::default().with_variants(&[]);
        assert!(config.validate().is_err());
    }
}
