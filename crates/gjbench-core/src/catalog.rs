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

//! Per-pattern metadata (arity, variable count) used to annotate entries.

use crate::error::{AnalysisError, Result};
use crate::model::PatternText;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Shape of one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternMetadata {
    /// Operands of the root operator.
    pub arity: usize,
    /// Distinct pattern variables.
    pub variables: usize,
}

impl PatternMetadata {
    /// Creates metadata from explicit values.
    pub fn new(arity: usize, variables: usize) -> Self {
        Self { arity, variables }
    }

    /// Derives metadata from an s-expression pattern.
    ///
    /// `variables` counts distinct `?name` tokens. `arity` counts the
    /// operands of the root list, so an atom has arity 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use gjbench_core::PatternMetadata;
    ///
    /// let meta = PatternMetadata::infer("(+ ?a (* ?b ?a))");
    /// assert_eq!(meta.arity, 2);
    /// assert_eq!(meta.variables, 2);
    ///
    /// assert_eq!(PatternMetadata::infer("?x").arity, 0);
    /// ```
    pub fn infer(text: &str) -> Self {
        Self {
            arity: root_arity(text),
            variables: distinct_variables(text),
        }
    }
}

impl fmt::Display for PatternMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arity={}, variables={}", self.arity, self.variables)
    }
}

fn distinct_variables(text: &str) -> usize {
    let mut names = BTreeSet::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c != '?' {
            continue;
        }
        let mut end = start + 1;
        while let Some(&(idx, next)) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                end = idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        if end > start + 1 {
            names.insert(&text[start + 1..end]);
        }
    }
    names.len()
}

fn root_arity(text: &str) -> usize {
    let text = text.trim();
    if !text.starts_with('(') {
        return 0;
    }

    let mut depth = 0usize;
    let mut elements = 0usize;
    let mut in_atom = false;
    for c in text.chars() {
        match c {
            '(' => {
                if depth == 1 {
                    elements += 1;
                }
                depth += 1;
                in_atom = false;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                in_atom = false;
                if depth == 0 {
                    break;
                }
            }
            c if c.is_whitespace() => in_atom = false,
            _ => {
                if depth == 1 && !in_atom {
                    elements += 1;
                }
                in_atom = true;
            }
        }
    }
    // The first element is the operator.
    elements.saturating_sub(1)
}

/// Metadata for a pattern, with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMetadata {
    /// The metadata.
    pub metadata: PatternMetadata,
    /// `true` if it was derived from the pattern text rather than the catalog.
    pub inferred: bool,
}

/// Pattern text to metadata table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternCatalog {
    entries: BTreeMap<PatternText, PatternMetadata>,
}

impl PatternCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern. Re-inserting identical metadata is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ConflictingPatternMetadata`] if the pattern is
    /// already present with different metadata.
    pub fn insert(&mut self, pattern: PatternText, metadata: PatternMetadata) -> Result<()> {
        if let Some(existing) = self.entries.get(&pattern) {
            if *existing != metadata {
                return Err(AnalysisError::ConflictingPatternMetadata {
                    pattern: pattern.to_string(),
                    existing: existing.to_string(),
                    conflicting: metadata.to_string(),
                });
            }
            return Ok(());
        }
        self.entries.insert(pattern, metadata);
        Ok(())
    }

    /// Looks up a pattern.
    pub fn get(&self, pattern: &str) -> Option<&PatternMetadata> {
        self.entries.get(pattern)
    }

    /// Catalogued metadata, or metadata inferred from the text.
    pub fn resolve(&self, pattern: &str) -> ResolvedMetadata {
        match self.get(pattern) {
            Some(metadata) => ResolvedMetadata {
                metadata: *metadata,
                inferred: false,
            },
            None => ResolvedMetadata {
                metadata: PatternMetadata::infer(pattern),
                inferred: true,
            },
        }
    }

    /// Number of catalogued patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates patterns in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&PatternText, &PatternMetadata)> {
        self.entries.iter()
    }
}
