// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sentences and the dependency-distance capability.
//!
//! A sentence is an ordered list of tagged words plus whatever the extraction
//! stage learned about it: which formulae occur in it, which bare identifiers,
//! and the edges of its dependency parse. The scoring core asks one structural
//! question of a sentence: how far apart are two of its words in the parse?
//!
//! That question goes through [`DistanceOracle`] so the scorer never depends on
//! a particular parser. [`ParseDistance`] answers from the edges stored on the
//! sentence, which is what the batch binary uses.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::sync::OnceLock;

use crate::math::FormulaId;
use crate::types::{Position, Word};

/// One edge of a dependency parse, in token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub head: u32,
    pub dependent: u32,
}

impl DependencyEdge {
    pub fn new(head: u32, dependent: u32) -> Self {
        Self { head, dependent }
    }
}

/// A tokenized, tagged sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub words: Vec<Word>,
    /// Formulae occurring in this sentence.
    #[serde(default)]
    pub math: BTreeSet<FormulaId>,
    /// Bare identifiers occurring in this sentence (identifier mode).
    #[serde(default)]
    pub identifiers: BTreeSet<String>,
    /// Dependency parse edges. Treated as undirected for distances.
    #[serde(default)]
    pub dependencies: Vec<DependencyEdge>,
    #[serde(skip)]
    adjacency: OnceLock<Vec<Vec<usize>>>,
}

impl Sentence {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    pub fn with_math(mut self, ids: impl IntoIterator<Item = FormulaId>) -> Self {
        self.math.extend(ids);
        self
    }

    pub fn with_identifiers<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.identifiers.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_dependencies(mut self, edges: impl IntoIterator<Item = DependencyEdge>) -> Self {
        self.dependencies.extend(edges);
        self.adjacency = OnceLock::new();
        self
    }

    /// Definiens candidates: words carrying a noun or link tag, in text order.
    pub fn nouns(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(|w| w.is_definiens())
    }

    pub fn contains_identifier(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// (section, sentence) coordinate, taken from the first word.
    pub fn coordinate(&self) -> Option<(u32, u32)> {
        self.words
            .first()
            .map(|w| (w.position.section, w.position.sentence))
    }

    /// Does `position` fall inside this sentence?
    pub fn contains_position(&self, position: &Position) -> bool {
        self.coordinate() == Some((position.section, position.sentence))
    }

    /// Words sitting at any of the given positions.
    pub fn words_at<'a>(&'a self, positions: &'a [Position]) -> impl Iterator<Item = &'a Word> {
        self.words
            .iter()
            .filter(move |w| positions.binary_search(&w.position).is_ok())
    }

    /// Shortest path between two tokens in the dependency parse.
    ///
    /// Symmetric, `Some(0)` for a token and itself, `None` when the tokens are
    /// not connected (or the sentence carries no parse).
    pub fn graph_distance(&self, a: usize, b: usize) -> Option<u32> {
        if a == b {
            return Some(0);
        }
        let adjacency = self.adjacency.get_or_init(|| self.build_adjacency());
        if a >= adjacency.len() || b >= adjacency.len() {
            return None;
        }

        let mut dist: Vec<Option<u32>> = vec![None; adjacency.len()];
        let mut queue = VecDeque::new();
        dist[a] = Some(0);
        queue.push_back(a);

        while let Some(node) = queue.pop_front() {
            let d = dist[node].unwrap_or(0);
            for &next in &adjacency[node] {
                if dist[next].is_none() {
                    if next == b {
                        return Some(d + 1);
                    }
                    dist[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// First dependency edge pointing past the last token, if any.
    pub fn out_of_range_dependency(&self) -> Option<&DependencyEdge> {
        let len = self.words.len();
        self.dependencies
            .iter()
            .find(|e| e.head as usize >= len || e.dependent as usize >= len)
    }

    // Sized by the token count; edges outside it carry no usable distance.
    fn build_adjacency(&self) -> Vec<Vec<usize>> {
        let size = self.words.len();
        let mut adjacency = vec![Vec::new(); size];
        for edge in &self.dependencies {
            let (h, d) = (edge.head as usize, edge.dependent as usize);
            if h != d && h < size && d < size {
                adjacency[h].push(d);
                adjacency[d].push(h);
            }
        }
        adjacency
    }
}

/// Injected capability answering dependency distances between two words.
///
/// Implementations must be symmetric, return `Some(0)` for a word and itself,
/// and `None` when no path exists.
pub trait DistanceOracle: Send + Sync {
    fn graph_distance(&self, sentence: &Sentence, a: &Word, b: &Word) -> Option<u32>;
}

/// Answers from the dependency edges stored on the sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseDistance;

impl DistanceOracle for ParseDistance {
    fn graph_distance(&self, sentence: &Sentence, a: &Word, b: &Word) -> Option<u32> {
        sentence.graph_distance(a.index(), b.index())
    }
}
