// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate generation: the orchestrator that turns a parsed document into
//! ranked definitions.
//!
//! # Modes
//!
//! - [`ScoringMode::Moi`]: every math object of interest (whole formula) is a
//!   subject. Candidates come from the sentences the formula, or any formula
//!   directly containing it, occurs in. Defining-phrase patterns override the
//!   statistical score.
//! - [`ScoringMode::Identifier`]: every bare identifier of the document is a
//!   subject. Candidates come from the sentences listing that identifier; no
//!   pattern override.
//!
//! # Output order
//!
//! MOI results are thresholded, ranked, optionally merged, and thresholded
//! again (merging dampens scores). Identifier results are produced per
//! identifier in sorted identifier order, each block merged or ranked, then
//! thresholded.
//!
//! The mapper is immutable after construction and `Send + Sync`; the only
//! state it writes is the relation cache of the document it is processing.

mod identifier;
mod moi;

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::contracts;
use crate::document::{DocumentOutput, ParsedWikiDocument};
use crate::error::Result;
use crate::math::FormulaId;
use crate::relation::{compare_score, Relation};
use crate::scoring::{self, Weights};
use crate::sentence::{DistanceOracle, ParseDistance, Sentence};

/// Which kind of subject the mapper scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Whole math objects of interest.
    Moi,
    /// Bare identifiers.
    Identifier,
}

impl ScoringMode {
    pub fn from_config(config: &Config) -> Self {
        if config.use_moi {
            ScoringMode::Moi
        } else {
            ScoringMode::Identifier
        }
    }
}

/// Scores definiens candidates for every subject of a document.
pub struct CreateCandidatesMapper {
    config: Config,
    weights: Weights,
    mode: ScoringMode,
    oracle: Box<dyn DistanceOracle>,
}

impl std::fmt::Debug for CreateCandidatesMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateCandidatesMapper")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl CreateCandidatesMapper {
    /// Build a mapper. Distances come from each sentence's own dependency edges.
    ///
    /// Rejects a config that [`Config::validate`] refuses, so the scoring path
    /// never divides by a zero weight total.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            weights: config.weights(),
            mode: ScoringMode::from_config(&config),
            config,
            oracle: Box::new(ParseDistance),
        })
    }

    /// Replace the dependency-distance source.
    pub fn with_distance_oracle(mut self, oracle: impl DistanceOracle + 'static) -> Self {
        self.oracle = Box::new(oracle);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Score every subject of `doc`.
    ///
    /// Never fails: a document with nothing to score yields no relations.
    pub fn process(&self, doc: &mut ParsedWikiDocument) -> DocumentOutput {
        let relations = match self.mode {
            ScoringMode::Moi => {
                info!(title = %doc.title, "Start MOI-definiens mapping");
                let ids: Vec<FormulaId> = doc
                    .formulae_in_order()
                    .into_iter()
                    .map(|tag| tag.id.clone())
                    .collect();
                self.analyze_formulae(doc, &ids)
            }
            ScoringMode::Identifier => {
                info!(title = %doc.title, "Start identifier-definiens mapping");
                self.identifier_relations(doc)
            }
        };

        DocumentOutput {
            title: doc.title.clone(),
            relations,
            identifiers: doc.identifiers.clone(),
        }
    }

    /// Analyze one formula together with its direct subexpressions.
    ///
    /// A formula missing from the containment graph is added as an isolated
    /// node first. Each analyzed formula's candidates are cached on its node.
    pub fn analyze_formula_with_dependencies(
        &self,
        doc: &mut ParsedWikiDocument,
        id: &FormulaId,
    ) -> Vec<Relation> {
        if !doc.graph.contains(id) {
            debug!(formula = %id, "formula not in the containment graph, adding it");
            doc.graph.add_formula(id);
        }
        let mut ids = vec![id.clone()];
        ids.extend(doc.graph.ingoing_edges(id));
        self.analyze_formulae(doc, &ids)
    }

    /// Generate, cache and finish the candidates of `ids` (MOI mode rules).
    fn analyze_formulae(&self, doc: &mut ParsedWikiDocument, ids: &[FormulaId]) -> Vec<Relation> {
        let mut tags: Vec<_> = ids
            .iter()
            .filter_map(|id| match doc.formulae.get(id) {
                Some(tag) if !tag.positions.is_empty() => Some(tag),
                Some(tag) => {
                    warn!(formula = %tag.content, "No positions found for formula");
                    None
                }
                None => {
                    warn!(formula = %id, "formula is not in the document library");
                    None
                }
            })
            .collect();
        tags.sort_by(|a, b| a.positions[0].cmp(&b.positions[0]).then_with(|| a.id.cmp(&b.id)));
        tags.dedup_by(|a, b| a.id == b.id);

        let generated: Vec<(FormulaId, Vec<Relation>)> = tags
            .iter()
            .map(|tag| (tag.id.clone(), self.moi_candidates(doc, tag)))
            .collect();

        let mut relations = Vec::new();
        for (id, candidates) in generated {
            relations.extend(candidates.iter().cloned());
            doc.graph.set_relations_for(&id, candidates);
        }
        self.finish_moi(relations)
    }

    /// Threshold, rank and (optionally) merge the flattened MOI candidates.
    fn finish_moi(&self, mut relations: Vec<Relation>) -> Vec<Relation> {
        contracts::check_scores_in_range(&relations);
        relations.retain(|r| r.score >= self.config.threshold);
        relations.sort_by(compare_score);

        if self.config.definition_merging {
            let before = relations.len();
            relations = scoring::self_merge(relations);
            contracts::check_merge_shrinks(before, relations.len());
            relations.retain(|r| r.score >= self.config.threshold);
        }

        contracts::check_threshold_respected(&relations, self.config.threshold);
        contracts::check_ranked(&relations);
        relations
    }

    /// Merge or rank one identifier's candidates, then threshold them.
    fn finish_identifier(&self, mut candidates: Vec<Relation>) -> Vec<Relation> {
        contracts::check_scores_in_range(&candidates);
        if self.config.definition_merging {
            let before = candidates.len();
            candidates = scoring::self_merge(candidates);
            contracts::check_merge_shrinks(before, candidates.len());
        } else {
            candidates.sort_by(compare_score);
        }
        candidates.retain(|r| r.score >= self.config.threshold);
        contracts::check_ranked(&candidates);
        candidates
    }
}

/// How often each lowercased definiens word occurs, and the largest count.
fn definiens_frequencies<'a>(
    sentences: impl IntoIterator<Item = &'a Sentence>,
) -> (HashMap<String, usize>, usize) {
    let mut counts = HashMap::new();
    for sentence in sentences {
        for word in sentence.nouns() {
            *counts.entry(word.to_lowercase()).or_insert(0usize) += 1;
        }
    }
    let max = counts.values().copied().max().unwrap_or(0);
    (counts, max)
}
