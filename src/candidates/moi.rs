// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! MOI candidates: definitions for whole math objects of interest.

use std::collections::HashSet;
use tracing::debug;

use super::{definiens_frequencies, CreateCandidatesMapper};
use crate::document::ParsedWikiDocument;
use crate::math::{resolve_formulae, MathTag};
use crate::pattern::PatternMatcher;
use crate::relation::Relation;
use crate::scoring::{self, PATTERN_SCORE};
use crate::sentence::Sentence;
use crate::types::{Position, Word};

/// A sentence the formula (or a formula directly containing it) occurs in.
struct Occurrence<'a> {
    /// Index into the document's sentence list.
    index: usize,
    sentence: &'a Sentence,
    positions: Vec<Position>,
    /// Tokens standing for those occurrences.
    math_words: Vec<&'a Word>,
}

/// Every sentence holding `tag` or one of its direct super-expressions.
fn find_sentences_with_formula<'a>(
    doc: &'a ParsedWikiDocument,
    tag: &'a MathTag,
) -> Vec<Occurrence<'a>> {
    let supers: Vec<&MathTag> = doc
        .graph
        .outgoing_edges(&tag.id)
        .iter()
        .filter_map(|id| doc.formulae.get(id))
        .collect();

    doc.sentences
        .iter()
        .enumerate()
        .filter_map(|(index, sentence)| {
            let mut positions = tag.positions_in_sentence(sentence);
            let mut math_words = tag.words_in_sentence(sentence);
            for sup in &supers {
                positions.extend(sup.positions_in_sentence(sentence));
                math_words.extend(sup.words_in_sentence(sentence));
            }
            if positions.is_empty() {
                return None;
            }
            positions.sort();
            positions.dedup();
            math_words.sort();
            math_words.dedup();
            Some(Occurrence {
                index,
                sentence,
                positions,
                math_words,
            })
        })
        .collect()
}

impl CreateCandidatesMapper {
    /// Unfiltered, unmerged candidates for one formula, definitions resolved.
    pub(super) fn moi_candidates(&self, doc: &ParsedWikiDocument, tag: &MathTag) -> Vec<Relation> {
        let Some(first) = tag.first_position() else {
            return Vec::new();
        };

        let occurrences = find_sentences_with_formula(doc, tag);
        if occurrences.is_empty() {
            return Vec::new();
        }

        let (frequencies, max_freq) = definiens_frequencies(occurrences.iter().map(|o| o.sentence));
        if frequencies.is_empty() {
            return Vec::new();
        }

        debug!(
            formula = %tag.content,
            first = %first,
            sentences = occurrences.len(),
            "sentences include (partially) the formula"
        );

        let matcher = PatternMatcher::for_formula(tag);
        let mut result = Vec::new();

        for occurrence in &occurrences {
            let sentence = occurrence.sentence;
            let pattern_hits: HashSet<String> = matcher
                .find_matches(&sentence.words)
                .into_iter()
                .map(|w| doc.tokens.resolve(w))
                .collect();

            for word in sentence.nouns() {
                let text = doc.tokens.resolve(word);
                let score = if pattern_hits.contains(&text) {
                    PATTERN_SCORE
                } else {
                    let distance = occurrence
                        .math_words
                        .iter()
                        .filter_map(|math| self.oracle.graph_distance(sentence, word, math))
                        .min();
                    let freq = frequencies.get(&word.to_lowercase()).copied().unwrap_or(0);
                    scoring::score(
                        &self.weights,
                        distance,
                        freq,
                        max_freq,
                        first.sentence_distance(&word.position),
                    )
                };

                result.push(Relation::for_formula(
                    tag.id.clone(),
                    &resolve_formulae(&text, &doc.formulae),
                    first.word as usize,
                    word.index(),
                    occurrence.index,
                    score,
                ));
            }
        }

        debug!(
            formula = %tag.content,
            positions = occurrences.iter().map(|o| o.positions.len()).sum::<usize>(),
            candidates = result.len(),
            max_freq,
            "generated candidates"
        );
        result
    }
}
