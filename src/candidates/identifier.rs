// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Identifier candidates: the legacy mode scoring bare identifiers.
//!
//! Distances here are plain token distances to the nearest occurrence of the
//! identifier in the sentence; the dependency parse is not consulted.

use tracing::warn;

use super::{definiens_frequencies, CreateCandidatesMapper};
use crate::document::ParsedWikiDocument;
use crate::relation::Relation;
use crate::scoring;
use crate::sentence::Sentence;

/// Index of the token equal to `identifier` closest to `word_index`.
///
/// Ties go to the earlier token. `None` when the identifier never appears as a
/// token of the sentence.
fn closest_identifier_position(sentence: &Sentence, identifier: &str, word_index: usize) -> Option<usize> {
    sentence
        .words
        .iter()
        .enumerate()
        .filter(|(_, w)| w.word == identifier)
        .map(|(i, _)| i)
        .min_by_key(|&i| i.abs_diff(word_index))
}

impl CreateCandidatesMapper {
    /// Relations for every identifier of the document, in identifier order.
    pub(super) fn identifier_relations(&self, doc: &ParsedWikiDocument) -> Vec<Relation> {
        if doc.identifiers.is_empty() {
            warn!(title = %doc.title, "No identifiers available");
            return Vec::new();
        }

        doc.identifiers
            .keys()
            .flat_map(|identifier| {
                let candidates = self.identifier_candidates(doc, identifier);
                self.finish_identifier(candidates)
            })
            .collect()
    }

    /// Unfiltered candidates for one identifier.
    pub(super) fn identifier_candidates(&self, doc: &ParsedWikiDocument, identifier: &str) -> Vec<Relation> {
        let sentences: Vec<(usize, &Sentence)> = doc
            .sentences
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains_identifier(identifier))
            .collect();
        if sentences.is_empty() {
            return Vec::new();
        }

        let (frequencies, max_freq) = definiens_frequencies(sentences.iter().map(|(_, s)| *s));
        if frequencies.is_empty() {
            return Vec::new();
        }

        let mut result = Vec::new();
        for (rank, (index, sentence)) in sentences.iter().enumerate() {
            for (word_index, word) in sentence.words.iter().enumerate() {
                if !word.is_definiens() {
                    continue;
                }
                let closest = closest_identifier_position(sentence, identifier, word_index);
                // no token for the identifier: measure from just before the sentence start
                let distance = match closest {
                    Some(pos) => pos.abs_diff(word_index),
                    None => word_index + 1,
                };
                let freq = frequencies.get(&word.to_lowercase()).copied().unwrap_or(0);
                let score = scoring::score(
                    &self.weights,
                    Some(distance as u32),
                    freq,
                    max_freq,
                    rank as u32,
                );

                result.push(Relation::for_identifier(
                    identifier,
                    &doc.tokens.resolve(word),
                    closest.unwrap_or(0),
                    word_index,
                    *index,
                    score,
                ));
            }
        }
        result
    }
}
