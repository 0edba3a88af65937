// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scored candidate links between a math subject and a definiens.
//!
//! Two orderings live here and they are not interchangeable:
//!
//! - [`compare_score`] is the ranking order: score descending, with a fixed
//!   chain of tiebreakers so equal scores still sort the same way every run.
//! - [`compare_name_score`] groups duplicates for the merge pass: subject name,
//!   then lowercased definition, then score descending so the strongest member
//!   of a group comes first.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::math::FormulaId;

/// What a relation defines: a whole formula or a bare identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Subject {
    Formula(FormulaId),
    Identifier(String),
}

impl Subject {
    /// Name used for grouping and display.
    pub fn name(&self) -> &str {
        match self {
            Subject::Formula(id) => id.as_str(),
            Subject::Identifier(text) => text,
        }
    }
}

/// A candidate definition for a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub subject: Subject,
    pub definition: String,
    /// Token index of the subject occurrence the candidate was measured against.
    pub identifier_position: usize,
    /// Token index of the definiens word.
    pub word_position: usize,
    /// Index of the owning sentence in the document.
    pub sentence: usize,
    pub score: f64,
}

impl Relation {
    pub fn for_formula(
        id: FormulaId,
        definition: &str,
        identifier_position: usize,
        word_position: usize,
        sentence: usize,
        score: f64,
    ) -> Self {
        Self {
            subject: Subject::Formula(id),
            definition: definition.to_string(),
            identifier_position,
            word_position,
            sentence,
            score,
        }
    }

    pub fn for_identifier(
        identifier: &str,
        definition: &str,
        identifier_position: usize,
        word_position: usize,
        sentence: usize,
        score: f64,
    ) -> Self {
        Self {
            subject: Subject::Identifier(identifier.to_string()),
            definition: definition.to_string(),
            identifier_position,
            word_position,
            sentence,
            score,
        }
    }

    /// Merge key: (subject name, lowercased definition).
    pub fn merge_key(&self) -> (&str, String) {
        (self.subject.name(), self.definition.to_lowercase())
    }
}

/// Ranking order: higher score first.
///
/// Ties fall through subject name, definition, identifier position and word
/// position, so sorting is total and independent of input order.
pub fn compare_score(a: &Relation, b: &Relation) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.subject.name().cmp(b.subject.name()))
        .then_with(|| a.definition.cmp(&b.definition))
        .then_with(|| a.identifier_position.cmp(&b.identifier_position))
        .then_with(|| a.word_position.cmp(&b.word_position))
        .then_with(|| a.sentence.cmp(&b.sentence))
}

/// Grouping order for the merge pass: name, lowercased definition, score desc.
pub fn compare_name_score(a: &Relation, b: &Relation) -> Ordering {
    a.subject
        .name()
        .cmp(b.subject.name())
        .then_with(|| a.definition.to_lowercase().cmp(&b.definition.to_lowercase()))
        .then_with(|| compare_score(a, b))
}
