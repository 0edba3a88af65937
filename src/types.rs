// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a parsed document.
//!
//! Positions, words and the special-token tables that words can point into.
//! Everything here arrives already computed by the extraction stage; the
//! scoring core only reads it.
//!
//! # Invariants
//!
//! - **Position**: ordered lexicographically by (section, sentence, word). Word
//!   distance only exists between two positions in the same sentence.
//!
//! - **Word**: `position.word` is the token index inside its sentence. The
//!   dependency parse and the identifier-mode distance both count in these
//!   indices, so a word list that skips indices breaks graph distances.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// POSITION
// =============================================================================

/// Where a token sits in the document: (section, sentence, word).
///
/// The derived `Ord` is the lexicographic order the rest of the crate relies on
/// (the first entry of a formula's position list is its earliest occurrence).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub section: u32,
    pub sentence: u32,
    pub word: u32,
}

impl Position {
    pub fn new(section: u32, sentence: u32, word: u32) -> Self {
        Self {
            section,
            sentence,
            word,
        }
    }

    /// Are both positions inside the same sentence of the same section?
    #[inline]
    pub fn in_same_sentence(&self, other: &Position) -> bool {
        self.section == other.section && self.sentence == other.sentence
    }

    /// Token distance to `other`, or `None` when they are in different sentences.
    pub fn word_distance(&self, other: &Position) -> Option<u32> {
        if self.in_same_sentence(other) {
            Some(self.word.abs_diff(other.word))
        } else {
            None
        }
    }

    /// Distance in sentence indices; sections are ignored.
    #[inline]
    pub fn sentence_distance(&self, other: &Position) -> u32 {
        self.sentence.abs_diff(other.sentence)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.section, self.sentence, self.word)
    }
}

// =============================================================================
// PART-OF-SPEECH TAGS
// =============================================================================

/// Tag values the core cares about. Everything else is passed through untouched.
pub mod pos_tag {
    /// Placeholder for a wiki link; the surface text keys into the link table.
    pub const LINK: &str = "LNK";
    /// Placeholder for a citation; the surface text keys into the citation table.
    pub const CITATION: &str = "CITE";
    /// Placeholder for an inline math expression.
    pub const MATH: &str = "MATH";
    /// Determiner ("the", "a", "an").
    pub const DETERMINER: &str = "DT";

    /// Tags that make a word a definiens candidate: nouns, noun phrases, links.
    pub const DEFINIENS: &[&str] = &["NN", "NNS", "NNP", "NNPS", "NN+", "NP", "NP+", LINK];

    /// Is `tag` one of the definiens tags?
    #[inline]
    pub fn is_definiens(tag: &str) -> bool {
        DEFINIENS.contains(&tag)
    }
}

// =============================================================================
// WORDS
// =============================================================================

/// A tagged token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub word: String,
    pub lemma: String,
    pub pos_tag: String,
    pub position: Position,
}

impl Word {
    pub fn new(word: &str, lemma: &str, pos_tag: &str, position: Position) -> Self {
        Self {
            word: word.to_string(),
            lemma: lemma.to_string(),
            pos_tag: pos_tag.to_string(),
            position,
        }
    }

    /// Lowercased surface text. This is the key for frequency counting.
    pub fn to_lowercase(&self) -> String {
        self.word.to_lowercase()
    }

    /// Does the tag make this word a definiens candidate?
    #[inline]
    pub fn is_definiens(&self) -> bool {
        pos_tag::is_definiens(&self.pos_tag)
    }

    /// Token index inside the owning sentence.
    #[inline]
    pub fn index(&self) -> usize {
        self.position.word as usize
    }
}

impl PartialOrd for Word {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Word {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| self.word.cmp(&other.word))
    }
}

// =============================================================================
// SPECIAL TOKENS
// =============================================================================

/// Literal replacement text for a link or citation placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialToken {
    pub content: String,
}

impl SpecialToken {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

/// Document-wide lookup tables for placeholder tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialTokens {
    #[serde(default)]
    pub links: HashMap<String, SpecialToken>,
    #[serde(default)]
    pub citations: HashMap<String, SpecialToken>,
}

impl SpecialTokens {
    /// The text a word stands for: link or citation content for placeholders,
    /// the lemma for everything else.
    ///
    /// A placeholder whose key is missing from its table falls back to the
    /// surface text rather than inventing content.
    pub fn resolve(&self, word: &Word) -> String {
        let table = match word.pos_tag.as_str() {
            pos_tag::LINK => &self.links,
            pos_tag::CITATION => &self.citations,
            _ => return word.lemma.clone(),
        };
        table
            .get(&word.word)
            .map(|token| token.content.clone())
            .unwrap_or_else(|| word.word.clone())
    }
}
