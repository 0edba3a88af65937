// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Math expression occurrences.
//!
//! A `MathTag` is one logical expression and every place it occurs. Identity is
//! the content: two tags with the same content get the same [`FormulaId`], and
//! the formula library is keyed by that id. Prose refers to formulae through
//! `FORMULA_xxxxxxxx` placeholder tokens carrying the same id, which is how
//! definition texts get their math back (see [`resolve_formulae`]).

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;

use crate::sentence::Sentence;
use crate::types::{Position, Word};

/// Prefix of every formula id and placeholder token.
pub const FORMULA_PREFIX: &str = "FORMULA_";

/// Matches a formula placeholder token inside free text.
pub static FORMULA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFORMULA_[0-9a-f]{8}\b").expect("static pattern"));

/// Content-derived formula identifier (`FORMULA_` + CRC32 of the content).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormulaId(String);

impl FormulaId {
    /// Derive the id for a piece of content. Same content, same id.
    pub fn for_content(content: &str) -> Self {
        FormulaId(format!(
            "{}{:08x}",
            FORMULA_PREFIX,
            crc32fast::hash(content.as_bytes())
        ))
    }

    /// Wrap an id string that already has the placeholder shape.
    pub fn parse(raw: &str) -> Option<Self> {
        let hex = raw.strip_prefix(FORMULA_PREFIX)?;
        let valid = hex.len() == 8 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        valid.then(|| FormulaId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormulaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One math expression and all its occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathTag {
    pub id: FormulaId,
    pub content: String,
    /// Ascending. First entry is the earliest occurrence.
    pub positions: Vec<Position>,
    /// Identifier multiset of the expression (identifier -> count).
    #[serde(default)]
    pub identifiers: BTreeMap<String, usize>,
}

impl MathTag {
    /// Build a tag. Positions are sorted and deduplicated here so the
    /// "first entry is the earliest" rule holds no matter what the caller passed.
    pub fn new(content: &str, mut positions: Vec<Position>) -> Self {
        positions.sort();
        positions.dedup();
        Self {
            id: FormulaId::for_content(content),
            content: content.to_string(),
            positions,
            identifiers: BTreeMap::new(),
        }
    }

    pub fn with_identifiers<S: AsRef<str>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        for id in ids {
            *self.identifiers.entry(id.as_ref().to_string()).or_default() += 1;
        }
        self
    }

    /// Earliest occurrence, if the tag has any.
    pub fn first_position(&self) -> Option<&Position> {
        self.positions.first()
    }

    /// Occurrences of this tag inside `sentence`.
    pub fn positions_in_sentence(&self, sentence: &Sentence) -> Vec<Position> {
        self.positions
            .iter()
            .filter(|p| sentence.contains_position(p))
            .copied()
            .collect()
    }

    /// The sentence tokens standing for this tag's occurrences.
    pub fn words_in_sentence<'a>(&'a self, sentence: &'a Sentence) -> Vec<&'a Word> {
        sentence.words_at(&self.positions).collect()
    }

    /// Does a token's text denote this tag (its content or its placeholder id)?
    pub fn matches_text(&self, text: &str) -> bool {
        text == self.content || text == self.id.as_str()
    }
}

/// Replace every known `FORMULA_xxxxxxxx` token in `text` with the formula's
/// content. Unknown ids stay verbatim; text without tokens comes back unchanged.
pub fn resolve_formulae(text: &str, library: &HashMap<FormulaId, MathTag>) -> String {
    FORMULA_PATTERN
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            FormulaId::parse(token)
                .and_then(|id| library.get(&id))
                .map(|tag| tag.content.clone())
                .unwrap_or_else(|| token.to_string())
        })
        .into_owned()
}
