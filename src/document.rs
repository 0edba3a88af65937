// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Documents at the crate boundary.
//!
//! [`DocumentInput`] is the wire shape produced by the extraction stage: plain
//! JSON, formulae referenced by content or id, containment as a list of pairs.
//! Converting it into a [`ParsedWikiDocument`] is where the input contract is
//! enforced. A formula with an empty or unsorted position list, a containment
//! pair pointing at an unknown formula, or a containment cycle fails loudly
//! here instead of quietly skewing scores later.
//!
//! [`DocumentOutput`] is what the mapper hands downstream.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::math::{FormulaId, MathTag, MathTagGraph};
use crate::relation::Relation;
use crate::sentence::Sentence;
use crate::types::{Position, SpecialTokens};

/// A formula as the extraction stage reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaInput {
    pub content: String,
    pub positions: Vec<Position>,
    #[serde(default)]
    pub identifiers: Vec<String>,
}

/// `sub` appears inside `sup`. Each side is a formula id or a formula's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainmentInput {
    pub sub: String,
    pub sup: String,
}

/// Wire shape of a parsed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    pub title: String,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub formulae: Vec<FormulaInput>,
    #[serde(default)]
    pub containment: Vec<ContainmentInput>,
    /// Legacy identifier frequencies (identifier -> count).
    #[serde(default)]
    pub identifiers: BTreeMap<String, usize>,
    #[serde(flatten)]
    pub tokens: SpecialTokens,
}

/// A document ready for scoring.
///
/// Everything except the graph's relation cache is read-only to the mapper.
#[derive(Debug, Clone, Default)]
pub struct ParsedWikiDocument {
    pub title: String,
    pub sentences: Vec<Sentence>,
    pub formulae: HashMap<FormulaId, MathTag>,
    pub graph: MathTagGraph,
    pub identifiers: BTreeMap<String, usize>,
    pub tokens: SpecialTokens,
}

impl ParsedWikiDocument {
    pub fn new(title: &str, sentences: Vec<Sentence>) -> Self {
        Self {
            title: title.to_string(),
            sentences,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let input: DocumentInput = serde_json::from_str(raw)?;
        Self::try_from(input)
    }

    /// Read, parse and validate a JSON document file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Add a formula to the library and the graph. A tag with content already
    /// in the library contributes its positions to the existing entry.
    pub fn add_formula(&mut self, tag: MathTag) -> FormulaId {
        let id = tag.id.clone();
        self.graph.add_formula(&id);
        match self.formulae.get_mut(&id) {
            Some(existing) => {
                existing.positions.extend(tag.positions);
                existing.positions.sort();
                existing.positions.dedup();
                for (ident, count) in tag.identifiers {
                    *existing.identifiers.entry(ident).or_default() += count;
                }
            }
            None => {
                self.formulae.insert(id.clone(), tag);
            }
        }
        id
    }

    /// Record that `sub` appears inside `sup`.
    pub fn add_containment(&mut self, sub: &FormulaId, sup: &FormulaId) -> Result<()> {
        self.graph.add_containment(sub, sup)
    }

    /// Formulae in order of first occurrence (id breaks ties).
    ///
    /// Tags without positions sort last; the mapper skips them.
    pub fn formulae_in_order(&self) -> Vec<&MathTag> {
        let mut tags: Vec<&MathTag> = self.formulae.values().collect();
        tags.sort_by(|a, b| {
            let key = |t: &MathTag| (t.first_position().is_none(), t.first_position().copied());
            key(a).cmp(&key(b)).then_with(|| a.id.cmp(&b.id))
        });
        tags
    }

    /// Look a formula up by id or by content.
    pub fn find_formula(&self, reference: &str) -> Option<&MathTag> {
        FormulaId::parse(reference)
            .and_then(|id| self.formulae.get(&id))
            .or_else(|| self.formulae.get(&FormulaId::for_content(reference)))
    }
}

impl TryFrom<DocumentInput> for ParsedWikiDocument {
    type Error = Error;

    fn try_from(input: DocumentInput) -> Result<Self> {
        for (index, sentence) in input.sentences.iter().enumerate() {
            if let Some(edge) = sentence.out_of_range_dependency() {
                return Err(Error::InvalidDocument(format!(
                    "sentence {} has {} tokens but a dependency edge {} -> {}",
                    index,
                    sentence.words.len(),
                    edge.head,
                    edge.dependent
                )));
            }
        }

        let mut doc = ParsedWikiDocument::new(&input.title, input.sentences);
        doc.identifiers = input.identifiers;
        doc.tokens = input.tokens;

        for formula in input.formulae {
            if formula.positions.is_empty() {
                return Err(Error::InvalidDocument(format!(
                    "formula '{}' has an empty position list",
                    formula.content
                )));
            }
            if formula.positions.windows(2).any(|w| w[0] > w[1]) {
                return Err(Error::InvalidDocument(format!(
                    "positions of formula '{}' are not in ascending order",
                    formula.content
                )));
            }
            let tag = MathTag::new(&formula.content, formula.positions)
                .with_identifiers(&formula.identifiers);
            doc.add_formula(tag);
        }

        for pair in &input.containment {
            let resolve = |reference: &str| {
                doc.find_formula(reference)
                    .map(|tag| tag.id.clone())
                    .ok_or_else(|| {
                        Error::InvalidDocument(format!(
                            "containment refers to unknown formula '{}'",
                            reference
                        ))
                    })
            };
            let sub = resolve(&pair.sub)?;
            let sup = resolve(&pair.sup)?;
            doc.add_containment(&sub, &sup)?;
        }

        crate::contracts::check_document_well_formed(&doc);
        Ok(doc)
    }
}

/// What the mapper produces for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutput {
    pub title: String,
    pub relations: Vec<Relation>,
    /// Identifier frequencies, passed through for identifier-mode consumers.
    pub identifiers: BTreeMap<String, usize>,
}
