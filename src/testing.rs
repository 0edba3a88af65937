//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::document::ParsedWikiDocument;
use crate::math::{FormulaId, MathTag};
use crate::sentence::{DependencyEdge, Sentence};
use crate::types::{Position, Word};

/// A word whose lemma is its lowercased surface text.
pub fn make_word(word: &str, pos_tag: &str, position: Position) -> Word {
    Word::new(word, &word.to_lowercase(), pos_tag, position)
}

/// A sentence in section 0 built from `(word, tag)` pairs; token `i` sits at
/// `(0, sentence, i)`. No dependency parse.
pub fn make_sentence(sentence: u32, tokens: &[(&str, &str)]) -> Sentence {
    let words = tokens
        .iter()
        .enumerate()
        .map(|(i, (word, tag))| make_word(word, tag, Position::new(0, sentence, i as u32)))
        .collect();
    Sentence::new(words)
}

/// Linear parse `0 - 1 - ... - (len-1)`: graph distance equals token distance.
pub fn chain_dependencies(len: usize) -> Vec<DependencyEdge> {
    (1..len)
        .map(|i| DependencyEdge::new(i as u32 - 1, i as u32))
        .collect()
}

/// [`make_sentence`] with a chain parse and the given formulae and identifiers
/// registered on it.
pub fn make_parsed_sentence(
    sentence: u32,
    tokens: &[(&str, &str)],
    math: &[&MathTag],
    identifiers: &[&str],
) -> Sentence {
    make_sentence(sentence, tokens)
        .with_dependencies(chain_dependencies(tokens.len()))
        .with_math(math.iter().map(|tag| tag.id.clone()))
        .with_identifiers(identifiers.iter().copied())
}

/// A formula occurring at `(0, sentence, word)` for each pair given.
pub fn make_formula(content: &str, at: &[(u32, u32)]) -> MathTag {
    let positions = at
        .iter()
        .map(|&(sentence, word)| Position::new(0, sentence, word))
        .collect();
    MathTag::new(content, positions)
}

/// "Let x denote the radius." with `x` registered as both a formula and an
/// identifier. The smallest document that exercises a pattern override.
pub fn radius_document() -> (ParsedWikiDocument, FormulaId) {
    let x = make_formula("x", &[(0, 1)]);
    let sentence = make_parsed_sentence(
        0,
        &[
            ("Let", "VB"),
            ("x", "MATH"),
            ("denote", "VB"),
            ("the", "DT"),
            ("radius", "NN"),
            (".", "."),
        ],
        &[&x],
        &["x"],
    );
    let mut doc = ParsedWikiDocument::new("Circle", vec![sentence]);
    doc.identifiers.insert("x".to_string(), 1);
    let id = doc.add_formula(x);
    (doc, id)
}

/// A synthetic document with `sentences` sentences, each mentioning one of a
/// handful of formulae next to a few nouns. Used for throughput measurements.
pub fn synthetic_document(sentences: u32) -> ParsedWikiDocument {
    const SYMBOLS: &[&str] = &["x", "y", "z", "E", "m"];
    const NOUNS: &[&str] = &["radius", "energy", "mass", "velocity", "circle", "length"];

    let mut formulae: Vec<MathTag> = SYMBOLS
        .iter()
        .map(|s| MathTag::new(s, Vec::new()))
        .collect();
    let mut parsed = Vec::with_capacity(sentences as usize);

    for s in 0..sentences {
        let sym = (s as usize) % SYMBOLS.len();
        let noun_a = NOUNS[(s as usize) % NOUNS.len()];
        let noun_b = NOUNS[(s as usize * 7 + 3) % NOUNS.len()];
        let tokens = [
            ("where", "WRB"),
            (SYMBOLS[sym], "MATH"),
            ("is", "VBZ"),
            ("the", "DT"),
            (noun_a, "NN"),
            ("of", "IN"),
            ("the", "DT"),
            (noun_b, "NN"),
        ];
        formulae[sym].positions.push(Position::new(0, s, 1));
        parsed.push(make_parsed_sentence(s, &tokens, &[], &[SYMBOLS[sym]]));
    }

    let mut doc = ParsedWikiDocument::new("Synthetic", Vec::new());
    for (i, sentence) in parsed.iter_mut().enumerate() {
        let sym = i % SYMBOLS.len();
        sentence.math.insert(formulae[sym].id.clone());
    }
    doc.sentences = parsed;
    for tag in formulae {
        *doc.identifiers.entry(tag.content.clone()).or_default() += tag.positions.len();
        if !tag.positions.is_empty() {
            doc.add_formula(tag);
        }
    }
    doc
}
