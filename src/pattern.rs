// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Defining-phrase patterns.
//!
//! Some sentences say outright what a symbol means: "let x denote the radius",
//! "where r is the radius", "E is the energy". When one of these phrases links
//! a noun to the target, that noun is a definition and gets the maximum score
//! regardless of the statistics.
//!
//! A pattern is a short sequence of elements matched against consecutive
//! tokens. `T` is the target, `DEF` a definiens-tagged word (the capture), `[DT]`
//! an optional determiner:
//!
//! ```text
//! DEF T                        T DEF
//! T denote(s) [DT] DEF         T is|are [DT] DEF
//! T is|are denoted by [DT] DEF
//! let T be [DT] DEF            let T denote [DT] DEF
//! let T be denoted by [DT] DEF
//! where T is|are [DT] DEF      where T denote(s) [DT] DEF
//! ```
//!
//! Matching is a pure function of the words: same sentence, same result.

use std::collections::BTreeSet;

use crate::math::MathTag;
use crate::types::{pos_tag, Word};

/// One slot of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    /// The symbol being defined.
    Target,
    /// A definiens-tagged word; this is what a match captures.
    Definiens,
    /// Any of these keywords, compared case-insensitively.
    Keyword(&'static [&'static str]),
    /// An optional determiner.
    OptionalDeterminer,
}

use Element::{Definiens as DEF, OptionalDeterminer as DT, Target as T};

const IS: Element = Element::Keyword(&["is", "are"]);
const DENOTES: Element = Element::Keyword(&["denote", "denotes"]);
const DENOTE: Element = Element::Keyword(&["denote"]);
const DENOTED: Element = Element::Keyword(&["denoted"]);
const BY: Element = Element::Keyword(&["by"]);
const BE: Element = Element::Keyword(&["be"]);
const LET: Element = Element::Keyword(&["let"]);
const WHERE: Element = Element::Keyword(&["where"]);

const PATTERNS: &[&[Element]] = &[
    &[DEF, T],
    &[T, DEF],
    &[T, DENOTES, DT, DEF],
    &[T, IS, DT, DEF],
    &[T, IS, DENOTED, BY, DT, DEF],
    &[LET, T, BE, DT, DEF],
    &[LET, T, DENOTE, DT, DEF],
    &[LET, T, BE, DENOTED, BY, DT, DEF],
    &[WHERE, T, IS, DT, DEF],
    &[WHERE, T, DENOTES, DT, DEF],
];

/// What the `T` slot matches.
#[derive(Debug, Clone, PartialEq)]
enum Target {
    /// A formula: a token whose text is the content or the placeholder id.
    Formula(MathTag),
    /// A bare identifier: a token whose text equals it.
    Identifier(String),
}

impl Target {
    fn matches(&self, word: &Word) -> bool {
        match self {
            Target::Formula(tag) => tag.matches_text(&word.word),
            Target::Identifier(text) => word.word == *text,
        }
    }
}

/// Finds the definiens words a sentence explicitly ties to one target.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    target: Target,
}

impl PatternMatcher {
    /// Matcher for a math object of interest.
    pub fn for_formula(tag: &MathTag) -> Self {
        Self {
            target: Target::Formula(tag.clone()),
        }
    }

    /// Matcher for a bare identifier.
    pub fn for_identifier(identifier: &str) -> Self {
        Self {
            target: Target::Identifier(identifier.to_string()),
        }
    }

    /// Definiens words of `words` that satisfy any pattern, in text order.
    pub fn find_matches<'a>(&self, words: &'a [Word]) -> BTreeSet<&'a Word> {
        let mut hits = BTreeSet::new();
        for start in 0..words.len() {
            for pattern in PATTERNS {
                self.match_at(pattern, &words[start..], &mut hits);
            }
        }
        hits
    }

    /// Try `pattern` anchored at the first word of `words`.
    fn match_at<'a>(&self, pattern: &[Element], words: &'a [Word], hits: &mut BTreeSet<&'a Word>) {
        let Some((element, rest)) = pattern.split_first() else {
            return;
        };
        if *element == DT {
            // the determiner may be left out
            self.match_at(rest, words, hits);
        }

        let Some((word, tail)) = words.split_first() else {
            return;
        };
        let ok = match element {
            Element::Target => self.target.matches(word),
            Element::Definiens => word.is_definiens(),
            Element::Keyword(options) => options.iter().any(|k| word.word.eq_ignore_ascii_case(k)),
            Element::OptionalDeterminer => word.pos_tag == pos_tag::DETERMINER,
        };
        if !ok {
            return;
        }
        if rest.is_empty() {
            if *element == DEF {
                hits.insert(word);
            }
            return;
        }
        if *element == DEF && rest == [T] {
            // leading capture: only keep it if the target follows
            if tail.first().is_some_and(|next| self.target.matches(next)) {
                hits.insert(word);
            }
            return;
        }
        self.match_at(rest, tail, hits);
    }
}
