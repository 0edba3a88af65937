// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Folding duplicate candidates into one.
//!
//! The same (subject, definition) pair tends to show up several times: once
//! per sentence the word appears in. Repetition is evidence, so duplicates are
//! folded into the first member of their group with an exponentially decaying
//! bonus, and every surviving entry is first dampened so that an unconfirmed
//! singleton ends up below a candidate that was seen more than once.
//!
//! ```text
//! head.score  = 0.722 · head.score
//! head.score += dup_n.score · 2^(-1.3·n)      for the n-th member, n ≥ 2
//! ```
//!
//! **Invariant**: output length ≤ input length, and the set of
//! (subject name, lowercased definition) keys is exactly the input's.
//!
//! Both constants are empirical. Keep them as they are: rankings downstream
//! were tuned against these exact values.

use crate::relation::{compare_name_score, compare_score, Relation};

/// Every group head (singletons included) is scaled by this factor.
pub const MERGE_DAMPENING: f64 = 0.722;

/// Exponent slope of the duplicate bonus: the n-th member adds `2^(-1.3·n)` of its score.
pub const MERGE_DECAY: f64 = 1.3;

/// Weight of the `multiplicity`-th member of a group (`multiplicity ≥ 2`).
#[inline]
pub fn decay_factor(multiplicity: u32) -> f64 {
    2f64.powf(-MERGE_DECAY * multiplicity as f64)
}

/// Fold duplicates and return the survivors ranked by score.
///
/// Single forward pass over the grouped order; the input is consumed, never
/// edited in place while it is being walked.
pub fn self_merge(mut candidates: Vec<Relation>) -> Vec<Relation> {
    candidates.sort_by(compare_name_score);

    let mut merged: Vec<Relation> = Vec::with_capacity(candidates.len());
    let mut last_key: Option<(String, String)> = None;
    let mut multiplicity = 1u32;

    for mut relation in candidates {
        let (name, definition) = relation.merge_key();
        let key = (name.to_string(), definition);

        match merged.last_mut() {
            Some(head) if last_key.as_ref() == Some(&key) => {
                multiplicity += 1;
                head.score += relation.score * decay_factor(multiplicity);
            }
            _ => {
                multiplicity = 1;
                relation.score *= MERGE_DAMPENING;
                merged.push(relation);
                last_key = Some(key);
            }
        }
    }

    merged.sort_by(compare_score);
    merged
}
