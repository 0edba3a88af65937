//! Runtime contracts for the data model and the scorer's output.
//!
//! Debug-mode assertions of the properties the rest of the crate relies on.
//! They:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Catch a broken document or a scoring regression at the point it happens
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function             | Property                                        |
//! |-------------------------------|-------------------------------------------------|
//! | `check_positions_sorted`      | a formula's first position is its earliest one  |
//! | `check_graph_acyclic`         | containment never loops                         |
//! | `check_document_well_formed`  | both of the above, for every formula            |
//! | `check_scores_in_range`       | every unmerged score lies in `[0, 1]`           |
//! | `check_threshold_respected`   | nothing below the threshold reaches the output  |
//! | `check_ranked`                | output is in score-descending order             |
//! | `check_merge_shrinks`         | merging never adds entries                      |
//!
//! # Usage
//!
//! ```ignore
//! use definiens::contracts::*;
//!
//! // In debug builds, this panics if the invariant is violated
//! check_threshold_respected(&relations, config.threshold);
//!
//! // In release builds, this is a no-op
//! ```

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// The merge constants keep a lone candidate below a confirmed one.
const _: () = {
    // INVARIANT: dampening shrinks, never grows
    assert!(crate::scoring::MERGE_DAMPENING < 1.0);
    assert!(crate::scoring::MERGE_DAMPENING > 0.0);
    // INVARIANT: the duplicate bonus decays
    assert!(crate::scoring::MERGE_DECAY > 0.0);
    // INVARIANT: a pattern hit is the best possible score
    assert!(crate::scoring::PATTERN_SCORE == 1.0);
};

use crate::document::ParsedWikiDocument;
use crate::math::{MathTag, MathTagGraph};
use crate::relation::{compare_score, Relation};

// ============================================================================
// DOCUMENT CONTRACTS
// ============================================================================

/// Check that a formula's positions are non-empty and ascending.
///
/// # Panics (debug builds only)
/// Panics if the list is empty or any adjacent pair is out of order.
#[inline]
pub fn check_positions_sorted(tag: &MathTag) {
    debug_assert!(
        !tag.positions.is_empty(),
        "Contract violation: formula '{}' has no positions",
        tag.content
    );
    for (i, pair) in tag.positions.windows(2).enumerate() {
        debug_assert!(
            pair[0] <= pair[1],
            "Contract violation: positions of '{}' unsorted at {}: {} > {}",
            tag.content,
            i,
            pair[0],
            pair[1]
        );
    }
}

/// Check that the containment graph is a DAG.
#[inline]
pub fn check_graph_acyclic(graph: &MathTagGraph) {
    debug_assert!(
        graph.is_acyclic(),
        "Contract violation: containment graph has a cycle"
    );
}

/// Check every formula of a freshly validated document.
#[inline]
pub fn check_document_well_formed(doc: &ParsedWikiDocument) {
    for tag in doc.formulae.values() {
        check_positions_sorted(tag);
        debug_assert!(
            doc.graph.contains(&tag.id),
            "Contract violation: formula '{}' missing from the graph",
            tag.content
        );
    }
    check_graph_acyclic(&doc.graph);
}

// ============================================================================
// OUTPUT CONTRACTS
// ============================================================================

/// Check that raw (unmerged) scores lie in `[0, 1]`.
///
/// Merged scores can exceed the dampened value, so this only holds before
/// [`crate::scoring::self_merge`].
#[inline]
pub fn check_scores_in_range(relations: &[Relation]) {
    for (i, rel) in relations.iter().enumerate() {
        debug_assert!(
            (0.0..=1.0).contains(&rel.score),
            "Contract violation: relations[{}] ({} -> {}) score {} outside [0, 1]",
            i,
            rel.subject.name(),
            rel.definition,
            rel.score
        );
    }
}

/// Check that no relation below `threshold` made it through.
#[inline]
pub fn check_threshold_respected(relations: &[Relation], threshold: f64) {
    for (i, rel) in relations.iter().enumerate() {
        debug_assert!(
            rel.score >= threshold,
            "Contract violation: relations[{}] score {} < threshold {}",
            i,
            rel.score,
            threshold
        );
    }
}

/// Check that relations are in ranking order.
#[inline]
pub fn check_ranked(relations: &[Relation]) {
    for i in 1..relations.len() {
        debug_assert!(
            compare_score(&relations[i - 1], &relations[i]).is_le(),
            "Contract violation: relations[{}] score {} ranked above relations[{}] score {}",
            i,
            relations[i].score,
            i - 1,
            relations[i - 1].score
        );
    }
}

/// Check that merging did not grow the list.
#[inline]
pub fn check_merge_shrinks(before: usize, after: usize) {
    debug_assert!(
        after <= before,
        "Contract violation: merge produced {} relations from {}",
        after,
        before
    );
}
