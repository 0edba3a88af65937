//! Merge pass property tests.

use definiens::scoring::{decay_factor, MERGE_DAMPENING};
use definiens::{self_merge, Relation};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Relations over a small vocabulary so duplicates are common.
fn relations_strategy() -> impl Strategy<Value = Vec<Relation>> {
    let subjects = prop::sample::select(vec!["x", "y", "E"]);
    let definitions = prop::sample::select(vec!["radius", "Radius", "mass", "energy", "RADIUS"]);
    prop::collection::vec(
        (subjects, definitions, 0usize..10, 0usize..10, 0.0f64..=1.0),
        0..30,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(s, d, word, sentence, score)| Relation::for_identifier(s, d, 0, word, sentence, score))
            .collect()
    })
}

fn keys(relations: &[Relation]) -> BTreeSet<(String, String)> {
    relations
        .iter()
        .map(|r| {
            let (name, definition) = r.merge_key();
            (name.to_string(), definition)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: merging never grows the list.
    #[test]
    fn prop_merge_never_grows(relations in relations_strategy()) {
        let len = relations.len();
        prop_assert!(self_merge(relations).len() <= len);
    }

    /// Property: one survivor per (subject, lowercased definition), none lost.
    #[test]
    fn prop_merge_keeps_one_per_key(relations in relations_strategy()) {
        let before = keys(&relations);
        let merged = self_merge(relations);
        prop_assert_eq!(merged.len(), before.len());
        prop_assert_eq!(keys(&merged), before);
    }

    /// Property: the result is ranked.
    #[test]
    fn prop_merge_output_ranked(relations in relations_strategy()) {
        let merged = self_merge(relations);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    /// Property: a group's score is its dampened best plus decayed followers.
    #[test]
    fn prop_merge_group_arithmetic(scores in prop::collection::vec(0.0f64..=1.0, 1..8)) {
        let relations: Vec<Relation> = scores
            .iter()
            .map(|&s| Relation::for_identifier("x", "radius", 0, 0, 0, s))
            .collect();
        let merged = self_merge(relations);
        prop_assert_eq!(merged.len(), 1);

        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        let expected = sorted[0] * MERGE_DAMPENING
            + sorted
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, s)| s * decay_factor(i as u32 + 1))
                .sum::<f64>();
        prop_assert!((merged[0].score - expected).abs() < 1e-9);
    }

    /// Property: merging is insensitive to input order.
    #[test]
    fn prop_merge_order_independent(relations in relations_strategy()) {
        let mut reversed = relations.clone();
        reversed.reverse();
        let a = self_merge(relations);
        let b = self_merge(reversed);
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(x.merge_key(), y.merge_key());
            prop_assert!((x.score - y.score).abs() < 1e-12);
        }
    }
}

#[test]
fn test_singleton_is_dampened() {
    let merged = self_merge(vec![Relation::for_identifier("x", "radius", 0, 0, 0, 1.0)]);
    assert_eq!(merged[0].score, MERGE_DAMPENING);
}
