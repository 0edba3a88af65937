//! Identifier mode: bare identifiers as subjects, token distances.

use crate::common::{
    definitions, find_relation, identifier_config, load_fixture, make_parsed_sentence,
};
use definiens::{score, Config, CreateCandidatesMapper, ParsedWikiDocument, Subject};

#[test]
fn test_circle_identifiers_in_key_order() {
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(identifier_config()).unwrap().process(&mut doc);

    // "A" sorts before "r"; each identifier's block is ranked on its own
    let subjects: Vec<&str> = out.relations.iter().map(|r| r.subject.name()).collect();
    let first_r = subjects.iter().position(|s| *s == "r").expect("relations for r");
    assert!(subjects[..first_r].iter().all(|s| *s == "A"));
    assert!(subjects[first_r..].iter().all(|s| *s == "r"));
    assert!(out
        .relations
        .iter()
        .all(|r| matches!(r.subject, Subject::Identifier(_))));
}

#[test]
fn test_circle_token_distances() {
    let config = identifier_config();
    let weights = config.weights();
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);

    let radius = find_relation(&out.relations, "r", "radius").expect("r -> radius");
    assert!((radius.score - score(&weights, Some(3), 1, 1, 0)).abs() < 1e-12);
    assert_eq!(radius.identifier_position, 1);

    let circle = find_relation(&out.relations, "r", "circle").expect("r -> circle");
    assert!((circle.score - score(&weights, Some(6), 1, 1, 0)).abs() < 1e-12);

    // no bare "r" token in the second sentence: measured from before its start
    let area = find_relation(&out.relations, "r", "area").expect("r -> area");
    assert_eq!(area.identifier_position, 0);
    assert_eq!(area.sentence, 1);
    assert!((area.score - score(&weights, Some(2), 1, 1, 1)).abs() < 1e-12);

    let area = find_relation(&out.relations, "A", "area").expect("A -> area");
    assert!((area.score - score(&weights, Some(1), 1, 1, 0)).abs() < 1e-12);
}

#[test]
fn test_identifier_table_is_echoed() {
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(identifier_config()).unwrap().process(&mut doc);
    assert_eq!(out.identifiers.get("r"), Some(&2));
    assert_eq!(out.identifiers.get("A"), Some(&1));
}

#[test]
fn test_sentence_distance_is_rank_among_matches() {
    // x is listed on sentences 0 and 3 only; sentence 3 is the second match
    let s = |i: u32, ids: &[&str]| {
        make_parsed_sentence(i, &[("x", "MATH"), ("is", "VBZ"), ("mass", "NN")], &[], ids)
    };
    let mut doc = ParsedWikiDocument::new("t", vec![s(0, &["x"]), s(1, &[]), s(2, &[]), s(3, &["x"])]);
    doc.identifiers.insert("x".into(), 2);

    let config = identifier_config();
    let weights = config.weights();
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);

    let later = out
        .relations
        .iter()
        .find(|r| r.sentence == 3)
        .expect("candidate from sentence 3");
    assert!((later.score - score(&weights, Some(2), 2, 2, 1)).abs() < 1e-12);
    assert!(out.relations.iter().all(|r| r.sentence == 0 || r.sentence == 3));
}

#[test]
fn test_merging_folds_case_variants() {
    let s0 = make_parsed_sentence(0, &[("x", "MATH"), ("Radius", "NN")], &[], &["x"]);
    let s1 = make_parsed_sentence(1, &[("x", "MATH"), ("radius", "NN")], &[], &["x"]);
    let mut doc = ParsedWikiDocument::new("t", vec![s0, s1]);
    doc.identifiers.insert("x".into(), 2);

    let config = Config {
        definition_merging: true,
        threshold: 0.0,
        ..Config::default()
    };
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);
    assert_eq!(out.relations.len(), 1);
    assert_eq!(out.relations[0].definition.to_lowercase(), "radius");
}

#[test]
fn test_no_identifiers_means_no_relations() {
    let mut doc = load_fixture("circle.json");
    doc.identifiers.clear();
    let out = CreateCandidatesMapper::new(identifier_config()).unwrap().process(&mut doc);
    assert!(out.relations.is_empty());
    assert!(out.identifiers.is_empty());
}

#[test]
fn test_identifier_without_sentences_has_no_relations() {
    let mut doc = load_fixture("circle.json");
    doc.identifiers.insert("q".into(), 1);
    let out = CreateCandidatesMapper::new(identifier_config()).unwrap().process(&mut doc);
    assert!(definitions(&out.relations, "q").is_empty());
}
