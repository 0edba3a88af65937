//! MOI mode: whole formulae as subjects, dependency distances.

use crate::common::{
    assert_ranked, definitions, find_relation, load_fixture, make_formula, make_parsed_sentence,
    moi_config,
};
use definiens::{score, Config, CreateCandidatesMapper, FormulaId, ParsedWikiDocument};

fn id(content: &str) -> String {
    FormulaId::for_content(content).to_string()
}

// ============================================================================
// CIRCLE FIXTURE
// ============================================================================

#[test]
fn test_circle_pattern_hits_score_one() {
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(moi_config()).unwrap().process(&mut doc);

    let radius = find_relation(&out.relations, &id("r"), "radius").expect("r -> radius");
    assert_eq!(radius.score, 1.0);
    assert_eq!(radius.sentence, 0);
    assert_eq!(radius.identifier_position, 1);
    assert_eq!(radius.word_position, 4);

    let area = find_relation(&out.relations, &id("A"), "area").expect("A -> area");
    assert_eq!(area.score, 1.0);
}

#[test]
fn test_circle_statistical_scores() {
    let config = moi_config();
    let weights = config.weights();
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);

    // circle sits three dependency hops from r
    let circle = find_relation(&out.relations, &id("r"), "circle").expect("r -> circle");
    assert!((circle.score - score(&weights, Some(3), 1, 1, 0)).abs() < 1e-12);

    // area is reached through the super-expression \pi r^2, one sentence later
    let area = find_relation(&out.relations, &id("r"), "area").expect("r -> area");
    assert_eq!(area.sentence, 1);
    assert!((area.score - score(&weights, Some(2), 1, 1, 1)).abs() < 1e-12);

    let area = find_relation(&out.relations, &id("\\pi r^2"), "area").expect("pi r^2 -> area");
    assert!((area.score - score(&weights, Some(2), 1, 1, 0)).abs() < 1e-12);
}

#[test]
fn test_circle_super_expression_does_not_inherit_sub_sentences() {
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(moi_config()).unwrap().process(&mut doc);
    assert_eq!(definitions(&out.relations, &id("\\pi r^2")), vec!["area"]);
}

#[test]
fn test_circle_sentence_without_formulae_is_ignored() {
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(moi_config()).unwrap().process(&mut doc);
    assert!(out.relations.iter().all(|r| r.sentence != 2));
}

#[test]
fn test_circle_output_is_ranked() {
    let mut doc = load_fixture("circle.json");
    let out = CreateCandidatesMapper::new(moi_config()).unwrap().process(&mut doc);
    assert_eq!(out.title, "Circle");
    assert_eq!(out.relations.len(), 5);
    assert_ranked(&out.relations);
}

#[test]
fn test_default_threshold_drops_weak_candidates() {
    let mut doc = load_fixture("circle.json");
    let config = Config {
        use_moi: true,
        threshold: 0.9,
        ..Config::default()
    };
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);
    assert!(out.relations.iter().all(|r| r.score >= 0.9));
    assert!(find_relation(&out.relations, &id("r"), "circle").is_none());
    assert!(find_relation(&out.relations, &id("r"), "radius").is_some());
}

// ============================================================================
// GRAPH CACHE
// ============================================================================

#[test]
fn test_unfiltered_candidates_are_cached_on_the_graph() {
    let mut doc = load_fixture("circle.json");
    let config = Config {
        use_moi: true,
        threshold: 0.99,
        ..Config::default()
    };
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);
    assert_eq!(definitions(&out.relations, &id("r")), vec!["radius"]);

    // the cache keeps what the threshold dropped
    let cached = doc
        .graph
        .relations_for(&FormulaId::for_content("r"))
        .expect("cache for r");
    assert_eq!(cached.len(), 3);
}

#[test]
fn test_analyze_with_dependencies_covers_subexpressions() {
    let mut doc = load_fixture("circle.json");
    let mapper = CreateCandidatesMapper::new(moi_config()).unwrap();
    let sup = FormulaId::for_content("\\pi r^2");

    let relations = mapper.analyze_formula_with_dependencies(&mut doc, &sup);
    assert!(find_relation(&relations, sup.as_str(), "area").is_some());
    assert!(find_relation(&relations, &id("r"), "radius").is_some());
    // A is neither the formula nor one of its subexpressions
    assert!(definitions(&relations, &id("A")).is_empty());
    assert_ranked(&relations);
}

#[test]
fn test_analyze_unknown_formula_adds_graph_node() {
    let mut doc = load_fixture("circle.json");
    let mapper = CreateCandidatesMapper::new(moi_config()).unwrap();
    let unknown = FormulaId::for_content("\\sigma");
    let before = doc.graph.node_count();

    let relations = mapper.analyze_formula_with_dependencies(&mut doc, &unknown);
    assert!(relations.is_empty());
    assert!(doc.graph.contains(&unknown));
    assert_eq!(doc.graph.node_count(), before + 1);
}

// ============================================================================
// ENERGY FIXTURE
// ============================================================================

#[test]
fn test_energy_where_and_is_patterns() {
    let mut doc = load_fixture("energy.json");
    let out = CreateCandidatesMapper::new(moi_config()).unwrap().process(&mut doc);

    assert_eq!(find_relation(&out.relations, &id("E"), "energy").map(|r| r.score), Some(1.0));
    assert_eq!(find_relation(&out.relations, &id("m"), "mass").map(|r| r.score), Some(1.0));

    let crossed = find_relation(&out.relations, &id("E"), "mass").expect("E -> mass");
    assert!(crossed.score < 1.0);
}

#[test]
fn test_energy_merge_dampens_then_filters() {
    let mut doc = load_fixture("energy.json");
    let config = Config {
        use_moi: true,
        definition_merging: true,
        threshold: 0.7,
        ..Config::default()
    };
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);

    // singletons shrink to 0.722 of their score; only the pattern hits survive 0.7
    assert_eq!(out.relations.len(), 2);
    for relation in &out.relations {
        assert!((relation.score - 0.722).abs() < 1e-12);
    }
}

// ============================================================================
// HAND-BUILT DOCUMENTS
// ============================================================================

#[test]
fn test_repeated_definiens_counts_toward_frequency() {
    let x = make_formula("x", &[(0, 0), (1, 0)]);
    let s0 = make_parsed_sentence(
        0,
        &[("x", "MATH"), ("bounds", "VBZ"), ("the", "DT"), ("area", "NN"), ("of", "IN"), ("disk", "NN")],
        &[&x],
        &[],
    );
    let s1 = make_parsed_sentence(
        1,
        &[("x", "MATH"), ("grows", "VBZ"), ("with", "IN"), ("area", "NN")],
        &[&x],
        &[],
    );
    let mut doc = ParsedWikiDocument::new("t", vec![s0, s1]);
    let xid = doc.add_formula(x);

    let config = moi_config();
    let weights = config.weights();
    let out = CreateCandidatesMapper::new(config).unwrap().process(&mut doc);

    // area twice, disk once
    let disk = find_relation(&out.relations, xid.as_str(), "disk").expect("x -> disk");
    assert!((disk.score - score(&weights, Some(5), 1, 2, 0)).abs() < 1e-12);
    let later = out
        .relations
        .iter()
        .find(|r| r.definition == "area" && r.sentence == 1)
        .expect("x -> area in sentence 1");
    assert!((later.score - score(&weights, Some(3), 2, 2, 1)).abs() < 1e-12);
}

#[test]
fn test_links_resolve_to_their_content() {
    let x = make_formula("x", &[(0, 1)]);
    let s0 = make_parsed_sentence(
        0,
        &[("The", "DT"), ("x", "MATH"), ("of", "IN"), ("LINK_3", "LNK")],
        &[&x],
        &[],
    );
    let mut doc = ParsedWikiDocument::new("t", vec![s0]);
    doc.tokens
        .links
        .insert("LINK_3".into(), definiens::SpecialToken::new("unit circle"));
    let xid = doc.add_formula(x);

    let out = CreateCandidatesMapper::new(moi_config()).unwrap().process(&mut doc);
    assert_eq!(definitions(&out.relations, xid.as_str()), vec!["unit circle"]);
}
