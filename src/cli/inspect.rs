// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `definiens inspect`: one document, drawn as boxes.

use std::path::Path;

use definiens::{Config, CreateCandidatesMapper, ParsedWikiDocument, Result, ScoringMode};

use super::display::*;

const NAME_WIDTH: usize = 24;
const DEF_WIDTH: usize = 32;

/// Load, score and print `path`.
pub fn inspect_document(path: &Path, config: Config, limit: usize) -> Result<()> {
    let mut doc = ParsedWikiDocument::from_file(path)?;
    let mapper = CreateCandidatesMapper::new(config)?;
    let output = mapper.process(&mut doc);

    title_block(&format!("DEFINIENS: {}", truncate(&doc.title, 60)));
    println!();

    // Summary
    section_top("DOCUMENT");
    row(&format!(
        "  sentences {}  │  formulae {}  │  containment edges {}  │  identifiers {}",
        doc.sentences.len(),
        doc.formulae.len(),
        doc.graph.edge_count(),
        doc.identifiers.len()
    ));
    let mut badges = vec![match mapper.mode() {
        ScoringMode::Moi => mode_badge("MOI"),
        ScoringMode::Identifier => mode_badge("IDENT"),
    }];
    if mapper.config().definition_merging {
        badges.push(mode_badge("MERGE"));
    }
    row(&format!(
        "  {}  α={} β={} γ={}  threshold={}",
        badges.join(" "),
        mapper.config().alpha,
        mapper.config().beta,
        mapper.config().gamma,
        mapper.config().threshold
    ));

    // Formulae in order of appearance
    section_mid("FORMULAE");
    let formulae = doc.formulae_in_order();
    if formulae.is_empty() {
        row(&themed(Role::Muted, "  (none)"));
    }
    for tag in formulae {
        let first = tag
            .first_position()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        row(&format!(
            "  {}  {}  {} occurrence(s), first at {}",
            themed(Role::Muted, tag.id.as_str()),
            pad_right(&themed(Role::Subject, &truncate(&tag.content, NAME_WIDTH)), NAME_WIDTH),
            tag.positions.len(),
            first
        ));
    }

    // Containment
    let edges = doc.graph.edges();
    if !edges.is_empty() {
        section_mid("CONTAINMENT");
        for (sub, sup) in edges {
            let name = |id: &definiens::FormulaId| {
                doc.formulae
                    .get(id)
                    .map(|t| t.content.clone())
                    .unwrap_or_else(|| id.to_string())
            };
            row(&format!(
                "  {} {} {}",
                truncate(&name(&sub), 30),
                themed(Role::Muted, "⊂"),
                truncate(&name(&sup), 30)
            ));
        }
    }

    // Best relations
    section_mid("RELATIONS");
    if output.relations.is_empty() {
        row(&themed(Role::Muted, "  (no candidate above the threshold)"));
    }
    for relation in output.relations.iter().take(limit) {
        let subject = doc
            .find_formula(relation.subject.name())
            .map(|t| t.content.as_str())
            .unwrap_or_else(|| relation.subject.name());
        row(&format!(
            "  {}  {}  {}  {}",
            score_value(relation.score),
            pad_right(&themed(Role::Subject, &truncate(subject, NAME_WIDTH)), NAME_WIDTH),
            pad_right(&themed(Role::Definition, &truncate(&relation.definition, DEF_WIDTH)), DEF_WIDTH),
            pad_left(
                &themed(Role::Muted, &format!("s{}:w{}", relation.sentence, relation.word_position)),
                10
            )
        ));
    }
    if output.relations.len() > limit {
        row(&themed(
            Role::Muted,
            &format!("  ... {} more", output.relations.len() - limit),
        ));
    }
    section_bot();
    Ok(())
}
