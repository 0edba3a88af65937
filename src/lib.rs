//! Definiens extraction for a formula-search engine.
//!
//! Given a document already split into tagged sentences and annotated with its
//! math expressions, this crate decides which words of the surrounding prose
//! define which formula, and how confidently.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  document   │────▶│  candidates  │────▶│  DocumentOutput  │
//! │ (sentences, │     │ (MOI / ident │     │ (ranked          │
//! │  formulae,  │     │   modes)     │     │  relations)      │
//! │  graph)     │     └──────────────┘     └──────────────────┘
//! └─────────────┘        │   │    │
//!                        ▼   ▼    ▼
//!              ┌─────────┐ ┌───────┐ ┌──────────────┐
//!              │ pattern │ │scoring│ │ scoring::    │
//!              │ (10     │ │(gauss │ │ merge        │
//!              │ phrases)│ │ mix)  │ │ (self_merge) │
//!              └─────────┘ └───────┘ └──────────────┘
//! ```
//!
//! # Modules
//!
//! | Module       | Role                                                  |
//! |--------------|-------------------------------------------------------|
//! | `types`      | Position, Word, special-token tables                  |
//! | `sentence`   | Sentence, dependency distance, `DistanceOracle`       |
//! | `math`       | MathTag, formula ids, containment graph               |
//! | `pattern`    | Defining-phrase matcher                               |
//! | `relation`   | Scored candidate and its two orderings                |
//! | `scoring`    | Gaussian score, duplicate merging                     |
//! | `candidates` | The mapper tying it all together                      |
//! | `document`   | Input validation and output shape                     |
//! | `batch`      | Parallel directory scoring                            |
//!
//! # Usage
//!
//! ```ignore
//! use definiens::{Config, CreateCandidatesMapper, ParsedWikiDocument};
//!
//! let mut doc = ParsedWikiDocument::from_json(&raw)?;
//! let mapper = CreateCandidatesMapper::new(Config { use_moi: true, ..Config::default() })?;
//! let output = mapper.process(&mut doc);
//! for relation in &output.relations {
//!     println!("{} -> {} ({:.3})", relation.subject.name(), relation.definition, relation.score);
//! }
//! ```

// Module declarations
pub mod batch;
pub mod candidates;
pub mod config;
pub mod contracts;
pub mod document;
pub mod error;
pub mod logging;
pub mod math;
pub mod pattern;
pub mod relation;
pub mod scoring;
pub mod sentence;
pub mod testing;
pub mod types;

// Re-exports for public API
pub use candidates::{CreateCandidatesMapper, ScoringMode};
pub use config::Config;
pub use document::{DocumentInput, DocumentOutput, ParsedWikiDocument};
pub use error::{Error, Result};
pub use math::{resolve_formulae, FormulaId, MathTag, MathTagGraph};
pub use pattern::PatternMatcher;
pub use relation::{compare_name_score, compare_score, Relation, Subject};
pub use scoring::{gaussian, score, self_merge, Weights};
pub use sentence::{DependencyEdge, DistanceOracle, ParseDistance, Sentence};
pub use types::{Position, SpecialToken, SpecialTokens, Word};
