// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the definiens command-line interface.
//!
//! Two subcommands: `score` runs the mapper over a directory of parsed
//! documents and writes the ranked relations, `inspect` prints one document's
//! formulae, containment edges and best candidates to the terminal.

pub mod display;
pub mod inspect;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use definiens::{Config, Result};

#[derive(Parser)]
#[command(
    name = "definiens",
    about = "Rank natural-language definitions for the formulae of parsed documents",
    version
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Scoring knobs shared by both subcommands. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct ScoringArgs {
    /// JSON config file (camelCase keys; missing keys take defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Weight of the distance kernel
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Weight of the sentence-proximity kernel
    #[arg(long)]
    pub beta: Option<f64>,

    /// Weight of the relative frequency
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Minimum score kept in the output
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Score whole formulae (MOI) instead of bare identifiers
    #[arg(long)]
    pub moi: bool,

    /// Fold duplicate (subject, definition) candidates
    #[arg(long)]
    pub merge: bool,
}

impl ScoringArgs {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(Path::new(path))?,
            None => Config::default(),
        };
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            config.beta = beta;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config.use_moi |= self.moi;
        config.definition_merging |= self.merge;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every JSON document of a directory
    Score {
        /// Input directory of parsed documents (*.json)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for <name>.relations.json files
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// Inspect one parsed document and its best candidates
    Inspect {
        /// Path to a parsed document (.json)
        file: PathBuf,

        /// Maximum number of relations to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        #[command(flatten)]
        scoring: ScoringArgs,
    },
}
