// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Directory-in, directory-out scoring.
//!
//! `run_score` is the whole batch: list the input documents, score them in
//! parallel, write one `<name>.relations.json` per document. Per-file failures
//! are logged and counted, never fatal to the rest of the batch.

pub mod parallel;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::candidates::CreateCandidatesMapper;
use crate::config::Config;
use crate::error::Result;

pub use parallel::*;

/// What a batch run did.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written.
    pub written: Vec<PathBuf>,
    /// Input files that could not be scored, with the reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Relations across all written outputs.
    pub relations: usize,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Score every `*.json` document of `input_dir` into `output_dir`.
///
/// Errors only when a directory cannot be read or created.
pub fn run_score(input_dir: &Path, output_dir: &Path, config: Config) -> Result<BatchReport> {
    let mapper = CreateCandidatesMapper::new(config)?;

    // 1. Find documents
    let paths = parallel::list_documents(input_dir)?;
    if paths.is_empty() {
        warn!(input = %input_dir.display(), "No documents found; nothing to score");
        return Ok(BatchReport::default());
    }
    info!(documents = paths.len(), mode = ?mapper.mode(), "Scoring documents");

    // 2. Score in parallel with progress bar
    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();
    #[cfg(feature = "parallel")]
    let score_pb = multi.add(ProgressBar::new(paths.len() as u64));
    #[cfg(feature = "parallel")]
    score_pb.set_style(create_progress_style());
    #[cfg(feature = "parallel")]
    score_pb.set_prefix("Scoring");
    #[cfg(feature = "parallel")]
    score_pb.set_message("documents...");

    let scored = parallel::score_documents_with_progress(
        &paths,
        &mapper,
        #[cfg(feature = "parallel")]
        &score_pb,
    );

    #[cfg(feature = "parallel")]
    score_pb.finish_with_message(format!("scored {} documents", scored.len()));

    // 3. Write results
    fs::create_dir_all(output_dir)?;
    let mut report = BatchReport::default();

    for doc in scored {
        let output = match doc.result {
            Ok(output) => output,
            Err(e) => {
                error!(file = %doc.path.display(), "{}", e);
                report.failed.push((doc.path, e.to_string()));
                continue;
            }
        };

        let path = output_dir.join(parallel::output_name(&doc.path));
        let written = serde_json::to_string_pretty(&output)
            .map_err(crate::error::Error::from)
            .and_then(|json| fs::write(&path, json).map_err(Into::into));
        match written {
            Ok(()) => {
                report.relations += output.relations.len();
                report.written.push(path);
            }
            Err(e) => {
                error!(file = %path.display(), "{}", e);
                report.failed.push((doc.path, e.to_string()));
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        relations = report.relations,
        "Scoring complete"
    );
    Ok(report)
}
