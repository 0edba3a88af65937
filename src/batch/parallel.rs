// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel document loading and scoring.
//!
//! Documents are independent, so scoring a directory is embarrassingly
//! parallel: `par_iter()` over the files, each worker owning the document it
//! loaded. The mapper is shared by reference; it holds no mutable state.
//!
//! A file that fails to load is reported in its slot of the result and does
//! not stop the others.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::candidates::CreateCandidatesMapper;
use crate::document::{DocumentOutput, ParsedWikiDocument};
use crate::error::Result;

/// Suffix of the files the batch writes. Never read back as input.
pub const OUTPUT_SUFFIX: &str = ".relations.json";

/// One input file and what became of it.
pub struct ScoredDocument {
    pub path: PathBuf,
    pub result: Result<DocumentOutput>,
}

/// All `*.json` documents of `input_dir`, sorted by path, outputs excluded.
pub fn list_documents(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && name.ends_with(".json") && !name.ends_with(OUTPUT_SUFFIX) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Output file name for an input document: `circle.json` -> `circle.relations.json`.
pub fn output_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

fn score_one(path: &Path, mapper: &CreateCandidatesMapper) -> ScoredDocument {
    let result = ParsedWikiDocument::from_file(path).map(|mut doc| mapper.process(&mut doc));
    ScoredDocument {
        path: path.to_path_buf(),
        result,
    }
}

/// Load and score every document. Results keep the order of `paths`.
pub fn score_documents(paths: &[PathBuf], mapper: &CreateCandidatesMapper) -> Vec<ScoredDocument> {
    #[cfg(feature = "parallel")]
    let iter = paths.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = paths.iter();

    iter.map(|path| score_one(path, mapper)).collect()
}

/// Load and score every document with progress reporting.
#[cfg(feature = "parallel")]
pub fn score_documents_with_progress(
    paths: &[PathBuf],
    mapper: &CreateCandidatesMapper,
    progress: &ProgressBar,
) -> Vec<ScoredDocument> {
    let counter = AtomicUsize::new(0);
    let total = paths.len();

    paths
        .par_iter()
        .map(|path| {
            let scored = score_one(path, mapper);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }
            scored
        })
        .collect()
}

/// Non-parallel fallback (no progress).
#[cfg(not(feature = "parallel"))]
pub fn score_documents_with_progress(
    paths: &[PathBuf],
    mapper: &CreateCandidatesMapper,
) -> Vec<ScoredDocument> {
    score_documents(paths, mapper)
}
