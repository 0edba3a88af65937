// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boundary errors.
//!
//! The scoring path itself never fails: degenerate documents simply produce
//! fewer candidates. Errors exist for the edges of the crate, where a document
//! or a configuration comes in from outside and breaks the input contract.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Containment edge {sub} -> {sup} would create a cycle")]
    CyclicContainment { sub: String, sup: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
