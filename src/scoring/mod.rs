// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and merging: how candidates get their numbers.
//!
//! `core` turns distances and frequencies into a score in `[0, 1]`; `merge`
//! folds repeated candidates together and reranks them.

mod core;
pub mod merge;

pub use self::core::*;
pub use merge::{decay_factor, self_merge, MERGE_DAMPENING, MERGE_DECAY};
