// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Math expressions and the containment graph between them.

mod graph;
mod tag;

pub use graph::MathTagGraph;
pub use tag::{resolve_formulae, FormulaId, MathTag, FORMULA_PATTERN, FORMULA_PREFIX};
