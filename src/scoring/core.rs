// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind definiens ranking.
//!
//! A candidate's score is a weighted average of three terms, each in `[0, 1]`:
//!
//! ```text
//! score = (α·g(distance, σ_d) + β·g(sentenceDistance, σ_s) + γ·freq/maxFreq) / (α+β+γ)
//! g(x, σ) = exp(-x² / 2σ²)
//! ```
//!
//! The two kernels are unnormalized Gaussians, so `g(0, σ) = 1` and they decay
//! strictly with `|x|`. The widths are given as half widths at half maximum:
//! `σ = sqrt(h² / 2·ln 2)` puts `g(h, σ) = 0.5`.
//!
//! # Constants
//!
//! | Term              | Half width | Meaning                                   |
//! |-------------------|------------|-------------------------------------------|
//! | token distance    | 5          | five tokens away halves the proximity term |
//! | sentence distance | 3          | three sentences away halves the recency term |
//!
//! Because the score is a weighted average it is bounded by its smallest and
//! largest term, so it stays in `[0, 1]` whenever `freq <= maxFreq`. Pattern
//! hits bypass this function entirely and score exactly `1`.

use serde::{Deserialize, Serialize};

/// Half width (in tokens) of the distance kernel.
pub const DISTANCE_HALF_WIDTH: f64 = 5.0;

/// Half width (in sentences) of the sentence-proximity kernel.
pub const SENTENCE_HALF_WIDTH: f64 = 3.0;

/// Score given to a candidate matched by a defining-phrase pattern.
pub const PATTERN_SCORE: f64 = 1.0;

/// Standard deviation whose Gaussian drops to one half at `half_width`.
#[inline]
pub fn std_for_half_width(half_width: f64) -> f64 {
    (half_width.powi(2) / (2.0 * std::f64::consts::LN_2)).sqrt()
}

/// Unnormalized Gaussian kernel: `exp(-x² / 2σ²)`.
///
/// `gaussian(0, σ) = 1`, strictly decreasing in `|x|`, and `0` for infinite `x`.
#[inline]
pub fn gaussian(x: f64, std: f64) -> f64 {
    (-(x * x) / (2.0 * std * std)).exp()
}

/// The three mixing weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Weights {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.alpha + self.beta + self.gamma
    }
}

/// Score a definiens candidate.
///
/// - `distance`: token or dependency distance to the subject. `None` means no
///   path exists and the proximity term contributes nothing.
/// - `freq` / `max_freq`: how often the candidate occurs among the candidates
///   of the matched sentences, relative to the most frequent one.
/// - `sentence_distance`: how many sentences away from the subject's first
///   occurrence the candidate sits.
pub fn score(
    weights: &Weights,
    distance: Option<u32>,
    freq: usize,
    max_freq: usize,
    sentence_distance: u32,
) -> f64 {
    let dist = distance
        .map(|d| gaussian(d as f64, std_for_half_width(DISTANCE_HALF_WIDTH)))
        .unwrap_or(0.0);
    let seq = gaussian(
        sentence_distance as f64,
        std_for_half_width(SENTENCE_HALF_WIDTH),
    );
    let relative_frequency = if max_freq > 0 {
        freq as f64 / max_freq as f64
    } else {
        0.0
    };

    (weights.alpha * dist + weights.beta * seq + weights.gamma * relative_frequency)
        / weights.total()
}
