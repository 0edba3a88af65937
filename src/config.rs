// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring configuration.
//!
//! Six knobs, fixed for the lifetime of a mapper: the three mixing weights, the
//! output threshold, the mode switch, and the merge switch. A config file is a
//! JSON object with camelCase keys; missing keys take the defaults below.
//!
//! | Key                 | Default | Meaning                                  |
//! |---------------------|---------|------------------------------------------|
//! | `alpha`             | 0.6     | weight of the distance kernel            |
//! | `beta`              | 0.3     | weight of the sentence-proximity kernel  |
//! | `gamma`             | 0.1     | weight of the relative frequency         |
//! | `threshold`         | 0.8     | minimum score kept in the output         |
//! | `useMOI`            | false   | score whole formulae instead of identifiers |
//! | `definitionMerging` | false   | fold duplicate candidates                |

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::scoring::Weights;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub threshold: f64,
    #[serde(rename = "useMOI")]
    pub use_moi: bool,
    pub definition_merging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: 0.6,
            beta: 0.3,
            gamma: 0.1,
            threshold: 0.8,
            use_moi: false,
            definition_merging: false,
        }
    }
}

impl Config {
    /// Load and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Weights must be positive and finite; the threshold must be finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.threshold.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn weights(&self) -> Weights {
        Weights::new(self.alpha, self.beta, self.gamma)
    }
}
