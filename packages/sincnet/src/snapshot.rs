//! JSON dump of a layer's current filter bank, for plotting and inspection.
//!
//! This is a diagnostic view of the derived filters. Parameters are persisted
//! through the `VarMap` (safetensors), never through this format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, SincConv, SincConvConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterBankSnapshot {
    pub config: SincConvConfig,
    /// `[low, high]` in Hz, one entry per filter.
    pub cutoffs_hz: Vec<[f32; 2]>,
    /// Windowed taps, `n_filt` rows of `filt_dim` values.
    pub filters: Vec<Vec<f32>>,
}

impl FilterBankSnapshot {
    pub fn capture(layer: &SincConv) -> Result<Self> {
        let cutoffs_hz = layer
            .cutoffs_hz()?
            .into_iter()
            .map(|(lo, hi)| [lo, hi])
            .collect();
        let filters = layer.filters()?.to_vec2::<f32>()?;
        Ok(Self {
            config: layer.config().clone(),
            cutoffs_hz,
            filters,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}
