//! Layer configuration (TOML-loadable).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result, SincError,
    constants::{
        DEFAULT_FILT_DIM, DEFAULT_FMIN_MEL, DEFAULT_MIN_BAND_HZ, DEFAULT_MIN_FREQ_HZ,
        DEFAULT_N_FILT, DEFAULT_SAMPLE_RATE,
    },
};

/// Static shape and frequency limits of a [`SincConv`](crate::SincConv) layer.
///
/// ```toml
/// n_filt = 80
/// filt_dim = 251
/// sample_rate = 16000.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SincConvConfig {
    /// Number of band-pass filters (output channels).
    pub n_filt: usize,
    /// Kernel length in samples; must be odd.
    pub filt_dim: usize,
    /// Sample rate of the input waveform in Hz.
    pub sample_rate: f64,
    /// Floor (Hz) added to every learned lower cutoff.
    pub min_freq: f64,
    /// Floor (Hz) added to every learned bandwidth.
    pub min_band: f64,
    /// First mel point of the initialization grid.
    pub fmin: f64,
}

impl Default for SincConvConfig {
    fn default() -> Self {
        Self {
            n_filt: DEFAULT_N_FILT,
            filt_dim: DEFAULT_FILT_DIM,
            sample_rate: DEFAULT_SAMPLE_RATE,
            min_freq: DEFAULT_MIN_FREQ_HZ,
            min_band: DEFAULT_MIN_BAND_HZ,
            fmin: DEFAULT_FMIN_MEL,
        }
    }
}

impl SincConvConfig {
    /// `n_filt` filters of `filt_dim` taps at `sample_rate` Hz, default limits.
    pub fn new(n_filt: usize, filt_dim: usize, sample_rate: f64) -> Self {
        Self {
            n_filt,
            filt_dim,
            sample_rate,
            ..Default::default()
        }
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let src = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&src)
    }

    /// Number of taps on each side of the center tap.
    #[inline]
    pub const fn half_width(&self) -> usize {
        self.filt_dim.saturating_sub(1) / 2
    }

    /// Zero padding applied on both ends so the output keeps the input length.
    #[inline]
    pub const fn padding(&self) -> usize {
        self.half_width()
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_filt == 0 {
            return Err(SincError::Config("n_filt must be at least 1".into()));
        }
        if self.filt_dim < 3 || self.filt_dim % 2 == 0 {
            return Err(SincError::Config(format!(
                "filt_dim must be odd and at least 3 (got {})",
                self.filt_dim
            )));
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(SincError::Config(format!(
                "sample_rate must be positive (got {})",
                self.sample_rate
            )));
        }
        for (name, v) in [
            ("min_freq", self.min_freq),
            ("min_band", self.min_band),
            ("fmin", self.fmin),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SincError::Config(format!(
                    "{name} must be finite and non-negative (got {v})"
                )));
            }
        }
        Ok(())
    }
}
