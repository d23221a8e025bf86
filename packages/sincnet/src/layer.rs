//! The learnable band-pass convolution layer.
//!
//! Each filter `i` is a windowed difference of two ideal low-pass kernels:
//!
//! ```text
//! lower = |filt_b1|   + min_freq / fs
//! upper = lower + |filt_band| + min_band / fs
//! h     = 2·upper·sinc(upper·fs) − 2·lower·sinc(lower·fs)
//! h     = hamming · h / max(h)
//! ```
//!
//! Only `filt_b1` / `filt_band` are trainable. The kernels are rebuilt from
//! them on every [`forward`](Module::forward), so the optimizer moves the
//! cutoffs, not the taps.

use candle_core::{DType, Device, Module, Result as CandleResult, Tensor, Var};
use candle_nn::{Init, VarBuilder};
use log::debug;

use crate::{
    Result, SincConvConfig, SincError,
    constants::{PARAM_FILT_B1, PARAM_FILT_BAND},
    mel,
    sinc::sinc,
    window::FixedBuffers,
};

/// Sinc convolution: `(batch, 1, length)` → `(batch, n_filt, length)`.
#[derive(Debug, Clone)]
pub struct SincConv {
    /* ---------- learnable (fractions of fs) ---------- */
    filt_b1: Var,
    filt_band: Var,

    /* ---------- fixed ---------- */
    buffers: FixedBuffers,
    cfg: SincConvConfig,
    device: Device,
}

impl SincConv {
    /* ---------------- constructors ---------------- */

    /// Build a layer with mel-initialized cutoffs.
    ///
    /// Both parameter vectors are created through `vb` under its current
    /// prefix (`<prefix>.filt_b1`, `<prefix>.filt_band`). With a `VarMap`
    /// backend they land in the map, where optimizers and
    /// `VarMap::save`/`load` pick them up; several layers can share one map
    /// as long as each gets its own `vb.pp(..)`.
    pub fn new(cfg: SincConvConfig, vb: VarBuilder) -> Result<Self> {
        cfg.validate()?;

        for name in [PARAM_FILT_B1, PARAM_FILT_BAND] {
            if vb.contains_tensor(name) {
                return Err(SincError::Config(format!(
                    "parameter '{name}' already exists under prefix '{}'",
                    vb.prefix()
                )));
            }
        }

        let (b1, band) = mel::init_params(cfg.sample_rate, cfg.n_filt, cfg.fmin);
        let filt_b1 = init_var(&vb, cfg.n_filt, PARAM_FILT_B1, b1)?;
        let filt_band = init_var(&vb, cfg.n_filt, PARAM_FILT_BAND, band)?;

        debug!(
            "sinc conv '{}': {} filters x {} taps @ {} Hz (mel-initialized)",
            vb.prefix(),
            cfg.n_filt,
            cfg.filt_dim,
            cfg.sample_rate
        );
        Self::from_parts(cfg, filt_b1, filt_band, vb.device())
    }

    /// Build a layer from stored parameters, e.g. a safetensors checkpoint
    /// opened with `VarBuilder::from_mmaped_safetensors`.
    ///
    /// When `vb` is backed by a `VarMap` the layer shares its variables.
    /// Both parameters must already exist under the prefix.
    pub fn load(cfg: SincConvConfig, vb: VarBuilder) -> Result<Self> {
        cfg.validate()?;

        let fetch = |name: &str| -> Result<Var> {
            if !vb.contains_tensor(name) {
                return Err(SincError::Config(format!(
                    "parameter '{name}' not found under prefix '{}'",
                    vb.prefix()
                )));
            }
            let t = vb.get(cfg.n_filt, name)?.to_dtype(DType::F32)?;
            Ok(Var::from_tensor(&t)?)
        };
        let filt_b1 = fetch(PARAM_FILT_B1)?;
        let filt_band = fetch(PARAM_FILT_BAND)?;

        debug!(
            "sinc conv '{}': {} filters x {} taps @ {} Hz (from stored parameters)",
            vb.prefix(),
            cfg.n_filt,
            cfg.filt_dim,
            cfg.sample_rate
        );
        Self::from_parts(cfg, filt_b1, filt_band, vb.device())
    }

    fn from_parts(
        cfg: SincConvConfig,
        filt_b1: Var,
        filt_band: Var,
        device: &Device,
    ) -> Result<Self> {
        let buffers = FixedBuffers::new(cfg.filt_dim, cfg.sample_rate, device)?;
        Ok(Self {
            filt_b1,
            filt_band,
            buffers,
            cfg,
            device: device.clone(),
        })
    }

    /* ---------------- accessors ---------------- */

    #[inline]
    pub fn config(&self) -> &SincConvConfig {
        &self.cfg
    }

    #[inline]
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Lower-cutoff parameter (fraction of fs, sign ignored).
    #[inline]
    pub fn filt_b1(&self) -> &Var {
        &self.filt_b1
    }

    /// Bandwidth parameter (fraction of fs, sign ignored).
    #[inline]
    pub fn filt_band(&self) -> &Var {
        &self.filt_band
    }

    /// Trainable variables, in declaration order.
    pub fn vars(&self) -> Vec<Var> {
        vec![self.filt_b1.clone(), self.filt_band.clone()]
    }

    #[inline]
    pub fn hamming_window(&self) -> &Tensor {
        &self.buffers.hamming_window
    }

    #[inline]
    pub fn t_right(&self) -> &Tensor {
        &self.buffers.t_right
    }

    /* ---------------- filter construction ---------------- */

    /// Effective `(lower, upper)` cutoffs as fractions of fs, each `(n_filt,)`.
    ///
    /// `lower >= min_freq / fs` and `upper >= lower + min_band / fs` whatever
    /// the sign of the parameters; nothing caps `upper` at Nyquist.
    pub fn cutoffs(&self) -> CandleResult<(Tensor, Tensor)> {
        let fs = self.cfg.sample_rate;
        let lower = self
            .filt_b1
            .as_tensor()
            .abs()?
            .affine(1.0, self.cfg.min_freq / fs)?;
        let width = self
            .filt_band
            .as_tensor()
            .abs()?
            .affine(1.0, self.cfg.min_band / fs)?;
        let upper = lower.add(&width)?;
        Ok((lower, upper))
    }

    /// Effective cutoffs in Hz, one `(low, high)` pair per filter.
    pub fn cutoffs_hz(&self) -> CandleResult<Vec<(f32, f32)>> {
        let fs = self.cfg.sample_rate;
        let (lower, upper) = self.cutoffs()?;
        let lower = lower.affine(fs, 0.0)?.to_vec1::<f32>()?;
        let upper = upper.affine(fs, 0.0)?.to_vec1::<f32>()?;
        Ok(lower.into_iter().zip(upper).collect())
    }

    // 2·f·sinc(f·fs): unit DC gain low-pass at normalized cutoff `f`
    fn low_pass(&self, cutoff: &Tensor) -> CandleResult<Tensor> {
        let kernel = sinc(
            &cutoff.affine(self.cfg.sample_rate, 0.0)?,
            &self.buffers.t_right,
            &self.buffers.reverse_idx,
        )?;
        cutoff.affine(2.0, 0.0)?.unsqueeze(1)?.broadcast_mul(&kernel)
    }

    /// Band-pass kernels before windowing, `(n_filt, filt_dim)`, each row
    /// divided by its own maximum.
    ///
    /// The division is unguarded: a row whose maximum is exactly zero turns
    /// into NaN/Inf, which the minimum bandwidth keeps from happening.
    pub fn band_pass(&self) -> CandleResult<Tensor> {
        let (lower, upper) = self.cutoffs()?;
        let band_pass = self.low_pass(&upper)?.sub(&self.low_pass(&lower)?)?;
        let peak = band_pass.max_keepdim(1)?;
        band_pass.broadcast_div(&peak)
    }

    /// Windowed filter bank, `(n_filt, filt_dim)`.
    pub fn filters(&self) -> CandleResult<Tensor> {
        self.band_pass()?
            .broadcast_mul(&self.buffers.hamming_window.unsqueeze(0)?)
    }
}

// Fetch (creating if needed) an f32 parameter through `vb` and overwrite it
// with `values`. A `VarMap` backend hands back the registered variable itself,
// so the map sees the initial values.
fn init_var(vb: &VarBuilder, n: usize, name: &str, values: Vec<f32>) -> Result<Var> {
    let var = Var::from_tensor(&vb.get_with_hints_dtype(n, name, Init::Const(0.), DType::F32)?)?;
    var.set(&Tensor::from_vec(values, n, vb.device())?)?;
    Ok(var)
}

impl Module for SincConv {
    fn forward(&self, xs: &Tensor) -> CandleResult<Tensor> {
        let kernel = self
            .filters()?
            .reshape((self.cfg.n_filt, 1, self.cfg.filt_dim))?;
        xs.conv1d(&kernel, self.cfg.padding(), 1, 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_nn::VarMap;

    fn layer(n_filt: usize, filt_dim: usize) -> Result<(SincConv, VarMap)> {
        let vm = VarMap::new();
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        let l = SincConv::new(SincConvConfig::new(n_filt, filt_dim, 16_000.0), vb)?;
        Ok((l, vm))
    }

    #[test]
    fn registers_both_parameters() -> Result<()> {
        let (_l, vm) = layer(8, 31)?;
        assert_eq!(vm.all_vars().len(), 2);
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        assert!(vb.contains_tensor(PARAM_FILT_B1));
        assert!(vb.contains_tensor(PARAM_FILT_BAND));
        Ok(())
    }

    #[test]
    fn registered_variables_hold_mel_values() -> Result<()> {
        let (l, vm) = layer(4, 31)?;
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        let stored = vb.get(4, PARAM_FILT_B1)?.to_vec1::<f32>()?;
        assert_eq!(stored, l.filt_b1().as_tensor().to_vec1::<f32>()?);
        assert_eq!(stored, mel::init_params(16_000.0, 4, 80.0).0);
        Ok(())
    }

    #[test]
    fn rejects_invalid_config() {
        let vm = VarMap::new();
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        let res = SincConv::new(SincConvConfig::new(4, 50, 16_000.0), vb);
        assert!(matches!(res, Err(SincError::Config(_))));
        assert!(vm.all_vars().is_empty());
    }

    #[test]
    fn initial_cutoffs_follow_mel_bands() -> Result<()> {
        let (l, _vm) = layer(4, 101)?;
        let hz = l.cutoffs_hz()?;
        // lower = b1 + 50 Hz, upper = b2 + 100 Hz
        let expected = [
            (80.0, 1_100.033_4),
            (101.495_8, 3_245.814_7),
            (1_050.033_4, 8_100.0),
            (3_195.814_7, 8_000.0),
        ];
        assert_eq!(hz.len(), expected.len());
        for ((lo, hi), (elo, ehi)) in hz.iter().zip(expected) {
            assert!((lo - elo).abs() < 1e-2, "{hz:?}");
            assert!((hi - ehi).abs() < 1e-2, "{hz:?}");
        }
        Ok(())
    }

    #[test]
    fn single_filter_spans_the_whole_band() -> Result<()> {
        let (l, _vm) = layer(1, 11)?;
        let hz = l.cutoffs_hz()?;
        assert!((hz[0].0 - 80.0).abs() < 1e-2);
        assert!((hz[0].1 - 8_000.0).abs() < 1e-1, "{hz:?}");
        let x = Tensor::ones((1, 1, 32), DType::F32, &Device::Cpu)?;
        assert_eq!(l.forward(&x)?.dims(), &[1, 1, 32]);
        Ok(())
    }

    #[test]
    fn windowed_center_tap_is_one() -> Result<()> {
        let (l, _vm) = layer(6, 41)?;
        let rows = l.filters()?.to_vec2::<f32>()?;
        for row in rows {
            assert!((row[20] - 1.0).abs() < 1e-6);
        }
        Ok(())
    }
}
