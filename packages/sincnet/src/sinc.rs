//! Symmetric sinc kernels, one row per filter.

use std::f64::consts::PI;

use candle_core::{Result, Tensor};

/// Evaluate `sin(2π f t) / (2π f t)` for every frequency in `band` over the
/// full kernel time axis.
///
/// * `band`        – `(n_filt,)` frequencies in Hz
/// * `t_right`     – `(K,)` strictly positive times `1/fs … K/fs`
/// * `reverse_idx` – `(K,)` indices `K-1 … 0`
///
/// Returns `(n_filt, 2K + 1)`: the right half mirrored to the left, and an
/// exact `1` at the center tap so `t = 0` is never divided by.
pub fn sinc(band: &Tensor, t_right: &Tensor, reverse_idx: &Tensor) -> Result<Tensor> {
    let n_filt = band.dim(0)?;

    let arg = band
        .affine(2.0 * PI, 0.0)?
        .unsqueeze(1)? // (n_filt, 1)
        .broadcast_mul(&t_right.unsqueeze(0)?)?; // (n_filt, K)
    let y_right = arg.sin()?.div(&arg)?;
    let y_left = y_right.index_select(reverse_idx, 1)?;
    let center = Tensor::ones((n_filt, 1), y_right.dtype(), y_right.device())?;

    Tensor::cat(&[&y_left, &center, &y_right], 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::FixedBuffers;
    use candle_core::Device;

    fn kernels(freqs: &[f32], filt_dim: usize) -> Result<Vec<Vec<f32>>> {
        let dev = Device::Cpu;
        let buf = FixedBuffers::new(filt_dim, 16_000.0, &dev)?;
        let band = Tensor::new(freqs, &dev)?;
        sinc(&band, &buf.t_right, &buf.reverse_idx)?.to_vec2::<f32>()
    }

    #[test]
    fn shape_is_n_filt_by_filt_dim() -> Result<()> {
        let rows = kernels(&[100.0, 1_000.0, 4_000.0], 21)?;
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 21));
        Ok(())
    }

    #[test]
    fn rows_mirror_around_unit_center() -> Result<()> {
        for row in kernels(&[55.5, 880.0, 3_210.0, 7_999.0], 101)? {
            assert_eq!(row[50], 1.0);
            for i in 0..101 {
                assert_eq!(row[i], row[100 - i], "tap {i}");
            }
        }
        Ok(())
    }

    #[test]
    fn first_tap_matches_closed_form() -> Result<()> {
        let rows = kernels(&[1_000.0], 5)?;
        let x = 2.0 * std::f32::consts::PI * 1_000.0 / 16_000.0;
        let expected = x.sin() / x;
        assert!((rows[0][3] - expected).abs() < 1e-6);
        let x2 = 2.0 * x;
        assert!((rows[0][4] - x2.sin() / x2).abs() < 1e-6);
        Ok(())
    }
}
