//! Fixed (non-learnable) buffers shared by every forward pass.

use candle_core::{Device, Result, Tensor};

/// Symmetric Hamming window, `0.54 - 0.46 cos(2πn / (M-1))`.
pub fn hamming(len: usize) -> Vec<f32> {
    match len {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|n| (0.54 - 0.46 * (2.0 * std::f64::consts::PI * n as f64 / denom).cos()) as f32)
        .collect()
}

/// Right half of the kernel's time axis: `1/fs, 2/fs, …, K/fs`.
pub fn time_axis(half_width: usize, sample_rate: f64) -> Vec<f32> {
    (1..=half_width)
        .map(|k| (k as f64 / sample_rate) as f32)
        .collect()
}

/// Pre-computed tensors, built once per layer.
#[derive(Debug, Clone)]
pub struct FixedBuffers {
    /// `(filt_dim,)`
    pub hamming_window: Tensor,
    /// `(K,)`
    pub t_right: Tensor,
    /// `(K,)` indices `K-1 … 0`, mirrors the right half of a kernel.
    pub reverse_idx: Tensor,
}

impl FixedBuffers {
    pub fn new(filt_dim: usize, sample_rate: f64, device: &Device) -> Result<Self> {
        let half = filt_dim.saturating_sub(1) / 2;
        let hamming_window = Tensor::from_vec(hamming(filt_dim), filt_dim, device)?;
        let t_right = Tensor::from_vec(time_axis(half, sample_rate), half, device)?;
        let rev: Vec<u32> = (0..half as u32).rev().collect();
        let reverse_idx = Tensor::from_vec(rev, half, device)?;
        Ok(Self {
            hamming_window,
            t_right,
            reverse_idx,
        })
    }
}
