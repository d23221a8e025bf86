//! SincNet – public crate root
//! ===========================
//! Learnable **band-pass filter bank** for raw-waveform audio models
//! (the "sinc convolution" first layer, Candle back-end).
//!
//! Every filter is described by two trainable scalars (lower cutoff and
//! bandwidth, both as fractions of the sample rate). The filters themselves
//! are rebuilt from those scalars on every forward pass, so gradients flow
//! back into the cutoffs.
//!
//! ```no_run
//! use candle_core::{DType, Device, Module, Tensor};
//! use candle_nn::{VarBuilder, VarMap};
//! use sincnet::{SincConv, SincConvConfig};
//!
//! let device = Device::Cpu;
//! let var_map = VarMap::new();
//! let vb = VarBuilder::from_varmap(&var_map, DType::F32, &device);
//! let layer = SincConv::new(SincConvConfig::new(80, 251, 16_000.0), vb.pp("sinc"))?;
//!
//! let wave = Tensor::zeros((1, 1, 16_000), DType::F32, &device)?;
//! let bands = layer.forward(&wave)?; // (1, 80, 16000)
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(unsafe_code)]

#[cfg(feature = "accelerate")]
extern crate accelerate_src;

#[cfg(feature = "mkl")]
extern crate intel_mkl_src;

/* ────────────────────────  sub-modules  ─────────────────────────────── */
pub mod config;
pub mod constants;
pub mod error;
pub mod layer;
pub mod mel;
pub mod sinc;
pub mod snapshot;
pub mod window;

/* ─────────────────────────── re-exports ─────────────────────────────── */
pub use config::SincConvConfig;
pub use constants::*;
pub use error::{Result, SincError};
pub use layer::SincConv;
pub use snapshot::FilterBankSnapshot;

use candle_core::Device;

/// Pick the fastest available device unless `cpu` is forced.
pub fn device_helper(cpu: bool) -> Result<Device> {
    if cpu {
        Ok(Device::Cpu)
    } else if candle_core::utils::metal_is_available() {
        Ok(Device::new_metal(0)?)
    } else if candle_core::utils::cuda_is_available() {
        Ok(Device::new_cuda(0)?)
    } else {
        Ok(Device::Cpu)
    }
}
