//! Command Line Interface for the SincNet filter bank
//!
//! Small inspection tool: build a layer (mel-initialized or from trained
//! parameters), print or export its filters, or write fresh parameters.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sincnet::SincConvConfig;

/// SincNet filter-bank CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the SincNet CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective cutoffs of every filter
    Inspect(InspectCommand),

    /// Write the current filter bank (cutoffs + taps) as JSON
    Export(ExportCommand),

    /// Write mel-initialized parameters as safetensors
    Init(InitCommand),
}

/// Layer shape and where its parameters come from
#[derive(Args, Debug, Clone)]
pub struct LayerArgs {
    /// TOML layer configuration; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of filters
    #[arg(long)]
    pub n_filt: Option<usize>,

    /// Filter length in samples (odd)
    #[arg(long)]
    pub filt_dim: Option<usize>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Trained parameters (safetensors) to load over the mel initialization
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Run on CPU even when an accelerator is available
    #[arg(long)]
    pub cpu: bool,
}

impl LayerArgs {
    pub fn layer_config(&self) -> sincnet::Result<SincConvConfig> {
        let mut cfg = match &self.config {
            Some(path) => SincConvConfig::from_file(path)?,
            None => SincConvConfig::default(),
        };
        if let Some(n) = self.n_filt {
            cfg.n_filt = n;
        }
        if let Some(d) = self.filt_dim {
            cfg.filt_dim = d;
        }
        if let Some(fs) = self.sample_rate {
            cfg.sample_rate = fs;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Print the effective cutoffs of every filter
#[derive(Parser, Debug)]
pub struct InspectCommand {
    #[command(flatten)]
    pub layer: LayerArgs,
}

/// Write the current filter bank as JSON
#[derive(Parser, Debug)]
pub struct ExportCommand {
    #[command(flatten)]
    pub layer: LayerArgs,

    /// Output JSON path
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Write mel-initialized parameters as safetensors
#[derive(Parser, Debug)]
pub struct InitCommand {
    #[command(flatten)]
    pub layer: LayerArgs,

    /// Output safetensors path
    #[arg(short, long)]
    pub output: PathBuf,
}
