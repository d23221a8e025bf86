//! SincNet CLI Binary
//! Inspect, export and initialize learnable sinc filter banks

use anyhow::{Context, Result};
use candle_core::DType;
use candle_nn::{VarBuilder, VarMap};
use clap::Parser;
use env_logger::Env;
use log::info;

mod cli;
use cli::{Cli, Commands, ExportCommand, InitCommand, InspectCommand, LayerArgs};

use sincnet::{FilterBankSnapshot, SincConv};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(cmd) => {
            info!("Inspecting filter bank...");
            inspect(cmd)
        }
        Commands::Export(cmd) => {
            info!("Exporting filter bank...");
            export(cmd)
        }
        Commands::Init(cmd) => {
            info!("Writing initial parameters...");
            init(cmd)
        }
    }
}

fn build_layer(args: &LayerArgs) -> Result<(SincConv, VarMap)> {
    let cfg = args.layer_config().context("invalid layer configuration")?;
    let device = sincnet::device_helper(args.cpu)?;
    info!(
        "{} filters x {} taps @ {} Hz on {device:?}",
        cfg.n_filt, cfg.filt_dim, cfg.sample_rate
    );

    let mut var_map = VarMap::new();
    let vb = VarBuilder::from_varmap(&var_map, DType::F32, &device);
    let layer = SincConv::new(cfg, vb)?;
    if let Some(path) = &args.params {
        var_map
            .load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?;
        info!("Loaded parameters from {}", path.display());
    }
    Ok((layer, var_map))
}

fn inspect(cmd: InspectCommand) -> Result<()> {
    let (layer, _var_map) = build_layer(&cmd.layer)?;
    let nyquist = layer.config().sample_rate as f32 / 2.0;

    println!("{:>4}  {:>10}  {:>10}  {:>10}", "#", "low Hz", "high Hz", "width Hz");
    for (i, (lo, hi)) in layer.cutoffs_hz()?.into_iter().enumerate() {
        let flag = if hi > nyquist { "  > nyquist" } else { "" };
        println!("{i:>4}  {lo:>10.1}  {hi:>10.1}  {:>10.1}{flag}", hi - lo);
    }
    Ok(())
}

fn export(cmd: ExportCommand) -> Result<()> {
    let (layer, _var_map) = build_layer(&cmd.layer)?;
    FilterBankSnapshot::capture(&layer)?
        .write_json(&cmd.output)
        .with_context(|| format!("writing {}", cmd.output.display()))?;
    info!("Filter bank written to {}", cmd.output.display());
    Ok(())
}

fn init(cmd: InitCommand) -> Result<()> {
    let (_layer, var_map) = build_layer(&cmd.layer)?;
    var_map
        .save(&cmd.output)
        .with_context(|| format!("writing {}", cmd.output.display()))?;
    info!("Parameters written to {}", cmd.output.display());
    Ok(())
}
