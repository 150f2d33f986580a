//! `tomomesh`: reconstruct an STL surface and a PNG preview from a
//! directory of DICOM slices.
//!
//! ```text
//! tomomesh scans/knee -o knee.stl -p knee.png --min-threshold 300 --max-threshold none
//! ```
//!
//! Options are layered: built-in defaults, then `--config FILE`, then the
//! flags given here. Set `RUST_LOG` to change log verbosity.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tomomesh::prelude::*;
use tomomesh::{parse_max_threshold, PipelineResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Turn a tomographic slice series into a surface mesh and a preview image.
#[derive(Debug, Parser)]
#[command(name = "tomomesh", version, about, long_about = None)]
struct Cli {
    /// Directory holding one slice per file
    input: PathBuf,

    /// Output STL path
    #[arg(short, long)]
    output: PathBuf,

    /// Output PNG preview path
    #[arg(short, long)]
    preview: PathBuf,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lowest intensity kept
    #[arg(long, allow_negative_numbers = true)]
    min_threshold: Option<i32>,

    /// Highest intensity kept, or `none` for unbounded
    #[arg(long, value_name = "N|none", allow_negative_numbers = true)]
    max_threshold: Option<String>,

    /// Volume filter: none, gaussian or median
    #[arg(long)]
    filter: Option<FilterKind>,

    /// Gaussian standard deviation in voxels
    #[arg(long)]
    sigma: Option<f64>,

    /// Resample every slice to WIDTHxHEIGHT when shapes differ
    #[arg(long, value_name = "WxH")]
    target_shape: Option<GridShape>,

    /// Sample every N-th voxel before surface extraction
    #[arg(long, value_name = "N")]
    step: Option<usize>,

    /// Mesh smoothing passes
    #[arg(long, value_name = "N")]
    smoothing_iterations: Option<u32>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// File configuration (or defaults) with flags applied on top.
    fn config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(min) = self.min_threshold {
            config.min_threshold = min;
        }
        if let Some(max) = &self.max_threshold {
            config.max_threshold = parse_max_threshold(max)?;
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(sigma) = self.sigma {
            config.sigma = sigma;
        }
        if let Some(shape) = self.target_shape {
            config.target_shape = Some(shape);
        }
        if let Some(step) = self.step {
            config.step_size = step;
        }
        if let Some(iterations) = self.smoothing_iterations {
            config.smoothing = config.smoothing.with_iterations(iterations);
        }
        if self.ascii {
            config.stl_encoding = StlEncoding::Ascii;
        }
        Ok(config)
    }
}

fn run(cli: &Cli, config: PipelineConfig) -> RunReport {
    let pipeline: PipelineResult<Pipeline> = Pipeline::new(config);
    match pipeline {
        Ok(pipeline) => pipeline.run(&cli.input, &cli.output, &cli.preview),
        Err(error) => RunReport::failed(&error, Vec::new()),
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let report = run(&cli, config);

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        for warning in &report.warnings {
            println!("warning: {warning}");
        }
        println!("{report}");
    }

    if report.success {
        info!(mesh = %cli.output.display(), "Done");
        Ok(ExitCode::SUCCESS)
    } else {
        error!(kind = ?report.error_kind, "Reconstruction failed");
        Ok(ExitCode::FAILURE)
    }
}
