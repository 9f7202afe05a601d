//! Command-line configuration.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

/// Launch records dashboard
///
/// Filter launches by site and payload mass and view the outcome pie chart
/// and the payload-vs-outcome scatter chart.
///
/// Examples:
///   launch-dash
///   launch-dash data/spacex_launch_dash.csv --slider-step 500
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(
        value_name = "DATA",
        default_value = "spacex_launch_dash.csv",
        env = "LAUNCH_DASH_DATA"
    )]
    pub data: PathBuf,

    /// Step of the payload range sliders, in kg
    #[arg(long, default_value = "1000", value_name = "KG")]
    pub slider_step: f64,

    /// Initial window width
    #[arg(long, default_value = "1200")]
    pub width: f32,

    /// Initial window height
    #[arg(long, default_value = "900")]
    pub height: f32,
}

impl Args {
    /// Reject values clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.slider_step.is_nan() || self.slider_step <= 0.0 {
            bail!("--slider-step must be greater than 0, got {}", self.slider_step);
        }
        if self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0 {
            bail!(
                "window size must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        Ok(())
    }
}
