use std::ffi::OsString;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Source column names for the four fields a launch record needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub site: String,
    pub payload_mass: String,
    pub outcome: String,
    pub booster_category: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            site: "Launch Site".to_string(),
            payload_mass: "Payload Mass (kg)".to_string(),
            outcome: "class".to_string(),
            booster_category: "Booster Version Category".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Interactive dashboard over launch records.
#[derive(Debug, Parser)]
#[command(name = "launch-dash", version, about)]
pub struct Cli {
    /// Launch records file (.csv, .json, .parquet or .pq)
    #[arg(env = "LAUNCH_DASH_DATA", default_value = "spacex_launch_dash.csv")]
    pub data_path: PathBuf,

    /// Payload slider increment in kg
    #[arg(
        long,
        env = "LAUNCH_DASH_SLIDER_STEP",
        default_value_t = 1000.0,
        value_parser = parse_slider_step
    )]
    pub slider_step: f64,

    /// Window title
    #[arg(long, default_value = "SpaceX Launch Records Dashboard")]
    pub title: String,
}

fn parse_slider_step(raw: &str) -> Result<f64, String> {
    let step: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not a number: {e}"))?;
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(format!("'{raw}' must be a positive, finite number of kg"))
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup configuration, resolved once from CLI args and environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    pub data_path: PathBuf,
    pub columns: ColumnMapping,
    pub title: String,
    /// Payload slider increment in kg.
    pub slider_step: f64,
    /// Lower end of the payload slider in kg.
    pub slider_min: f64,
    /// Upper end of the payload slider in kg.
    pub slider_max: f64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            columns: ColumnMapping::default(),
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider_step: 1000.0,
            slider_min: 0.0,
            slider_max: 10_000.0,
        }
    }
}

impl From<Cli> for DashConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data_path,
            title: cli.title,
            slider_step: cli.slider_step,
            ..Self::default()
        }
    }
}

impl DashConfig {
    /// Resolve from the process arguments and environment. Exits with a
    /// usage message on invalid input.
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    /// Resolve from an explicit argument list (first item is the binary
    /// name). Environment fallbacks still apply.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Cli::try_parse_from(args)?.into())
    }

    /// Slider span widened so that it always covers `[min, max]` payloads.
    pub fn slider_range(&self, min_payload: f64, max_payload: f64) -> RangeInclusive<f64> {
        self.slider_min.min(min_payload)..=self.slider_max.max(max_payload)
    }
}
