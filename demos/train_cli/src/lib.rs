//! Option surface for the `train_cli` demo.
//!
//! Registers a handful of options covering every taker kind, then turns the
//! bound state into typed [`Settings`].

pub mod error;

use optmatch::{Cli, FlagKind, Taker, ValueSpec};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Usage block shown above the option summary by `--help`.
pub const USAGE: &str = "Usage: train_cli [options] [inputs...]\n\nTrains a model on the given logs.";

/// Settings bound by a parse.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Print progress while training.
    pub verbose: bool,
    /// Passes over the data.
    pub epochs: i64,
    /// Learning rate.
    pub rate: f64,
    /// Training log.
    #[serde(default)]
    pub train_file: Option<String>,
    /// Evaluation input log.
    #[serde(default)]
    pub input_file: Option<String>,
    /// Numbers given to `--sum`.
    #[serde(default)]
    pub sum: Vec<String>,
    /// Positional inputs.
    #[serde(default)]
    pub inputs: Vec<String>,
}

/// Summary written to standard output.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// The extracted settings.
    pub settings: Settings,
    /// Total of the `--sum` values.
    pub total: i64,
}

impl From<Settings> for Summary {
    fn from(settings: Settings) -> Self {
        let total = settings
            .sum
            .iter()
            .filter_map(|value| value.parse::<i64>().ok())
            .fold(0_i64, i64::saturating_add);
        Self { settings, total }
    }
}

/// Builds the demo's command line.
///
/// # Errors
///
/// Returns an error if an option definition is rejected.
pub fn build_cli() -> Result<Cli> {
    let mut cli = Cli::new();
    cli.add_option(
        "-s --sum",
        Taker::append("sum", ValueSpec::integer(), 1, None)?,
        &["Integers to add up."],
    )?;
    cli.add_option("-t --train-file", "train_file", &["Training log to read."])?;
    cli.add_option("-i --input-file", "input_file", &["Evaluation log to read."])?;
    cli.define_flag(FlagKind::Boolean, "-v --verbose", "false", &["Print progress."])?;
    cli.define_flag(FlagKind::Integer, "-e --epochs", "10", &["Passes over the data."])?;
    cli.define_flag(FlagKind::Float, "rate", "0.01", &["Learning rate."])?;
    cli.add_include("-c --config", &["Read options from a file, one set per line."])?;
    cli.add_positional("inputs", &["Additional input files."])?;
    cli.add_help(None, Some(USAGE))?;
    Ok(cli)
}

/// Extracts typed settings from a parsed command line.
///
/// # Errors
///
/// Returns an error if the bindings do not deserialize into [`Settings`].
pub fn settings(cli: &Cli) -> Result<Settings> {
    cli.extract().map_err(|err| Box::new(err).into())
}
