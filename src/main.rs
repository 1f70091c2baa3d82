//! Postura CLI
//!
//! Operational entry points for the pose estimation model.
//!
//! # Usage
//!
//! ```bash
//! # Train with the default config.yaml
//! postura train
//!
//! # Train with overrides
//! postura train --config config.yaml --epochs 50 --batch-size 16
//!
//! # Point directly at a training data folder
//! postura train --train-data-path /data/cube/UR3_single_cube_training
//!
//! # Only verify that the data paths exist
//! postura train --check-data-only
//!
//! # Audit orientation annotations in the training dataset
//! postura inspect /data/cube
//! ```

use clap::Parser;
use postura::config::{Cli, Command};
use postura::estimator::ProcessEstimatorFactory;
use postura::inspect::{run_inspect, CapturesProvider};
use postura::launch::{run_launch, LaunchOutcome};
use postura::logging::LogLevel;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Train(args) => match run_launch(&args, &ProcessEstimatorFactory, level) {
            Ok(LaunchOutcome::DataCheckFailed) => ExitCode::from(1),
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Inspect(args) => match run_inspect(&args, &CapturesProvider, level) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}
