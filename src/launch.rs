//! Training launcher
//!
//! Drives a single end-to-end run: resolve configuration, print the run
//! summary, validate data paths, then hand off to the estimator. The
//! check-only and force flags short-circuit or override the validation
//! branch; everything after argument parsing is pure orchestration.

use crate::config::{
    apply_direct_path_overrides, check_data_paths, load_config, overrides_from_args, LaunchConfig,
    TrainArgs,
};
use crate::error::{Error, Result};
use crate::estimator::EstimatorFactory;
use crate::logging::{log, LogLevel};
use std::path::{Path, PathBuf};

/// How a launcher run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// `--check-data-only` ran and every data path exists
    DataCheckPassed,
    /// `--check-data-only` ran and at least one data path is missing
    DataCheckFailed,
    /// Training ran to completion
    Trained,
}

/// Run the launcher end to end
///
/// Returns the outcome for exit-code mapping; configuration errors, aborted
/// validation, and training failures surface as [`Error`]s.
pub fn run_launch(
    args: &TrainArgs,
    factory: &dyn EstimatorFactory,
    level: LogLevel,
) -> Result<LaunchOutcome> {
    let overrides = overrides_from_args(args);
    log(
        level,
        LogLevel::Verbose,
        &format!("Applying {} configuration override(s)", overrides.len()),
    );
    let mut config = load_config(&args.config, &overrides)?;
    apply_direct_path_overrides(&mut config, args);

    print_summary(args, &config, level);

    let report = check_data_paths(&config);
    report.print(level);
    let data_valid = report.all_present();

    if args.check_data_only {
        log(level, LogLevel::Normal, "Data path check complete.");
        return Ok(if data_valid {
            LaunchOutcome::DataCheckPassed
        } else {
            LaunchOutcome::DataCheckFailed
        });
    }

    if !data_valid && !args.force {
        return Err(Error::DataPathsMissing);
    }

    match run_training(&config, factory, level) {
        Ok(()) => Ok(LaunchOutcome::Trained),
        Err(e) => {
            // Structural failures get the full error chain before propagating
            eprintln!("Error during training: {e}");
            eprintln!("{e:?}");
            Err(e)
        }
    }
}

fn run_training(
    config: &LaunchConfig,
    factory: &dyn EstimatorFactory,
    level: LogLevel,
) -> Result<()> {
    let banner = "=".repeat(80);
    log(level, LogLevel::Normal, &format!("\n{banner}"));
    log(level, LogLevel::Normal, "STARTING MODEL TRAINING");
    log(level, LogLevel::Normal, &banner);

    let mut estimator = factory.build(config)?;

    let log_dir = absolute(&config.system.log_dir_system);
    log(
        level,
        LogLevel::Normal,
        &format!("Device: {}", estimator.device()),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Model will be saved to: {}", log_dir.display()),
    );
    log(level, LogLevel::Normal, &banner);

    log(level, LogLevel::Normal, "Starting training...");
    estimator.train()?;
    estimator.finish()?;

    log(level, LogLevel::Normal, &format!("\n{banner}"));
    log(level, LogLevel::Normal, "TRAINING COMPLETED SUCCESSFULLY!");
    log(
        level,
        LogLevel::Normal,
        &format!("Models saved in: {}", log_dir.display()),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Monitor training progress with: tensorboard --logdir \"{}\"",
            log_dir.display()
        ),
    );
    log(level, LogLevel::Normal, &banner);

    Ok(())
}

fn print_summary(args: &TrainArgs, config: &LaunchConfig, level: LogLevel) {
    let banner = "=".repeat(60);
    log(level, LogLevel::Normal, &banner);
    log(level, LogLevel::Normal, "TRAINING CONFIGURATION");
    log(level, LogLevel::Normal, &banner);
    log(
        level,
        LogLevel::Normal,
        &format!("Configuration file: {}", args.config.display()),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Data root: {}", config.system.data_root.display()),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Training data: {}",
            config.train.dataset_zip_file_name_training
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Validation data: {}",
            config.val.dataset_zip_file_name_validation
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Log directory: {}", config.system.log_dir_system.display()),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Training epochs: {}", config.train.epochs),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Batch size: {}", config.train.batch_training_size),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Learning rate: {}", config.adam_optimizer.lr),
    );
    log(level, LogLevel::Normal, &banner);
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
