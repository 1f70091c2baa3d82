//! External trainer invoked as a child process
//!
//! The pose estimation stack ships its own console entry point; this backend
//! hands it the fully resolved configuration and blocks until it exits. The
//! handoff contract: the resolved config is written to
//! `<log_dir_system>/resolved_config.yaml` and appended as the final argument
//! of `system.trainer_command`.

use super::{Estimator, EstimatorFactory};
use crate::config::LaunchConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const RESOLVED_CONFIG_FILE: &str = "resolved_config.yaml";

/// Factory for [`ProcessEstimator`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEstimatorFactory;

impl EstimatorFactory for ProcessEstimatorFactory {
    fn build(&self, config: &LaunchConfig) -> Result<Box<dyn Estimator>> {
        let command = config
            .system
            .trainer_command
            .clone()
            .filter(|argv| !argv.is_empty())
            .ok_or_else(|| {
                Error::Estimator(
                    "system.trainer_command is not set; configure the external trainer command"
                        .to_string(),
                )
            })?;

        let config_path = write_resolved_config(config)?;

        Ok(Box::new(ProcessEstimator {
            command,
            config_path,
        }))
    }
}

/// Serialize the resolved config into the log directory for the child
fn write_resolved_config(config: &LaunchConfig) -> Result<PathBuf> {
    let log_dir = &config.system.log_dir_system;
    fs::create_dir_all(log_dir)?;

    let contents = serde_yaml::to_string(config)
        .map_err(|e| Error::Estimator(format!("Failed to serialize resolved config: {e}")))?;
    let path = log_dir.join(RESOLVED_CONFIG_FILE);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Estimator backend that delegates training to an external command
pub struct ProcessEstimator {
    command: Vec<String>,
    config_path: PathBuf,
}

impl ProcessEstimator {
    /// Path of the resolved-config handoff file
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

impl Estimator for ProcessEstimator {
    fn device(&self) -> &str {
        // Device selection belongs to the external trainer
        "external"
    }

    fn train(&mut self) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| Error::Estimator("empty trainer command".to_string()))?;

        let status = Command::new(program)
            .args(args)
            .arg(&self.config_path)
            .status()
            .map_err(|e| Error::Training(format!("Failed to spawn {program}: {e}")))?;

        if !status.success() {
            return Err(Error::Training(match status.code() {
                Some(code) => format!("{program} exited with status {code}"),
                None => format!("{program} was terminated by a signal"),
            }));
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // The external trainer flushes its own logger on exit
        Ok(())
    }
}
