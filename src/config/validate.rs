//! Pre-flight data path validation
//!
//! Missing data directories are an expected, reportable condition rather
//! than an error: all three checks always run, each is reported
//! individually, and the caller decides what the aggregate means.

use super::schema::LaunchConfig;
use crate::logging::{log, LogLevel};
use std::path::PathBuf;

/// Existence check for a single candidate path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCheck {
    pub path: PathBuf,
    pub exists: bool,
}

impl PathCheck {
    fn of(path: PathBuf) -> Self {
        let exists = path.exists();
        Self { path, exists }
    }
}

/// Result of the three data-path checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    pub data_root: PathCheck,
    pub train_data: PathCheck,
    pub val_data: PathCheck,
}

impl PathReport {
    /// True iff every checked path exists
    pub fn all_present(&self) -> bool {
        self.data_root.exists && self.train_data.exists && self.val_data.exists
    }

    /// Print the check results, one warning per missing path
    pub fn print(&self, level: LogLevel) {
        log(level, LogLevel::Normal, "Checking data paths...");
        log(
            level,
            LogLevel::Normal,
            &format!("Data root: {}", self.data_root.path.display()),
        );
        log(
            level,
            LogLevel::Normal,
            &format!("Training data: {}", self.train_data.path.display()),
        );
        log(
            level,
            LogLevel::Normal,
            &format!("Validation data: {}", self.val_data.path.display()),
        );

        if !self.data_root.exists {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "WARNING: Data root directory does not exist: {}\n\
                     Please create it or specify a different path with --data-root",
                    self.data_root.path.display()
                ),
            );
        }
        if !self.train_data.exists {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "WARNING: Training data directory does not exist: {}\n\
                     Please create it or specify a different name with --train-data-name",
                    self.train_data.path.display()
                ),
            );
        }
        if !self.val_data.exists {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "WARNING: Validation data directory does not exist: {}\n\
                     Please create it or specify a different name with --val-data-name",
                    self.val_data.path.display()
                ),
            );
        }

        if self.all_present() {
            log(level, LogLevel::Normal, "All data paths exist!");
        }
    }
}

/// Check existence of the data root and both split folders
///
/// All three paths are always checked, in order: data root, training data,
/// validation data. Never fails.
pub fn check_data_paths(config: &LaunchConfig) -> PathReport {
    PathReport {
        data_root: PathCheck::of(config.system.data_root.clone()),
        train_data: PathCheck::of(config.train_data_path()),
        val_data: PathCheck::of(config.val_data_path()),
    }
}
