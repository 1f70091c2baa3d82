//! Typed configuration schema for the launcher and inspector
//!
//! The reference configuration document is a nested YAML mapping; this module
//! gives every key the tools read a named field. Sections and fields that a
//! partial document may omit carry serde defaults, so only `system.data_root`
//! is mandatory. Keys owned by the external training stack are tolerated and
//! ignored.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete launcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// System paths and external trainer wiring
    pub system: SystemConfig,

    /// Training split and hyperparameters
    #[serde(default)]
    pub train: TrainSection,

    /// Validation split
    #[serde(default)]
    pub val: ValSection,

    /// Adam optimizer parameters
    #[serde(default)]
    pub adam_optimizer: AdamConfig,
}

/// System section: filesystem roots and the external trainer command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Root directory containing the dataset folders
    pub data_root: PathBuf,

    /// Destination for logs and model checkpoints
    #[serde(default = "default_log_dir")]
    pub log_dir_system: PathBuf,

    /// Argv prefix of the external trainer (e.g. `[pose_estimation, train]`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_command: Option<Vec<String>>,
}

/// Training split configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSection {
    /// Folder (or archive) name of the training data under `data_root`
    #[serde(default = "default_train_folder")]
    pub dataset_zip_file_name_training: String,

    /// Number of training epochs
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// Training batch size
    #[serde(default = "default_batch_size")]
    pub batch_training_size: usize,

    /// Number of training samples to load; -1 means the full dataset
    #[serde(default = "default_sample_size")]
    pub sample_size_train: i64,
}

/// Validation split configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValSection {
    /// Folder (or archive) name of the validation data under `data_root`
    #[serde(default = "default_val_folder")]
    pub dataset_zip_file_name_validation: String,

    /// Number of validation samples to load; -1 means the full dataset
    #[serde(default = "default_sample_size")]
    pub sample_size_val: i64,
}

/// Adam optimizer parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdamConfig {
    /// Learning rate
    #[serde(default = "default_lr")]
    pub lr: f64,

    /// First-moment decay
    #[serde(default = "default_beta_1")]
    pub beta_1: f64,

    /// Second-moment decay
    #[serde(default = "default_beta_2")]
    pub beta_2: f64,
}

impl LaunchConfig {
    /// Resolved path of the training data folder
    pub fn train_data_path(&self) -> PathBuf {
        self.system
            .data_root
            .join(&self.train.dataset_zip_file_name_training)
    }

    /// Resolved path of the validation data folder
    pub fn val_data_path(&self) -> PathBuf {
        self.system
            .data_root
            .join(&self.val.dataset_zip_file_name_validation)
    }
}

impl Default for TrainSection {
    fn default() -> Self {
        Self {
            dataset_zip_file_name_training: default_train_folder(),
            epochs: default_epochs(),
            batch_training_size: default_batch_size(),
            sample_size_train: default_sample_size(),
        }
    }
}

impl Default for ValSection {
    fn default() -> Self {
        Self {
            dataset_zip_file_name_validation: default_val_folder(),
            sample_size_val: default_sample_size(),
        }
    }
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self {
            lr: default_lr(),
            beta_1: default_beta_1(),
            beta_2: default_beta_2(),
        }
    }
}

impl SystemConfig {
    /// Minimal system section rooted at the given directory
    pub fn rooted_at<P: AsRef<Path>>(data_root: P) -> Self {
        Self {
            data_root: data_root.as_ref().to_path_buf(),
            log_dir_system: default_log_dir(),
            trainer_command: None,
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("runs")
}

fn default_train_folder() -> String {
    "UR3_single_cube_training".to_string()
}

fn default_val_folder() -> String {
    "UR3_single_cube_validation".to_string()
}

fn default_epochs() -> usize {
    100
}

fn default_batch_size() -> usize {
    32
}

fn default_sample_size() -> i64 {
    -1
}

fn default_lr() -> f64 {
    1e-3
}

fn default_beta_1() -> f64 {
    0.9
}

fn default_beta_2() -> f64 {
    0.999
}
