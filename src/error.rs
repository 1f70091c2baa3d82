//! Error types for postura

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Data validation failed. Use --force to proceed anyway or fix the paths.")]
    DataPathsMissing,

    #[error("Failed to construct estimator: {0}")]
    Estimator(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("No orientation data could be loaded from the dataset")]
    EmptyDataset,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
