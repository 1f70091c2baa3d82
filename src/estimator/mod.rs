//! Estimator collaborator seam
//!
//! The model, optimizer, and training loop live in an external stack. The
//! launcher only needs the capability set below: construct from a resolved
//! configuration, report a device, run a blocking training operation, and
//! flush the logging resource afterwards. Keeping the seam as trait objects
//! lets the launcher be exercised with a recording fake in tests.

mod process;

pub use process::{ProcessEstimator, ProcessEstimatorFactory};

use crate::config::LaunchConfig;
use crate::error::Result;

/// A constructed training estimator
pub trait Estimator {
    /// Device the estimator will train on
    fn device(&self) -> &str;

    /// Run training to completion. Blocking; internal progress reporting is
    /// opaque to the launcher.
    fn train(&mut self) -> Result<()>;

    /// Flush and close the estimator's logging resource
    fn finish(&mut self) -> Result<()>;
}

/// Builds estimators from a resolved configuration
pub trait EstimatorFactory {
    fn build(&self, config: &LaunchConfig) -> Result<Box<dyn Estimator>>;
}
