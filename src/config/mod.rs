//! Configuration resolution and validation
//!
//! A run's configuration is resolved in layers: the YAML document, then the
//! dotted-path overrides built from explicitly provided CLI options, then the
//! direct full-path overrides. Pre-flight data path checks live here too.
//!
//! # Example
//!
//! ```yaml
//! system:
//!   data_root: /data/pose
//!   log_dir_system: runs/
//!
//! train:
//!   dataset_zip_file_name_training: UR3_single_cube_training
//!   epochs: 100
//!   batch_training_size: 32
//!
//! val:
//!   dataset_zip_file_name_validation: UR3_single_cube_validation
//!
//! adam_optimizer:
//!   lr: 0.001
//! ```

mod cli;
mod loader;
mod overrides;
mod schema;
mod validate;



pub use cli::{
    apply_direct_path_overrides, overrides_from_args, parse_args, Cli, Command, InspectArgs,
    ReportFormat, TrainArgs,
};
pub use loader::load_config;
pub use overrides::{apply_overrides, set_dotted, OverrideSet};
pub use schema::{AdamConfig, LaunchConfig, SystemConfig, TrainSection, ValSection};
pub use validate::{check_data_paths, PathCheck, PathReport};
