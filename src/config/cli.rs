//! CLI argument parsing and override mapping
//!
//! # Usage
//!
//! ```bash
//! postura train
//! postura train --config config.yaml --epochs 50 --batch-size 16
//! postura train --train-data-path /data/cube/TRAIN --check-data-only
//! postura inspect /data/cube
//! ```

use super::overrides::OverrideSet;
use super::schema::LaunchConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Postura: pose estimation training launcher and dataset tools
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "postura")]
#[command(version)]
#[command(about = "Launch pose estimation training and audit dataset annotations")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train the pose estimation model
    Train(TrainArgs),

    /// Audit orientation annotations in the training dataset
    Inspect(InspectArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct TrainArgs {
    /// Path to config file
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Root directory containing training/validation folders
    #[arg(long)]
    pub data_root: Option<PathBuf>,

    /// Name of the training data folder under the data root
    #[arg(long)]
    pub train_data_name: Option<String>,

    /// Name of the validation data folder under the data root
    #[arg(long)]
    pub val_data_name: Option<String>,

    /// Full path to the training data folder (overrides data-root + train-data-name)
    #[arg(long)]
    pub train_data_path: Option<PathBuf>,

    /// Full path to the validation data folder (overrides data-root + val-data-name)
    #[arg(long)]
    pub val_data_path: Option<PathBuf>,

    /// Directory to save logs and model checkpoints
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Number of training epochs
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Training batch size
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Learning rate for the optimizer
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Only check if data paths exist, do not train
    #[arg(long)]
    pub check_data_only: bool,

    /// Force training even if data paths do not exist
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Root directory containing the training data folder
    #[arg(value_name = "DATA_ROOT")]
    pub data_root: PathBuf,

    /// Path to config file
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Report format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,
}

/// Output format for the inspection report
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown report format: {}. Valid formats: text, json",
                s
            )),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Build the dotted-path override set from explicitly provided options
///
/// Unset options are not added, so loaded defaults stay untouched.
pub fn overrides_from_args(args: &TrainArgs) -> OverrideSet {
    let mut overrides = OverrideSet::new();

    if let Some(data_root) = &args.data_root {
        overrides.set_string("system.data_root", data_root.display().to_string());
    }
    if let Some(name) = &args.train_data_name {
        overrides.set_string("train.dataset_zip_file_name_training", name.clone());
    }
    if let Some(name) = &args.val_data_name {
        overrides.set_string("val.dataset_zip_file_name_validation", name.clone());
    }
    if let Some(log_dir) = &args.log_dir {
        overrides.set_string("system.log_dir_system", log_dir.display().to_string());
    }
    if let Some(epochs) = args.epochs {
        overrides.set_int("train.epochs", epochs as i64);
    }
    if let Some(batch_size) = args.batch_size {
        overrides.set_int("train.batch_training_size", batch_size as i64);
    }
    if let Some(lr) = args.learning_rate {
        overrides.set_float("adam_optimizer.lr", lr);
    }

    overrides
}

/// Apply the full-path overrides to an already loaded config
///
/// A full training path splits into parent directory (new `data_root`) and
/// leaf (new training folder name). A full validation path sets the
/// validation folder name the same way, but contributes its parent as
/// `data_root` only when no training path was given.
pub fn apply_direct_path_overrides(config: &mut LaunchConfig, args: &TrainArgs) {
    if let Some(train_path) = &args.train_data_path {
        config.system.data_root = parent_of(train_path);
        if let Some(name) = leaf_of(train_path) {
            config.train.dataset_zip_file_name_training = name;
        }
    }

    if let Some(val_path) = &args.val_data_path {
        if args.train_data_path.is_none() {
            config.system.data_root = parent_of(val_path);
        }
        if let Some(name) = leaf_of(val_path) {
            config.val.dataset_zip_file_name_validation = name;
        }
    }
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("")).to_path_buf()
}

fn leaf_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::load_config;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn train_args(argv: &[&str]) -> TrainArgs {
        let mut full = vec!["postura", "train"];
        full.extend_from_slice(argv);
        match parse_args(full).unwrap().command {
            Command::Train(args) => args,
            _ => panic!("Expected Train command"),
        }
    }

    #[test]
    fn test_parse_train_defaults() {
        let args = train_args(&[]);
        assert_eq!(args.config, PathBuf::from("config.yaml"));
        assert!(args.data_root.is_none());
        assert!(!args.check_data_only);
        assert!(!args.force);
    }

    #[test]
    fn test_parse_train_with_overrides() {
        let args = train_args(&[
            "--config",
            "other.yaml",
            "--data-root",
            "/data",
            "--epochs",
            "10",
            "--batch-size",
            "64",
            "--learning-rate",
            "0.0005",
        ]);
        assert_eq!(args.config, PathBuf::from("other.yaml"));
        assert_eq!(args.data_root, Some(PathBuf::from("/data")));
        assert_eq!(args.epochs, Some(10));
        assert_eq!(args.batch_size, Some(64));
        assert!((args.learning_rate.unwrap() - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn test_parse_train_flags() {
        let args = train_args(&["--check-data-only", "--force"]);
        assert!(args.check_data_only);
        assert!(args.force);
    }

    #[test]
    fn test_parse_inspect_command() {
        let cli = parse_args(["postura", "inspect", "/data/cube"]).unwrap();
        match cli.command {
            Command::Inspect(args) => {
                assert_eq!(args.data_root, PathBuf::from("/data/cube"));
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_parse_inspect_json_format() {
        let cli = parse_args(["postura", "inspect", "/data", "--format", "json"]).unwrap();
        match cli.command {
            Command::Inspect(args) => assert_eq!(args.format, ReportFormat::Json),
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["postura", "-v", "train"]).unwrap();
        assert!(cli.verbose && !cli.quiet);
        let cli = parse_args(["postura", "-q", "train"]).unwrap();
        assert!(!cli.verbose && cli.quiet);
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("csv".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_args(["postura", "unknown"]).is_err());
    }

    #[test]
    fn test_overrides_only_from_provided_options() {
        let args = train_args(&["--epochs", "5"]);
        let overrides = overrides_from_args(&args);
        let keys: Vec<&str> = overrides.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["train.epochs"]);
    }

    #[test]
    fn test_overrides_key_mapping() {
        let args = train_args(&[
            "--data-root",
            "/data",
            "--train-data-name",
            "TRAIN",
            "--val-data-name",
            "VAL",
            "--log-dir",
            "logs",
            "--epochs",
            "5",
            "--batch-size",
            "8",
            "--learning-rate",
            "0.01",
        ]);
        let overrides = overrides_from_args(&args);
        let keys: Vec<&str> = overrides.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "system.data_root",
                "train.dataset_zip_file_name_training",
                "val.dataset_zip_file_name_validation",
                "system.log_dir_system",
                "train.epochs",
                "train.batch_training_size",
                "adam_optimizer.lr",
            ]
        );
    }

    fn loaded_config() -> LaunchConfig {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"system:\n  data_root: /configured\n")
            .unwrap();
        load_config(file.path(), &OverrideSet::new()).unwrap()
    }

    #[test]
    fn test_train_data_path_overrides_root_and_name() {
        let mut config = loaded_config();
        let args = train_args(&["--train-data-path", "/x/y/TRAIN"]);
        apply_direct_path_overrides(&mut config, &args);
        assert_eq!(config.system.data_root, PathBuf::from("/x/y"));
        assert_eq!(config.train.dataset_zip_file_name_training, "TRAIN");
    }

    #[test]
    fn test_val_data_path_alone_sets_root() {
        let mut config = loaded_config();
        let args = train_args(&["--val-data-path", "/z/VAL"]);
        apply_direct_path_overrides(&mut config, &args);
        assert_eq!(config.system.data_root, PathBuf::from("/z"));
        assert_eq!(config.val.dataset_zip_file_name_validation, "VAL");
    }

    #[test]
    fn test_data_root_derived_from_train_path_only() {
        let mut config = loaded_config();
        let args = train_args(&[
            "--train-data-path",
            "/x/TRAIN",
            "--val-data-path",
            "/z/VAL",
        ]);
        apply_direct_path_overrides(&mut config, &args);
        // The validation path's parent is discarded for the root
        assert_eq!(config.system.data_root, PathBuf::from("/x"));
        assert_eq!(config.train.dataset_zip_file_name_training, "TRAIN");
        assert_eq!(config.val.dataset_zip_file_name_validation, "VAL");
    }
}
