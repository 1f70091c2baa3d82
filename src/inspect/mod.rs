//! Dataset annotation audit
//!
//! Loads the training split through the dataset seam and analyzes the
//! variation of its orientation annotations. A dataset whose orientation
//! labels barely vary usually means a broken annotation pipeline; this tool
//! surfaces that before a long training run does.

mod captures;
mod dataset;
mod stats;

pub use captures::CapturesProvider;
pub use dataset::{collect_orientations, DatasetProvider, InMemorySource, OrientationSource};
pub use stats::{analyze, ComponentStats, InspectionReport, VariationLevel};

use crate::config::{load_config, InspectArgs, OverrideSet, ReportFormat};
use crate::error::{Error, Result};
use crate::logging::{log, LogLevel};

/// Run the annotation audit end to end
///
/// Loads the configuration with `system.data_root` overridden by the CLI
/// argument, opens the training split through `provider`, collects every
/// orientation, and prints the report in the requested format.
pub fn run_inspect(
    args: &InspectArgs,
    provider: &dyn DatasetProvider,
    level: LogLevel,
) -> Result<InspectionReport> {
    log(level, LogLevel::Normal, "--- Starting Data Inspection ---");

    let mut overrides = OverrideSet::new();
    overrides.set_string("system.data_root", args.data_root.display().to_string());
    let config = load_config(&args.config, &overrides)?;
    log(
        level,
        LogLevel::Normal,
        &format!("Configuration loaded from '{}'", args.config.display()),
    );

    let train_data_path = config.train_data_path();
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Checking for training data in: {}",
            train_data_path.display()
        ),
    );
    if !train_data_path.exists() {
        return Err(Error::Dataset(format!(
            "training data directory not found: {}",
            train_data_path.display()
        )));
    }
    log(level, LogLevel::Normal, "Training data directory found.");

    let source = provider.open(
        &config,
        &config.system.data_root,
        "train",
        &config.train.dataset_zip_file_name_training,
        config.train.sample_size_train,
    )?;
    log(
        level,
        LogLevel::Normal,
        &format!("Dataset opened. Found {} samples.", source.len()),
    );

    let orientations = collect_orientations(source.as_ref(), level)?;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Finished processing. Total samples loaded: {}.",
            orientations.nrows()
        ),
    );

    let report = analyze(&orientations);
    match args.format {
        ReportFormat::Text => report.print(level),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::Dataset(format!("failed to serialize report: {e}")))?;
            println!("{json}");
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaunchConfig;
    use std::io::Write;
    use std::path::Path;
    use tempfile::{NamedTempFile, TempDir};

    struct FixedProvider {
        orientations: Vec<[f64; 4]>,
    }

    impl DatasetProvider for FixedProvider {
        fn open(
            &self,
            _config: &LaunchConfig,
            _data_root: &Path,
            _split: &str,
            _folder: &str,
            sample_size: i64,
        ) -> Result<Box<dyn OrientationSource>> {
            let mut orientations = self.orientations.clone();
            if sample_size >= 0 {
                orientations.truncate(sample_size as usize);
            }
            Ok(Box::new(InMemorySource::new(orientations)))
        }
    }

    /// Config file plus an existing TRAIN folder under a fresh root
    fn fixture() -> (TempDir, NamedTempFile, InspectArgs) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("TRAIN")).unwrap();

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"system:\n  data_root: /ignored\ntrain:\n  dataset_zip_file_name_training: TRAIN\n",
        )
        .unwrap();

        let args = InspectArgs {
            data_root: dir.path().to_path_buf(),
            config: file.path().to_path_buf(),
            format: ReportFormat::Text,
        };
        (dir, file, args)
    }

    #[test]
    fn test_identical_annotations_report() {
        let (_dir, _file, args) = fixture();
        let provider = FixedProvider {
            orientations: vec![[1.0, 0.0, 0.0, 0.0]; 50],
        };

        let report = run_inspect(&args, &provider, LogLevel::Quiet).unwrap();
        assert_eq!(report.total_samples, 50);
        assert_eq!(report.variation, VariationLevel::Identical);
        assert_eq!(report.unique_orientations, vec![[1.0, 0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_good_variation_report() {
        let (_dir, _file, args) = fixture();
        let orientations: Vec<[f64; 4]> =
            (0..50).map(|i| [(i % 12) as f64, 0.0, 0.0, 1.0]).collect();
        let provider = FixedProvider { orientations };

        let report = run_inspect(&args, &provider, LogLevel::Quiet).unwrap();
        assert_eq!(report.unique_orientations.len(), 12);
        assert_eq!(report.variation, VariationLevel::Good);
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let (_dir, _file, args) = fixture();
        let provider = FixedProvider {
            orientations: vec![],
        };

        let err = run_inspect(&args, &provider, LogLevel::Quiet).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn test_missing_config_file() {
        let (dir, _file, mut args) = fixture();
        args.config = dir.path().join("absent.yaml");
        let provider = FixedProvider {
            orientations: vec![[0.0, 0.0, 0.0, 1.0]],
        };

        let err = run_inspect(&args, &provider, LogLevel::Quiet).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_missing_training_directory() {
        let (dir, _file, mut args) = fixture();
        args.data_root = dir.path().join("elsewhere");
        let provider = FixedProvider {
            orientations: vec![[0.0, 0.0, 0.0, 1.0]],
        };

        let err = run_inspect(&args, &provider, LogLevel::Quiet).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn test_data_root_argument_overrides_config() {
        let (_dir, _file, args) = fixture();
        // The config document points data_root at /ignored; the CLI argument
        // must win for the training directory check to pass.
        let provider = FixedProvider {
            orientations: vec![[0.0, 0.0, 0.0, 1.0]; 3],
        };
        let report = run_inspect(&args, &provider, LogLevel::Quiet).unwrap();
        assert_eq!(report.total_samples, 3);
    }

    #[test]
    fn test_sample_size_limit_is_passed_through() {
        let (dir, _file, mut args) = fixture();
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "system:\n  data_root: {}\ntrain:\n  dataset_zip_file_name_training: TRAIN\n  sample_size_train: 5\n",
            dir.path().display()
        )
        .unwrap();
        args.config = file.path().to_path_buf();

        let provider = FixedProvider {
            orientations: vec![[0.0, 0.0, 0.0, 1.0]; 20],
        };
        let report = run_inspect(&args, &provider, LogLevel::Quiet).unwrap();
        assert_eq!(report.total_samples, 5);
    }
}
