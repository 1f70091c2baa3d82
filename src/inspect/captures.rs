//! Orientation labels read from Unity Perception capture files
//!
//! A dataset folder contains one or more `Dataset<guid>` directories, each
//! holding numbered `captures_*.json` files. Every annotation value carrying
//! a 4-component `rotation` is an orientation label. Images referenced by
//! the captures are never opened; the audit needs only the labels.

use super::dataset::{DatasetProvider, InMemorySource, OrientationSource};
use crate::config::LaunchConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CapturesFile {
    #[serde(default)]
    captures: Vec<Capture>,
}

#[derive(Debug, Deserialize)]
struct Capture {
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(default)]
    values: Vec<AnnotationValue>,
}

#[derive(Debug, Deserialize)]
struct AnnotationValue {
    rotation: Option<[f64; 4]>,
}

/// Provider reading orientations from Unity Perception captures
#[derive(Debug, Clone, Copy, Default)]
pub struct CapturesProvider;

impl DatasetProvider for CapturesProvider {
    fn open(
        &self,
        _config: &LaunchConfig,
        data_root: &Path,
        _split: &str,
        folder: &str,
        sample_size: i64,
    ) -> Result<Box<dyn OrientationSource>> {
        let dataset_dir = data_root.join(folder);
        if !dataset_dir.is_dir() {
            return Err(Error::Dataset(format!(
                "dataset directory not found: {}",
                dataset_dir.display()
            )));
        }

        let mut files = Vec::new();
        collect_capture_files(&dataset_dir, &mut files)?;
        files.sort();

        let mut orientations = Vec::new();
        for file in &files {
            read_orientations(file, &mut orientations)?;
        }

        if sample_size >= 0 {
            orientations.truncate(sample_size as usize);
        }

        Ok(Box::new(InMemorySource::new(orientations)))
    }
}

/// Recursively gather every `captures_*.json` under `dir`
fn collect_capture_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_capture_files(&path, files)?;
        } else if is_captures_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_captures_file(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with("captures_") && name.ends_with(".json"),
        None => false,
    }
}

/// Append every rotation annotation in `file`, in document order
fn read_orientations(file: &Path, orientations: &mut Vec<[f64; 4]>) -> Result<()> {
    let contents = fs::read_to_string(file)?;
    let parsed: CapturesFile = serde_json::from_str(&contents)
        .map_err(|e| Error::Dataset(format!("{}: {}", file.display(), e)))?;

    for capture in &parsed.captures {
        for annotation in &capture.annotations {
            for value in &annotation.values {
                if let Some(rotation) = value.rotation {
                    orientations.push(rotation);
                }
            }
        }
    }
    Ok(())
}
