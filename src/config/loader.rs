//! Configuration loading
//!
//! Loading is a three step pipeline: read the YAML document, patch the raw
//! value tree with the dotted-path overrides, then deserialize once into the
//! typed [`LaunchConfig`]. Semantic checks (path existence, value ranges) are
//! deliberately left to the consumers.

use super::overrides::{apply_overrides, OverrideSet};
use super::schema::LaunchConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a configuration file and apply overrides
///
/// Fails with [`Error::ConfigNotFound`] if the file is absent and with
/// [`Error::ConfigParse`] on malformed YAML or a document that does not
/// match the schema.
pub fn load_config<P: AsRef<Path>>(path: P, overrides: &OverrideSet) -> Result<LaunchConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let mut doc: serde_yaml::Value = serde_yaml::from_str(&contents)
        .map_err(|e| Error::ConfigParse(format!("{}: {}", path.display(), e)))?;

    apply_overrides(&mut doc, overrides);

    serde_yaml::from_value(doc)
        .map_err(|e| Error::ConfigParse(format!("{}: {}", path.display(), e)))
}
