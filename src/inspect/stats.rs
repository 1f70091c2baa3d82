//! Orientation variation analysis
//!
//! Distinct-value counting uses exact equality on the quaternion components
//! (bitwise keys, so the set is well defined even for non-finite values).
//! Component statistics are computed along axis 0 of the `(n, 4)` sample
//! array with population standard deviation (ddof 0).

use crate::logging::{log, LogLevel};
use ndarray::{Array2, ArrayView1, Axis};
use serde::Serialize;
use std::collections::HashSet;

/// How much the orientation annotations vary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationLevel {
    /// Exactly one distinct value in the whole dataset
    Identical,
    /// Fewer than ten distinct values
    VeryLow,
    /// Ten or more distinct values
    Good,
}

/// Per-component statistics over all collected samples
#[derive(Debug, Clone, Serialize)]
pub struct ComponentStats {
    pub mean: [f64; 4],
    pub std_dev: [f64; 4],
    pub min: [f64; 4],
    pub max: [f64; 4],
}

/// Result of the annotation audit
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    /// Total annotations processed
    pub total_samples: usize,
    /// Distinct orientations, in first-seen order
    pub unique_orientations: Vec<[f64; 4]>,
    pub variation: VariationLevel,
    pub stats: ComponentStats,
}

/// Analyze a non-empty `(n, 4)` orientation array
pub fn analyze(orientations: &Array2<f64>) -> InspectionReport {
    assert!(
        orientations.nrows() > 0,
        "analysis requires at least one sample"
    );

    let unique_orientations = distinct_rows(orientations);
    let variation = match unique_orientations.len() {
        1 => VariationLevel::Identical,
        n if n < 10 => VariationLevel::VeryLow,
        _ => VariationLevel::Good,
    };

    let mean = orientations
        .mean_axis(Axis(0))
        .map(|m| quad(m.view()))
        .unwrap_or([0.0; 4]);
    let std_dev = quad(orientations.std_axis(Axis(0), 0.0).view());

    let mut min = [f64::INFINITY; 4];
    let mut max = [f64::NEG_INFINITY; 4];
    for row in orientations.rows() {
        for component in 0..4 {
            min[component] = min[component].min(row[component]);
            max[component] = max[component].max(row[component]);
        }
    }

    InspectionReport {
        total_samples: orientations.nrows(),
        unique_orientations,
        variation,
        stats: ComponentStats {
            mean,
            std_dev,
            min,
            max,
        },
    }
}

fn distinct_rows(orientations: &Array2<f64>) -> Vec<[f64; 4]> {
    let mut seen: HashSet<[u64; 4]> = HashSet::new();
    let mut unique = Vec::new();
    for row in orientations.rows() {
        let value = quad(row);
        let key = value.map(f64::to_bits);
        if seen.insert(key) {
            unique.push(value);
        }
    }
    unique
}

fn quad(row: ArrayView1<f64>) -> [f64; 4] {
    [row[0], row[1], row[2], row[3]]
}

impl InspectionReport {
    /// Print the analysis and the component statistics table
    pub fn print(&self, level: LogLevel) {
        log(level, LogLevel::Normal, "\n--- Annotation Analysis Results ---");
        log(
            level,
            LogLevel::Normal,
            &format!("Total annotations processed: {}", self.total_samples),
        );
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Number of unique orientations: {}",
                self.unique_orientations.len()
            ),
        );

        match self.variation {
            VariationLevel::Identical => {
                log(
                    level,
                    LogLevel::Normal,
                    "All orientation annotations are identical!",
                );
                log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "The single unique value is: {}",
                        format_quad(&self.unique_orientations[0])
                    ),
                );
            }
            VariationLevel::VeryLow => {
                log(
                    level,
                    LogLevel::Normal,
                    "Very low variation detected in orientation annotations.",
                );
                log(level, LogLevel::Normal, "Unique values found:");
                for value in &self.unique_orientations {
                    log(level, LogLevel::Normal, &format!("  {}", format_quad(value)));
                }
            }
            VariationLevel::Good => {
                log(
                    level,
                    LogLevel::Normal,
                    "Good variation detected in orientation annotations.",
                );
            }
        }

        log(
            level,
            LogLevel::Normal,
            "\n--- Quaternion Component Statistics (q_x, q_y, q_z, q_w) ---",
        );
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{:<10} | {:<15} | {:<15} | {:<15} | {:<15}",
                "Stat", "q_x", "q_y", "q_z", "q_w"
            ),
        );
        log(level, LogLevel::Normal, &"-".repeat(75));
        for (name, values) in [
            ("Mean", &self.stats.mean),
            ("Std Dev", &self.stats.std_dev),
            ("Min", &self.stats.min),
            ("Max", &self.stats.max),
        ] {
            let row = values
                .iter()
                .map(|v| format!("{v:<15.6}"))
                .collect::<Vec<_>>()
                .join(" | ");
            log(level, LogLevel::Normal, &format!("{name:<10} | {row}"));
        }
        log(level, LogLevel::Normal, &"-".repeat(75));
    }
}

fn format_quad(value: &[f64; 4]) -> String {
    format!(
        "[{:.6}, {:.6}, {:.6}, {:.6}]",
        value[0], value[1], value[2], value[3]
    )
}
