//! Batch training collaborator for the uploaded-dataset variant.
//!
//! One tabular input, one seeded holdout split, one fitted
//! logistic-regression model. The trainer reports metrics and discards the
//! model; nothing is persisted.

mod model;
mod parser;

pub use model::LogisticModel;

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Default target column of the source dataset exports.
pub const DEFAULT_TARGET_COLUMN: &str = "Class/ASD Traits";

#[derive(Debug)]
pub enum TrainingError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn { column: String },
    InvalidNumber { column: String, row: usize },
    NoFeatureColumns,
    DatasetTooSmall { rows: usize },
}

impl std::fmt::Display for TrainingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainingError::Io(err) => write!(f, "failed to read dataset: {}", err),
            TrainingError::Csv(err) => write!(f, "invalid dataset CSV: {}", err),
            TrainingError::MissingColumn { column } => {
                write!(f, "dataset lacks required column '{}'", column)
            }
            TrainingError::InvalidNumber { column, row } => {
                write!(f, "row {}: column '{}' is not numeric", row, column)
            }
            TrainingError::NoFeatureColumns => {
                write!(f, "dataset has no feature columns beside the target")
            }
            TrainingError::DatasetTooSmall { rows } => {
                write!(f, "dataset has only {} row(s), too few to split", rows)
            }
        }
    }
}

impl std::error::Error for TrainingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainingError::Io(err) => Some(err),
            TrainingError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrainingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TrainingError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Knobs for one training run. The defaults mirror the source tooling:
/// 80/20 split, fixed seed 42.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub target_column: String,
    pub holdout_ratio: f64,
    pub epochs: usize,
    pub learning_rate: f64,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            holdout_ratio: 0.2,
            epochs: 500,
            learning_rate: 0.1,
            seed: 42,
        }
    }
}

/// Metrics returned to the caller after a run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub feature_names: Vec<String>,
    pub positives: usize,
    pub negatives: usize,
    pub holdout_rows: usize,
    pub accuracy: f64,
}

pub struct DatasetTrainer;

impl DatasetTrainer {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        config: &TrainingConfig,
    ) -> Result<TrainingReport, TrainingError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, config)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        config: &TrainingConfig,
    ) -> Result<TrainingReport, TrainingError> {
        let dataset = parser::parse_dataset(reader, &config.target_column)?;
        let rows = dataset.targets.len();
        if rows < 5 {
            return Err(TrainingError::DatasetTooSmall { rows });
        }

        let mut indices: Vec<usize> = (0..rows).collect();
        let mut rng = StdRng::seed_from_u64(config.seed);
        indices.shuffle(&mut rng);

        let holdout = ((rows as f64) * config.holdout_ratio).round() as usize;
        let holdout = holdout.clamp(1, rows - 1);
        let (test_indices, train_indices) = indices.split_at(holdout);

        let columns = dataset.feature_names.len();
        let (mut train_x, train_y) = gather(&dataset.features, &dataset.targets, train_indices, columns);
        let (mut test_x, test_y) = gather(&dataset.features, &dataset.targets, test_indices, columns);

        standardize(&mut train_x, &mut test_x);

        let model = model::LogisticModel::fit(
            &train_x,
            &train_y,
            config.epochs,
            config.learning_rate,
        );
        let accuracy = model.accuracy(&test_x, &test_y);

        let positives = dataset
            .targets
            .iter()
            .filter(|&&target| target == 1.0)
            .count();

        Ok(TrainingReport {
            rows,
            feature_names: dataset.feature_names,
            positives,
            negatives: rows - positives,
            holdout_rows: holdout,
            accuracy,
        })
    }
}

fn gather(
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    columns: usize,
) -> (Array2<f64>, Array1<f64>) {
    let mut matrix = Array2::<f64>::zeros((indices.len(), columns));
    let mut labels = Array1::<f64>::zeros(indices.len());

    for (row, &index) in indices.iter().enumerate() {
        labels[row] = targets[index];
        for (column, value) in features[index].iter().enumerate() {
            matrix[[row, column]] = *value;
        }
    }

    (matrix, labels)
}

/// Standardize columns to the training split's mean and deviation so the
/// gradient steps are comparable across features. Constant columns keep a
/// unit deviation.
fn standardize(train: &mut Array2<f64>, test: &mut Array2<f64>) {
    let means = match train.mean_axis(Axis(0)) {
        Some(means) => means,
        None => return,
    };
    let mut deviations = train.std_axis(Axis(0), 0.0);
    deviations.mapv_inplace(|deviation| if deviation == 0.0 { 1.0 } else { deviation });

    for mut row in train.rows_mut() {
        row -= &means;
        row /= &deviations;
    }
    for mut row in test.rows_mut() {
        row -= &means;
        row /= &deviations;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn separable_csv(rows: usize) -> String {
        // Feature tracks the class exactly, so holdout accuracy is perfect.
        let mut csv = String::from("A1,A2,Class/ASD Traits \n");
        for index in 0..rows {
            if index % 2 == 0 {
                csv.push_str("1,3,YES\n");
            } else {
                csv.push_str("0,1,NO\n");
            }
        }
        csv
    }

    #[test]
    fn seeded_runs_are_deterministic_and_accurate() {
        let config = TrainingConfig::default();
        let first = DatasetTrainer::from_reader(Cursor::new(separable_csv(40)), &config)
            .expect("training runs");
        let second = DatasetTrainer::from_reader(Cursor::new(separable_csv(40)), &config)
            .expect("training runs");

        assert_eq!(first.rows, 40);
        assert_eq!(first.holdout_rows, 8);
        assert_eq!(first.positives, 20);
        assert_eq!(first.negatives, 20);
        assert_eq!(first.accuracy, 1.0);
        assert_eq!(first.accuracy, second.accuracy);
    }

    #[test]
    fn tiny_datasets_are_rejected() {
        let csv = "A1,Class/ASD Traits\n1,YES\n0,NO\n";
        let error = DatasetTrainer::from_reader(Cursor::new(csv), &TrainingConfig::default())
            .expect_err("two rows cannot split");
        assert!(matches!(error, TrainingError::DatasetTooSmall { rows: 2 }));
    }

    #[test]
    fn missing_target_column_aborts_the_run() {
        let csv = "A1,Outcome\n1,YES\n0,NO\n1,YES\n0,NO\n1,YES\n";
        let error = DatasetTrainer::from_reader(Cursor::new(csv), &TrainingConfig::default())
            .expect_err("target column absent");
        assert!(matches!(error, TrainingError::MissingColumn { .. }));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = DatasetTrainer::from_path("./no-such-dataset.csv", &TrainingConfig::default())
            .expect_err("missing file");
        assert!(matches!(error, TrainingError::Io(_)));
    }
}
