use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::dataset::Dataset;
use crate::error::{Result, TrainError};

/// Dataset held entirely in memory as a feature matrix plus a label vector.
///
/// All constructors validate shapes up front, so a built dataset is always
/// non-empty and rectangular.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl InMemoryDataset {
    /// Builds a dataset from row vectors.
    ///
    /// # Errors
    /// - [`TrainError::Dimension`] if `x` and `y` differ in length or rows differ in width
    /// - [`TrainError::EmptyData`] if there are no rows
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(TrainError::Dimension {
                what: "labels",
                expected: x.len(),
                got: y.len(),
            });
        }
        if x.is_empty() {
            return Err(TrainError::EmptyData("dataset has no examples".into()));
        }
        let n_features = x[0].len();
        if let Some(row) = x.iter().find(|row| row.len() != n_features) {
            return Err(TrainError::Dimension {
                what: "feature row length",
                expected: n_features,
                got: row.len(),
            });
        }

        let n_samples = x.len();
        let data: Vec<f64> = x.into_iter().flatten().collect();
        let got = data.len();
        let x = Array2::from_shape_vec((n_samples, n_features), data).map_err(|_| {
            TrainError::Dimension {
                what: "feature matrix size",
                expected: n_samples * n_features,
                got,
            }
        })?;

        Ok(Self {
            x,
            y: Array1::from(y),
        })
    }

    /// Builds a single-feature dataset from a scalar column.
    pub fn from_scalar(x: &[f64], y: &[f64]) -> Result<Self> {
        Self::new(x.iter().map(|&v| vec![v]).collect(), y.to_vec())
    }

    /// Builds a dataset from an existing feature matrix and label vector.
    pub fn from_arrays(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(TrainError::Dimension {
                what: "labels",
                expected: x.nrows(),
                got: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(TrainError::EmptyData("dataset has no examples".into()));
        }
        Ok(Self { x, y })
    }

    /// Loads a dataset from a CSV file with a header row.
    ///
    /// The column named `label_column` becomes the label; every other column is
    /// a feature, kept in file order.
    ///
    /// # Errors
    /// - [`TrainError::Configuration`] if the label column does not exist
    /// - [`TrainError::Csv`] on malformed rows or non-numeric cells
    /// - [`TrainError::Io`] if the file cannot be opened
    pub fn from_csv<P: AsRef<Path>>(path: P, label_column: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;

        let headers = rdr.headers()?.clone();
        let label_idx = headers
            .iter()
            .position(|h| h == label_column)
            .ok_or_else(|| {
                TrainError::Configuration(format!(
                    "label column '{}' not found in CSV header",
                    label_column
                ))
            })?;

        let mut x = Vec::new();
        let mut y = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            let mut features = Vec::with_capacity(record.len().saturating_sub(1));
            for (col, cell) in record.iter().enumerate() {
                let value: f64 = cell.parse().map_err(|e| {
                    TrainError::Csv(format!(
                        "row {}, column '{}': cannot parse '{}': {}",
                        row + 1,
                        headers.get(col).unwrap_or("?"),
                        cell,
                        e
                    ))
                })?;
                if col == label_idx {
                    y.push(value);
                } else {
                    features.push(value);
                }
            }
            x.push(features);
        }

        log::debug!(
            "loaded {} rows from {}",
            x.len(),
            path.as_ref().display()
        );
        Self::new(x, y)
    }

    /// Feature matrix, one row per example.
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    /// Labels in dataset order.
    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }
}

impl Dataset for InMemoryDataset {
    fn len(&self) -> usize {
        self.x.nrows()
    }

    fn n_features(&self) -> usize {
        self.x.ncols()
    }

    fn features(&self, index: usize) -> ArrayView1<'_, f64> {
        self.x.row(index)
    }

    fn label(&self, index: usize) -> f64 {
        self.y[index]
    }

    fn labels_vec(&self) -> Array1<f64> {
        self.y.clone()
    }
}
