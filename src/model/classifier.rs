//! Binary classifiers over linear scores.
//!
//! Both wrap a [`LinearParams`]; they differ only in the link applied to the
//! score `w·x + b`.

use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Result, TrainError};
use crate::model::activation::{sigmoid, step};
use crate::model::linear::LinearParams;
use crate::model::InferenceModel;

/// Hard-threshold classifier: predicts `1.0` when `w·x + b >= 0`, else `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptronModel {
    params: LinearParams,
}

impl PerceptronModel {
    pub fn new(params: LinearParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn into_params(self) -> LinearParams {
        self.params
    }
}

impl InferenceModel for PerceptronModel {
    fn n_features(&self) -> usize {
        self.params.n_features()
    }

    fn output(&self, features: ArrayView1<'_, f64>) -> f64 {
        step(self.params.score(features))
    }
}

/// Probabilistic classifier: outputs `sigmoid(w·x + b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    params: LinearParams,
}

impl LogisticModel {
    pub fn new(params: LinearParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn into_params(self) -> LinearParams {
        self.params
    }

    /// Class prediction with a `0.5` probability threshold.
    pub fn predict_class(&self, features: ArrayView1<'_, f64>) -> Result<f64> {
        let p = self.predict(features)?;
        Ok(if p >= 0.5 { 1.0 } else { 0.0 })
    }

    /// Class predictions for every row of `features`.
    pub fn predict_classes(&self, features: ArrayView2<'_, f64>) -> Result<Vec<f64>> {
        Ok(self
            .predict_batch(features)?
            .iter()
            .map(|&p| if p >= 0.5 { 1.0 } else { 0.0 })
            .collect())
    }
}

impl InferenceModel for LogisticModel {
    fn n_features(&self) -> usize {
        self.params.n_features()
    }

    fn output(&self, features: ArrayView1<'_, f64>) -> f64 {
        sigmoid(self.params.score(features))
    }
}

/// Fraction of `predictions` equal to `labels`.
///
/// # Errors
/// - [`TrainError::Dimension`] if the slices differ in length
/// - [`TrainError::EmptyData`] if both are empty
pub fn accuracy(labels: &[f64], predictions: &[f64]) -> Result<f64> {
    if labels.len() != predictions.len() {
        return Err(TrainError::Dimension {
            what: "predictions",
            expected: labels.len(),
            got: predictions.len(),
        });
    }
    if labels.is_empty() {
        return Err(TrainError::EmptyData("cannot score zero predictions".into()));
    }
    let correct = labels
        .iter()
        .zip(predictions)
        .filter(|(y, p)| y == p)
        .count();
    Ok(correct as f64 / labels.len() as f64)
}
