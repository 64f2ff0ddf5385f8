//! Loss metrics recorded once per epoch.
//!
//! Every metric is a pure function of `(targets, outputs)` over the whole
//! dataset, where `outputs` are the raw model outputs `w·x + b`. Regression
//! metrics compare them to the labels directly; classification metrics apply
//! their own link (step or sigmoid) to the raw score first.

use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayView1, Zip};

use crate::error::{Result, TrainError};
use crate::model::activation::step;

/// A scalar summary of prediction error over a dataset.
pub trait Loss {
    /// Computes the loss of raw model `outputs` against `targets`.
    ///
    /// # Panics
    /// If the two arrays differ in length.
    fn loss(&self, targets: ArrayView1<'_, f64>, outputs: ArrayView1<'_, f64>) -> f64;
}

/// Mean absolute error: `(1/n) * Σ|y_i - p_i|`. Returns `0.0` for empty input.
pub fn mae(labels: ArrayView1<'_, f64>, predictions: ArrayView1<'_, f64>) -> f64 {
    (&labels - &predictions)
        .mapv(f64::abs)
        .mean()
        .unwrap_or(0.0)
}

/// Mean squared error: `(1/n) * Σ(y_i - p_i)^2`. Returns `0.0` for empty input.
pub fn mse(labels: ArrayView1<'_, f64>, predictions: ArrayView1<'_, f64>) -> f64 {
    (&labels - &predictions)
        .mapv(|d| d * d)
        .mean()
        .unwrap_or(0.0)
}

/// Root mean squared error: `sqrt(mse)`.
pub fn rmse(labels: ArrayView1<'_, f64>, predictions: ArrayView1<'_, f64>) -> f64 {
    mse(labels, predictions).sqrt()
}

/// Mean perceptron error over raw scores.
///
/// An example contributes `0` when `step(score)` matches its label and
/// `|score|` otherwise, so confidently wrong examples cost more than
/// borderline ones.
pub fn mean_perceptron_error(labels: ArrayView1<'_, f64>, scores: ArrayView1<'_, f64>) -> f64 {
    assert_eq!(labels.len(), scores.len(), "labels and scores differ in length");
    if labels.is_empty() {
        return 0.0;
    }
    let total: f64 = Zip::from(&labels)
        .and(&scores)
        .fold(0.0, |acc, &label, &score| {
            if step(score) == label {
                acc
            } else {
                acc + score.abs()
            }
        });
    total / labels.len() as f64
}

/// Summed log loss over raw scores (logits).
///
/// Per example this is `-(y * ln σ(z) + (1 - y) * ln(1 - σ(z)))`, evaluated
/// as `max(z, 0) - z * y + ln(1 + exp(-|z|))` so large logits stay finite.
pub fn total_log_loss(labels: ArrayView1<'_, f64>, scores: ArrayView1<'_, f64>) -> f64 {
    assert_eq!(labels.len(), scores.len(), "labels and scores differ in length");
    Zip::from(&labels)
        .and(&scores)
        .fold(0.0, |acc, &y, &z| {
            acc + z.max(0.0) - z * y + (-z.abs()).exp().ln_1p()
        })
}

/// Regression loss metric selected by name (`"mae"`, `"mse"`, `"rmse"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegressionMetric {
    Mae,
    Mse,
    #[default]
    Rmse,
}

impl FromStr for RegressionMetric {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mae" => Ok(RegressionMetric::Mae),
            "mse" => Ok(RegressionMetric::Mse),
            "rmse" => Ok(RegressionMetric::Rmse),
            other => Err(TrainError::Configuration(format!(
                "unknown error metric '{}': expected 'mae', 'mse' or 'rmse'",
                other
            ))),
        }
    }
}

impl fmt::Display for RegressionMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegressionMetric::Mae => "mae",
            RegressionMetric::Mse => "mse",
            RegressionMetric::Rmse => "rmse",
        };
        f.write_str(name)
    }
}

impl Loss for RegressionMetric {
    fn loss(&self, targets: ArrayView1<'_, f64>, outputs: ArrayView1<'_, f64>) -> f64 {
        match self {
            RegressionMetric::Mae => mae(targets, outputs),
            RegressionMetric::Mse => mse(targets, outputs),
            RegressionMetric::Rmse => rmse(targets, outputs),
        }
    }
}

/// Loss tracked by the perceptron trainer; see [`mean_perceptron_error`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PerceptronError;

impl Loss for PerceptronError {
    fn loss(&self, targets: ArrayView1<'_, f64>, outputs: ArrayView1<'_, f64>) -> f64 {
        mean_perceptron_error(targets, outputs)
    }
}

/// Loss tracked by the logistic trainer; see [`total_log_loss`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLoss;

impl Loss for LogLoss {
    fn loss(&self, targets: ArrayView1<'_, f64>, outputs: ArrayView1<'_, f64>) -> f64 {
        total_log_loss(targets, outputs)
    }
}
