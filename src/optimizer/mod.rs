//! Per-example parameter update rules.
//!
//! Each rule looks at one `(x, y)` pair and nudges a [`LinearParams`] in
//! place. The trainer decides which examples an epoch visits; the rule only
//! decides how a single visit moves the parameters.

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView1;

use crate::error::{Result, TrainError};
use crate::model::activation::{sigmoid, step};
use crate::model::linear::LinearParams;

/// Moves parameters towards one labelled example.
pub trait UpdateRule {
    /// Applies one update for example `(x, y)` with step size `lr`.
    fn step(&self, params: &mut LinearParams, x: ArrayView1<'_, f64>, y: f64, lr: f64);

    /// Rejects feature widths the rule cannot handle. Called once before
    /// training starts.
    fn check_features(&self, _n_features: usize) -> Result<()> {
        Ok(())
    }
}

/// Fixed-size nudge driven by the signs of the residual and the feature.
///
/// Ignores the residual's magnitude. No change when the prediction is exact
/// or the feature is zero. Single-feature only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTrick;

impl UpdateRule for SimpleTrick {
    fn step(&self, params: &mut LinearParams, x: ArrayView1<'_, f64>, y: f64, lr: f64) {
        let pred = params.score(x);
        let x0 = x[0];
        let (dw, db) = if y > pred && x0 > 0.0 {
            (lr, lr)
        } else if y > pred && x0 < 0.0 {
            (-lr, lr)
        } else if y < pred && x0 > 0.0 {
            (-lr, -lr)
        } else if y < pred && x0 < 0.0 {
            (-lr, lr)
        } else {
            (0.0, 0.0)
        };
        params.weights[0] += dw;
        params.bias += db;
    }

    fn check_features(&self, n_features: usize) -> Result<()> {
        if n_features != 1 {
            return Err(TrainError::Configuration(format!(
                "the simple trick needs exactly one feature, dataset has {}",
                n_features
            )));
        }
        Ok(())
    }
}

/// Moves by `lr * x` towards the label, regardless of how far off the
/// prediction is.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteTrick;

impl UpdateRule for AbsoluteTrick {
    fn step(&self, params: &mut LinearParams, x: ArrayView1<'_, f64>, y: f64, lr: f64) {
        let pred = params.score(x);
        let direction = if y > pred { 1.0 } else { -1.0 };
        params.weights.scaled_add(direction * lr, &x);
        params.bias += direction * lr;
    }
}

/// Gradient step on squared error: moves by `lr * x * (y - pred)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareTrick;

impl UpdateRule for SquareTrick {
    fn step(&self, params: &mut LinearParams, x: ArrayView1<'_, f64>, y: f64, lr: f64) {
        let error = y - params.score(x);
        params.bias += lr * error;
        params.weights.scaled_add(lr * error, &x);
    }
}

/// Classic perceptron update against the step prediction.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerceptronTrick;

impl UpdateRule for PerceptronTrick {
    fn step(&self, params: &mut LinearParams, x: ArrayView1<'_, f64>, y: f64, lr: f64) {
        let pred = step(params.score(x));
        let delta = (y - pred) * lr;
        params.weights.scaled_add(delta, &x);
        params.bias += delta;
    }
}

/// Log-loss gradient step against the sigmoid probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticTrick;

impl UpdateRule for LogisticTrick {
    fn step(&self, params: &mut LinearParams, x: ArrayView1<'_, f64>, y: f64, lr: f64) {
        let pred = sigmoid(params.score(x));
        let delta = (y - pred) * lr;
        params.weights.scaled_add(delta, &x);
        params.bias += delta;
    }
}

/// Regression update rule selected by name (`"simple"`, `"absolute"`, `"square"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trick {
    Simple,
    Absolute,
    #[default]
    Square,
}

impl FromStr for Trick {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "simple" => Ok(Trick::Simple),
            "absolute" => Ok(Trick::Absolute),
            "square" => Ok(Trick::Square),
            other => Err(TrainError::Configuration(format!(
                "unknown trick '{}': expected 'simple', 'absolute' or 'square'",
                other
            ))),
        }
    }
}

impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trick::Simple => "simple",
            Trick::Absolute => "absolute",
            Trick::Square => "square",
        };
        f.write_str(name)
    }
}

impl UpdateRule for Trick {
    fn step(&self, params: &mut LinearParams, x: ArrayView1<'_, f64>, y: f64, lr: f64) {
        match self {
            Trick::Simple => SimpleTrick.step(params, x, y, lr),
            Trick::Absolute => AbsoluteTrick.step(params, x, y, lr),
            Trick::Square => SquareTrick.step(params, x, y, lr),
        }
    }

    fn check_features(&self, n_features: usize) -> Result<()> {
        match self {
            Trick::Simple => SimpleTrick.check_features(n_features),
            Trick::Absolute => AbsoluteTrick.check_features(n_features),
            Trick::Square => SquareTrick.check_features(n_features),
        }
    }
}
