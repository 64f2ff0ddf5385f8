//! Weight penalties applied alongside an update rule.
//!
//! A [`Regularizer`] adds a penalty on the weights to the recorded loss and
//! shrinks the weights after every example update. The bias is never
//! penalized.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, ArrayView1};

use crate::error::{Result, TrainError};

pub trait Regularizer {
    /// Penalty added to the data loss for the given weights.
    fn penalty(&self, weights: ArrayView1<'_, f64>) -> f64;

    /// Moves `weights` one step of size `lr` down the penalty's (sub)gradient.
    fn shrink(&self, weights: &mut Array1<f64>, lr: f64);

    /// Rejects invalid strengths. Called once before training starts.
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha >= 0.0 {
        Ok(())
    } else {
        Err(TrainError::Configuration(format!(
            "penalty strength must be finite and non-negative, got {}",
            alpha
        )))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegularizer;

impl Regularizer for NoRegularizer {
    fn penalty(&self, _weights: ArrayView1<'_, f64>) -> f64 {
        0.0
    }

    fn shrink(&self, _weights: &mut Array1<f64>, _lr: f64) {}
}

/// Lasso penalty `alpha * Σ|w_j|`. Shrinks by `lr * alpha * sign(w_j)`; a
/// weight at exactly zero stays put.
#[derive(Debug, Clone, Copy)]
pub struct L1 {
    pub alpha: f64,
}

impl Regularizer for L1 {
    fn penalty(&self, weights: ArrayView1<'_, f64>) -> f64 {
        self.alpha * weights.mapv(f64::abs).sum()
    }

    fn shrink(&self, weights: &mut Array1<f64>, lr: f64) {
        let step = lr * self.alpha;
        weights.mapv_inplace(|w| {
            if w > 0.0 {
                w - step
            } else if w < 0.0 {
                w + step
            } else {
                w
            }
        });
    }

    fn check(&self) -> Result<()> {
        check_alpha(self.alpha)
    }
}

/// Ridge penalty `alpha * Σw_j²`. Shrinks by `lr * 2 * alpha * w_j`.
#[derive(Debug, Clone, Copy)]
pub struct L2 {
    pub alpha: f64,
}

impl Regularizer for L2 {
    fn penalty(&self, weights: ArrayView1<'_, f64>) -> f64 {
        self.alpha * weights.dot(&weights)
    }

    fn shrink(&self, weights: &mut Array1<f64>, lr: f64) {
        let factor = 1.0 - 2.0 * lr * self.alpha;
        weights.mapv_inplace(|w| w * factor);
    }

    fn check(&self) -> Result<()> {
        check_alpha(self.alpha)
    }
}

/// Penalty kind selected by name (`"none"`, `"l1"`, `"l2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Penalty {
    #[default]
    None,
    L1,
    L2,
}

impl Penalty {
    /// Pairs the kind with a strength.
    pub fn with_alpha(self, alpha: f64) -> WeightPenalty {
        WeightPenalty {
            penalty: self,
            alpha,
        }
    }
}

impl FromStr for Penalty {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Penalty::None),
            "l1" => Ok(Penalty::L1),
            "l2" => Ok(Penalty::L2),
            other => Err(TrainError::Configuration(format!(
                "unknown penalty '{}': expected 'none', 'l1' or 'l2'",
                other
            ))),
        }
    }
}

impl fmt::Display for Penalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Penalty::None => "none",
            Penalty::L1 => "l1",
            Penalty::L2 => "l2",
        };
        f.write_str(name)
    }
}

/// A penalty kind plus its strength, chosen at runtime from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPenalty {
    pub penalty: Penalty,
    pub alpha: f64,
}

impl Regularizer for WeightPenalty {
    fn penalty(&self, weights: ArrayView1<'_, f64>) -> f64 {
        match self.penalty {
            Penalty::None => NoRegularizer.penalty(weights),
            Penalty::L1 => L1 { alpha: self.alpha }.penalty(weights),
            Penalty::L2 => L2 { alpha: self.alpha }.penalty(weights),
        }
    }

    fn shrink(&self, weights: &mut Array1<f64>, lr: f64) {
        match self.penalty {
            Penalty::None => NoRegularizer.shrink(weights, lr),
            Penalty::L1 => L1 { alpha: self.alpha }.shrink(weights, lr),
            Penalty::L2 => L2 { alpha: self.alpha }.shrink(weights, lr),
        }
    }

    fn check(&self) -> Result<()> {
        match self.penalty {
            Penalty::None => Ok(()),
            Penalty::L1 | Penalty::L2 => check_alpha(self.alpha),
        }
    }
}
