//! Per-epoch index selection for the three batching modes.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{Result, TrainError};

/// How an epoch picks the examples it updates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// One example drawn uniformly at random (`"sgd"`).
    #[default]
    Stochastic,
    /// Every example, in dataset order (`"batch"`).
    Full,
    /// `k` distinct examples drawn uniformly without replacement (`"mini"`).
    MiniBatch,
}

impl FromStr for BatchMode {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sgd" | "single" => Ok(BatchMode::Stochastic),
            "batch" | "full" => Ok(BatchMode::Full),
            "mini" | "mini-batch" => Ok(BatchMode::MiniBatch),
            other => Err(TrainError::Configuration(format!(
                "unknown mode '{}': expected 'sgd', 'batch' or 'mini'",
                other
            ))),
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchMode::Stochastic => "sgd",
            BatchMode::Full => "batch",
            BatchMode::MiniBatch => "mini",
        };
        f.write_str(name)
    }
}

/// Draws the example indices one epoch updates on.
///
/// Built once per training call against a known dataset size, so the
/// mini-batch size is validated before any epoch runs.
#[derive(Debug, Clone, Copy)]
pub struct BatchSampler {
    mode: BatchMode,
    batch_size: usize,
    n_samples: usize,
}

impl BatchSampler {
    /// Creates a sampler for a dataset of `n_samples` examples.
    ///
    /// `batch_size` is only checked (and only used) in [`BatchMode::MiniBatch`].
    ///
    /// # Errors
    /// - [`TrainError::EmptyData`] if `n_samples == 0`
    /// - [`TrainError::Configuration`] if the mini-batch size is zero or exceeds `n_samples`
    pub fn new(mode: BatchMode, batch_size: usize, n_samples: usize) -> Result<Self> {
        if n_samples == 0 {
            return Err(TrainError::EmptyData(
                "cannot sample from an empty dataset".into(),
            ));
        }
        if mode == BatchMode::MiniBatch && (batch_size == 0 || batch_size > n_samples) {
            return Err(TrainError::Configuration(format!(
                "mini-batch size must be in 1..={}, got {}",
                n_samples, batch_size
            )));
        }
        Ok(Self {
            mode,
            batch_size,
            n_samples,
        })
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    /// Indices for one epoch, in the order updates are applied.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        match self.mode {
            BatchMode::Stochastic => vec![rng.random_range(0..self.n_samples)],
            BatchMode::Full => (0..self.n_samples).collect(),
            BatchMode::MiniBatch => {
                rand::seq::index::sample(rng, self.n_samples, self.batch_size).into_vec()
            }
        }
    }
}
