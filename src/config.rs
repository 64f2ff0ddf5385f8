//! Training configuration.
//!
//! Options arrive as strings (`"square"`, `"rmse"`, `"mini"`, ...), either from
//! code or from a JSON file. They are parsed into typed enums as soon as a
//! [`TrainConfig`] is built, so unknown names fail before any training runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::BatchMode;
use crate::error::{Result, TrainError};
use crate::loss::RegressionMetric;
use crate::optimizer::Trick;
use crate::regularizers::{Penalty, WeightPenalty};

/// Epoch count the perceptron trainer is usually run with.
pub const PERCEPTRON_EPOCHS: usize = 200;

/// Configuration as written in a JSON file.
///
/// Every field is optional; missing fields take the same defaults as
/// [`TrainConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub trick: String,
    pub error: String,
    pub mode: String,
    pub batch_size: usize,
    pub verbose: bool,
    pub penalty: String,
    pub alpha: f64,
}

impl Default for RawTrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1000,
            trick: Trick::default().to_string(),
            error: RegressionMetric::default().to_string(),
            mode: BatchMode::default().to_string(),
            batch_size: 2,
            verbose: false,
            penalty: Penalty::default().to_string(),
            alpha: 1.0,
        }
    }
}

/// Validated training configuration.
///
/// Classifier trainers read `learning_rate`, `epochs`, `mode`, `batch_size`
/// and `verbose`; `trick`, `error`, `penalty` and `alpha` only apply to
/// regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub trick: Trick,
    pub error: RegressionMetric,
    pub mode: BatchMode,
    /// Examples per epoch in mini-batch mode.
    pub batch_size: usize,
    pub verbose: bool,
    /// Weight penalty; the bias is never penalized.
    pub penalty: Penalty,
    /// Penalty strength, ignored when `penalty` is `Penalty::None`.
    pub alpha: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1000,
            trick: Trick::Square,
            error: RegressionMetric::Rmse,
            mode: BatchMode::Stochastic,
            batch_size: 2,
            verbose: false,
            penalty: Penalty::None,
            alpha: 1.0,
        }
    }
}

impl TryFrom<RawTrainConfig> for TrainConfig {
    type Error = TrainError;

    fn try_from(raw: RawTrainConfig) -> Result<Self> {
        Ok(Self {
            learning_rate: raw.learning_rate,
            epochs: raw.epochs,
            trick: raw.trick.parse()?,
            error: raw.error.parse()?,
            mode: raw.mode.parse()?,
            batch_size: raw.batch_size,
            verbose: raw.verbose,
            penalty: raw.penalty.parse()?,
            alpha: raw.alpha,
        })
    }
}

impl From<TrainConfig> for RawTrainConfig {
    fn from(config: TrainConfig) -> Self {
        Self {
            learning_rate: config.learning_rate,
            epochs: config.epochs,
            trick: config.trick.to_string(),
            error: config.error.to_string(),
            mode: config.mode.to_string(),
            batch_size: config.batch_size,
            verbose: config.verbose,
            penalty: config.penalty.to_string(),
            alpha: config.alpha,
        }
    }
}

impl TrainConfig {
    /// Builds a configuration from option names, the way they are spelled
    /// in config files.
    ///
    /// # Errors
    /// [`TrainError::Configuration`] if any name is unknown.
    pub fn from_names(
        learning_rate: f64,
        epochs: usize,
        trick: &str,
        error: &str,
        mode: &str,
        batch_size: usize,
    ) -> Result<Self> {
        Ok(Self {
            learning_rate,
            epochs,
            trick: trick.parse()?,
            error: error.parse()?,
            mode: mode.parse()?,
            batch_size,
            ..Self::default()
        })
    }

    /// Defaults for the perceptron: [`PERCEPTRON_EPOCHS`] epochs instead of
    /// the regression default.
    pub fn perceptron() -> Self {
        Self {
            epochs: PERCEPTRON_EPOCHS,
            ..Self::default()
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_trick(mut self, trick: Trick) -> Self {
        self.trick = trick;
        self
    }

    pub fn with_error(mut self, error: RegressionMetric) -> Self {
        self.error = error;
        self
    }

    pub fn with_mode(mut self, mode: BatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// The configured penalty paired with its strength.
    pub fn weight_penalty(&self) -> WeightPenalty {
        self.penalty.with_alpha(self.alpha)
    }

    /// Parses a JSON object such as `{"trick": "absolute", "epochs": 500}`.
    ///
    /// # Errors
    /// - [`TrainError::Json`] for malformed JSON or wrongly typed fields
    /// - [`TrainError::Configuration`] for unknown option names
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawTrainConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("loaded training config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&RawTrainConfig::from(*self))?)
    }
}
