//! # tricklearn
//!
//! Textbook gradient-descent trainers for small parametric models: linear
//! regression with three update "tricks", polynomial regression, the
//! perceptron and logistic regression.
//!
//! ## Core Design Principles
//!
//! - **One loop, many models**: every model is a [`LinearParams`] plus a link
//!   function, so a single [`Trainer`] drives all of them.
//! - **Loss and update are separate**: a [`Loss`] decides what gets recorded
//!   per epoch, an [`UpdateRule`] decides how one example moves the parameters.
//! - **Fail before training**: unknown option names and bad hyperparameters
//!   surface as [`TrainError::Configuration`] before the first epoch.
//! - **Reproducible on demand**: every entry point has a `_with_rng` variant
//!   taking a caller-supplied [`rand::Rng`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tricklearn::{linear_regression_with_rng, BatchMode, TrainConfig};
//!
//! let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 3.0).collect();
//!
//! let config = TrainConfig::default()
//!     .with_epochs(5000)
//!     .with_mode(BatchMode::Full);
//! let outcome = linear_regression_with_rng(&xs, &ys, &config, &mut StdRng::seed_from_u64(0))?;
//!
//! assert!((outcome.final_weights()[0] - 2.0).abs() < 0.05);
//! assert!((outcome.final_bias() - 3.0).abs() < 0.05);
//! # Ok::<(), tricklearn::TrainError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: the [`Dataset`] trait, in-memory storage and per-epoch sampling
//! - `model`: parameters, polynomial expansion, classifiers, activations
//! - `loss`: regression metrics and classifier losses
//! - `optimizer`: per-example update rules
//! - `regularizers`: L1/L2 weight penalties
//! - `trainer`: the epoch loop
//! - `config`: typed options and JSON loading
//! - `algorithms`: one-call entry points

pub mod algorithms;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loss;
pub mod model;
pub mod optimizer;
pub mod regularizers;
pub mod trainer;

pub use algorithms::{
    linear_regression, linear_regression_with_rng, logistic_regression_algorithm,
    logistic_regression_algorithm_with_rng, multivariate_regression,
    multivariate_regression_with_rng, perceptron_algorithm, perceptron_algorithm_with_rng,
    polynomial_regression, polynomial_regression_regularized,
    polynomial_regression_regularized_with_rng, polynomial_regression_with_rng, PolynomialFit,
};
pub use config::{RawTrainConfig, TrainConfig, PERCEPTRON_EPOCHS};
pub use dataset::{BatchMode, Dataset, InMemoryDataset};
pub use error::{Result, TrainError};
pub use loss::{mae, mse, rmse, Loss, RegressionMetric};
pub use model::{predict, InferenceModel, LinearParams};
pub use optimizer::{Trick, UpdateRule};
pub use regularizers::{NoRegularizer, Penalty, Regularizer, WeightPenalty, L1, L2};
pub use trainer::{Trainer, TrainingOutcome};
