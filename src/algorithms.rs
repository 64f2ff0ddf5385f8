//! One-call training entry points.
//!
//! Each function builds a dataset and a [`Trainer`] from a [`TrainConfig`] and
//! runs it. The plain versions draw randomness from [`rand::rng`]; the
//! `_with_rng` versions take any [`Rng`] so runs can be seeded.

use log::info;
use rand::Rng;

use crate::config::TrainConfig;
use crate::dataset::InMemoryDataset;
use crate::error::Result;
use crate::loss::{LogLoss, PerceptronError, RegressionMetric};
use crate::model::polynomial::{PolynomialFeatures, PolynomialModel};
use crate::model::{LogisticModel, PerceptronModel};
use crate::optimizer::{LogisticTrick, PerceptronTrick, SquareTrick, Trick};
use crate::regularizers::{Penalty, WeightPenalty};
use crate::trainer::{Trainer, TrainingOutcome};

/// Single-feature linear regression with the configured trick, metric and
/// batching mode.
///
/// # Errors
/// - [`TrainError::Dimension`](crate::TrainError::Dimension) if `features`
///   and `labels` differ in length
/// - [`TrainError::EmptyData`](crate::TrainError::EmptyData) for no examples
/// - [`TrainError::Configuration`](crate::TrainError::Configuration) for bad
///   hyperparameters
pub fn linear_regression(
    features: &[f64],
    labels: &[f64],
    config: &TrainConfig,
) -> Result<TrainingOutcome> {
    linear_regression_with_rng(features, labels, config, &mut rand::rng())
}

pub fn linear_regression_with_rng<R: Rng + ?Sized>(
    features: &[f64],
    labels: &[f64],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingOutcome> {
    let dataset = InMemoryDataset::from_scalar(features, labels)?;
    let outcome = regression_trainer(config).fit(&dataset, rng)?;
    info!(
        "linear regression ({} trick): w = {:.4}, b = {:.4}",
        config.trick,
        outcome.final_weights()[0],
        outcome.final_bias()
    );
    Ok(outcome)
}

/// Multi-feature linear regression.
///
/// The simple trick is single-feature only and is rejected here for wider
/// datasets with [`TrainError::Configuration`](crate::TrainError::Configuration).
pub fn multivariate_regression_with_rng<R: Rng + ?Sized>(
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingOutcome> {
    let dataset = InMemoryDataset::new(features, labels)?;
    regression_trainer(config).fit(&dataset, rng)
}

pub fn multivariate_regression(
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    config: &TrainConfig,
) -> Result<TrainingOutcome> {
    multivariate_regression_with_rng(features, labels, config, &mut rand::rng())
}

/// Result of [`polynomial_regression`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    pub model: PolynomialModel,
    pub loss_history: Vec<f64>,
}

impl PolynomialFit {
    /// Coefficients over `[x^0 .. x^degree]`.
    pub fn coefficients(&self) -> Vec<f64> {
        self.model.coefficients()
    }
}

/// Fits a degree-`degree` polynomial to scalar `features` with the square
/// trick. `config.trick` is ignored; `config.penalty` applies to every
/// coefficient except `x^0`.
pub fn polynomial_regression(
    features: &[f64],
    labels: &[f64],
    degree: usize,
    config: &TrainConfig,
) -> Result<PolynomialFit> {
    polynomial_regression_with_rng(features, labels, degree, config, &mut rand::rng())
}

pub fn polynomial_regression_with_rng<R: Rng + ?Sized>(
    features: &[f64],
    labels: &[f64],
    degree: usize,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<PolynomialFit> {
    let expanded = PolynomialFeatures::new()
        .with_degree(degree)
        .transform(features);
    let dataset = InMemoryDataset::from_arrays(expanded, labels.iter().copied().collect())?;
    let trainer = Trainer::builder(config.error, SquareTrick)
        .learning_rate(config.learning_rate)
        .epochs(config.epochs)
        .batch_mode(config.mode)
        .mini_batch_size(config.batch_size)
        .verbose(config.verbose)
        .regularizer(config.weight_penalty())
        .build();
    let outcome = trainer.fit(&dataset, rng)?;
    let model = PolynomialModel::new(degree, outcome.params)?;
    info!(
        "polynomial regression (degree {}, penalty {}): {}",
        degree, config.penalty, model
    );
    Ok(PolynomialFit {
        model,
        loss_history: outcome.loss_history,
    })
}

/// Polynomial regression with an L1 or L2 penalty of strength `alpha`,
/// overriding whatever penalty `config` carries.
///
/// # Errors
/// [`TrainError::Configuration`](crate::TrainError::Configuration) for a
/// negative or non-finite `alpha`, plus everything [`polynomial_regression`]
/// returns.
pub fn polynomial_regression_regularized(
    features: &[f64],
    labels: &[f64],
    degree: usize,
    penalty: Penalty,
    alpha: f64,
    config: &TrainConfig,
) -> Result<PolynomialFit> {
    polynomial_regression_regularized_with_rng(
        features,
        labels,
        degree,
        penalty,
        alpha,
        config,
        &mut rand::rng(),
    )
}

pub fn polynomial_regression_regularized_with_rng<R: Rng + ?Sized>(
    features: &[f64],
    labels: &[f64],
    degree: usize,
    penalty: Penalty,
    alpha: f64,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<PolynomialFit> {
    let config = config.with_penalty(penalty).with_alpha(alpha);
    polynomial_regression_with_rng(features, labels, degree, &config, rng)
}

/// Trains a perceptron on binary (`0`/`1`) labels.
///
/// Loss history holds the mean perceptron error; parameter history is always
/// recorded. `config.trick`, `config.error` and `config.penalty` are ignored.
/// [`TrainConfig::perceptron`] gives the usual 200-epoch setup.
pub fn perceptron_algorithm(
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    config: &TrainConfig,
) -> Result<TrainingOutcome> {
    perceptron_algorithm_with_rng(features, labels, config, &mut rand::rng())
}

pub fn perceptron_algorithm_with_rng<R: Rng + ?Sized>(
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingOutcome> {
    let dataset = InMemoryDataset::new(features, labels)?;
    let trainer = Trainer::builder(PerceptronError, PerceptronTrick)
        .learning_rate(config.learning_rate)
        .epochs(config.epochs)
        .batch_mode(config.mode)
        .mini_batch_size(config.batch_size)
        .track_history(true)
        .verbose(config.verbose)
        .build();
    trainer.fit(&dataset, rng)
}

/// Trains logistic regression on binary (`0`/`1`) labels.
///
/// Loss history holds the summed log loss; parameter history is always
/// recorded. `config.trick`, `config.error` and `config.penalty` are ignored.
pub fn logistic_regression_algorithm(
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    config: &TrainConfig,
) -> Result<TrainingOutcome> {
    logistic_regression_algorithm_with_rng(features, labels, config, &mut rand::rng())
}

pub fn logistic_regression_algorithm_with_rng<R: Rng + ?Sized>(
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingOutcome> {
    let dataset = InMemoryDataset::new(features, labels)?;
    let trainer = Trainer::builder(LogLoss, LogisticTrick)
        .learning_rate(config.learning_rate)
        .epochs(config.epochs)
        .batch_mode(config.mode)
        .mini_batch_size(config.batch_size)
        .track_history(true)
        .verbose(config.verbose)
        .build();
    trainer.fit(&dataset, rng)
}

impl From<TrainingOutcome> for PerceptronModel {
    fn from(outcome: TrainingOutcome) -> Self {
        PerceptronModel::new(outcome.params)
    }
}

impl From<TrainingOutcome> for LogisticModel {
    fn from(outcome: TrainingOutcome) -> Self {
        LogisticModel::new(outcome.params)
    }
}

fn regression_trainer(config: &TrainConfig) -> Trainer<RegressionMetric, Trick, WeightPenalty> {
    Trainer::builder(config.error, config.trick)
        .learning_rate(config.learning_rate)
        .epochs(config.epochs)
        .batch_mode(config.mode)
        .mini_batch_size(config.batch_size)
        .verbose(config.verbose)
        .regularizer(config.weight_penalty())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PERCEPTRON_EPOCHS;
    use crate::dataset::BatchMode;
    use crate::error::TrainError;
    use crate::model::{accuracy, InferenceModel};
    use ndarray::ArrayView1;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn separable() -> (Vec<Vec<f64>>, Vec<f64>) {
        let x = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![3.0, 3.0],
            vec![3.0, 4.0],
            vec![4.0, 3.0],
        ];
        let y = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    fn line() -> (Vec<f64>, Vec<f64>) {
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = xs.iter().map(|x| 2.0 * x + 3.0).collect();
        (xs, ys)
    }

    #[test]
    fn test_linear_regression_square_batch_converges() {
        let (xs, ys) = line();
        let config = TrainConfig::default()
            .with_epochs(5000)
            .with_mode(BatchMode::Full);
        let outcome =
            linear_regression_with_rng(&xs, &ys, &config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert!((outcome.final_weights()[0] - 2.0).abs() < 0.05);
        assert!((outcome.final_bias() - 3.0).abs() < 0.05);
        assert_eq!(outcome.loss_history.len(), 5000);
        assert!(outcome.loss_history[4999] < outcome.loss_history[0]);
    }

    #[test]
    fn test_linear_regression_sgd_default_config() {
        let (xs, ys) = line();
        let config = TrainConfig::default().with_epochs(20000);
        let outcome =
            linear_regression_with_rng(&xs, &ys, &config, &mut StdRng::seed_from_u64(7)).unwrap();
        assert!((outcome.final_weights()[0] - 2.0).abs() < 0.1);
        assert!((outcome.final_bias() - 3.0).abs() < 0.1);
    }

    #[test]
    fn test_absolute_trick_reduces_error() {
        let (xs, ys) = line();
        let config = TrainConfig::default()
            .with_trick(Trick::Absolute)
            .with_error(RegressionMetric::Mae)
            .with_mode(BatchMode::Full)
            .with_epochs(3000);
        let outcome =
            linear_regression_with_rng(&xs, &ys, &config, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(outcome.last_loss().unwrap() < outcome.loss_history[0]);
        assert!(outcome.last_loss().unwrap() < 0.5);
    }

    #[test]
    fn test_simple_trick_runs_and_records_history() {
        let (xs, ys) = line();
        let config = TrainConfig::default()
            .with_trick(Trick::Simple)
            .with_epochs(100);
        let outcome =
            linear_regression_with_rng(&xs, &ys, &config, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(outcome.loss_history.len(), 100);
        assert!(outcome.loss_history.iter().all(|l| l.is_finite()));
    }

    #[test]
    fn test_multivariate_regression_recovers_plane() {
        let x = vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![2.0, 1.0],
            vec![1.0, 2.0],
        ];
        let y: Vec<f64> = x.iter().map(|r| r[0] + 2.0 * r[1] + 1.0).collect();
        let config = TrainConfig::default()
            .with_epochs(5000)
            .with_mode(BatchMode::Full);
        let outcome =
            multivariate_regression_with_rng(x, y, &config, &mut StdRng::seed_from_u64(8)).unwrap();
        let w = outcome.final_weights();
        assert!((w[0] - 1.0).abs() < 0.05);
        assert!((w[1] - 2.0).abs() < 0.05);
        assert!((outcome.final_bias() - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_linear_regression_with_bogus_trick_is_configuration_error() {
        let (xs, ys) = line();
        let result = TrainConfig::from_names(0.01, 1000, "bogus", "rmse", "sgd", 2)
            .and_then(|config| linear_regression(&xs, &ys, &config));
        assert!(matches!(result, Err(TrainError::Configuration(_))));
    }

    #[test]
    fn test_polynomial_regression_with_invalid_mode_is_configuration_error() {
        let (xs, ys) = line();
        let result = TrainConfig::from_json_str(r#"{"mode": "invalid"}"#)
            .and_then(|config| polynomial_regression(&xs, &ys, 2, &config));
        assert!(matches!(result, Err(TrainError::Configuration(_))));
    }

    #[test]
    fn test_invalid_hyperparameters_rejected_by_entry_points() {
        let (xs, ys) = line();
        let zero_lr = TrainConfig::default().with_learning_rate(0.0);
        assert!(matches!(
            linear_regression(&xs, &ys, &zero_lr),
            Err(TrainError::Configuration(_))
        ));
        let zero_epochs = TrainConfig::default().with_epochs(0);
        assert!(matches!(
            polynomial_regression(&xs, &ys, 2, &zero_epochs),
            Err(TrainError::Configuration(_))
        ));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let config = TrainConfig::default();
        assert!(matches!(
            linear_regression(&[1.0, 2.0], &[1.0], &config),
            Err(TrainError::Dimension { .. })
        ));
        assert!(matches!(
            linear_regression(&[], &[], &config),
            Err(TrainError::EmptyData(_))
        ));
    }

    #[test]
    fn test_oversized_mini_batch_rejected() {
        let (xs, ys) = line();
        let config = TrainConfig::default()
            .with_mode(BatchMode::MiniBatch)
            .with_batch_size(10);
        assert!(matches!(
            polynomial_regression(&xs, &ys, 2, &config),
            Err(TrainError::Configuration(_))
        ));
    }

    #[test]
    fn test_polynomial_regression_recovers_quadratic() {
        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let ys: Vec<f64> = xs.iter().map(|x| x * x + 1.0).collect();
        let config = TrainConfig::default()
            .with_epochs(5000)
            .with_mode(BatchMode::Full);
        let fit = polynomial_regression_with_rng(&xs, &ys, 2, &config, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let coefs = fit.coefficients();
        assert_eq!(coefs.len(), 3);
        assert!((coefs[0] - 1.0).abs() < 0.05);
        assert!(coefs[1].abs() < 0.05);
        assert!((coefs[2] - 1.0).abs() < 0.05);
        assert!((fit.model.evaluate(3.0) - 10.0).abs() < 0.5);
    }

    #[test]
    fn test_polynomial_degree_zero_fits_mean() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];
        let config = TrainConfig::default()
            .with_epochs(2000)
            .with_mode(BatchMode::Full);
        let fit = polynomial_regression_with_rng(&xs, &ys, 0, &config, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(fit.model.degree(), 0);
        // sequential updates settle near the mean with a small bias towards the last example
        assert!((fit.coefficients()[0] - 4.0).abs() < 0.2);
    }

    #[test]
    fn test_l2_penalty_shrinks_polynomial_coefficients() {
        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let ys: Vec<f64> = xs.iter().map(|x| x * x + 1.0).collect();
        let config = TrainConfig::default()
            .with_epochs(3000)
            .with_mode(BatchMode::Full);
        let plain = polynomial_regression_with_rng(&xs, &ys, 2, &config, &mut StdRng::seed_from_u64(5))
            .unwrap();
        let ridge = polynomial_regression_regularized_with_rng(
            &xs,
            &ys,
            2,
            Penalty::L2,
            1.0,
            &config,
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();

        let norm = |c: &[f64]| c[1..].iter().map(|w| w * w).sum::<f64>();
        assert!(norm(&ridge.coefficients()[..]) < norm(&plain.coefficients()[..]));
        assert!(ridge.loss_history.iter().all(|l| l.is_finite()));
    }

    #[test]
    fn test_no_penalty_matches_plain_polynomial_regression() {
        let (xs, ys) = line();
        let config = TrainConfig::default().with_epochs(50);
        let plain = polynomial_regression_with_rng(&xs, &ys, 2, &config, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let unpenalized = polynomial_regression_regularized_with_rng(
            &xs,
            &ys,
            2,
            Penalty::None,
            1.0,
            &config,
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();
        assert_eq!(plain, unpenalized);
    }

    #[test]
    fn test_l1_polynomial_regression_runs() {
        let (xs, ys) = line();
        let config = TrainConfig::default()
            .with_epochs(500)
            .with_mode(BatchMode::Full);
        let fit = polynomial_regression_regularized_with_rng(
            &xs,
            &ys,
            3,
            Penalty::L1,
            0.1,
            &config,
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();
        assert_eq!(fit.coefficients().len(), 4);
        assert_eq!(fit.loss_history.len(), 500);
    }

    #[test]
    fn test_negative_alpha_is_configuration_error() {
        let (xs, ys) = line();
        assert!(matches!(
            polynomial_regression_regularized(&xs, &ys, 2, Penalty::L2, -1.0, &TrainConfig::default()),
            Err(TrainError::Configuration(_))
        ));
    }

    #[test]
    fn test_regression_penalty_from_config() {
        let (xs, ys) = line();
        let config = TrainConfig::default()
            .with_epochs(2000)
            .with_mode(BatchMode::Full);
        let plain = linear_regression_with_rng(&xs, &ys, &config, &mut StdRng::seed_from_u64(3)).unwrap();
        let ridge = linear_regression_with_rng(
            &xs,
            &ys,
            &config.with_penalty(Penalty::L2).with_alpha(0.5),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();
        assert!(ridge.final_weights()[0].abs() < plain.final_weights()[0].abs());
    }

    #[test]
    fn test_perceptron_separates_training_set() {
        let (x, y) = separable();
        let config = TrainConfig::perceptron().with_learning_rate(0.1);
        let outcome =
            perceptron_algorithm_with_rng(x.clone(), y.clone(), &config, &mut StdRng::seed_from_u64(42))
                .unwrap();
        assert_eq!(outcome.loss_history.len(), PERCEPTRON_EPOCHS);
        assert_eq!(
            outcome.param_history.as_ref().map(Vec::len),
            Some(PERCEPTRON_EPOCHS)
        );

        let model = PerceptronModel::from(outcome);
        let predictions: Vec<f64> = x
            .iter()
            .map(|row| model.predict(ArrayView1::from(row.as_slice())).unwrap())
            .collect();
        assert_eq!(accuracy(&y, &predictions).unwrap(), 1.0);
    }

    #[test]
    fn test_logistic_regression_classifies_and_reduces_loss() {
        let (x, y) = separable();
        let config = TrainConfig::default().with_learning_rate(0.1);
        let outcome = logistic_regression_algorithm_with_rng(
            x.clone(),
            y.clone(),
            &config,
            &mut StdRng::seed_from_u64(42),
        )
        .unwrap();
        assert_eq!(outcome.loss_history.len(), 1000);
        assert!(outcome.last_loss().unwrap() < outcome.loss_history[0]);
        assert_eq!(outcome.bias_history().map(|h| h.len()), Some(1000));

        let model = LogisticModel::from(outcome);
        for (row, &label) in x.iter().zip(&y) {
            let class = model
                .predict_class(ArrayView1::from(row.as_slice()))
                .unwrap();
            assert_eq!(class, label);
        }
    }

    #[test]
    fn test_classifier_rejects_ragged_rows() {
        let config = TrainConfig::default();
        let result = perceptron_algorithm(
            vec![vec![0.0, 1.0], vec![1.0]],
            vec![0.0, 1.0],
            &config,
        );
        assert!(matches!(result, Err(TrainError::Dimension { .. })));
    }
}
