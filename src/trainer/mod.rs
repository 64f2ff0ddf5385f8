//! Epoch loop shared by every model.
//!
//! A [`Trainer`] pairs a [`Loss`] (what gets recorded) with an [`UpdateRule`]
//! (how parameters move) and runs the loop: score everything, record the
//! loss, optionally snapshot the parameters, then update on the examples the
//! batching mode selects. An optional [`Regularizer`] adds a weight penalty
//! to the recorded loss and shrinks the weights after every update.

use log::{debug, info, warn};
use ndarray::Array1;
use rand::Rng;

use crate::dataset::{BatchMode, BatchSampler, Dataset};
use crate::error::{Result, TrainError};
use crate::loss::Loss;
use crate::model::linear::LinearParams;
use crate::optimizer::UpdateRule;
use crate::regularizers::{NoRegularizer, Regularizer};

/// Immutable training configuration; build with [`Trainer::builder`].
#[derive(Debug, Clone)]
pub struct Trainer<L, U, G = NoRegularizer>
where
    L: Loss,
    U: UpdateRule,
    G: Regularizer,
{
    pub(crate) learning_rate: f64,
    pub(crate) epochs: usize,
    pub(crate) batch_mode: BatchMode,
    pub(crate) mini_batch_size: usize,
    pub(crate) track_history: bool,
    pub(crate) verbose: bool,
    pub(crate) loss_fn: L,
    pub(crate) rule: U,
    pub(crate) regularizer: G,
}

pub struct TrainerBuilder<L, U, G = NoRegularizer>
where
    L: Loss,
    U: UpdateRule,
    G: Regularizer,
{
    learning_rate: f64,
    epochs: usize,
    batch_mode: BatchMode,
    mini_batch_size: usize,
    track_history: bool,
    verbose: bool,
    loss_fn: L,
    rule: U,
    regularizer: G,
}

impl<L, U> TrainerBuilder<L, U, NoRegularizer>
where
    L: Loss,
    U: UpdateRule,
{
    pub fn new(loss_fn: L, rule: U) -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1000,
            batch_mode: BatchMode::Stochastic,
            mini_batch_size: 2,
            track_history: false,
            verbose: false,
            loss_fn,
            rule,
            regularizer: NoRegularizer,
        }
    }
}

impl<L, U, G> TrainerBuilder<L, U, G>
where
    L: Loss,
    U: UpdateRule,
    G: Regularizer,
{
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn batch_mode(mut self, mode: BatchMode) -> Self {
        self.batch_mode = mode;
        self
    }

    /// Examples per epoch in [`BatchMode::MiniBatch`]; ignored otherwise.
    pub fn mini_batch_size(mut self, size: usize) -> Self {
        self.mini_batch_size = size;
        self
    }

    /// Record a parameter snapshot before every epoch's update.
    pub fn track_history(mut self, track: bool) -> Self {
        self.track_history = track;
        self
    }

    /// Log every epoch at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Penalizes the weights with `regularizer`.
    pub fn regularizer<G2: Regularizer>(self, regularizer: G2) -> TrainerBuilder<L, U, G2> {
        TrainerBuilder {
            learning_rate: self.learning_rate,
            epochs: self.epochs,
            batch_mode: self.batch_mode,
            mini_batch_size: self.mini_batch_size,
            track_history: self.track_history,
            verbose: self.verbose,
            loss_fn: self.loss_fn,
            rule: self.rule,
            regularizer,
        }
    }

    pub fn build(self) -> Trainer<L, U, G> {
        Trainer {
            learning_rate: self.learning_rate,
            epochs: self.epochs,
            batch_mode: self.batch_mode,
            mini_batch_size: self.mini_batch_size,
            track_history: self.track_history,
            verbose: self.verbose,
            loss_fn: self.loss_fn,
            rule: self.rule,
            regularizer: self.regularizer,
        }
    }
}

/// Everything a training call produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    /// Parameters after the last epoch.
    pub params: LinearParams,
    /// Loss over the whole dataset, recorded before each epoch's update.
    pub loss_history: Vec<f64>,
    /// Parameter snapshots taken before each epoch's update, if tracked.
    pub param_history: Option<Vec<LinearParams>>,
}

impl TrainingOutcome {
    pub fn final_weights(&self) -> &Array1<f64> {
        &self.params.weights
    }

    pub fn final_bias(&self) -> f64 {
        self.params.bias
    }

    pub fn weights_history(&self) -> Option<Vec<Array1<f64>>> {
        self.param_history
            .as_ref()
            .map(|h| h.iter().map(|p| p.weights.clone()).collect())
    }

    pub fn bias_history(&self) -> Option<Vec<f64>> {
        self.param_history
            .as_ref()
            .map(|h| h.iter().map(|p| p.bias).collect())
    }

    /// Last recorded loss, i.e. the loss before the final epoch's update.
    pub fn last_loss(&self) -> Option<f64> {
        self.loss_history.last().copied()
    }
}

impl<L, U> Trainer<L, U, NoRegularizer>
where
    L: Loss,
    U: UpdateRule,
{
    pub fn builder(loss_fn: L, rule: U) -> TrainerBuilder<L, U> {
        TrainerBuilder::new(loss_fn, rule)
    }
}

impl<L, U, G> Trainer<L, U, G>
where
    L: Loss,
    U: UpdateRule,
    G: Regularizer,
{

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn batch_mode(&self) -> BatchMode {
        self.batch_mode
    }

    /// Trains fresh parameters on `dataset`.
    ///
    /// Parameters start uniform in `[0, 1)` drawn from `rng`, which also
    /// drives example selection, so a seeded RNG gives a reproducible run.
    ///
    /// # Errors
    /// - [`TrainError::Configuration`] for a non-positive learning rate, zero
    ///   epochs, a bad mini-batch size, a bad penalty strength, or a feature
    ///   width the rule rejects
    /// - [`TrainError::EmptyData`] for an empty dataset
    /// - [`TrainError::Dimension`] if a feature row is not `n_features()` wide
    ///   or the label count differs from `len()`
    ///
    /// All checks run before the first epoch.
    pub fn fit<D, R>(&self, dataset: &D, rng: &mut R) -> Result<TrainingOutcome>
    where
        D: Dataset,
        R: Rng + ?Sized,
    {
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(TrainError::Configuration(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(TrainError::Configuration(
                "epochs must be at least 1".into(),
            ));
        }
        let n_samples = dataset.len();
        let sampler = BatchSampler::new(self.batch_mode, self.mini_batch_size, n_samples)?;
        let n_features = dataset.n_features();
        self.rule.check_features(n_features)?;
        self.regularizer.check()?;

        if let Some(row) = (0..n_samples).find(|&i| dataset.features(i).len() != n_features) {
            return Err(TrainError::Dimension {
                what: "feature row length",
                expected: n_features,
                got: dataset.features(row).len(),
            });
        }
        let labels = dataset.labels_vec();
        if labels.len() != n_samples {
            return Err(TrainError::Dimension {
                what: "labels",
                expected: n_samples,
                got: labels.len(),
            });
        }
        let mut params = LinearParams::random(n_features, rng);
        let mut loss_history = Vec::with_capacity(self.epochs);
        let mut param_history = if self.track_history {
            Some(Vec::with_capacity(self.epochs))
        } else {
            None
        };
        let mut warned_non_finite = false;

        debug!(
            "training on {} examples x {} features: mode = {}, lr = {}, epochs = {}",
            n_samples,
            n_features,
            sampler.mode(),
            self.learning_rate,
            self.epochs
        );

        for epoch in 0..self.epochs {
            let outputs: Array1<f64> = (0..n_samples)
                .map(|i| params.score(dataset.features(i)))
                .collect();
            let loss = self.loss_fn.loss(labels.view(), outputs.view())
                + self.regularizer.penalty(params.weights.view());
            loss_history.push(loss);

            if self.verbose {
                info!("epoch {}: loss = {:.6}", epoch, loss);
            } else {
                debug!("epoch {}: loss = {:.6}", epoch, loss);
            }
            if !loss.is_finite() && !warned_non_finite {
                warn!(
                    "loss became non-finite at epoch {}; learning rate {} may be too large",
                    epoch, self.learning_rate
                );
                warned_non_finite = true;
            }

            if let Some(history) = param_history.as_mut() {
                history.push(params.clone());
            }

            for i in sampler.draw(rng) {
                self.rule.step(
                    &mut params,
                    dataset.features(i),
                    dataset.label(i),
                    self.learning_rate,
                );
                self.regularizer.shrink(&mut params.weights, self.learning_rate);
            }
        }

        info!(
            "training finished after {} epochs: first loss = {:.6}, last loss = {:.6}",
            self.epochs,
            loss_history.first().copied().unwrap_or(f64::NAN),
            loss_history.last().copied().unwrap_or(f64::NAN)
        );

        Ok(TrainingOutcome {
            params,
            loss_history,
            param_history,
        })
    }
}
