//! Linear parameter vector: one weight per feature plus a bias.
//!
//! The same [`LinearParams`] backs every model in the crate. Regression uses
//! the raw score `w·x + b` as its prediction, the classifiers pass it through
//! a step or sigmoid, and polynomial regression treats the bias as the `x^0`
//! coefficient.

use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::Rng;

use crate::error::{Result, TrainError};
use crate::model::InferenceModel;

/// Trainable parameters of a linear model: weights and bias.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearParams {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl LinearParams {
    pub fn new(weights: Array1<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// All-zero parameters for `n_features` inputs.
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features),
            bias: 0.0,
        }
    }

    /// Uniform random parameters in `[0, 1)`, weights first, then bias.
    pub fn random<R: Rng + ?Sized>(n_features: usize, rng: &mut R) -> Self {
        let weights = Array1::from_shape_fn(n_features, |_| rng.random::<f64>());
        let bias = rng.random::<f64>();
        Self { weights, bias }
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Weighted sum `w·x + b` for one example.
    ///
    /// # Panics
    /// If `x` and the weights differ in length.
    pub fn score(&self, x: ArrayView1<'_, f64>) -> f64 {
        x.dot(&self.weights) + self.bias
    }

    /// Weighted sums for every row of `x`.
    ///
    /// # Panics
    /// If the column count differs from the number of weights.
    pub fn scores(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        x.dot(&self.weights) + self.bias
    }
}

/// Writes the fitted line, e.g. `y = 2.00 * x + 3.00`. Wider models number
/// their inputs (`y = 1.00 * x1 - 0.50 * x2 + 0.25`). Two decimals unless the
/// formatter asks for another precision.
impl fmt::Display for LinearParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        f.write_str("y =")?;
        let single = self.weights.len() == 1;
        for (i, &w) in self.weights.iter().enumerate() {
            if i == 0 {
                write!(f, " {:.*} * x", precision, w)?;
            } else {
                let sign = if w >= 0.0 { '+' } else { '-' };
                write!(f, " {} {:.*} * x", sign, precision, w.abs())?;
            }
            if !single {
                write!(f, "{}", i + 1)?;
            }
        }
        if self.weights.is_empty() {
            write!(f, " {:.*}", precision, self.bias)
        } else {
            let sign = if self.bias >= 0.0 { '+' } else { '-' };
            write!(f, " {} {:.*}", sign, precision, self.bias.abs())
        }
    }
}

impl InferenceModel for LinearParams {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn output(&self, features: ArrayView1<'_, f64>) -> f64 {
        self.score(features)
    }
}

/// Predicts one example with trained parameters: `w·x + b`.
///
/// # Errors
/// [`TrainError::Dimension`] if `features.len()` differs from the weight count.
pub fn predict(params: &LinearParams, features: &[f64]) -> Result<f64> {
    if features.len() != params.n_features() {
        return Err(TrainError::Dimension {
            what: "features",
            expected: params.n_features(),
            got: features.len(),
        });
    }
    Ok(params.score(ArrayView1::from(features)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_display_single_feature_line() {
        assert_eq!(
            LinearParams::new(array![2.0], 3.0).to_string(),
            "y = 2.00 * x + 3.00"
        );
        assert_eq!(
            LinearParams::new(array![-1.234], -0.5).to_string(),
            "y = -1.23 * x - 0.50"
        );
        assert_eq!(
            format!("{:.1}", LinearParams::new(array![2.0], 3.0)),
            "y = 2.0 * x + 3.0"
        );
    }

    #[test]
    fn test_display_numbers_wider_inputs() {
        let params = LinearParams::new(array![1.0, -0.5], 0.25);
        assert_eq!(params.to_string(), "y = 1.00 * x1 - 0.50 * x2 + 0.25");
        assert_eq!(LinearParams::zeros(0).to_string(), "y = 0.00");
    }

    #[test]
    fn test_score_is_dot_plus_bias() {
        let params = LinearParams::new(array![1.0, 2.0, 3.0], 0.5);
        let x = array![1.0, 1.0, 2.0];
        assert_eq!(params.score(x.view()), 9.5);
    }

    #[test]
    fn test_scores_batch() {
        let params = LinearParams::new(array![2.0], 1.0);
        let x = array![[0.0], [1.0], [3.0]];
        assert_eq!(params.scores(x.view()).to_vec(), vec![1.0, 3.0, 7.0]);
    }

    #[test]
    fn test_predict_checks_dimension() {
        let params = LinearParams::new(array![2.0, 3.0], 1.0);
        assert_eq!(predict(&params, &[1.0, 1.0]).unwrap(), 6.0);
        let err = predict(&params, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            TrainError::Dimension {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_inference_model_batch_dimension_check() {
        let params = LinearParams::new(array![1.0, 1.0], 0.0);
        let ok = params.predict_batch(array![[1.0, 2.0], [3.0, 4.0]].view()).unwrap();
        assert_eq!(ok.to_vec(), vec![3.0, 7.0]);
        assert!(params.predict_batch(array![[1.0], [2.0]].view()).is_err());
        assert!(params.predict(array![1.0, 2.0, 3.0].view()).is_err());
    }

    #[test]
    fn test_random_init_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let params = LinearParams::random(8, &mut rng);
        assert_eq!(params.n_features(), 8);
        assert!(params.weights.iter().all(|&w| (0.0..1.0).contains(&w)));
        assert!((0.0..1.0).contains(&params.bias));
    }

    #[test]
    fn test_random_init_is_reproducible_with_seed() {
        let a = LinearParams::random(3, &mut StdRng::seed_from_u64(7));
        let b = LinearParams::random(3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zeros() {
        let params = LinearParams::zeros(3);
        assert_eq!(params.weights.to_vec(), vec![0.0; 3]);
        assert_eq!(params.bias, 0.0);
    }
}
