//! Polynomial expansion of a scalar feature.
//!
//! A scalar `x` becomes the row `[x^1, .., x^degree]` (or `[1, x, .., x^degree]`
//! with the bias column included). Training on the expanded rows with a
//! linear model and reading the bias as the `x^0` coefficient recovers a
//! polynomial.

use std::fmt;

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{Result, TrainError};
use crate::model::linear::LinearParams;
use crate::model::InferenceModel;

/// Generates the powers of a scalar feature.
///
/// # Example
/// ```
/// use tricklearn::model::PolynomialFeatures;
///
/// let poly = PolynomialFeatures::new().with_degree(3);
/// assert_eq!(poly.expand(2.0).to_vec(), vec![2.0, 4.0, 8.0]);
///
/// let with_bias = poly.with_include_bias(true);
/// assert_eq!(with_bias.expand(2.0).to_vec(), vec![1.0, 2.0, 4.0, 8.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialFeatures {
    /// Highest power produced.
    degree: usize,
    /// Prepend the `x^0 = 1` column.
    include_bias: bool,
}

impl Default for PolynomialFeatures {
    fn default() -> Self {
        Self::new()
    }
}

impl PolynomialFeatures {
    /// Degree 2, no bias column.
    pub fn new() -> Self {
        Self {
            degree: 2,
            include_bias: false,
        }
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    pub fn with_include_bias(mut self, include_bias: bool) -> Self {
        self.include_bias = include_bias;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Width of an expanded row.
    pub fn n_features_out(&self) -> usize {
        if self.include_bias {
            self.degree + 1
        } else {
            self.degree
        }
    }

    /// Expands one scalar into its powers, lowest first.
    pub fn expand(&self, x: f64) -> Array1<f64> {
        let start = if self.include_bias { 0 } else { 1 };
        (start..=self.degree).map(|p| x.powi(p as i32)).collect()
    }

    /// Expands a column of scalars into an `(n, n_features_out)` matrix.
    pub fn transform(&self, xs: &[f64]) -> Array2<f64> {
        let width = self.n_features_out();
        let start = if self.include_bias { 0 } else { 1 };
        Array2::from_shape_fn((xs.len(), width), |(i, j)| {
            xs[i].powi((start + j) as i32)
        })
    }
}

/// A polynomial in one variable, stored as a linear model over `[x^1 .. x^d]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialModel {
    degree: usize,
    params: LinearParams,
}

impl PolynomialModel {
    /// Wraps trained parameters whose weights cover powers `1..=degree`.
    ///
    /// # Errors
    /// [`TrainError::Dimension`] if the weight count is not `degree`.
    pub fn new(degree: usize, params: LinearParams) -> Result<Self> {
        if params.n_features() != degree {
            return Err(TrainError::Dimension {
                what: "polynomial weights",
                expected: degree,
                got: params.n_features(),
            });
        }
        Ok(Self { degree, params })
    }

    /// Builds a model from coefficients `[c_0, c_1, .., c_d]`.
    ///
    /// # Errors
    /// [`TrainError::EmptyData`] if `coefficients` is empty.
    pub fn from_coefficients(coefficients: &[f64]) -> Result<Self> {
        let (&c0, rest) = coefficients.split_first().ok_or_else(|| {
            TrainError::EmptyData("a polynomial needs at least one coefficient".into())
        })?;
        Ok(Self {
            degree: rest.len(),
            params: LinearParams::new(Array1::from(rest.to_vec()), c0),
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    /// Coefficients over `[x^0 .. x^degree]`; the bias is `c_0`.
    pub fn coefficients(&self) -> Vec<f64> {
        std::iter::once(self.params.bias)
            .chain(self.params.weights.iter().copied())
            .collect()
    }

    /// Evaluates the polynomial at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        predict_polynomial(&self.coefficients(), x)
    }

    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Writes `y = c0 + (c1 * x^1) + (c2 * x^2)`, two decimals unless the
/// formatter asks for another precision.
impl fmt::Display for PolynomialModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(f, "y = {:.*}", precision, self.params.bias)?;
        for (i, w) in self.params.weights.iter().enumerate() {
            write!(f, " + ({:.*} * x^{})", precision, w, i + 1)?;
        }
        Ok(())
    }
}

impl InferenceModel for PolynomialModel {
    /// Takes the already-expanded row `[x^1 .. x^degree]`.
    fn n_features(&self) -> usize {
        self.degree
    }

    fn output(&self, features: ArrayView1<'_, f64>) -> f64 {
        self.params.score(features)
    }
}

/// Evaluates `Σ c_i x^i` with Horner's scheme.
pub fn predict_polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
