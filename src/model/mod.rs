pub mod activation;
pub mod classifier;
pub mod linear;
pub mod polynomial;

pub use classifier::{accuracy, LogisticModel, PerceptronModel};
pub use linear::{predict, LinearParams};
pub use polynomial::{PolynomialFeatures, PolynomialModel};

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{Result, TrainError};

/// Prediction interface shared by every trained model.
///
/// Implementors supply the raw per-example computation; the provided methods
/// check feature widths before calling it.
pub trait InferenceModel {
    /// Feature width the model expects.
    fn n_features(&self) -> usize;

    /// Prediction for one example whose width is already known to match.
    fn output(&self, features: ArrayView1<'_, f64>) -> f64;

    /// Predicts a single example.
    ///
    /// # Errors
    /// [`TrainError::Dimension`] if `features` has the wrong length.
    fn predict(&self, features: ArrayView1<'_, f64>) -> Result<f64> {
        if features.len() != self.n_features() {
            return Err(TrainError::Dimension {
                what: "features",
                expected: self.n_features(),
                got: features.len(),
            });
        }
        Ok(self.output(features))
    }

    /// Predicts every row of `features`.
    fn predict_batch(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        if features.ncols() != self.n_features() {
            return Err(TrainError::Dimension {
                what: "feature columns",
                expected: self.n_features(),
                got: features.ncols(),
            });
        }
        Ok(features.rows().into_iter().map(|row| self.output(row)).collect())
    }
}
