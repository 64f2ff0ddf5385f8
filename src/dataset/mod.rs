//! Dataset abstractions for the trainers.
//!
//! A [`Dataset`] is an ordered, immutable sequence of `(features, label)` pairs.
//! Trainers only need its length, per-example access and the feature width;
//! how the examples are stored is up to the implementor.
//!
//! # Example
//!
//! ```rust
//! use tricklearn::dataset::{Dataset, InMemoryDataset};
//!
//! let x = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
//! let y = vec![0.0, 1.0];
//! let dataset = InMemoryDataset::new(x, y).unwrap();
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.n_features(), 2);
//! assert_eq!(dataset.label(1), 1.0);
//! ```

use ndarray::{Array1, ArrayView1};

pub mod memory;
pub mod sampler;

pub use self::memory::InMemoryDataset;
pub use self::sampler::{BatchMode, BatchSampler};

/// Read-only access to a labelled training set.
///
/// Indices are `0..len()`. Implementations may panic on out-of-range indices,
/// the same way slice indexing does; the trainers never ask for one.
pub trait Dataset {
    /// Number of examples.
    fn len(&self) -> usize;

    /// Checks whether the dataset has no examples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of every feature vector.
    fn n_features(&self) -> usize;

    /// Feature vector of the example at `index`.
    fn features(&self, index: usize) -> ArrayView1<'_, f64>;

    /// Label of the example at `index`.
    fn label(&self, index: usize) -> f64;

    /// Collects all labels in dataset order.
    fn labels_vec(&self) -> Array1<f64> {
        (0..self.len()).map(|i| self.label(i)).collect()
    }
}
