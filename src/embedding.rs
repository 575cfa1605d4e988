//! Fixed-length embedding vectors.
//!
//! An [`Embedding`] is the only representation of a captured frame the engine
//! ever sees; pixel data and feature extraction live outside the crate.

use serde::{Deserialize, Serialize};

/// A fixed-length feature vector representing one captured frame.
///
/// All embeddings compared by the classifier must share one dimensionality,
/// fixed by the first example added to a [`crate::store::ClassStore`].
///
/// # Examples
///
/// ```
/// use gesto::embedding::Embedding;
///
/// let e = Embedding::from_slice(&[0.25, -1.0, 3.5]);
/// assert_eq!(e.len(), 3);
/// assert_eq!(e.as_slice()[2], 3.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    /// Creates an embedding from an owned vector.
    #[must_use]
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Creates an embedding by copying a slice.
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Returns the dimensionality of the embedding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the embedding has zero components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the embedding, returning the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(data: Vec<f32>) -> Self {
        Self::from_vec(data)
    }
}

impl std::ops::Index<usize> for Embedding {
    type Output = f32;

    fn index(&self, idx: usize) -> &f32 {
        &self.data[idx]
    }
}
