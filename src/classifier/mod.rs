//! k-nearest-neighbor gesture classification.
//!
//! Instance-based: every query is compared against all stored examples of the
//! non-empty classes, the K closest vote for their class, and the winner's
//! share of the vote mass becomes the confidence.

use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::error::{GestoError, Result};
use crate::store::{ClassId, ClassStore};


/// Default number of voting neighbors.
pub const DEFAULT_K: usize = 10;

/// Added to each neighbor distance before inverting, so exact duplicates
/// (distance zero) cannot divide by zero.
const VOTE_EPSILON: f32 = 1e-8;

/// Distance metric for neighbor search, fixed engine-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// `sum((x_i - y_i)^2)` — the default; rank-equivalent to Euclidean
    /// without the square root.
    SquaredEuclidean,
    /// `sqrt(sum((x_i - y_i)^2))`
    Euclidean,
    /// `1 - cos(x, y)`; zero-norm vectors compare as maximally distant.
    Cosine,
}

impl DistanceMetric {
    fn compute(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::SquaredEuclidean => squared_euclidean(a, b),
            DistanceMetric::Euclidean => squared_euclidean(a, b).sqrt(),
            DistanceMetric::Cosine => {
                let mut dot = 0.0;
                let mut norm_a = 0.0;
                let mut norm_b = 0.0;
                for (x, y) in a.iter().zip(b) {
                    dot += x * y;
                    norm_a += x * x;
                    norm_b += y * y;
                }
                if norm_a == 0.0 || norm_b == 0.0 {
                    return 1.0;
                }
                1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
            }
        }
    }
}

fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// One classification outcome: the winning class and its share of the
/// neighbor vote mass. Produced fresh per query, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Winning class.
    pub class: ClassId,
    /// Winner's vote mass divided by total vote mass, in `[0, 1]`.
    pub confidence: f32,
}

/// K-nearest-neighbor classifier over a [`ClassStore`].
///
/// Holds only policy (k, metric, weighting); the examples stay in the store,
/// so training while classifying needs no classifier rebuild.
///
/// # Examples
///
/// ```
/// use gesto::classifier::KnnClassifier;
/// use gesto::embedding::Embedding;
/// use gesto::store::{ClassId, ClassStore};
///
/// let mut store = ClassStore::new();
/// store.add_example(Embedding::from_slice(&[0.0, 0.0]), ClassId::START).unwrap();
/// store.add_example(Embedding::from_slice(&[9.0, 9.0]), ClassId::STOP).unwrap();
///
/// let knn = KnnClassifier::new();
/// let pred = knn
///     .predict(&store, &Embedding::from_slice(&[0.1, 0.1]))
///     .unwrap()
///     .expect("store is non-empty");
/// assert_eq!(pred.class, ClassId::START);
/// ```
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    metric: DistanceMetric,
    weighted: bool,
}

impl KnnClassifier {
    /// Creates a classifier with default policy: k = 10, squared Euclidean
    /// distance, inverse-distance-weighted voting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            k: DEFAULT_K,
            metric: DistanceMetric::SquaredEuclidean,
            weighted: true,
        }
    }

    /// Sets the number of voting neighbors.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Switches between inverse-distance-weighted voting (true, default) and
    /// unweighted majority voting.
    #[must_use]
    pub fn with_weights(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Classifies a query embedding against the store.
    ///
    /// Returns `Ok(None)` when the store holds no examples at all — there is
    /// nothing to compare against, which is distinct from a low-confidence
    /// prediction. When fewer than k examples exist, all of them vote.
    ///
    /// Deterministic: identical store contents and query produce identical
    /// results, with vote-mass ties broken by the lowest class id.
    ///
    /// # Errors
    ///
    /// Returns [`GestoError::DimensionMismatch`] when the query's length
    /// disagrees with the store's dimensionality.
    pub fn predict(&self, store: &ClassStore, query: &Embedding) -> Result<Option<Prediction>> {
        let Some(dim) = store.dim() else {
            return Ok(None);
        };
        if store.total_examples() == 0 {
            return Ok(None);
        }
        if query.len() != dim {
            return Err(GestoError::DimensionMismatch {
                expected: dim,
                actual: query.len(),
            });
        }

        let mut distances: Vec<(f32, ClassId)> = store
            .examples()
            .map(|(class, example)| {
                (
                    self.metric.compute(query.as_slice(), example.as_slice()),
                    class,
                )
            })
            .collect();

        distances.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let k = self.k.min(distances.len());
        let nearest = &distances[..k];

        let mut masses = vec![0.0f32; store.class_count()];
        let mut total = 0.0f32;
        for &(dist, class) in nearest {
            let weight = if self.weighted {
                1.0 / (dist + VOTE_EPSILON)
            } else {
                1.0
            };
            masses[class.index()] += weight;
            total += weight;
        }

        // Scan ascending so equal masses resolve to the lowest class id.
        let mut winner = ClassId(0);
        let mut winner_mass = 0.0f32;
        for (idx, &mass) in masses.iter().enumerate() {
            if mass > winner_mass {
                winner = ClassId(idx);
                winner_mass = mass;
            }
        }

        Ok(Some(Prediction {
            class: winner,
            confidence: winner_mass / total,
        }))
    }
}

impl Default for KnnClassifier {
    fn default() -> Self {
        Self::new()
    }
}
