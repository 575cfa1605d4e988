//! Per-class example storage for the k-NN classifier.
//!
//! The store is a lazy-learning substrate: training is appending labeled
//! embeddings, nothing is precomputed. Two class slots are reserved at
//! construction for the start/stop delimiter gestures; further gestures are
//! registered with [`ClassStore::add_class`].
//!
//! The store is not internally synchronized. Callers serialize training calls
//! against prediction calls, typically by driving everything from one
//! cooperative loop.

use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::error::{GestoError, Result};

#[cfg(test)]
mod tests;

/// Identifier of a gesture class, stable for the session.
///
/// Two ids carry reserved meaning for the sequence assembler:
/// [`ClassId::START`] opens a segment and [`ClassId::STOP`] closes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(pub usize);

impl ClassId {
    /// Reserved class signalling the start of a segment.
    pub const START: ClassId = ClassId(0);
    /// Reserved class signalling the end of a segment.
    pub const STOP: ClassId = ClassId(1);

    /// Returns the raw index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns true for the two reserved delimiter classes.
    #[must_use]
    pub fn is_delimiter(self) -> bool {
        self == Self::START || self == Self::STOP
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Class {
    label: String,
    examples: Vec<Embedding>,
}

/// Labeled, per-class example storage.
///
/// Classes are appended and never removed; [`ClassStore::clear_class`]
/// empties a slot but keeps its id and label valid. The first example added
/// fixes the store's embedding dimensionality for the rest of the session.
///
/// # Examples
///
/// ```
/// use gesto::embedding::Embedding;
/// use gesto::store::{ClassId, ClassStore};
///
/// let mut store = ClassStore::new();
/// let hello = store.add_class("hello");
/// store.add_example(Embedding::from_slice(&[0.0, 1.0]), hello).unwrap();
/// assert_eq!(store.example_count(hello), 1);
/// assert_eq!(store.label(hello), Some("hello"));
/// assert_eq!(store.class_count(), 3); // start, stop, hello
/// # assert_eq!(hello, ClassId(2));
/// ```
#[derive(Debug, Clone)]
pub struct ClassStore {
    classes: Vec<Class>,
    dim: Option<usize>,
}

/// Serializable snapshot of a [`ClassStore`]: labels and examples in class
/// order. The on-disk format is plain JSON via [`ClassStore::to_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    classes: Vec<Class>,
}

impl ClassStore {
    /// Creates a store with the two reserved delimiter classes registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: vec![
                Class {
                    label: "start".to_string(),
                    examples: Vec::new(),
                },
                Class {
                    label: "stop".to_string(),
                    examples: Vec::new(),
                },
            ],
            dim: None,
        }
    }

    /// Registers a new gesture class and returns its id.
    pub fn add_class(&mut self, label: impl Into<String>) -> ClassId {
        self.classes.push(Class {
            label: label.into(),
            examples: Vec::new(),
        });
        ClassId(self.classes.len() - 1)
    }

    /// Appends a training example to a class.
    ///
    /// The first example fixes the store's dimensionality. Adding to an id
    /// beyond the registered range creates the missing class slots, labeled
    /// with their decimal ids until [`ClassStore::add_class`] names them.
    ///
    /// # Errors
    ///
    /// Returns [`GestoError::DimensionMismatch`] when the embedding's length
    /// disagrees with the established dimensionality. The store is left
    /// untouched in that case.
    pub fn add_example(&mut self, embedding: Embedding, class: ClassId) -> Result<()> {
        match self.dim {
            Some(dim) if dim != embedding.len() => {
                return Err(GestoError::DimensionMismatch {
                    expected: dim,
                    actual: embedding.len(),
                });
            }
            Some(_) => {}
            None => self.dim = Some(embedding.len()),
        }

        while self.classes.len() <= class.index() {
            let label = self.classes.len().to_string();
            self.classes.push(Class {
                label,
                examples: Vec::new(),
            });
        }

        self.classes[class.index()].examples.push(embedding);
        Ok(())
    }

    /// Empties a class's example list. Unknown ids are a no-op; calling twice
    /// is the same as calling once.
    pub fn clear_class(&mut self, class: ClassId) {
        if let Some(slot) = self.classes.get_mut(class.index()) {
            slot.examples.clear();
        }
    }

    /// Number of examples stored for a class (0 for unknown ids).
    #[must_use]
    pub fn example_count(&self, class: ClassId) -> usize {
        self.classes
            .get(class.index())
            .map_or(0, |c| c.examples.len())
    }

    /// Per-class example counts, indexed by class id.
    #[must_use]
    pub fn example_counts(&self) -> Vec<usize> {
        self.classes.iter().map(|c| c.examples.len()).collect()
    }

    /// Total examples across all classes.
    #[must_use]
    pub fn total_examples(&self) -> usize {
        self.classes.iter().map(|c| c.examples.len()).sum()
    }

    /// Number of registered classes, including empty ones.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Display label of a class, if registered.
    #[must_use]
    pub fn label(&self, class: ClassId) -> Option<&str> {
        self.classes.get(class.index()).map(|c| c.label.as_str())
    }

    /// Embedding dimensionality, once fixed by the first example.
    #[must_use]
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    /// Iterates all stored examples as `(class, embedding)` pairs, classes in
    /// id order, examples in insertion order.
    pub fn examples(&self) -> impl Iterator<Item = (ClassId, &Embedding)> {
        self.classes
            .iter()
            .enumerate()
            .flat_map(|(id, c)| c.examples.iter().map(move |e| (ClassId(id), e)))
    }

    /// Discards all classes and examples, returning to the freshly
    /// constructed state (reserved classes only, dimensionality unset).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Captures the store contents for persistence.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            classes: self.classes.clone(),
        }
    }

    /// Rebuilds a store from a snapshot, re-deriving dimensionality from the
    /// first stored example.
    ///
    /// # Errors
    ///
    /// Returns [`GestoError::DimensionMismatch`] if the snapshot's examples
    /// do not all share one length.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut dim = None;
        for class in &snapshot.classes {
            for example in &class.examples {
                match dim {
                    None => dim = Some(example.len()),
                    Some(d) if d != example.len() => {
                        return Err(GestoError::DimensionMismatch {
                            expected: d,
                            actual: example.len(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self {
            classes: snapshot.classes,
            dim,
        })
    }

    /// Serializes the store contents to a JSON snapshot string.
    ///
    /// # Errors
    ///
    /// Returns [`GestoError::Serialization`] on encoding failure.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Rebuilds a store from a JSON snapshot string.
    ///
    /// # Errors
    ///
    /// Returns [`GestoError::Serialization`] on malformed JSON and
    /// [`GestoError::DimensionMismatch`] on inconsistent example lengths.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }
}

impl Default for ClassStore {
    fn default() -> Self {
        Self::new()
    }
}
