//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use gesto::prelude::*;
//! ```

pub use crate::classifier::{DistanceMetric, KnnClassifier, Prediction};
pub use crate::embedding::Embedding;
pub use crate::error::{GestoError, Result};
pub use crate::gate::ConfidenceGate;
pub use crate::recognizer::Recognizer;
pub use crate::schedule::{EmbeddingSource, LatestSlot, Throttle};
pub use crate::sequence::{RecognitionEvent, SegmentMode, SequenceAssembler};
pub use crate::store::{ClassId, ClassStore, StoreSnapshot};
