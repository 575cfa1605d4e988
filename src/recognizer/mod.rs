//! The engine facade: training surface, transport, and the tick pipeline.

use std::time::Instant;

use crate::classifier::KnnClassifier;
use crate::embedding::Embedding;
use crate::error::Result;
use crate::gate::ConfidenceGate;
use crate::schedule::{EmbeddingSource, Throttle};
use crate::sequence::{RecognitionEvent, SequenceAssembler};
use crate::store::{ClassId, ClassStore, StoreSnapshot};

#[cfg(test)]
mod tests;

/// Online gesture recognizer.
///
/// Owns the class store, classifier, gate, assembler, and throttle, and runs
/// them as one synchronous pipeline per tick:
/// fetch embedding → classify → gate → assemble → emit.
///
/// The recognizer is single-threaded by design: the caller drives
/// [`Recognizer::poll`] from one loop and serializes training calls against
/// it. A tick executes end-to-end with no suspension point, so no tick can
/// interleave with another's state mutation, and [`Recognizer::stop`] takes
/// effect at the next tick boundary — never mid-tick.
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use gesto::embedding::Embedding;
/// use gesto::recognizer::Recognizer;
/// use gesto::sequence::RecognitionEvent;
/// use gesto::store::ClassId;
///
/// let mut recognizer = Recognizer::new();
/// let hello = recognizer.add_class("hello");
/// for v in [[0.0, 0.0], [0.1, 0.1]] {
///     recognizer.add_example(Embedding::from_slice(&v), ClassId::START).unwrap();
/// }
/// for v in [[5.0, 5.0], [5.1, 5.1]] {
///     recognizer.add_example(Embedding::from_slice(&v), hello).unwrap();
/// }
///
/// recognizer.start();
/// let mut frame = Some(Embedding::from_slice(&[0.05, 0.05]));
/// let events = recognizer.poll(Instant::now(), &mut || frame.take());
/// assert!(events.is_empty()); // start gesture opens the segment silently
/// ```
#[derive(Debug)]
pub struct Recognizer {
    store: ClassStore,
    classifier: KnnClassifier,
    gate: ConfidenceGate,
    assembler: SequenceAssembler,
    throttle: Throttle,
    running: bool,
    ticks: u64,
}

impl Recognizer {
    /// Creates a stopped recognizer with default policy everywhere: k = 10,
    /// squared Euclidean weighted voting, 0.98 gate, 5 ticks per second.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: ClassStore::new(),
            classifier: KnnClassifier::new(),
            gate: ConfidenceGate::new(),
            assembler: SequenceAssembler::new(),
            throttle: Throttle::new(),
            running: false,
            ticks: 0,
        }
    }

    /// Replaces the classifier policy.
    #[must_use]
    pub fn with_classifier(mut self, classifier: KnnClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replaces the confidence gate.
    #[must_use]
    pub fn with_gate(mut self, gate: ConfidenceGate) -> Self {
        self.gate = gate;
        self
    }

    /// Replaces the tick throttle.
    #[must_use]
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    // --- training control surface -------------------------------------

    /// Registers a new gesture beyond the two reserved ones.
    pub fn add_class(&mut self, label: impl Into<String>) -> ClassId {
        self.store.add_class(label)
    }

    /// Appends a training example.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GestoError::DimensionMismatch`] when the
    /// embedding's length disagrees with the store's dimensionality.
    pub fn add_example(&mut self, embedding: Embedding, class: ClassId) -> Result<()> {
        self.store.add_example(embedding, class)
    }

    /// Empties a class's examples; unknown ids are a no-op.
    pub fn clear_class(&mut self, class: ClassId) {
        self.store.clear_class(class);
    }

    /// Per-class example counts, indexed by class id.
    #[must_use]
    pub fn example_counts(&self) -> Vec<usize> {
        self.store.example_counts()
    }

    /// Number of registered classes, including empty ones.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.store.class_count()
    }

    /// Read access to the class store.
    #[must_use]
    pub fn store(&self) -> &ClassStore {
        &self.store
    }

    // --- snapshot passthrough -----------------------------------------

    /// Captures the trained classes for persistence.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }

    /// Replaces the trained classes from a snapshot and resets the sequence
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GestoError::DimensionMismatch`] if the
    /// snapshot's examples do not all share one length.
    pub fn restore(&mut self, snapshot: StoreSnapshot) -> Result<()> {
        self.store = ClassStore::from_snapshot(snapshot)?;
        self.assembler.reset();
        Ok(())
    }

    // --- transport -----------------------------------------------------

    /// Enables polling. The throttle restarts, so the first poll after
    /// `start` ticks immediately.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.throttle.reset();
        }
    }

    /// Disables polling. No further predictions are produced until
    /// [`Recognizer::start`]; sequence state is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// True while polling is enabled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Forces the sequence state machine back to idle. Emits nothing.
    pub fn reset(&mut self) {
        self.assembler.reset();
    }

    /// Number of ticks that actually classified an embedding.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // --- tick pipeline ---------------------------------------------------

    /// Runs at most one classification tick.
    ///
    /// Call this from the driving loop as often as convenient; the throttle
    /// turns the calls into fixed-rate ticks. Between tick boundaries, while
    /// stopped, or when the source has produced nothing new, the poll is a
    /// no-op returning no events.
    ///
    /// All per-tick anomalies degrade to "no prediction this tick": an empty
    /// store, a gated-out prediction, and even an embedding of the wrong
    /// length produce no events and no state change.
    pub fn poll(&mut self, now: Instant, source: &mut impl EmbeddingSource) -> Vec<RecognitionEvent> {
        if !self.running || !self.throttle.tick_due(now) {
            return Vec::new();
        }
        let Some(embedding) = source.latest() else {
            return Vec::new();
        };
        self.ticks += 1;

        let prediction = match self.classifier.predict(&self.store, &embedding) {
            Ok(p) => p,
            Err(_) => None,
        };
        if !self.gate.accept(prediction.as_ref()) {
            return Vec::new();
        }
        let Some(prediction) = prediction else {
            return Vec::new();
        };

        self.assembler.observe(&prediction, &self.store)
    }
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::new()
    }
}
