//! Start/stop-delimited word sequencing.
//!
//! A state machine consumes gated predictions, one per accepted tick, and
//! turns them into words: the reserved start gesture opens a segment, the
//! stop gesture closes it, everything in between is appended to the current
//! utterance. Holding one gesture across several ticks is collapsed to a
//! single word by duplicate suppression.

use serde::{Deserialize, Serialize};

use crate::classifier::Prediction;
use crate::store::{ClassId, ClassStore};


/// Whether a segment is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentMode {
    /// No open segment; only the start gesture is acted on.
    Idle,
    /// Segment open; non-delimiter classes accumulate as words.
    Recording,
}

/// Events emitted toward the presentation layer.
///
/// Events are totally ordered by tick: the assembler never reorders or
/// batches across ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecognitionEvent {
    /// A word was recognized inside an open segment. Emitted immediately,
    /// before the segment completes, for real-time feedback.
    WordRecognized {
        /// Class of the recognized gesture.
        class: ClassId,
        /// Display label of the class.
        label: String,
        /// Confidence of the gated prediction that produced the word.
        confidence: f32,
    },
    /// A segment was closed by the stop gesture. The word list may be empty;
    /// an empty utterance still signals end-of-utterance to the caller.
    SegmentCompleted {
        /// Labels of the words recognized in the segment, in order.
        words: Vec<String>,
    },
}

/// The sequencing state machine.
///
/// `last_accepted` survives rejected ticks on purpose: an ambiguous frame in
/// the middle of a held gesture must not re-trigger the word when confidence
/// recovers.
///
/// # Examples
///
/// ```
/// use gesto::classifier::Prediction;
/// use gesto::sequence::{RecognitionEvent, SequenceAssembler};
/// use gesto::store::{ClassId, ClassStore};
///
/// let mut store = ClassStore::new();
/// let hello = store.add_class("hello");
///
/// let mut assembler = SequenceAssembler::new();
/// let open = |class| Prediction { class, confidence: 1.0 };
///
/// assert!(assembler.observe(&open(ClassId::START), &store).is_empty());
/// let events = assembler.observe(&open(hello), &store);
/// assert!(matches!(&events[0], RecognitionEvent::WordRecognized { label, .. } if label == "hello"));
/// let events = assembler.observe(&open(ClassId::STOP), &store);
/// assert_eq!(events[0], RecognitionEvent::SegmentCompleted { words: vec!["hello".to_string()] });
/// ```
#[derive(Debug, Clone)]
pub struct SequenceAssembler {
    mode: SegmentMode,
    buffer: Vec<ClassId>,
    last_accepted: Option<ClassId>,
}

impl SequenceAssembler {
    /// Creates an assembler in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: SegmentMode::Idle,
            buffer: Vec::new(),
            last_accepted: None,
        }
    }

    /// Current segment mode.
    #[must_use]
    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Classes buffered in the open segment, in recognition order.
    #[must_use]
    pub fn buffered(&self) -> &[ClassId] {
        &self.buffer
    }

    /// Consumes one gated (accepted) prediction and returns the events it
    /// produces — at most one per call.
    ///
    /// Transition rules:
    /// - a prediction equal to the last accepted class is ignored;
    /// - idle + start opens a segment (no event); idle + anything else is
    ///   ignored;
    /// - recording + stop emits [`RecognitionEvent::SegmentCompleted`] and
    ///   returns to idle;
    /// - recording + other buffers the class and emits
    ///   [`RecognitionEvent::WordRecognized`] immediately.
    ///
    /// The store resolves class labels; a class missing from the store (only
    /// possible with a stale snapshot) falls back to its decimal id.
    pub fn observe(&mut self, prediction: &Prediction, store: &ClassStore) -> Vec<RecognitionEvent> {
        let class = prediction.class;

        if self.last_accepted == Some(class) {
            return Vec::new();
        }

        match self.mode {
            SegmentMode::Idle => {
                if class == ClassId::START {
                    self.buffer.clear();
                    self.mode = SegmentMode::Recording;
                    self.last_accepted = Some(class);
                }
                // Any other class while idle is ignored, last_accepted
                // untouched: the stream must be opened by the start gesture.
                Vec::new()
            }
            SegmentMode::Recording => {
                self.last_accepted = Some(class);
                if class == ClassId::STOP {
                    let words = self
                        .buffer
                        .drain(..)
                        .map(|c| resolve_label(store, c))
                        .collect();
                    self.mode = SegmentMode::Idle;
                    vec![RecognitionEvent::SegmentCompleted { words }]
                } else if class == ClassId::START {
                    // Start inside an open segment discards it and begins a
                    // fresh one.
                    self.buffer.clear();
                    Vec::new()
                } else {
                    self.buffer.push(class);
                    vec![RecognitionEvent::WordRecognized {
                        class,
                        label: resolve_label(store, class),
                        confidence: prediction.confidence,
                    }]
                }
            }
        }
    }

    /// Forces the idle state, clearing the buffer and the duplicate-
    /// suppression memory. Emits nothing.
    pub fn reset(&mut self) {
        self.mode = SegmentMode::Idle;
        self.buffer.clear();
        self.last_accepted = None;
    }
}

impl Default for SequenceAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_label(store: &ClassStore, class: ClassId) -> String {
    store
        .label(class)
        .map_or_else(|| class.to_string(), str::to_string)
}
