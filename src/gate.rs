//! Confidence gating of raw predictions.

use crate::classifier::Prediction;

/// Default acceptance threshold. Deliberately high: near-identical gestures
/// and idle backgrounds otherwise produce jittery word output.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.98;

/// Accepts or rejects a raw prediction against a fixed threshold.
///
/// Stateless; the decision depends only on the configured threshold and the
/// input. Absent predictions are always rejected.
///
/// # Examples
///
/// ```
/// use gesto::classifier::Prediction;
/// use gesto::gate::ConfidenceGate;
/// use gesto::store::ClassId;
///
/// let gate = ConfidenceGate::new();
/// let confident = Prediction { class: ClassId::START, confidence: 0.99 };
/// assert!(gate.accept(Some(&confident)));
/// assert!(!gate.accept(None));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceGate {
    threshold: f32,
}

impl ConfidenceGate {
    /// Creates a gate with the default threshold of 0.98.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Sets the acceptance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the configured threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns true when the prediction exists and its confidence reaches the
    /// threshold. The boundary is inclusive: exactly-at-threshold accepts.
    #[must_use]
    pub fn accept(&self, prediction: Option<&Prediction>) -> bool {
        match prediction {
            Some(p) => p.confidence >= self.threshold,
            None => false,
        }
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new()
    }
}
