//! Gesto: online gesture classification and word sequencing.
//!
//! Gesto turns a live stream of embedding vectors into recognized "words":
//! a k-nearest-neighbor classifier trained incrementally from user examples,
//! sampled at a fixed rate, gated by confidence, and assembled into
//! start/stop-delimited utterances.
//!
//! The crate consumes embeddings, never pixels: frame capture and feature
//! extraction stay outside, behind the [`schedule::EmbeddingSource`] seam.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Instant;
//! use gesto::prelude::*;
//!
//! let mut recognizer = Recognizer::new();
//!
//! // Train: a couple of examples per gesture. START and STOP are reserved.
//! let hello = recognizer.add_class("hello");
//! recognizer.add_example(Embedding::from_slice(&[0.0, 0.0]), ClassId::START).unwrap();
//! recognizer.add_example(Embedding::from_slice(&[0.1, 0.1]), ClassId::START).unwrap();
//! recognizer.add_example(Embedding::from_slice(&[9.0, 9.0]), ClassId::STOP).unwrap();
//! recognizer.add_example(Embedding::from_slice(&[9.1, 9.1]), ClassId::STOP).unwrap();
//! recognizer.add_example(Embedding::from_slice(&[0.0, 9.0]), hello).unwrap();
//! recognizer.add_example(Embedding::from_slice(&[0.1, 9.1]), hello).unwrap();
//!
//! // Predict: poll from the driving loop; the throttle paces the ticks.
//! recognizer.start();
//! let mut frame = Some(Embedding::from_slice(&[0.05, 0.05]));
//! let events = recognizer.poll(Instant::now(), &mut || frame.take());
//! assert!(events.is_empty()); // the start gesture opens a segment silently
//! ```
//!
//! # Modules
//!
//! - [`embedding`]: fixed-length feature vectors
//! - [`store`]: per-class example storage and snapshots
//! - [`classifier`]: k-NN voting with confidence
//! - [`gate`]: confidence thresholding
//! - [`sequence`]: the start/stop word-sequencing state machine
//! - [`schedule`]: fixed-rate sampling of the embedding stream
//! - [`recognizer`]: the engine facade tying the pipeline together

pub mod classifier;
pub mod embedding;
pub mod error;
pub mod gate;
pub mod prelude;
pub mod recognizer;
pub mod schedule;
pub mod sequence;
pub mod store;
