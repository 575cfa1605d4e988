use super::*;
use std::time::Duration;

fn emb(data: &[f32]) -> Embedding {
    Embedding::from_slice(data)
}

/// start near the origin, stop near (10, 10), "hello" near (0, 10).
fn trained_recognizer() -> (Recognizer, ClassId) {
    let mut recognizer = Recognizer::new().with_throttle(Throttle::with_period(Duration::from_millis(200)));
    let hello = recognizer.add_class("hello");
    for i in 0..5 {
        let jitter = i as f32 * 0.01;
        recognizer
            .add_example(emb(&[jitter, jitter]), ClassId::START)
            .expect("add start");
        recognizer
            .add_example(emb(&[10.0 + jitter, 10.0 + jitter]), ClassId::STOP)
            .expect("add stop");
        recognizer
            .add_example(emb(&[jitter, 10.0 + jitter]), hello)
            .expect("add hello");
    }
    (recognizer, hello)
}

#[test]
fn test_stopped_recognizer_never_polls() {
    let (mut recognizer, _) = trained_recognizer();
    let mut source = || Some(emb(&[0.0, 0.0]));

    let events = recognizer.poll(Instant::now(), &mut source);
    assert!(events.is_empty());
    assert_eq!(recognizer.ticks(), 0);
}

#[test]
fn test_stop_takes_effect_at_next_tick() {
    let (mut recognizer, _) = trained_recognizer();
    let mut source = || Some(emb(&[0.0, 0.0]));
    let start = Instant::now();

    recognizer.start();
    recognizer.poll(start, &mut source);
    assert_eq!(recognizer.ticks(), 1);

    recognizer.stop();
    recognizer.poll(start + Duration::from_millis(400), &mut source);
    assert_eq!(recognizer.ticks(), 1);

    recognizer.start();
    recognizer.poll(start + Duration::from_millis(800), &mut source);
    assert_eq!(recognizer.ticks(), 2);
}

#[test]
fn test_polls_between_tick_boundaries_are_noops() {
    let (mut recognizer, _) = trained_recognizer();
    let mut source = || Some(emb(&[0.0, 0.0]));
    let start = Instant::now();

    recognizer.start();
    recognizer.poll(start, &mut source);
    recognizer.poll(start + Duration::from_millis(50), &mut source);
    recognizer.poll(start + Duration::from_millis(100), &mut source);
    assert_eq!(recognizer.ticks(), 1);

    recognizer.poll(start + Duration::from_millis(200), &mut source);
    assert_eq!(recognizer.ticks(), 2);
}

#[test]
fn test_tick_without_new_embedding_is_skipped() {
    let (mut recognizer, _) = trained_recognizer();
    let start = Instant::now();

    recognizer.start();
    let mut empty = || None;
    let events = recognizer.poll(start, &mut empty);
    assert!(events.is_empty());
    assert_eq!(recognizer.ticks(), 0);

    // The skipped tick changed no state; the next one works normally.
    let mut source = || Some(emb(&[0.0, 0.0]));
    recognizer.poll(start + Duration::from_millis(200), &mut source);
    assert_eq!(recognizer.ticks(), 1);
}

#[test]
fn test_untrained_recognizer_emits_nothing() {
    let mut recognizer = Recognizer::new();
    recognizer.start();
    let mut source = || Some(emb(&[1.0, 2.0]));

    let events = recognizer.poll(Instant::now(), &mut source);
    assert!(events.is_empty());
}

#[test]
fn test_wrong_length_embedding_degrades_to_skip() {
    let (mut recognizer, _) = trained_recognizer();
    let start = Instant::now();

    recognizer.start();
    let mut bad = || Some(emb(&[1.0, 2.0, 3.0]));
    let events = recognizer.poll(start, &mut bad);
    assert!(events.is_empty());

    // Subsequent good ticks still classify.
    let mut good = || Some(emb(&[0.0, 0.0]));
    recognizer.poll(start + Duration::from_millis(200), &mut good);
    let events = recognizer.poll(start + Duration::from_millis(400), &mut || {
        Some(emb(&[0.0, 10.0]))
    });
    assert_eq!(events.len(), 1);
}

#[test]
fn test_low_confidence_prediction_is_gated_out() {
    let mut recognizer = Recognizer::new()
        .with_throttle(Throttle::with_period(Duration::from_millis(200)))
        .with_classifier(KnnClassifier::new().with_k(2).with_weights(false));
    recognizer
        .add_example(emb(&[0.0]), ClassId::START)
        .expect("add");
    recognizer
        .add_example(emb(&[2.0]), ClassId::STOP)
        .expect("add");

    recognizer.start();
    // Equidistant query: confidence 0.5, far below the 0.98 gate.
    let events = recognizer.poll(Instant::now(), &mut || Some(emb(&[1.0])));
    assert!(events.is_empty());
}

#[test]
fn test_restore_resets_sequence_state() {
    let (mut recognizer, _) = trained_recognizer();
    let start = Instant::now();

    recognizer.start();
    recognizer.poll(start, &mut || Some(emb(&[0.0, 0.0])));

    let snapshot = recognizer.snapshot();
    recognizer.restore(snapshot).expect("restore");

    // The restored recognizer is idle again: a word before a new start
    // gesture is ignored.
    let events = recognizer.poll(start + Duration::from_millis(200), &mut || {
        Some(emb(&[0.0, 10.0]))
    });
    assert!(events.is_empty());
}

#[test]
fn test_snapshot_round_trip_preserves_training() {
    let (recognizer, hello) = trained_recognizer();
    let snapshot = recognizer.snapshot();

    let mut fresh = Recognizer::new();
    fresh.restore(snapshot).expect("restore");
    assert_eq!(fresh.class_count(), 3);
    assert_eq!(fresh.example_counts(), vec![5, 5, 5]);
    assert_eq!(fresh.store().label(hello), Some("hello"));
}
