use super::*;

fn emb(data: &[f32]) -> Embedding {
    Embedding::from_slice(data)
}

#[test]
fn test_new_store_has_reserved_classes() {
    let store = ClassStore::new();
    assert_eq!(store.class_count(), 2);
    assert_eq!(store.label(ClassId::START), Some("start"));
    assert_eq!(store.label(ClassId::STOP), Some("stop"));
    assert_eq!(store.total_examples(), 0);
    assert_eq!(store.dim(), None);
}

#[test]
fn test_add_class_appends_stable_ids() {
    let mut store = ClassStore::new();
    let hello = store.add_class("hello");
    let world = store.add_class("world");
    assert_eq!(hello, ClassId(2));
    assert_eq!(world, ClassId(3));
    assert_eq!(store.class_count(), 4);
    assert_eq!(store.label(world), Some("world"));
}

#[test]
fn test_add_example_changes_only_that_class() {
    let mut store = ClassStore::new();
    let hello = store.add_class("hello");
    let before = store.example_counts();

    store.add_example(emb(&[1.0, 2.0]), hello).expect("add");

    let after = store.example_counts();
    assert_eq!(after[hello.index()], before[hello.index()] + 1);
    for id in 0..store.class_count() {
        if id != hello.index() {
            assert_eq!(after[id], before[id]);
        }
    }
}

#[test]
fn test_first_example_fixes_dimensionality() {
    let mut store = ClassStore::new();
    store
        .add_example(emb(&[1.0, 2.0, 3.0]), ClassId::START)
        .expect("first add fixes dim");
    assert_eq!(store.dim(), Some(3));

    let err = store
        .add_example(emb(&[1.0, 2.0]), ClassId::STOP)
        .expect_err("mismatched length must fail");
    match err {
        GestoError::DimensionMismatch { expected, actual } => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Failed add leaves the store untouched.
    assert_eq!(store.example_count(ClassId::STOP), 0);
    assert_eq!(store.total_examples(), 1);
}

#[test]
fn test_implicit_class_creation_on_add() {
    let mut store = ClassStore::new();
    store
        .add_example(emb(&[0.0]), ClassId(4))
        .expect("add to unregistered id");
    assert_eq!(store.class_count(), 5);
    assert_eq!(store.example_count(ClassId(4)), 1);
    // Gap slots get placeholder labels.
    assert_eq!(store.label(ClassId(2)), Some("2"));
    assert_eq!(store.label(ClassId(3)), Some("3"));
}

#[test]
fn test_clear_class_is_idempotent() {
    let mut store = ClassStore::new();
    let hello = store.add_class("hello");
    store.add_example(emb(&[1.0]), hello).expect("add");
    store.add_example(emb(&[2.0]), hello).expect("add");
    assert_eq!(store.example_count(hello), 2);

    store.clear_class(hello);
    assert_eq!(store.example_count(hello), 0);
    store.clear_class(hello);
    assert_eq!(store.example_count(hello), 0);

    // Slot and label survive the clear.
    assert_eq!(store.label(hello), Some("hello"));
    assert_eq!(store.class_count(), 3);
}

#[test]
fn test_clear_unknown_class_is_noop() {
    let mut store = ClassStore::new();
    store.clear_class(ClassId(99));
    assert_eq!(store.class_count(), 2);
}

#[test]
fn test_examples_iterates_in_class_then_insertion_order() {
    let mut store = ClassStore::new();
    let hello = store.add_class("hello");
    store.add_example(emb(&[3.0]), hello).expect("add");
    store.add_example(emb(&[1.0]), ClassId::START).expect("add");
    store.add_example(emb(&[2.0]), ClassId::START).expect("add");

    let seen: Vec<(ClassId, f32)> = store.examples().map(|(c, e)| (c, e[0])).collect();
    assert_eq!(
        seen,
        vec![
            (ClassId::START, 1.0),
            (ClassId::START, 2.0),
            (hello, 3.0)
        ]
    );
}

#[test]
fn test_reset_returns_to_fresh_state() {
    let mut store = ClassStore::new();
    let hello = store.add_class("hello");
    store.add_example(emb(&[1.0]), hello).expect("add");

    store.reset();
    assert_eq!(store.class_count(), 2);
    assert_eq!(store.total_examples(), 0);
    assert_eq!(store.dim(), None);
}

#[test]
fn test_snapshot_round_trip() {
    let mut store = ClassStore::new();
    let hello = store.add_class("hello");
    store.add_example(emb(&[1.0, 2.0]), ClassId::START).expect("add");
    store.add_example(emb(&[3.0, 4.0]), hello).expect("add");

    let json = store.to_json().expect("serialize");
    let restored = ClassStore::from_json(&json).expect("deserialize");

    assert_eq!(restored.class_count(), store.class_count());
    assert_eq!(restored.example_counts(), store.example_counts());
    assert_eq!(restored.label(hello), Some("hello"));
    assert_eq!(restored.dim(), Some(2));
}

#[test]
fn test_from_snapshot_rejects_inconsistent_dims() {
    let json = r#"{"classes":[
        {"label":"start","examples":[{"data":[1.0,2.0]}]},
        {"label":"stop","examples":[{"data":[1.0]}]}
    ]}"#;
    let err = ClassStore::from_json(json).expect_err("mixed lengths must fail");
    assert!(matches!(err, GestoError::DimensionMismatch { .. }));
}

#[test]
fn test_from_json_rejects_garbage() {
    let err = ClassStore::from_json("not json").expect_err("must fail");
    assert!(matches!(err, GestoError::Serialization(_)));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_add_example_increments_exactly_one_count(
            values in proptest::collection::vec(-100.0f32..100.0, 1..8),
            class_idx in 0usize..6,
        ) {
            let mut store = ClassStore::new();
            let dim = values.len();
            // Seed so dimensionality is fixed independent of the tested add.
            store.add_example(Embedding::from_vec(vec![0.0; dim]), ClassId::START)
                .expect("seed add");

            let before = store.example_counts();
            store.add_example(Embedding::from_vec(values), ClassId(class_idx))
                .expect("matching dim add");
            let after = store.example_counts();

            prop_assert_eq!(after[class_idx], before.get(class_idx).copied().unwrap_or(0) + 1);
            let untouched = before.iter().enumerate().filter(|&(i, _)| i != class_idx);
            for (i, &count) in untouched {
                prop_assert_eq!(after[i], count);
            }
        }

        #[test]
        fn prop_clear_then_count_is_zero(
            n in 0usize..10,
            class_idx in 0usize..4,
        ) {
            let mut store = ClassStore::new();
            for _ in 0..n {
                store.add_example(Embedding::from_vec(vec![1.0, 2.0]), ClassId(class_idx))
                    .expect("add");
            }
            store.clear_class(ClassId(class_idx));
            prop_assert_eq!(store.example_count(ClassId(class_idx)), 0);
        }
    }
}
