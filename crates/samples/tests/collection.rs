//! Integration tests for construction, column edits and selection.

use declust_samples::{RecordBatch, Samples, SamplesBuilder, SamplesError, Value, record};

fn xyz() -> Samples {
    Samples::new(vec![
        record([("x", 1.0), ("y", 2.0), ("z", 3.0)]),
        record([("x", 4.0), ("y", 5.0), ("z", 6.0)]),
    ])
    .unwrap()
}

#[test]
fn delete_then_extract() {
    let mut s = xyz();
    s.delete_column("x").unwrap();
    assert_eq!(s.field_names(), ["y", "z"]);
    for rec in s.records() {
        assert!(!rec.contains_key("x"));
        assert_eq!(rec.keys().collect::<Vec<_>>(), ["y", "z"]);
    }
    assert!(matches!(
        s.extract_column("x"),
        Err(SamplesError::UnknownField { .. })
    ));
    let y: Vec<_> = s.extract_column("y").unwrap().into_iter().cloned().collect();
    assert_eq!(y, [Value::Float(2.0), Value::Float(5.0)]);
}

#[test]
fn add_column_names_and_order() {
    let mut s = xyz();
    let first = s.add_column(None, vec![Value::Int(1), Value::Int(2)]).unwrap();
    let second = s.add_column(None, vec![Value::Int(3), Value::Int(4)]).unwrap();
    assert_eq!(first, "added_column_1");
    assert_eq!(second, "added_column_2");
    assert_eq!(
        s.field_names(),
        ["x", "y", "z", "added_column_1", "added_column_2"]
    );
    assert_eq!(s.records()[1]["added_column_2"], Value::Int(4));
}

#[test]
fn add_column_errors() {
    let mut s = xyz();
    assert!(matches!(
        s.add_column(Some("w"), vec![Value::Int(1)]),
        Err(SamplesError::LengthMismatch { expected: 2, got: 1, .. })
    ));
    assert!(matches!(
        s.add_column(Some(""), vec![Value::Int(1), Value::Int(2)]),
        Err(SamplesError::MissingArgument { operation: "add" })
    ));
    assert!(matches!(
        s.add_column(Some("y"), vec![Value::Int(1), Value::Int(2)]),
        Err(SamplesError::DuplicateField { .. })
    ));
    // failed edits leave the collection untouched
    assert_eq!(s, xyz());
}

#[test]
fn full_selection_reproduces_collection() {
    let s = xyz();
    let all = s.selection(s.index().iter().copied()).unwrap();
    assert_eq!(all, s);
}

#[test]
fn selection_out_of_bounds() {
    assert!(matches!(
        xyz().selection([0, 2]),
        Err(SamplesError::IndexOutOfBounds { index: 2, count: 2 })
    ));
}

#[test]
fn merge_appends_and_renumbers() {
    let mut s = xyz();
    s.merge(&xyz()).unwrap();
    assert_eq!(s.count(), 4);
    assert_eq!(s.index(), [0, 1, 2, 3]);

    let mut empty = Samples::empty();
    empty.merge(&xyz()).unwrap();
    assert_eq!(empty.field_names(), ["x", "y", "z"]);
}

#[test]
fn merge_rejects_other_fields() {
    let mut s = xyz();
    let other = Samples::new(vec![record([("x", 1.0), ("z", 3.0), ("y", 2.0)])]).unwrap();
    assert!(matches!(
        s.merge(&other),
        Err(SamplesError::FieldListMismatch { .. })
    ));
}

#[test]
fn builder_from_batch_source() {
    let batch = RecordBatch {
        field_names: vec!["b".to_string(), "a".to_string()],
        records: vec![record([("a", 1), ("b", 2)])],
    };
    let s = SamplesBuilder::new().with_source(batch).build().unwrap();
    // header order wins over record key order
    assert_eq!(s.field_names(), ["b", "a"]);
}

#[test]
fn builder_rejects_two_inputs() {
    let result = SamplesBuilder::new()
        .with_records(vec![record([("a", 1)])])
        .with_source(RecordBatch::default())
        .build();
    assert!(matches!(result, Err(SamplesError::AmbiguousInput)));
}

#[test]
fn builder_without_input_is_empty() {
    let s = SamplesBuilder::new().build().unwrap();
    assert!(s.is_empty());
    assert_eq!(s.to_string(), "<Samples: empty>");
}

#[test]
fn save_to_batch_sink() {
    let s = xyz();
    let mut sink = RecordBatch::default();
    s.save(&mut sink).unwrap();
    assert_eq!(sink.field_names, ["x", "y", "z"]);
    assert_eq!(sink.records, s.records());
}
