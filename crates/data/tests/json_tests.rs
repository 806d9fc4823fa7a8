//! Interchange round trips through the public API.

use chart3d_data::json::{
    read_keyed_values, read_keyed_values_2d, read_keyed_values_3d, read_xyz_series, write_keyed_values,
    write_keyed_values_2d, write_keyed_values_3d, write_xyz_series,
};
use chart3d_data::utils::total;
use chart3d_data::{
    DataError, KeyKind, KeyedValues, KeyedValues2D, KeyedValues3D, StandardCategoryDataset3D, StandardPieDataset3D,
    Values, Values2D, Values3D, XYZDataset,
};

const CUBE: &str = r#"{
    "rowKeys": ["Q1", "Q2", "Q3"],
    "columnKeys": ["London", "Paris"],
    "data": [
        {"seriesKey": "Apples", "rows": {"Q1": [1.0, 2.0], "Q3": [null, 5.5]}},
        {"seriesKey": "Pears", "rows": {"Q2": [3.0, null]}}
    ]
}"#;

#[test]
fn cube_document_reads_into_dataset() {
    let dataset = StandardCategoryDataset3D::from_values(read_keyed_values_3d(CUBE).unwrap());
    assert_eq!(dataset.series_keys(), vec!["Apples", "Pears"]);
    assert_eq!(dataset.row_keys(), vec!["Q1", "Q2", "Q3"]);
    assert_eq!(dataset.column_count(), 2);
    assert_eq!(dataset.value(0, 2, 1), Some(5.5));
    assert_eq!(dataset.value(1, 0, 0), None);
    assert_eq!(
        dataset.value_by_key(&"Pears".to_string(), &"Q2".to_string(), &"London".to_string()),
        Ok(Some(3.0))
    );
}

#[test]
fn cube_round_trip_is_stable() {
    let cube = read_keyed_values_3d(CUBE).unwrap();
    let first = write_keyed_values_3d(&cube).unwrap();
    let second = write_keyed_values_3d(&read_keyed_values_3d(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pie_values_round_trip() {
    let values = read_keyed_values(r#"[["Milk", 3.5], ["Tea", 1.25], ["Juice", null]]"#).unwrap();
    let json = write_keyed_values(&values).unwrap();
    let back = read_keyed_values(&json).unwrap();
    assert_eq!(back.keys(), values.keys());
    let pie = StandardPieDataset3D::from_values(back);
    assert_eq!(pie.item_count(), 3);
    assert_eq!(total(&pie), 4.75);
}

#[test]
fn table_round_trip() {
    let json = r#"{"columnKeys": ["C1", "C2", "C3"], "rows": [["R1", [1, null, 3]], ["R2", [4, 5, 6]]]}"#;
    let table = read_keyed_values_2d(json).unwrap();
    let back = read_keyed_values_2d(&write_keyed_values_2d(&table).unwrap()).unwrap();
    assert_eq!(back.column_keys(), vec!["C1", "C2", "C3"]);
    assert_eq!(back.row_count(), 2);
    assert_eq!(back.value(0, 1), None);
    assert_eq!(back.value(1, 2), Some(6.0));
}

#[test]
fn xyz_round_trip() {
    let json = r#"[["Alpha", [[1.0, 2.0, 3.0], [-1.5, 0.0, 9.0]]], ["Beta", [[0.5, 0.5, 0.5]]]]"#;
    let c = read_xyz_series(json).unwrap();
    let back = read_xyz_series(&write_xyz_series(&c).unwrap()).unwrap();
    assert_eq!(back.series_keys(), vec!["Alpha", "Beta"]);
    assert_eq!(back.item_count(0), 2);
    assert_eq!(back.x(0, 1), -1.5);
    assert_eq!(back.z(1, 0), 0.5);
}

#[test]
fn malformed_documents_are_rejected_whole() {
    assert!(matches!(read_keyed_values_3d("[]"), Err(DataError::InvalidFormat { .. })));
    assert!(matches!(
        read_keyed_values_3d(r#"{"rowKeys": ["R"], "columnKeys": ["C"], "data": {}}"#),
        Err(DataError::InvalidFormat { .. })
    ));
    assert!(matches!(
        read_keyed_values_3d(r#"{"rowKeys": ["R"], "columnKeys": ["C", "D"], "data": [{"seriesKey": "S", "rows": {"R": [1]}}]}"#),
        Err(DataError::ValueCountMismatch { expected: 2, found: 1, .. })
    ));
    assert!(matches!(read_keyed_values("not json"), Err(DataError::Json(_))));
}

#[test]
fn repeated_keys_are_rejected() {
    let cube = |rows: &str, series: &str| {
        read_keyed_values_3d(&format!(
            r#"{{"rowKeys": {rows}, "columnKeys": ["C"], "data": [{series}]}}"#
        ))
    };
    assert!(matches!(
        cube(r#"["R1", "R1"]"#, r#"{"seriesKey": "S", "rows": {"R1": [1]}}"#),
        Err(DataError::DuplicateKey { kind: KeyKind::Row, .. })
    ));
    assert!(matches!(
        cube(
            r#"["R1"]"#,
            r#"{"seriesKey": "S", "rows": {"R1": [1]}}, {"seriesKey": "S", "rows": {"R1": [2]}}"#
        ),
        Err(DataError::DuplicateKey { kind: KeyKind::Series, .. })
    ));
    assert!(matches!(
        read_keyed_values_3d(r#"{"rowKeys": ["R"], "columnKeys": ["C", "C"], "data": []}"#),
        Err(DataError::DuplicateKey { kind: KeyKind::Column, .. })
    ));

    assert!(matches!(
        read_keyed_values_2d(r#"{"columnKeys": ["C1", "C1"], "rows": [["R1", [1, 2]]]}"#),
        Err(DataError::DuplicateKey { kind: KeyKind::Column, .. })
    ));
    assert!(matches!(
        read_keyed_values_2d(r#"{"columnKeys": ["C1"], "rows": [["R1", [1]], ["R1", [2]]]}"#),
        Err(DataError::DuplicateKey { kind: KeyKind::Row, .. })
    ));
    assert!(matches!(
        read_keyed_values(r#"[["Milk", 1.0], ["Milk", 2.0]]"#),
        Err(DataError::DuplicateKey { kind: KeyKind::Item, .. })
    ));
}
