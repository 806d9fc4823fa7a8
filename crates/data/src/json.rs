//! JSON interchange for keyed values, tables, cubes and XYZ series.
//!
//! Formats:
//!
//! - 1D: `[["A", 1.0], ["B", null]]`
//! - 2D: `{"columnKeys": ["C1", "C2"], "rows": [["R1", [1.0, 2.0]]]}`
//! - 3D: `{"rowKeys": [..], "columnKeys": [..], "data": [{"seriesKey": "S1",
//!   "rows": {"R1": [1.0, null]}}]}`
//! - XYZ: `[["S1", [[1.0, 2.0, 3.0], ...]], ...]`
//!
//! Empty cells are written as `null`. Readers always produce `String`
//! keys; writers accept any key type that implements `Display`. Parsing is
//! all-or-nothing.

use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, instrument};

use crate::error::{DataError, KeyKind};
use crate::keyed_values::DefaultKeyedValues;
use crate::keyed_values2d::DefaultKeyedValues2D;
use crate::keyed_values3d::DefaultKeyedValues3D;
use crate::values::{KeyedValues, KeyedValues2D, KeyedValues3D, Values, Values2D, Values3D};
use crate::xyz::{XYZDataset, XYZItem, XYZSeries, XYZSeriesCollection};

// ─── Parsing helpers ─────────────────────────────────────────────────────────

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, DataError> {
    value
        .as_array()
        .ok_or_else(|| DataError::format(format!("{what} must be a list")))
}

fn as_key(value: &Value, what: &str) -> Result<String, DataError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DataError::format(format!("{what} must be a string")))
}

fn as_keys(value: Option<&Value>, what: &str) -> Result<Vec<String>, DataError> {
    let value = value.ok_or_else(|| DataError::format(format!("missing {what}")))?;
    as_array(value, what)?
        .iter()
        .map(|k| as_key(k, what))
        .collect()
}

/// Key lists name each key once; a repeat would merge two entries.
fn unique_keys<'a>(keys: impl IntoIterator<Item = &'a String>, kind: KeyKind) -> Result<(), DataError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(DataError::DuplicateKey {
                kind,
                key: key.clone(),
            });
        }
    }
    Ok(())
}

fn as_number(value: &Value) -> Result<Option<f64>, DataError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        other => Err(DataError::format(format!("expected a number or null, found {other}"))),
    }
}

fn as_row_values(value: &Value, row: &str, expected: usize) -> Result<Vec<Option<f64>>, DataError> {
    let values = as_array(value, "row values")?;
    if values.len() != expected {
        return Err(DataError::ValueCountMismatch {
            row: row.to_string(),
            expected,
            found: values.len(),
        });
    }
    values.iter().map(as_number).collect()
}

fn number_value(v: Option<f64>) -> Value {
    v.map_or(Value::Null, Value::from)
}

// ─── 1D ──────────────────────────────────────────────────────────────────────

#[instrument(skip(json))]
pub fn read_keyed_values(json: &str) -> Result<DefaultKeyedValues<String, f64>, DataError> {
    let root: Value = serde_json::from_str(json)?;
    let mut items = Vec::new();
    for item in as_array(&root, "keyed values")? {
        let [key, value] = as_array(item, "keyed value item")?.as_slice() else {
            return Err(DataError::format("keyed value item must be a [key, value] pair"));
        };
        items.push((as_key(key, "item key")?, as_number(value)?));
    }
    unique_keys(items.iter().map(|(k, _)| k), KeyKind::Item)?;
    let mut result = DefaultKeyedValues::new();
    for (key, value) in items {
        result.put(key, value);
    }
    debug!(items = result.item_count(), "keyed values read");
    Ok(result)
}

pub fn write_keyed_values<D>(data: &D) -> Result<String, DataError>
where
    D: KeyedValues + ?Sized,
    D::Key: Display,
{
    let items: Vec<Value> = (0..data.item_count())
        .filter_map(|i| data.key(i).map(|k| (i, k)))
        .map(|(i, k)| json!([k.to_string(), number_value(data.value(i).map(Into::into))]))
        .collect();
    Ok(serde_json::to_string(&items)?)
}

// ─── 2D ──────────────────────────────────────────────────────────────────────

#[instrument(skip(json))]
pub fn read_keyed_values_2d(json: &str) -> Result<DefaultKeyedValues2D<String, String, f64>, DataError> {
    let root: Value = serde_json::from_str(json)?;
    let obj = root
        .as_object()
        .ok_or_else(|| DataError::format("table must be an object"))?;
    let columns = as_keys(obj.get("columnKeys"), "columnKeys")?;
    unique_keys(&columns, KeyKind::Column)?;
    let rows = obj
        .get("rows")
        .ok_or_else(|| DataError::format("missing rows"))?;

    let mut parsed = Vec::new();
    for row in as_array(rows, "rows")? {
        let [key, values] = as_array(row, "row")?.as_slice() else {
            return Err(DataError::format("row must be a [key, values] pair"));
        };
        let key = as_key(key, "row key")?;
        let values = as_row_values(values, &key, columns.len())?;
        parsed.push((key, values));
    }
    unique_keys(parsed.iter().map(|(k, _)| k), KeyKind::Row)?;

    let mut result = DefaultKeyedValues2D::with_keys(parsed.iter().map(|(k, _)| k.clone()), columns.clone());
    for (key, values) in parsed {
        for (column, value) in columns.iter().zip(values) {
            result.set_value(key.clone(), column.clone(), value);
        }
    }
    debug!(rows = result.row_count(), columns = result.column_count(), "table read");
    Ok(result)
}

pub fn write_keyed_values_2d<D>(data: &D) -> Result<String, DataError>
where
    D: KeyedValues2D + ?Sized,
    D::RowKey: Display,
    D::ColumnKey: Display,
{
    let columns: Vec<String> = data.column_keys().iter().map(ToString::to_string).collect();
    let rows: Vec<Value> = data
        .row_keys()
        .iter()
        .enumerate()
        .map(|(r, key)| {
            let values: Vec<Value> = (0..data.column_count())
                .map(|c| number_value(data.value(r, c).map(Into::into)))
                .collect();
            json!([key.to_string(), values])
        })
        .collect();
    Ok(serde_json::to_string(&json!({ "columnKeys": columns, "rows": rows }))?)
}

// ─── 3D ──────────────────────────────────────────────────────────────────────

type StringCube = DefaultKeyedValues3D<String, String, String, f64>;

#[instrument(skip(json))]
pub fn read_keyed_values_3d(json: &str) -> Result<StringCube, DataError> {
    let root: Value = serde_json::from_str(json)?;
    let obj = root
        .as_object()
        .ok_or_else(|| DataError::format("cube must be an object"))?;
    let row_keys = as_keys(obj.get("rowKeys"), "rowKeys")?;
    let column_keys = as_keys(obj.get("columnKeys"), "columnKeys")?;
    unique_keys(&row_keys, KeyKind::Row)?;
    unique_keys(&column_keys, KeyKind::Column)?;
    let data = obj
        .get("data")
        .ok_or_else(|| DataError::format("missing data"))?;

    let mut cells = Vec::new();
    let mut series_keys = Vec::new();
    for series in as_array(data, "data")? {
        let series = series
            .as_object()
            .ok_or_else(|| DataError::format("series entry must be an object"))?;
        let key = as_key(
            series
                .get("seriesKey")
                .ok_or_else(|| DataError::format("missing seriesKey"))?,
            "seriesKey",
        )?;
        if let Some(rows) = series.get("rows") {
            let rows = rows
                .as_object()
                .ok_or_else(|| DataError::format("series rows must be an object"))?;
            for (row, values) in rows {
                if !row_keys.contains(row) {
                    return Err(DataError::format(format!("row key '{row}' is not listed in rowKeys")));
                }
                let values = as_row_values(values, row, column_keys.len())?;
                cells.push((key.clone(), row.clone(), values));
            }
        }
        series_keys.push(key);
    }
    unique_keys(&series_keys, KeyKind::Series)?;

    let mut cube = StringCube::with_keys(series_keys, row_keys, column_keys.clone());
    for (series, row, values) in cells {
        for (column, value) in column_keys.iter().zip(values) {
            cube.set_value(series.clone(), row.clone(), column.clone(), value);
        }
    }
    debug!(
        series = cube.series_count(),
        rows = cube.row_count(),
        columns = cube.column_count(),
        "cube read"
    );
    Ok(cube)
}

/// Write a cube. A series' row is written only when it has at least one
/// non-empty cell.
pub fn write_keyed_values_3d<D>(data: &D) -> Result<String, DataError>
where
    D: KeyedValues3D + ?Sized,
    D::SeriesKey: Display,
    D::RowKey: Display,
    D::ColumnKey: Display,
{
    let row_keys: Vec<String> = data.row_keys().iter().map(ToString::to_string).collect();
    let column_keys: Vec<String> = data.column_keys().iter().map(ToString::to_string).collect();
    let mut series_entries = Vec::with_capacity(data.series_count());
    for (s, series_key) in data.series_keys().iter().enumerate() {
        let mut rows = Map::new();
        for (r, row_key) in row_keys.iter().enumerate() {
            let values: Vec<Option<f64>> = (0..data.column_count())
                .map(|c| data.value(s, r, c).map(Into::into))
                .collect();
            if values.iter().any(Option::is_some) {
                rows.insert(
                    row_key.clone(),
                    Value::Array(values.into_iter().map(number_value).collect()),
                );
            }
        }
        series_entries.push(json!({ "seriesKey": series_key.to_string(), "rows": rows }));
    }
    let root = json!({
        "rowKeys": row_keys,
        "columnKeys": column_keys,
        "data": series_entries,
    });
    Ok(serde_json::to_string(&root)?)
}

// ─── XYZ ─────────────────────────────────────────────────────────────────────

#[instrument(skip(json))]
pub fn read_xyz_series(json: &str) -> Result<XYZSeriesCollection<String>, DataError> {
    let root: Value = serde_json::from_str(json)?;
    let mut collection = XYZSeriesCollection::new();
    for entry in as_array(&root, "series list")? {
        let [key, items] = as_array(entry, "series")?.as_slice() else {
            return Err(DataError::format("series must be a [key, items] pair"));
        };
        let mut series = XYZSeries::new(as_key(key, "series key")?);
        for item in as_array(items, "series items")? {
            let [x, y, z] = as_array(item, "xyz item")?.as_slice() else {
                return Err(DataError::format("xyz item must have three values"));
            };
            let coord = |v: &Value| as_number(v).map(|n| n.unwrap_or(f64::NAN));
            series.add_item(XYZItem::new(coord(x)?, coord(y)?, coord(z)?));
        }
        collection.add(series)?;
    }
    debug!(series = collection.series_count(), "xyz series read");
    Ok(collection)
}

pub fn write_xyz_series<K>(data: &XYZSeriesCollection<K>) -> Result<String, DataError>
where
    K: crate::values::DataKey + Display,
{
    let finite = |v: f64| number_value((!v.is_nan()).then_some(v));
    let entries: Vec<Value> = (0..data.series_count())
        .filter_map(|s| data.series(s))
        .map(|series| {
            let items: Vec<Value> = series
                .items()
                .iter()
                .map(|i| json!([finite(i.x), finite(i.y), finite(i.z)]))
                .collect();
            json!([series.key().to_string(), items])
        })
        .collect();
    Ok(serde_json::to_string(&entries)?)
}
