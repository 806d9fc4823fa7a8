//! Read-only views of one-, two- and three-dimensional value tables.
//!
//! Index accessors panic when an index is out of range, the way slice
//! indexing does. Keyed accessors never panic: an unknown key is a
//! [`DataError::UnknownKey`], and an empty cell is `Ok(None)`.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::DataError;

/// Anything usable as a series, row, column or item key.
pub trait DataKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> DataKey for T {}

// ─── Unkeyed views ───────────────────────────────────────────────────────────

/// A list of optional values.
pub trait Values {
    type Item: Copy + Into<f64>;

    fn item_count(&self) -> usize;

    fn value(&self, index: usize) -> Option<Self::Item>;

    /// The value as `f64`, NaN for an empty slot.
    fn double_value(&self, index: usize) -> f64 {
        self.value(index).map_or(f64::NAN, Into::into)
    }
}

/// A table of optional values.
pub trait Values2D {
    type Item: Copy + Into<f64>;

    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    fn value(&self, row: usize, column: usize) -> Option<Self::Item>;

    fn double_value(&self, row: usize, column: usize) -> f64 {
        self.value(row, column).map_or(f64::NAN, Into::into)
    }
}

/// The data cube: `(series, row, column)` to an optional value.
pub trait Values3D {
    type Item: Copy + Into<f64>;

    fn series_count(&self) -> usize;

    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    fn value(&self, series: usize, row: usize, column: usize) -> Option<Self::Item>;

    fn double_value(&self, series: usize, row: usize, column: usize) -> f64 {
        self.value(series, row, column).map_or(f64::NAN, Into::into)
    }
}

// ─── Keyed views ─────────────────────────────────────────────────────────────

pub trait KeyedValues: Values {
    type Key: DataKey;

    fn key(&self, index: usize) -> Option<Self::Key>;

    fn index(&self, key: &Self::Key) -> Option<usize>;

    fn keys(&self) -> Vec<Self::Key>;

    fn value_by_key(&self, key: &Self::Key) -> Result<Option<Self::Item>, DataError>;
}

pub trait KeyedValues2D: Values2D {
    type RowKey: DataKey;
    type ColumnKey: DataKey;

    fn row_key(&self, index: usize) -> Option<Self::RowKey>;

    fn column_key(&self, index: usize) -> Option<Self::ColumnKey>;

    fn row_index(&self, key: &Self::RowKey) -> Option<usize>;

    fn column_index(&self, key: &Self::ColumnKey) -> Option<usize>;

    fn row_keys(&self) -> Vec<Self::RowKey>;

    fn column_keys(&self) -> Vec<Self::ColumnKey>;

    fn value_by_key(
        &self,
        row: &Self::RowKey,
        column: &Self::ColumnKey,
    ) -> Result<Option<Self::Item>, DataError>;
}

pub trait KeyedValues3D: Values3D {
    type SeriesKey: DataKey;
    type RowKey: DataKey;
    type ColumnKey: DataKey;

    fn series_key(&self, index: usize) -> Option<Self::SeriesKey>;

    fn row_key(&self, index: usize) -> Option<Self::RowKey>;

    fn column_key(&self, index: usize) -> Option<Self::ColumnKey>;

    fn series_index(&self, key: &Self::SeriesKey) -> Option<usize>;

    fn row_index(&self, key: &Self::RowKey) -> Option<usize>;

    fn column_index(&self, key: &Self::ColumnKey) -> Option<usize>;

    fn series_keys(&self) -> Vec<Self::SeriesKey>;

    fn row_keys(&self) -> Vec<Self::RowKey>;

    fn column_keys(&self) -> Vec<Self::ColumnKey>;

    fn value_by_key(
        &self,
        series: &Self::SeriesKey,
        row: &Self::RowKey,
        column: &Self::ColumnKey,
    ) -> Result<Option<Self::Item>, DataError>;

    /// Keyed lookup as `f64`, NaN for an empty cell.
    fn double_value_by_key(
        &self,
        series: &Self::SeriesKey,
        row: &Self::RowKey,
        column: &Self::ColumnKey,
    ) -> Result<f64, DataError> {
        Ok(self
            .value_by_key(series, row, column)?
            .map_or(f64::NAN, Into::into))
    }
}
