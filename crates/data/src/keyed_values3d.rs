use indexmap::IndexSet;

use crate::error::{DataError, KeyKind};
use crate::values::{DataKey, KeyedValues3D, Values3D};

/// The keyed data cube, stored as `data[series][row][column]`.
///
/// Every series shares the same row and column keys. A new key on any axis
/// back-fills empty cells so the cube stays rectangular.
#[derive(Debug, Clone)]
pub struct DefaultKeyedValues3D<S, R, C, V> {
    series: IndexSet<S>,
    rows: IndexSet<R>,
    columns: IndexSet<C>,
    data: Vec<Vec<Vec<Option<V>>>>,
}

impl<S: DataKey, R: DataKey, C: DataKey, V: Copy + Into<f64>> Default
    for DefaultKeyedValues3D<S, R, C, V>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DataKey, R: DataKey, C: DataKey, V: Copy + Into<f64>> DefaultKeyedValues3D<S, R, C, V> {
    pub fn new() -> Self {
        Self {
            series: IndexSet::new(),
            rows: IndexSet::new(),
            columns: IndexSet::new(),
            data: Vec::new(),
        }
    }

    /// A cube with the given keys and every cell empty.
    pub fn with_keys(
        series: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = R>,
        columns: impl IntoIterator<Item = C>,
    ) -> Self {
        let series: IndexSet<S> = series.into_iter().collect();
        let rows: IndexSet<R> = rows.into_iter().collect();
        let columns: IndexSet<C> = columns.into_iter().collect();
        let data = vec![vec![vec![None; columns.len()]; rows.len()]; series.len()];
        Self {
            series,
            rows,
            columns,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn series_slot(&mut self, key: S) -> usize {
        let (index, added) = self.series.insert_full(key);
        if added {
            self.data
                .push(vec![vec![None; self.columns.len()]; self.rows.len()]);
        }
        index
    }

    fn row_slot(&mut self, key: R) -> usize {
        let (index, added) = self.rows.insert_full(key);
        if added {
            for series in &mut self.data {
                series.push(vec![None; self.columns.len()]);
            }
        }
        index
    }

    fn column_slot(&mut self, key: C) -> usize {
        let (index, added) = self.columns.insert_full(key);
        if added {
            for row in self.data.iter_mut().flatten() {
                row.push(None);
            }
        }
        index
    }

    /// Store a value, adding any new keys. Returns the cell's indices.
    pub fn set_value(&mut self, series: S, row: R, column: C, value: Option<V>) -> (usize, usize, usize) {
        let s = self.series_slot(series);
        let r = self.row_slot(row);
        let c = self.column_slot(column);
        self.data[s][r][c] = value;
        (s, r, c)
    }

    /// Bounds-checked index lookup.
    pub fn try_value(&self, series: usize, row: usize, column: usize) -> Result<Option<V>, DataError> {
        let check = |kind, index, count| {
            if index < count {
                Ok(())
            } else {
                Err(DataError::IndexOutOfRange { kind, index, count })
            }
        };
        check(KeyKind::Series, series, self.series.len())?;
        check(KeyKind::Row, row, self.rows.len())?;
        check(KeyKind::Column, column, self.columns.len())?;
        Ok(self.data[series][row][column])
    }

    /// True when `series` has at least one non-empty cell in `row`.
    pub fn row_has_values(&self, series: usize, row: usize) -> bool {
        self.data[series][row].iter().any(Option::is_some)
    }
}

impl<S: DataKey, R: DataKey, C: DataKey, V: Copy + Into<f64>> Values3D
    for DefaultKeyedValues3D<S, R, C, V>
{
    type Item = V;

    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn value(&self, series: usize, row: usize, column: usize) -> Option<V> {
        self.data[series][row][column]
    }
}

impl<S: DataKey, R: DataKey, C: DataKey, V: Copy + Into<f64>> KeyedValues3D
    for DefaultKeyedValues3D<S, R, C, V>
{
    type SeriesKey = S;
    type RowKey = R;
    type ColumnKey = C;

    fn series_key(&self, index: usize) -> Option<S> {
        self.series.get_index(index).cloned()
    }

    fn row_key(&self, index: usize) -> Option<R> {
        self.rows.get_index(index).cloned()
    }

    fn column_key(&self, index: usize) -> Option<C> {
        self.columns.get_index(index).cloned()
    }

    fn series_index(&self, key: &S) -> Option<usize> {
        self.series.get_index_of(key)
    }

    fn row_index(&self, key: &R) -> Option<usize> {
        self.rows.get_index_of(key)
    }

    fn column_index(&self, key: &C) -> Option<usize> {
        self.columns.get_index_of(key)
    }

    fn series_keys(&self) -> Vec<S> {
        self.series.iter().cloned().collect()
    }

    fn row_keys(&self) -> Vec<R> {
        self.rows.iter().cloned().collect()
    }

    fn column_keys(&self) -> Vec<C> {
        self.columns.iter().cloned().collect()
    }

    fn value_by_key(&self, series: &S, row: &R, column: &C) -> Result<Option<V>, DataError> {
        let s = self
            .series_index(series)
            .ok_or_else(|| DataError::unknown(KeyKind::Series, series))?;
        let r = self
            .row_index(row)
            .ok_or_else(|| DataError::unknown(KeyKind::Row, row))?;
        let c = self
            .column_index(column)
            .ok_or_else(|| DataError::unknown(KeyKind::Column, column))?;
        Ok(self.data[s][r][c])
    }
}
