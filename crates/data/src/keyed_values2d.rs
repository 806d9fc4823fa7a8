use indexmap::IndexSet;

use crate::error::{DataError, KeyKind};
use crate::values::{DataKey, KeyedValues2D, Values2D};

/// A rectangular table addressed by row and column keys.
///
/// Adding a new row or column key back-fills the missing cells with `None`,
/// so every row always has one cell per column.
#[derive(Debug, Clone)]
pub struct DefaultKeyedValues2D<R, C, V> {
    rows: IndexSet<R>,
    columns: IndexSet<C>,
    data: Vec<Vec<Option<V>>>,
}

impl<R: DataKey, C: DataKey, V: Copy + Into<f64>> Default for DefaultKeyedValues2D<R, C, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DataKey, C: DataKey, V: Copy + Into<f64>> DefaultKeyedValues2D<R, C, V> {
    pub fn new() -> Self {
        Self {
            rows: IndexSet::new(),
            columns: IndexSet::new(),
            data: Vec::new(),
        }
    }

    /// A table with the given keys and every cell empty. Duplicate keys
    /// collapse onto their first occurrence.
    pub fn with_keys(rows: impl IntoIterator<Item = R>, columns: impl IntoIterator<Item = C>) -> Self {
        let rows: IndexSet<R> = rows.into_iter().collect();
        let columns: IndexSet<C> = columns.into_iter().collect();
        let data = vec![vec![None; columns.len()]; rows.len()];
        Self { rows, columns, data }
    }

    fn row_slot(&mut self, key: R) -> usize {
        let (index, added) = self.rows.insert_full(key);
        if added {
            self.data.push(vec![None; self.columns.len()]);
        }
        index
    }

    fn column_slot(&mut self, key: C) -> usize {
        let (index, added) = self.columns.insert_full(key);
        if added {
            for row in &mut self.data {
                row.push(None);
            }
        }
        index
    }

    /// Store a value, adding the row and column keys if they are new.
    pub fn set_value(&mut self, row: R, column: C, value: Option<V>) {
        let r = self.row_slot(row);
        let c = self.column_slot(column);
        self.data[r][c] = value;
    }
}

impl<R: DataKey, C: DataKey, V: Copy + Into<f64>> Values2D for DefaultKeyedValues2D<R, C, V> {
    type Item = V;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn value(&self, row: usize, column: usize) -> Option<V> {
        self.data[row][column]
    }
}

impl<R: DataKey, C: DataKey, V: Copy + Into<f64>> KeyedValues2D for DefaultKeyedValues2D<R, C, V> {
    type RowKey = R;
    type ColumnKey = C;

    fn row_key(&self, index: usize) -> Option<R> {
        self.rows.get_index(index).cloned()
    }

    fn column_key(&self, index: usize) -> Option<C> {
        self.columns.get_index(index).cloned()
    }

    fn row_index(&self, key: &R) -> Option<usize> {
        self.rows.get_index_of(key)
    }

    fn column_index(&self, key: &C) -> Option<usize> {
        self.columns.get_index_of(key)
    }

    fn row_keys(&self) -> Vec<R> {
        self.rows.iter().cloned().collect()
    }

    fn column_keys(&self) -> Vec<C> {
        self.columns.iter().cloned().collect()
    }

    fn value_by_key(&self, row: &R, column: &C) -> Result<Option<V>, DataError> {
        let r = self
            .row_index(row)
            .ok_or_else(|| DataError::unknown(KeyKind::Row, row))?;
        let c = self
            .column_index(column)
            .ok_or_else(|| DataError::unknown(KeyKind::Column, column))?;
        Ok(self.data[r][c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_back_fills_rows() {
        let mut t = DefaultKeyedValues2D::<&str, &str, f64>::new();
        t.set_value("r1", "c1", Some(1.0));
        t.set_value("r2", "c2", Some(2.0));
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.value(0, 1), None);
        assert_eq!(t.value(1, 0), None);
        assert_eq!(t.value_by_key(&"r2", &"c2"), Ok(Some(2.0)));
    }

    #[test]
    fn test_unknown_keys() {
        let mut t = DefaultKeyedValues2D::<&str, &str, f64>::new();
        t.set_value("r", "c", Some(1.0));
        assert!(matches!(
            t.value_by_key(&"x", &"c"),
            Err(DataError::UnknownKey { kind: KeyKind::Row, .. })
        ));
        assert!(matches!(
            t.value_by_key(&"r", &"x"),
            Err(DataError::UnknownKey { kind: KeyKind::Column, .. })
        ));
    }

    #[test]
    fn test_with_keys_starts_empty() {
        let t = DefaultKeyedValues2D::<&str, &str, f64>::with_keys(["a", "b"], ["x", "y", "z"]);
        assert_eq!((t.row_count(), t.column_count()), (2, 3));
        assert!(t.double_value(1, 2).is_nan());
        assert_eq!(t.column_keys(), vec!["x", "y", "z"]);
    }
}
