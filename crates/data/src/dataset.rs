//! Mutable datasets that announce every change to their subscribers.
//!
//! Mutation and notification are single-threaded: subscribers run on the
//! mutating call before it returns.

use tracing::debug;

use crate::error::DataError;
use crate::keyed_values::DefaultKeyedValues;
use crate::keyed_values3d::DefaultKeyedValues3D;
use crate::listener::{ChangeNotifier, SubscriptionId};
use crate::values::{DataKey, KeyedValues, KeyedValues3D, Values, Values3D};

/// What changed in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetChange {
    /// A cube cell was set.
    Value {
        series: usize,
        row: usize,
        column: usize,
    },
    /// A 1D item was added or replaced.
    Item { index: usize },
    /// A 1D item or a series was removed from `index`.
    Removed { index: usize },
    /// A series was added at `index`.
    Series { index: usize },
    /// Everything was removed.
    Cleared,
}

// ─── Category dataset ────────────────────────────────────────────────────────

/// The data cube used by bar, area and line charts.
#[derive(Debug)]
pub struct StandardCategoryDataset3D<S, R, C> {
    data: DefaultKeyedValues3D<S, R, C, f64>,
    notifier: ChangeNotifier<DatasetChange>,
}

impl<S: DataKey, R: DataKey, C: DataKey> Default for StandardCategoryDataset3D<S, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DataKey, R: DataKey, C: DataKey> StandardCategoryDataset3D<S, R, C> {
    pub fn new() -> Self {
        Self {
            data: DefaultKeyedValues3D::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Wrap an existing cube, e.g. one read from JSON.
    pub fn from_values(data: DefaultKeyedValues3D<S, R, C, f64>) -> Self {
        Self {
            data,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Store a value (or clear a cell with `None`) and notify subscribers.
    pub fn set_value(&mut self, series: S, row: R, column: C, value: Option<f64>) {
        let (series, row, column) = self.data.set_value(series, row, column, value);
        debug!(series, row, column, "category dataset value set");
        self.notifier.notify(&DatasetChange::Value {
            series,
            row,
            column,
        });
    }

    pub fn add_value(&mut self, value: f64, series: S, row: R, column: C) {
        self.set_value(series, row, column, Some(value));
    }

    pub fn values(&self) -> &DefaultKeyedValues3D<S, R, C, f64> {
        &self.data
    }

    pub fn subscribe(&mut self, callback: impl Fn(&DatasetChange) + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl<S: DataKey, R: DataKey, C: DataKey> Values3D for StandardCategoryDataset3D<S, R, C> {
    type Item = f64;

    fn series_count(&self) -> usize {
        self.data.series_count()
    }

    fn row_count(&self) -> usize {
        self.data.row_count()
    }

    fn column_count(&self) -> usize {
        self.data.column_count()
    }

    fn value(&self, series: usize, row: usize, column: usize) -> Option<f64> {
        self.data.value(series, row, column)
    }
}

impl<S: DataKey, R: DataKey, C: DataKey> KeyedValues3D for StandardCategoryDataset3D<S, R, C> {
    type SeriesKey = S;
    type RowKey = R;
    type ColumnKey = C;

    fn series_key(&self, index: usize) -> Option<S> {
        self.data.series_key(index)
    }

    fn row_key(&self, index: usize) -> Option<R> {
        self.data.row_key(index)
    }

    fn column_key(&self, index: usize) -> Option<C> {
        self.data.column_key(index)
    }

    fn series_index(&self, key: &S) -> Option<usize> {
        self.data.series_index(key)
    }

    fn row_index(&self, key: &R) -> Option<usize> {
        self.data.row_index(key)
    }

    fn column_index(&self, key: &C) -> Option<usize> {
        self.data.column_index(key)
    }

    fn series_keys(&self) -> Vec<S> {
        self.data.series_keys()
    }

    fn row_keys(&self) -> Vec<R> {
        self.data.row_keys()
    }

    fn column_keys(&self) -> Vec<C> {
        self.data.column_keys()
    }

    fn value_by_key(&self, series: &S, row: &R, column: &C) -> Result<Option<f64>, DataError> {
        self.data.value_by_key(series, row, column)
    }
}

// ─── Pie dataset ─────────────────────────────────────────────────────────────

/// Keyed values for pie charts, one segment per key.
#[derive(Debug)]
pub struct StandardPieDataset3D<K> {
    data: DefaultKeyedValues<K, f64>,
    notifier: ChangeNotifier<DatasetChange>,
}

impl<K: DataKey> Default for StandardPieDataset3D<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DataKey> StandardPieDataset3D<K> {
    pub fn new() -> Self {
        Self {
            data: DefaultKeyedValues::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn from_values(data: DefaultKeyedValues<K, f64>) -> Self {
        Self {
            data,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Add or replace the value for `key`.
    pub fn add(&mut self, key: K, value: Option<f64>) {
        let index = self.data.put(key, value);
        self.notifier.notify(&DatasetChange::Item { index });
    }

    pub fn remove(&mut self, key: &K) -> Result<(), DataError> {
        let index = self.data.remove(key)?;
        self.notifier.notify(&DatasetChange::Removed { index });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.notifier.notify(&DatasetChange::Cleared);
    }

    pub fn values(&self) -> &DefaultKeyedValues<K, f64> {
        &self.data
    }

    pub fn subscribe(&mut self, callback: impl Fn(&DatasetChange) + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl<K: DataKey> Values for StandardPieDataset3D<K> {
    type Item = f64;

    fn item_count(&self) -> usize {
        self.data.item_count()
    }

    fn value(&self, index: usize) -> Option<f64> {
        self.data.value(index)
    }
}

impl<K: DataKey> KeyedValues for StandardPieDataset3D<K> {
    type Key = K;

    fn key(&self, index: usize) -> Option<K> {
        self.data.key(index)
    }

    fn index(&self, key: &K) -> Option<usize> {
        self.data.index(key)
    }

    fn keys(&self) -> Vec<K> {
        self.data.keys()
    }

    fn value_by_key(&self, key: &K) -> Result<Option<f64>, DataError> {
        self.data.value_by_key(key)
    }
}
