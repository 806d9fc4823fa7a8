//! Point series for scatter charts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::DatasetChange;
use crate::error::{DataError, KeyKind};
use crate::listener::{ChangeNotifier, SubscriptionId};
use crate::values::DataKey;

/// One `(x, y, z)` data item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XYZItem {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl XYZItem {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Read access to any collection of point series.
pub trait XYZDataset {
    fn series_count(&self) -> usize;

    /// # Panics
    /// If `series` is out of range.
    fn item_count(&self, series: usize) -> usize;

    fn item(&self, series: usize, item: usize) -> XYZItem;

    fn x(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).x
    }

    fn y(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).y
    }

    fn z(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).z
    }
}

// ─── Series ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct XYZSeries<K> {
    key: K,
    items: Vec<XYZItem>,
}

impl<K: DataKey> XYZSeries<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            items: Vec::new(),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn add(&mut self, x: f64, y: f64, z: f64) {
        self.items.push(XYZItem::new(x, y, z));
    }

    pub fn add_item(&mut self, item: XYZItem) {
        self.items.push(item);
    }

    pub fn remove(&mut self, index: usize) -> Result<XYZItem, DataError> {
        if index >= self.items.len() {
            return Err(DataError::IndexOutOfRange {
                kind: KeyKind::Item,
                index,
                count: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[XYZItem] {
        &self.items
    }
}

// ─── Collection ──────────────────────────────────────────────────────────────

/// Series with unique keys, in insertion order.
#[derive(Debug)]
pub struct XYZSeriesCollection<K> {
    series: Vec<XYZSeries<K>>,
    notifier: ChangeNotifier<DatasetChange>,
}

impl<K: DataKey> Default for XYZSeriesCollection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DataKey> XYZSeriesCollection<K> {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Append a series. Keys must be unique within the collection.
    pub fn add(&mut self, series: XYZSeries<K>) -> Result<usize, DataError> {
        if self.series_index(series.key()).is_some() {
            return Err(DataError::DuplicateKey {
                kind: KeyKind::Series,
                key: format!("{:?}", series.key()),
            });
        }
        let index = self.series.len();
        debug!(index, items = series.item_count(), "xyz series added");
        self.series.push(series);
        self.notifier.notify(&DatasetChange::Series { index });
        Ok(index)
    }

    pub fn remove(&mut self, index: usize) -> Result<XYZSeries<K>, DataError> {
        if index >= self.series.len() {
            return Err(DataError::IndexOutOfRange {
                kind: KeyKind::Series,
                index,
                count: self.series.len(),
            });
        }
        let removed = self.series.remove(index);
        self.notifier.notify(&DatasetChange::Removed { index });
        Ok(removed)
    }

    pub fn remove_all(&mut self) {
        self.series.clear();
        self.notifier.notify(&DatasetChange::Cleared);
    }

    pub fn series(&self, index: usize) -> Option<&XYZSeries<K>> {
        self.series.get(index)
    }

    pub fn series_by_key(&self, key: &K) -> Option<&XYZSeries<K>> {
        self.series.iter().find(|s| s.key() == key)
    }

    pub fn series_index(&self, key: &K) -> Option<usize> {
        self.series.iter().position(|s| s.key() == key)
    }

    pub fn series_key(&self, index: usize) -> Option<K> {
        self.series.get(index).map(|s| s.key().clone())
    }

    pub fn series_keys(&self) -> Vec<K> {
        self.series.iter().map(|s| s.key().clone()).collect()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&DatasetChange) + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl<K: DataKey> XYZDataset for XYZSeriesCollection<K> {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn item_count(&self, series: usize) -> usize {
        self.series[series].item_count()
    }

    fn item(&self, series: usize, item: usize) -> XYZItem {
        self.series[series].items[item]
    }
}
