//! Item labels attached to chart geometry.

use std::fmt::{self, Display};

use chart3d_data::KeyedValues3D;
use chart3d_graphics::ItemKey;

/// Display strings for the keys of a dataset, indexed like the cube.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyLabels {
    pub series: Vec<String>,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
}

impl KeyLabels {
    pub fn from_keyed<D>(data: &D) -> Self
    where
        D: KeyedValues3D + ?Sized,
        D::SeriesKey: Display,
        D::RowKey: Display,
        D::ColumnKey: Display,
    {
        Self {
            series: data.series_keys().iter().map(ToString::to_string).collect(),
            rows: data.row_keys().iter().map(ToString::to_string).collect(),
            columns: data.column_keys().iter().map(ToString::to_string).collect(),
        }
    }

    fn get(list: &[String], index: usize) -> &str {
        list.get(index).map_or("", String::as_str)
    }
}

/// Produces the label text for one data item, or `None` for no label.
pub trait ItemLabelGenerator: fmt::Debug {
    fn generate(&self, keys: &KeyLabels, item: ItemKey, value: f64) -> Option<String>;
}

/// Fills a template with `{series}`, `{row}`, `{column}` and `{value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardItemLabelGenerator {
    template: String,
    precision: usize,
}

impl Default for StandardItemLabelGenerator {
    fn default() -> Self {
        Self::new(Self::VALUE_TEMPLATE)
    }
}

impl StandardItemLabelGenerator {
    pub const VALUE_TEMPLATE: &'static str = "{value}";
    pub const KEYS_AND_VALUE_TEMPLATE: &'static str = "{series}, {column} = {value}";

    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            precision: 1,
        }
    }

    /// Digits after the decimal point for `{value}`.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl ItemLabelGenerator for StandardItemLabelGenerator {
    fn generate(&self, keys: &KeyLabels, item: ItemKey, value: f64) -> Option<String> {
        if value.is_nan() {
            return None;
        }
        let text = self
            .template
            .replace("{series}", KeyLabels::get(&keys.series, item.series))
            .replace("{row}", KeyLabels::get(&keys.rows, item.row))
            .replace("{column}", KeyLabels::get(&keys.columns, item.column))
            .replace("{value}", &format!("{value:.prec$}", prec = self.precision));
        Some(text)
    }
}
