use std::fmt;
use thiserror::Error;

/// Which axis of a keyed structure a key or index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Item,
    Series,
    Row,
    Column,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::Item => "item",
            KeyKind::Series => "series",
            KeyKind::Row => "row",
            KeyKind::Column => "column",
        };
        f.write_str(name)
    }
}

/// Failures from data lookup, mutation and interchange parsing.
///
/// Missing cell values are not errors; they surface as `None` or NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("unknown {kind} key: {key}")]
    UnknownKey { kind: KeyKind, key: String },

    #[error("{kind} index {index} out of range (count {count})")]
    IndexOutOfRange {
        kind: KeyKind,
        index: usize,
        count: usize,
    },

    #[error("duplicate {kind} key: {key}")]
    DuplicateKey { kind: KeyKind, key: String },

    #[error("invalid range: min {min} > max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("invalid data format: {reason}")]
    InvalidFormat { reason: String },

    #[error("row '{row}' has {found} values, expected {expected}")]
    ValueCountMismatch {
        row: String,
        expected: usize,
        found: usize,
    },
}

impl DataError {
    pub(crate) fn unknown<K: fmt::Debug>(kind: KeyKind, key: &K) -> Self {
        DataError::UnknownKey {
            kind,
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn format(reason: impl Into<String>) -> Self {
        DataError::InvalidFormat {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Json(e.to_string())
    }
}
