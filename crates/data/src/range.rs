use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DataError;

/// A closed interval `[min, max]` of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Fails when `min > max` or either bound is NaN.
    pub fn new(min: f64, max: f64) -> Result<Self, DataError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(DataError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the range.
    pub fn peg(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Position of `value` as a fraction of the range, 0 at `min` and 1 at
    /// `max`. Values outside the range map outside `[0, 1]`.
    pub fn percent(&self, value: f64) -> f64 {
        (value - self.min) / self.length()
    }

    /// Inverse of [`Range::percent`].
    pub fn value(&self, percent: f64) -> f64 {
        self.min + percent * self.length()
    }

    /// True when `[lower, upper]` overlaps this range.
    pub fn intersects(&self, lower: f64, upper: f64) -> bool {
        lower <= self.max && upper >= self.min
    }

    /// The smallest range containing both this range and `value`. NaN is
    /// ignored.
    pub fn include(&self, value: f64) -> Range {
        if value.is_nan() {
            return *self;
        }
        Range {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            Range::new(2.0, 1.0),
            Err(DataError::InvalidRange { min: 2.0, max: 1.0 })
        );
        assert!(Range::new(f64::NAN, 1.0).is_err());
        assert!(Range::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_percent_and_value() {
        let r = Range::new(10.0, 20.0).unwrap();
        assert!((r.percent(15.0) - 0.5).abs() < 1e-12);
        assert!((r.value(0.25) - 12.5).abs() < 1e-12);
        assert!((r.percent(25.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_peg_contains_intersects() {
        let r = Range::new(-1.0, 1.0).unwrap();
        assert_eq!(r.peg(5.0), 1.0);
        assert_eq!(r.peg(-5.0), -1.0);
        assert_eq!(r.peg(0.3), 0.3);
        assert!(r.contains(1.0));
        assert!(!r.contains(1.01));
        assert!(r.intersects(0.5, 3.0));
        assert!(r.intersects(1.0, 3.0));
        assert!(!r.intersects(1.5, 3.0));
    }

    #[test]
    fn test_include() {
        let r = Range::new(0.0, 1.0).unwrap();
        assert_eq!(r.include(-2.0), Range::new(-2.0, 1.0).unwrap());
        assert_eq!(r.include(0.5), r);
        assert_eq!(r.include(f64::NAN), r);
        assert_eq!(r.to_string(), "[0, 1]");
    }
}
