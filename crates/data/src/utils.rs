//! Aggregates over value containers.
//!
//! Empty cells are skipped everywhere: they are neither counted nor summed
//! and never widen a range.

use crate::error::{DataError, KeyKind};
use crate::range::Range;
use crate::values::{KeyedValues3D, Values, Values3D};
use crate::xyz::XYZDataset;

// ─── Totals and counts ───────────────────────────────────────────────────────

/// Sum of the non-empty values in a 1D list.
pub fn total<D: Values + ?Sized>(values: &D) -> f64 {
    (0..values.item_count())
        .filter_map(|i| values.value(i))
        .map(Into::into)
        .sum()
}

fn cells<D: Values3D + ?Sized>(
    data: &D,
    series: Option<usize>,
    row: Option<usize>,
    column: Option<usize>,
) -> impl Iterator<Item = f64> + '_ {
    let pick = |fixed: Option<usize>, count: usize| match fixed {
        Some(i) => i..i + 1,
        None => 0..count,
    };
    let series = pick(series, data.series_count());
    let rows = pick(row, data.row_count());
    let columns = pick(column, data.column_count());
    series
        .flat_map(move |s| rows.clone().map(move |r| (s, r)))
        .flat_map(move |(s, r)| columns.clone().map(move |c| (s, r, c)))
        .filter_map(move |(s, r, c)| data.value(s, r, c))
        .map(Into::into)
}

fn series_of<D: KeyedValues3D + ?Sized>(data: &D, key: &D::SeriesKey) -> Result<usize, DataError> {
    data.series_index(key)
        .ok_or_else(|| DataError::unknown(KeyKind::Series, key))
}

fn row_of<D: KeyedValues3D + ?Sized>(data: &D, key: &D::RowKey) -> Result<usize, DataError> {
    data.row_index(key)
        .ok_or_else(|| DataError::unknown(KeyKind::Row, key))
}

fn column_of<D: KeyedValues3D + ?Sized>(data: &D, key: &D::ColumnKey) -> Result<usize, DataError> {
    data.column_index(key)
        .ok_or_else(|| DataError::unknown(KeyKind::Column, key))
}

pub fn total_for_series<D: KeyedValues3D + ?Sized>(data: &D, key: &D::SeriesKey) -> Result<f64, DataError> {
    let s = series_of(data, key)?;
    Ok(cells(data, Some(s), None, None).sum())
}

/// Total of one row across every series.
pub fn total_for_row<D: KeyedValues3D + ?Sized>(data: &D, key: &D::RowKey) -> Result<f64, DataError> {
    let r = row_of(data, key)?;
    Ok(cells(data, None, Some(r), None).sum())
}

/// Total of one column across every series.
pub fn total_for_column<D: KeyedValues3D + ?Sized>(data: &D, key: &D::ColumnKey) -> Result<f64, DataError> {
    let c = column_of(data, key)?;
    Ok(cells(data, None, None, Some(c)).sum())
}

/// Number of non-empty cells in one series.
pub fn count_for_series<D: KeyedValues3D + ?Sized>(data: &D, key: &D::SeriesKey) -> Result<usize, DataError> {
    let s = series_of(data, key)?;
    Ok(cells(data, Some(s), None, None).count())
}

pub fn count_for_row<D: KeyedValues3D + ?Sized>(data: &D, key: &D::RowKey) -> Result<usize, DataError> {
    let r = row_of(data, key)?;
    Ok(cells(data, None, Some(r), None).count())
}

pub fn count_for_column<D: KeyedValues3D + ?Sized>(data: &D, key: &D::ColumnKey) -> Result<usize, DataError> {
    let c = column_of(data, key)?;
    Ok(cells(data, None, None, Some(c)).count())
}

// ─── Ranges ──────────────────────────────────────────────────────────────────

fn range_of(values: impl Iterator<Item = f64>, include: Option<f64>) -> Option<Range> {
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.chain(include).filter(|v| !v.is_nan()) {
        min = min.min(v);
        max = max.max(v);
    }
    Range::new(min, max).ok()
}

/// Range of every non-empty value in the cube, widened to include `base`.
/// With `finite_only`, infinite values are skipped too. `None` when there
/// is nothing to span.
pub fn find_value_range<D: Values3D + ?Sized>(data: &D, base: Option<f64>, finite_only: bool) -> Option<Range> {
    let values = cells(data, None, None, None).filter(|v| !finite_only || v.is_finite());
    range_of(values, base)
}

/// Running `(negative, positive)` subtotals at one cell over the series
/// before `series`, both starting from `base`.
///
/// Positive and negative values accumulate separately so a negative value
/// never cancels part of a positive stack.
pub fn stack_sub_total<D: Values3D + ?Sized>(
    data: &D,
    base: f64,
    series: usize,
    row: usize,
    column: usize,
) -> (f64, f64) {
    let (mut neg, mut pos) = (base, base);
    for s in 0..series {
        let v = data.double_value(s, row, column);
        if v > 0.0 {
            pos += v;
        } else if v < 0.0 {
            neg += v;
        }
    }
    (neg, pos)
}

/// Range spanned by the full stacks of every cell, including `base`.
/// A zero-length span is widened by 0.5 each way. Fails only for a NaN
/// base.
pub fn find_stacked_value_range<D: Values3D + ?Sized>(data: &D, base: f64) -> Result<Range, DataError> {
    let (mut min, mut max) = (base, base);
    let series = data.series_count();
    for row in 0..data.row_count() {
        for column in 0..data.column_count() {
            let (neg, pos) = stack_sub_total(data, base, series, row, column);
            min = min.min(neg);
            max = max.max(pos);
        }
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    Range::new(min, max)
}

fn xyz_range<D: XYZDataset + ?Sized>(data: &D, include: Option<f64>, coord: fn(&D, usize, usize) -> f64) -> Option<Range> {
    let values = (0..data.series_count())
        .flat_map(|s| (0..data.item_count(s)).map(move |i| (s, i)))
        .map(|(s, i)| coord(data, s, i));
    range_of(values, include)
}

/// Range of the x values, widened to include `include`.
pub fn find_x_range<D: XYZDataset + ?Sized>(data: &D, include: Option<f64>) -> Option<Range> {
    xyz_range(data, include, |d, s, i| d.x(s, i))
}

pub fn find_y_range<D: XYZDataset + ?Sized>(data: &D, include: Option<f64>) -> Option<Range> {
    xyz_range(data, include, |d, s, i| d.y(s, i))
}

pub fn find_z_range<D: XYZDataset + ?Sized>(data: &D, include: Option<f64>) -> Option<Range> {
    xyz_range(data, include, |d, s, i| d.z(s, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::keyed_values::DefaultKeyedValues;
    use crate::keyed_values3d::DefaultKeyedValues3D;

    type Cube = DefaultKeyedValues3D<&'static str, &'static str, &'static str, f64>;

    fn column_cube(values: &[Option<f64>]) -> Cube {
        let mut cube = Cube::new();
        for (i, v) in values.iter().enumerate() {
            cube.set_value(["S1", "S2", "S3", "S4"][i], "R", "C", *v);
        }
        cube
    }

    #[test]
    fn test_value_range_skips_nan_and_includes_base() {
        let cube = column_cube(&[Some(1.0), Some(-2.0), None, Some(3.0)]);
        let r = find_value_range(&cube, Some(0.0), false).unwrap();
        assert_eq!((r.min(), r.max()), (-2.0, 3.0));
        let cube = column_cube(&[Some(5.0), Some(7.0)]);
        let r = find_value_range(&cube, Some(0.0), false).unwrap();
        assert_eq!((r.min(), r.max()), (0.0, 7.0));
    }

    #[test]
    fn test_value_range_of_empty_cube_is_none() {
        let cube = column_cube(&[None, None]);
        assert_eq!(find_value_range(&cube, None, false), None);
        assert_eq!(find_value_range(&Cube::new(), None, true), None);
    }

    #[test]
    fn test_finite_only_skips_infinities() {
        let cube = column_cube(&[Some(1.0), Some(f64::INFINITY)]);
        let r = find_value_range(&cube, None, true).unwrap();
        assert_eq!((r.min(), r.max()), (1.0, 1.0));
        let r = find_value_range(&cube, None, false).unwrap();
        assert_eq!(r.max(), f64::INFINITY);
    }

    #[test]
    fn test_stack_sub_total_separates_signs() {
        let cube = column_cube(&[Some(2.0), Some(-1.0), Some(3.0)]);
        assert_eq!(stack_sub_total(&cube, 0.0, 3, 0, 0), (-1.0, 5.0));
        assert_eq!(stack_sub_total(&cube, 0.0, 1, 0, 0), (0.0, 2.0));
        assert_eq!(stack_sub_total(&cube, 1.0, 0, 0, 0), (1.0, 1.0));
    }

    #[test]
    fn test_stacked_range() {
        let cube = column_cube(&[Some(2.0), Some(-1.0), Some(3.0)]);
        let r = find_stacked_value_range(&cube, 0.0).unwrap();
        assert_eq!((r.min(), r.max()), (-1.0, 5.0));
        let r = find_stacked_value_range(&Cube::new(), 0.0).unwrap();
        assert_eq!((r.min(), r.max()), (-0.5, 0.5));
        assert!(find_stacked_value_range(&cube, f64::NAN).is_err());
    }

    #[test]
    fn test_totals_and_counts() {
        let mut cube = Cube::new();
        cube.set_value("S1", "R1", "C1", Some(1.0));
        cube.set_value("S1", "R2", "C1", Some(2.0));
        cube.set_value("S2", "R1", "C2", Some(4.0));
        cube.set_value("S2", "R2", "C2", None);
        assert_eq!(total_for_series(&cube, &"S1"), Ok(3.0));
        assert_eq!(total_for_row(&cube, &"R1"), Ok(5.0));
        assert_eq!(total_for_column(&cube, &"C2"), Ok(4.0));
        assert_eq!(count_for_series(&cube, &"S2"), Ok(1));
        assert_eq!(count_for_row(&cube, &"R2"), Ok(1));
        assert_eq!(count_for_column(&cube, &"C1"), Ok(2));
        assert!(matches!(
            total_for_series(&cube, &"S9"),
            Err(DataError::UnknownKey { kind: KeyKind::Series, .. })
        ));
        assert!(count_for_column(&cube, &"C9").is_err());
    }

    #[test]
    fn test_total_of_list() {
        let mut v = DefaultKeyedValues::<&str, f64>::new();
        v.put("a", Some(0.1));
        v.put("b", None);
        v.put("c", Some(0.2));
        assert_abs_diff_eq!(total(&v), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_xyz_ranges() {
        use crate::xyz::{XYZSeries, XYZSeriesCollection};
        let mut s = XYZSeries::new("S");
        s.add(1.0, -5.0, 2.0);
        s.add(3.0, f64::NAN, 8.0);
        let mut c = XYZSeriesCollection::new();
        c.add(s).unwrap();
        let x = find_x_range(&c, None).unwrap();
        assert_eq!((x.min(), x.max()), (1.0, 3.0));
        let y = find_y_range(&c, Some(0.0)).unwrap();
        assert_eq!((y.min(), y.max()), (-5.0, 0.0));
        let z = find_z_range(&c, None).unwrap();
        assert_eq!((z.min(), z.max()), (2.0, 8.0));
        assert_eq!(find_x_range(&XYZSeriesCollection::<&str>::new(), None), None);
    }
}
