//! Derived facts about a single result table.

use std::cmp::Ordering;

use mbw_core::errors::{ErrorInfo, VizError};
use serde::{Deserialize, Serialize};

use crate::experiments::{OffsetRecord, SweepRecord};
use crate::table::ResultTable;

/// Row holding the highest bandwidth of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimum<R> {
    /// Position of the row in input order.
    pub index: usize,
    /// Copy of the winning row.
    pub record: R,
}

impl<R: SweepRecord> Optimum<R> {
    /// Bandwidth of the winning row in GB/s.
    pub fn bandwidth(&self) -> f64 {
        self.record.bandwidth()
    }
}

/// Smallest and largest bandwidth of a table, in GB/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthRange {
    pub min: f64,
    pub max: f64,
}

/// Loss of one row relative to the baseline row.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradationPoint<R> {
    pub index: usize,
    pub record: R,
    /// `(1 - bandwidth / baseline) * 100`; exactly zero for the baseline row.
    pub percent: f64,
}

/// Per-row degradation against one baseline row.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradationSeries<R> {
    pub baseline_index: usize,
    pub baseline_bandwidth: f64,
    /// One entry per table row, in input order.
    pub points: Vec<DegradationPoint<R>>,
}

impl<R> DegradationSeries<R> {
    /// Every point except the baseline row itself.
    pub fn excluding_baseline(&self) -> impl Iterator<Item = &DegradationPoint<R>> {
        self.points
            .iter()
            .filter(move |point| point.index != self.baseline_index)
    }
}

/// Dense row-major matrix keyed by the sorted distinct values of two columns.
///
/// Deserialisation goes through [`GridParts`], so a decoded grid is always
/// dense with strictly ascending keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct Grid {
    pub row_keys: Vec<f64>,
    pub col_keys: Vec<f64>,
    values: Vec<f64>,
}

/// Unchecked serialised form of a [`Grid`].
#[derive(Debug, Clone, Deserialize)]
pub struct GridParts {
    pub row_keys: Vec<f64>,
    pub col_keys: Vec<f64>,
    pub values: Vec<f64>,
}

impl TryFrom<GridParts> for Grid {
    type Error = VizError;

    fn try_from(parts: GridParts) -> Result<Self, Self::Error> {
        let ascending = |keys: &[f64]| keys.windows(2).all(|pair| pair[0] < pair[1]);
        if !ascending(parts.row_keys.as_slice()) || !ascending(parts.col_keys.as_slice()) {
            return Err(VizError::IrregularGrid(ErrorInfo::new(
                "mbw.grid_keys",
                "grid keys must be strictly ascending",
            )));
        }
        let expected = parts.row_keys.len() * parts.col_keys.len();
        if parts.values.len() != expected {
            return Err(VizError::IrregularGrid(
                ErrorInfo::new("mbw.grid_shape", "grid values do not fill rows x cols")
                    .with_context("expected", expected.to_string())
                    .with_context("found", parts.values.len().to_string()),
            ));
        }
        Ok(Self {
            row_keys: parts.row_keys,
            col_keys: parts.col_keys,
            values: parts.values,
        })
    }
}

impl Grid {
    /// Number of distinct row keys.
    pub fn rows(&self) -> usize {
        self.row_keys.len()
    }

    /// Number of distinct column keys.
    pub fn cols(&self) -> usize {
        self.col_keys.len()
    }

    /// Always `rows() * cols()`.
    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    /// Value at `(row, col)`; panics when either index is out of range.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols() + col]
    }

    /// All values of one row, in column-key order.
    pub fn row(&self, row: usize) -> &[f64] {
        let cols = self.cols();
        &self.values[row * cols..(row + 1) * cols]
    }

    /// Smallest and largest cell value.
    pub fn range(&self) -> BandwidthRange {
        fold_range(self.values.iter().copied())
    }

    /// Cell coordinates of the given key pair, if both keys exist.
    pub fn position(&self, row_key: f64, col_key: f64) -> Option<(usize, usize)> {
        let row = find_key(&self.row_keys, row_key)?;
        let col = find_key(&self.col_keys, col_key)?;
        Some((row, col))
    }
}

/// First row with the maximum bandwidth.
pub fn argmax_bandwidth<R: SweepRecord>(table: &ResultTable<R>) -> Optimum<R> {
    let rows = table.rows();
    let mut best = 0;
    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.bandwidth() > rows[best].bandwidth() {
            best = idx;
        }
    }
    Optimum {
        index: best,
        record: rows[best].clone(),
    }
}

/// Minimum and maximum of the bandwidth column.
pub fn bandwidth_range<R: SweepRecord>(table: &ResultTable<R>) -> BandwidthRange {
    fold_range(table.rows().iter().map(SweepRecord::bandwidth))
}

/// Percentage loss of every row relative to the first row matching `is_baseline`.
pub fn degradation_series<R, F>(
    table: &ResultTable<R>,
    is_baseline: F,
) -> Result<DegradationSeries<R>, VizError>
where
    R: SweepRecord,
    F: Fn(&R) -> bool,
{
    let rows = table.rows();
    let baseline_index = rows.iter().position(is_baseline).ok_or_else(|| {
        VizError::BaselineNotFound(
            ErrorInfo::new("mbw.baseline_missing", "no row matches the baseline condition")
                .with_context("source", table.source()),
        )
    })?;
    let baseline_bandwidth = rows[baseline_index].bandwidth();
    if baseline_bandwidth == 0.0 {
        return Err(VizError::BaselineNotFound(
            ErrorInfo::new("mbw.baseline_zero", "baseline row has zero bandwidth")
                .with_context("source", table.source())
                .with_context("row", baseline_index.to_string()),
        ));
    }
    let points = rows
        .iter()
        .enumerate()
        .map(|(index, record)| DegradationPoint {
            index,
            record: record.clone(),
            percent: if index == baseline_index {
                0.0
            } else {
                (1.0 - record.bandwidth() / baseline_bandwidth) * 100.0
            },
        })
        .collect();
    Ok(DegradationSeries {
        baseline_index,
        baseline_bandwidth,
        points,
    })
}

/// Reshapes a flat two-key table into a complete [`Grid`].
pub fn pivot<R, RK, CK, V>(
    table: &ResultTable<R>,
    row_key: RK,
    col_key: CK,
    value: V,
) -> Result<Grid, VizError>
where
    R: SweepRecord,
    RK: Fn(&R) -> f64,
    CK: Fn(&R) -> f64,
    V: Fn(&R) -> f64,
{
    let rows = table.rows();
    let row_keys = distinct_sorted(rows.iter().map(&row_key));
    let col_keys = distinct_sorted(rows.iter().map(&col_key));
    let mut cells: Vec<Option<f64>> = vec![None; row_keys.len() * col_keys.len()];
    for record in rows {
        let (r, c) = (row_key(record), col_key(record));
        // Keys were collected from these rows, so both lookups succeed.
        let (Some(ri), Some(ci)) = (find_key(&row_keys, r), find_key(&col_keys, c)) else {
            continue;
        };
        let cell = &mut cells[ri * col_keys.len() + ci];
        if cell.is_some() {
            return Err(VizError::IrregularGrid(
                ErrorInfo::new("mbw.grid_duplicate_cell", "grid cell appears more than once")
                    .with_context("source", table.source())
                    .with_context("row_key", r.to_string())
                    .with_context("col_key", c.to_string()),
            ));
        }
        *cell = Some(value(record));
    }
    let mut values = Vec::with_capacity(cells.len());
    for (idx, cell) in cells.into_iter().enumerate() {
        match cell {
            Some(v) => values.push(v),
            None => {
                return Err(VizError::IrregularGrid(
                    ErrorInfo::new("mbw.grid_missing_cell", "grid is missing a combination")
                        .with_context("source", table.source())
                        .with_context("row_key", row_keys[idx / col_keys.len()].to_string())
                        .with_context("col_key", col_keys[idx % col_keys.len()].to_string()),
                ))
            }
        }
    }
    Ok(Grid {
        row_keys,
        col_keys,
        values,
    })
}

/// Offsets that break `alignment`; zero counts as aligned.
pub fn misaligned_offsets(table: &ResultTable<OffsetRecord>, alignment: u32) -> Vec<u32> {
    let mut offsets: Vec<u32> = table
        .rows()
        .iter()
        .map(|row| row.offset)
        .filter(|offset| *offset != 0 && offset % alignment.max(1) != 0)
        .collect();
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut keys: Vec<f64> = values.collect();
    keys.sort_by(cmp_f64);
    keys.dedup_by(|a, b| cmp_f64(a, b) == Ordering::Equal);
    keys
}

fn find_key(keys: &[f64], key: f64) -> Option<usize> {
    keys.binary_search_by(|candidate| cmp_f64(candidate, &key)).ok()
}

fn fold_range(values: impl Iterator<Item = f64>) -> BandwidthRange {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    BandwidthRange { min, max }
}
