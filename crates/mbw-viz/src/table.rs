use std::path::Path;

use csv::{ReaderBuilder, Trim};
use mbw_core::errors::{ErrorInfo, VizError};
use mbw_core::RUN_BENCHMARKS_HINT;

use crate::experiments::SweepRecord;

/// Rows of one benchmark result file.
///
/// Only constructible through [`ResultTable::new`] or [`load`], both of which
/// guarantee at least one row and finite values in every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable<R> {
    source: String,
    rows: Vec<R>,
}

impl<R: SweepRecord> ResultTable<R> {
    /// Validates `rows` and wraps them; `source` labels diagnostics.
    pub fn new(source: impl Into<String>, rows: Vec<R>) -> Result<Self, VizError> {
        let source = source.into();
        if rows.is_empty() {
            return Err(VizError::MalformedTable(
                ErrorInfo::new("mbw.table_empty", "result table has no data rows")
                    .with_context("source", source),
            ));
        }
        for (idx, row) in rows.iter().enumerate() {
            if let Some(pos) = row.values().iter().position(|value| !value.is_finite()) {
                return Err(VizError::MalformedTable(
                    ErrorInfo::new("mbw.cell_non_finite", "cell is not a finite number")
                        .with_context("source", source)
                        .with_context("row", idx.to_string())
                        .with_context("column", R::COLUMNS[pos]),
                ));
            }
        }
        Ok(Self { source, rows })
    }

    /// Label used in diagnostics, usually the file path.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of data rows, never zero.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads a comma separated result file into typed rows.
pub fn load<R: SweepRecord>(path: &Path) -> Result<ResultTable<R>, VizError> {
    if !path.exists() {
        return Err(VizError::MissingInput(
            ErrorInfo::new("mbw.input_missing", "results file not found")
                .with_path(path)
                .with_hint(RUN_BENCHMARKS_HINT),
        ));
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|err| VizError::io("mbw.input_open", path, err))?;
    let headers = reader
        .headers()
        .map_err(|err| malformed(path, &err))?
        .clone();
    let missing: Vec<&str> = R::COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(VizError::SchemaMismatch(
            ErrorInfo::new("mbw.column_missing", "required column absent from header")
                .with_path(path)
                .with_context("columns", missing.join(","))
                .with_context("found", headers.iter().collect::<Vec<_>>().join(",")),
        ));
    }
    let mut rows = Vec::new();
    for result in reader.deserialize::<R>() {
        rows.push(result.map_err(|err| malformed(path, &err))?);
    }
    ResultTable::new(path.display().to_string(), rows).map_err(|err| match err {
        VizError::MalformedTable(info) => VizError::MalformedTable(info.with_path(path)),
        other => other,
    })
}

fn malformed(path: &Path, err: &csv::Error) -> VizError {
    let mut info = ErrorInfo::new("mbw.row_malformed", err.to_string()).with_path(path);
    if let Some(pos) = err.position() {
        info = info.with_context("line", pos.line().to_string());
    }
    if let csv::ErrorKind::UnequalLengths {
        expected_len, len, ..
    } = err.kind()
    {
        info = info
            .with_context("expected_fields", expected_len.to_string())
            .with_context("fields", len.to_string());
    }
    VizError::MalformedTable(info)
}
