mod common;

use mbw_core::errors::VizError;
use mbw_viz::experiments::{GridRecord, StrideRecord, ThreadsPerBlockRecord};
use mbw_viz::{load, ResultTable};
use tempfile::tempdir;

use common::write_csv;

#[test]
fn loads_typed_rows_in_file_order() {
    let dir = tempdir().expect("tempdir");
    let path = write_csv(dir.path(), "exp1.csv", common::EXP1);
    let table: ResultTable<ThreadsPerBlockRecord> = load(&path).expect("load");
    assert_eq!(table.len(), 4);
    assert_eq!(table.rows()[2].threads_per_block, 128);
    assert_eq!(table.rows()[2].bandwidth_gbps, 120.0);
    assert_eq!(table.source(), path.display().to_string());
}

#[test]
fn trims_whitespace_and_ignores_extra_columns() {
    let dir = tempdir().expect("tempdir");
    let path = write_csv(
        dir.path(),
        "grid.csv",
        "run, blocks_per_grid , threads_per_block,bandwidth_gbps\n7, 8 , 64 , 61.5\n",
    );
    let table: ResultTable<GridRecord> = load(&path).expect("load");
    assert_eq!(
        table.rows(),
        &[GridRecord {
            threads_per_block: 64,
            blocks_per_grid: 8,
            bandwidth_gbps: 61.5,
        }]
    );
}

#[test]
fn missing_file_is_reported_with_hint() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("exp4_stride_comparison.csv");
    let err = load::<StrideRecord>(&path).expect_err("missing");
    match &err {
        VizError::MissingInput(info) => {
            assert_eq!(info.code, "mbw.input_missing");
            assert!(info.hint.as_deref().unwrap_or_default().contains("benchmark"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.path(), Some(path.display().to_string().as_str()));
}

#[test]
fn short_row_is_malformed() {
    let dir = tempdir().expect("tempdir");
    let path = write_csv(dir.path(), "short.csv", "stride,bandwidth_gbps\n1,100.0\n2\n");
    let err = load::<StrideRecord>(&path).expect_err("ragged");
    let VizError::MalformedTable(info) = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(info.code, "mbw.row_malformed");
    assert_eq!(info.context.get("expected_fields").map(String::as_str), Some("2"));
    assert_eq!(info.context.get("fields").map(String::as_str), Some("1"));
}

#[test]
fn unparseable_cell_is_malformed() {
    let dir = tempdir().expect("tempdir");
    let path = write_csv(dir.path(), "bad.csv", "stride,bandwidth_gbps\n1,fast\n");
    let err = load::<StrideRecord>(&path).expect_err("bad cell");
    assert!(matches!(err, VizError::MalformedTable(_)), "{err:?}");
}

#[test]
fn non_finite_cell_is_malformed() {
    let dir = tempdir().expect("tempdir");
    let path = write_csv(dir.path(), "nan.csv", "stride,bandwidth_gbps\n1,100.0\n2,NaN\n");
    let err = load::<StrideRecord>(&path).expect_err("nan");
    let VizError::MalformedTable(info) = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(info.code, "mbw.cell_non_finite");
    assert_eq!(info.context.get("row").map(String::as_str), Some("1"));
    assert_eq!(info.context.get("column").map(String::as_str), Some("bandwidth_gbps"));
    assert!(info.context.contains_key("path"));
}

#[test]
fn header_only_file_is_malformed() {
    let dir = tempdir().expect("tempdir");
    let path = write_csv(dir.path(), "empty.csv", "stride,bandwidth_gbps\n");
    let err = load::<StrideRecord>(&path).expect_err("empty");
    assert_eq!(err.info().code, "mbw.table_empty");
}

#[test]
fn absent_column_is_schema_mismatch() {
    let dir = tempdir().expect("tempdir");
    let path = write_csv(dir.path(), "schema.csv", "stride,throughput\n1,100.0\n");
    let err = load::<StrideRecord>(&path).expect_err("schema");
    let VizError::SchemaMismatch(info) = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(info.context.get("columns").map(String::as_str), Some("bandwidth_gbps"));
    assert_eq!(info.context.get("found").map(String::as_str), Some("stride,throughput"));
}

#[test]
fn constructor_rejects_empty_rows() {
    let err = ResultTable::<StrideRecord>::new("inline", Vec::new()).expect_err("empty");
    assert!(matches!(err, VizError::MalformedTable(_)));
}
