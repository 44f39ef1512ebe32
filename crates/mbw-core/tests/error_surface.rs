use std::path::Path;

use mbw_core::errors::{ErrorInfo, VizError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("line", "3")
        .with_context("reason", "example")
}

#[test]
fn missing_input_surface() {
    let info = ErrorInfo::new("mbw.input_missing", "results file not found")
        .with_path(Path::new("results/exp1_threads_per_block.csv"))
        .with_hint(mbw_core::RUN_BENCHMARKS_HINT);
    let err = VizError::MissingInput(info);
    assert_eq!(err.info().code, "mbw.input_missing");
    assert_eq!(err.path(), Some("results/exp1_threads_per_block.csv"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("missing input: results file not found"));
    assert!(rendered.contains("path=results/exp1_threads_per_block.csv"));
    assert!(rendered.contains("hint: Please run the benchmark script first"));
}

#[test]
fn malformed_table_surface() {
    let err = VizError::MalformedTable(sample_info("M001", "ragged row"));
    assert_eq!(err.info().code, "M001");
    assert!(err.info().context.contains_key("line"));
    assert!(err.path().is_none());
}

#[test]
fn schema_mismatch_surface() {
    let err = VizError::SchemaMismatch(sample_info("S001", "missing column"));
    assert_eq!(err.info().code, "S001");
    assert!(err.to_string().contains("context: [line=3, reason=example]"));
}

#[test]
fn baseline_not_found_surface() {
    let err = VizError::BaselineNotFound(sample_info("B001", "no stride=1 row"));
    assert_eq!(err.info().code, "B001");
}

#[test]
fn irregular_grid_surface() {
    let err = VizError::IrregularGrid(sample_info("G001", "missing cell"));
    assert_eq!(err.info().code, "G001");
}

#[test]
fn io_helper_records_path() {
    let err = VizError::io("mbw.write", Path::new("plots/out.svg"), "permission denied");
    assert!(matches!(err, VizError::Io(_)));
    assert_eq!(err.info().message, "permission denied");
    assert_eq!(err.path(), Some("plots/out.svg"));
}

#[test]
fn errors_roundtrip_through_json() {
    let err = VizError::IrregularGrid(
        ErrorInfo::new("mbw.grid_missing_cell", "grid is missing a cell")
            .with_context("row", "64")
            .with_context("col", "8"),
    );
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"IrregularGrid\""));
    let restored: VizError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, err);
}

#[test]
fn repeated_path_keeps_latest_location() {
    let err = VizError::MalformedTable(
        ErrorInfo::new("mbw.cell_non_finite", "cell is not a finite number")
            .with_path(Path::new("fixture"))
            .with_path(Path::new("results/exp4_stride_comparison.csv"))
            .with_context("column", "bandwidth_gbps"),
    );
    assert_eq!(err.path(), Some("results/exp4_stride_comparison.csv"));
    assert_eq!(
        err.to_string(),
        "malformed table: cell is not a finite number (code: mbw.cell_non_finite) \
         | context: [column=bandwidth_gbps, path=results/exp4_stride_comparison.csv]"
    );
}
