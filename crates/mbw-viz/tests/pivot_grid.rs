mod common;

use mbw_core::errors::VizError;
use mbw_viz::experiments::GridRecord;
use mbw_viz::{pivot, Grid, ResultTable};
use proptest::prelude::*;

use common::table;

fn cell(threads_per_block: u32, blocks_per_grid: u32, bandwidth_gbps: f64) -> GridRecord {
    GridRecord {
        threads_per_block,
        blocks_per_grid,
        bandwidth_gbps,
    }
}

fn grid_of(table: &ResultTable<GridRecord>) -> Result<Grid, VizError> {
    pivot(
        table,
        |row| f64::from(row.threads_per_block),
        |row| f64::from(row.blocks_per_grid),
        |row| row.bandwidth_gbps,
    )
}

#[test]
fn complete_grid_is_dense_and_sorted() {
    let table = table(vec![
        cell(256, 4, 6.0),
        cell(64, 2, 1.0),
        cell(64, 4, 2.0),
        cell(128, 2, 3.0),
        cell(128, 4, 4.0),
        cell(256, 2, 5.0),
    ]);
    let grid = grid_of(&table).expect("grid");
    assert_eq!(grid.row_keys, vec![64.0, 128.0, 256.0]);
    assert_eq!(grid.col_keys, vec![2.0, 4.0]);
    assert_eq!(grid.cell_count(), 6);
    assert_eq!(grid.row(0), &[1.0, 2.0]);
    assert_eq!(grid.row(2), &[5.0, 6.0]);
    assert_eq!(grid.value(1, 1), 4.0);
    assert_eq!(grid.position(128.0, 4.0), Some((1, 1)));
    assert_eq!(grid.position(512.0, 4.0), None);
    let range = grid.range();
    assert_eq!((range.min, range.max), (1.0, 6.0));
}

#[test]
fn missing_combination_is_irregular() {
    let table = table(vec![cell(64, 2, 1.0), cell(64, 4, 2.0), cell(128, 2, 3.0)]);
    let err = grid_of(&table).expect_err("irregular");
    let VizError::IrregularGrid(info) = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(info.code, "mbw.grid_missing_cell");
    assert_eq!(info.context.get("row_key").map(String::as_str), Some("128"));
    assert_eq!(info.context.get("col_key").map(String::as_str), Some("4"));
}

#[test]
fn duplicate_combination_is_irregular() {
    let table = table(vec![cell(64, 2, 1.0), cell(64, 2, 1.5)]);
    let err = grid_of(&table).expect_err("duplicate");
    assert_eq!(err.info().code, "mbw.grid_duplicate_cell");
}

#[test]
fn single_row_sweep_minus_a_cell_is_still_complete() {
    let table = table(vec![cell(64, 2, 1.0)]);
    let grid = grid_of(&table).expect("1 x 1 grid");
    assert_eq!((grid.rows(), grid.cols()), (1, 1));
}

#[test]
fn grid_survives_yaml_roundtrip() {
    let table = table(vec![cell(64, 2, 1.0), cell(64, 4, 2.0)]);
    let grid = grid_of(&table).expect("grid");
    let yaml = serde_yaml::to_string(&grid).expect("serialize");
    let back: Grid = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(back, grid);
}

#[test]
fn deserialized_grid_must_be_dense() {
    let raw = "row_keys: [64.0, 128.0]\ncol_keys: [2.0, 4.0]\nvalues: [1.0, 2.0, 3.0]\n";
    let err = serde_yaml::from_str::<Grid>(raw).expect_err("short values");
    assert!(err.to_string().contains("mbw.grid_shape"), "{err}");
}

#[test]
fn deserialized_grid_keys_must_ascend() {
    let raw = "row_keys: [128.0, 64.0]\ncol_keys: [2.0]\nvalues: [1.0, 2.0]\n";
    let err = serde_yaml::from_str::<Grid>(raw).expect_err("unsorted keys");
    assert!(err.to_string().contains("mbw.grid_keys"), "{err}");
}

proptest! {
    #[test]
    fn rectangular_sweeps_pivot_to_r_by_c(rows in 1usize..6, cols in 1usize..6, drop in any::<prop::sample::Index>()) {
        let mut records = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                records.push(cell(32 << r, 1 << c, (r * cols + c) as f64));
            }
        }
        let full = grid_of(&table(records.clone())).unwrap();
        prop_assert_eq!(full.cell_count(), rows * cols);
        prop_assert_eq!(full.rows(), rows);
        prop_assert_eq!(full.cols(), cols);
        for r in 0..rows {
            for c in 0..cols {
                prop_assert_eq!(full.value(r, c), (r * cols + c) as f64);
            }
        }

        // A single row or column stays complete after losing a cell.
        if rows > 1 && cols > 1 {
            records.remove(drop.index(records.len()));
            let is_irregular = matches!(
                grid_of(&table(records)),
                Err(VizError::IrregularGrid(_))
            );
            prop_assert!(is_irregular);
        }
    }
}
