mod common;

use mbw_core::errors::VizError;
use mbw_viz::experiments::{OffsetRecord, StrideRecord, ThreadsPerBlockRecord};
use mbw_viz::metrics::misaligned_offsets;
use mbw_viz::{argmax_bandwidth, bandwidth_range, degradation_series};
use proptest::prelude::*;

use common::table;

fn threads(rows: &[(u32, f64)]) -> Vec<ThreadsPerBlockRecord> {
    rows.iter()
        .map(|(threads_per_block, bandwidth_gbps)| ThreadsPerBlockRecord {
            threads_per_block: *threads_per_block,
            bandwidth_gbps: *bandwidth_gbps,
        })
        .collect()
}

fn strides(rows: &[(u32, f64)]) -> Vec<StrideRecord> {
    rows.iter()
        .map(|(stride, bandwidth_gbps)| StrideRecord {
            stride: *stride,
            bandwidth_gbps: *bandwidth_gbps,
        })
        .collect()
}

#[test]
fn optimum_of_threads_sweep() {
    let table = table(threads(&[(32, 50.0), (64, 90.0), (128, 120.0), (256, 95.0)]));
    let optimum = argmax_bandwidth(&table);
    assert_eq!(optimum.index, 2);
    assert_eq!(optimum.record.threads_per_block, 128);
    assert_eq!(optimum.bandwidth(), 120.0);
}

#[test]
fn optimum_ties_go_to_first_row() {
    let table = table(threads(&[(32, 80.0), (64, 120.0), (128, 120.0), (256, 120.0)]));
    let optimum = argmax_bandwidth(&table);
    assert_eq!(optimum.index, 1);
    assert_eq!(optimum.record.threads_per_block, 64);
}

#[test]
fn range_spans_bandwidth_column() {
    let table = table(threads(&[(32, 50.0), (64, 90.0), (128, 120.0), (256, 95.0)]));
    let range = bandwidth_range(&table);
    assert_eq!(range.min, 50.0);
    assert_eq!(range.max, 120.0);
}

#[test]
fn stride_degradation_against_coalesced_row() {
    let table = table(strides(&[(1, 100.0), (2, 80.0), (4, 50.0)]));
    let series = degradation_series(&table, |row| row.stride == 1).expect("baseline");
    assert_eq!(series.baseline_index, 0);
    assert_eq!(series.baseline_bandwidth, 100.0);
    assert_eq!(series.points[0].percent, 0.0);
    assert!((series.points[1].percent - 20.0).abs() < 1e-9);
    assert!((series.points[2].percent - 50.0).abs() < 1e-9);
    let others: Vec<u32> = series
        .excluding_baseline()
        .map(|point| point.record.stride)
        .collect();
    assert_eq!(others, vec![2, 4]);
}

#[test]
fn degradation_baseline_need_not_be_first() {
    let table = table(strides(&[(4, 60.0), (1, 100.0)]));
    let series = degradation_series(&table, |row| row.stride == 1).expect("baseline");
    assert_eq!(series.baseline_index, 1);
    assert!((series.points[0].percent - 40.0).abs() < 1e-9);
    assert_eq!(series.points[1].percent, 0.0);
}

#[test]
fn missing_baseline_is_an_error() {
    let table = table(strides(&[(2, 80.0), (4, 50.0)]));
    let err = degradation_series(&table, |row| row.stride == 1).expect_err("no baseline");
    let VizError::BaselineNotFound(info) = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(info.code, "mbw.baseline_missing");
    assert_eq!(info.context.get("source").map(String::as_str), Some("fixture"));
}

#[test]
fn zero_baseline_is_an_error() {
    let table = table(strides(&[(1, 0.0), (2, 80.0)]));
    let err = degradation_series(&table, |row| row.stride == 1).expect_err("zero baseline");
    assert_eq!(err.info().code, "mbw.baseline_zero");
}

#[test]
fn misaligned_offsets_skip_zero_and_multiples() {
    let rows = [0, 1, 16, 32, 33, 64, 1]
        .into_iter()
        .map(|offset| OffsetRecord {
            offset,
            bandwidth_gbps: 100.0,
        })
        .collect();
    assert_eq!(misaligned_offsets(&table(rows), 32), vec![1, 16, 33]);
}

proptest! {
    #[test]
    fn argmax_is_maximal_and_first(rows in prop::collection::vec((1u32..1024, 0u8..8), 1..40)) {
        let records: Vec<(u32, f64)> = rows
            .iter()
            .map(|(threads, level)| (*threads, f64::from(*level) * 10.0))
            .collect();
        let table = table(threads(&records));
        let optimum = argmax_bandwidth(&table);
        for (idx, (_, bandwidth)) in records.iter().enumerate() {
            prop_assert!(optimum.bandwidth() >= *bandwidth);
            if idx < optimum.index {
                prop_assert!(*bandwidth < optimum.bandwidth());
            }
        }
        prop_assert_eq!(optimum.record.bandwidth_gbps, records[optimum.index].1);
    }

    #[test]
    fn degradation_matches_formula(
        baseline in 1.0f64..1000.0,
        others in prop::collection::vec((2u32..64, 0.0f64..1000.0), 0..20),
    ) {
        let mut records = vec![(1u32, baseline)];
        records.extend(others.iter().copied());
        let table = table(strides(&records));
        let series = degradation_series(&table, |row| row.stride == 1).unwrap();
        prop_assert_eq!(series.points.len(), records.len());
        prop_assert_eq!(series.points[0].percent, 0.0);
        for (point, (_, bandwidth)) in series.points.iter().zip(&records).skip(1) {
            let expected = (1.0 - bandwidth / baseline) * 100.0;
            prop_assert!((point.percent - expected).abs() < 1e-9);
        }
    }
}
