#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use mbw_viz::experiments::SweepRecord;
use mbw_viz::ResultTable;

pub const EXP1: &str = "threads_per_block,bandwidth_gbps
32,50.0
64,90.0
128,120.0
256,95.0
";

pub const EXP2: &str = "blocks_per_grid,bandwidth_gbps
1,20.5
2,40.1
4,80.3
8,150.2
16,210.0
32,205.4
";

/// 3 x 3 sweep, written out of order; the optimum is 128 threads x 16 blocks.
pub const EXP3: &str = "threads_per_block,blocks_per_grid,bandwidth_gbps
256,32,180.0
64,8,60.0
64,16,95.0
64,32,120.0
128,8,140.0
128,16,250.0
128,32,230.0
256,8,150.0
256,16,210.0
";

pub const EXP4: &str = "stride,bandwidth_gbps
1,100.0
2,80.0
4,50.0
8,25.0
";

pub const EXP5: &str = "offset,bandwidth_gbps
0,300.0
1,250.0
16,260.0
32,298.0
33,240.0
";

pub const EXP6: &str = "memory_size_mb,bandwidth_gbps
1,100.0
4,200.0
16,280.0
64,300.0
";

pub const INPUTS: [(&str, &str); 6] = [
    ("exp1_threads_per_block.csv", EXP1),
    ("exp2_blocks_per_grid.csv", EXP2),
    ("exp3_2d_optimization.csv", EXP3),
    ("exp4_stride_comparison.csv", EXP4),
    ("exp5_offset_comparison.csv", EXP5),
    ("exp6_memory_size.csv", EXP6),
];

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture csv");
    path
}

/// Writes all six well-formed inputs into `dir`.
pub fn write_inputs(dir: &Path) {
    for (name, contents) in INPUTS {
        write_csv(dir, name, contents);
    }
}

pub fn table<R: SweepRecord>(rows: Vec<R>) -> ResultTable<R> {
    ResultTable::new("fixture", rows).expect("valid fixture table")
}
