//! Static descriptors for the six benchmark sweeps and their typed rows.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A single typed row of a benchmark result file.
pub trait SweepRecord: DeserializeOwned + Clone {
    /// Columns the record is deserialised from, in file order.
    const COLUMNS: &'static [&'static str];

    /// Achieved bandwidth in GB/s.
    fn bandwidth(&self) -> f64;

    /// Every numeric cell of the row, in [`Self::COLUMNS`] order.
    fn values(&self) -> Vec<f64>;
}

/// Records of sweeps that vary exactly one configuration parameter.
pub trait SingleParam: SweepRecord {
    /// Value of the swept parameter.
    fn param(&self) -> f64;
}

macro_rules! single_param_record {
    ($(#[$meta:meta])* $name:ident, $field:ident: $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub $field: $ty,
            pub bandwidth_gbps: f64,
        }

        impl SweepRecord for $name {
            const COLUMNS: &'static [&'static str] = &[stringify!($field), "bandwidth_gbps"];

            fn bandwidth(&self) -> f64 {
                self.bandwidth_gbps
            }

            fn values(&self) -> Vec<f64> {
                vec![f64::from(self.$field), self.bandwidth_gbps]
            }
        }

        impl SingleParam for $name {
            fn param(&self) -> f64 {
                f64::from(self.$field)
            }
        }
    };
}

single_param_record!(
    /// Experiment 1 row: a single block with a varying thread count.
    ThreadsPerBlockRecord,
    threads_per_block: u32
);
single_param_record!(
    /// Experiment 2 row: fixed block size with a varying grid size.
    BlocksPerGridRecord,
    blocks_per_grid: u32
);
single_param_record!(
    /// Experiment 4 row: access stride in elements.
    StrideRecord,
    stride: u32
);
single_param_record!(
    /// Experiment 5 row: access offset in elements.
    OffsetRecord,
    offset: u32
);
single_param_record!(
    /// Experiment 6 row: transfer size in megabytes.
    MemorySizeRecord,
    memory_size_mb: f64
);

/// Experiment 3 row: one cell of the threads x blocks sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    pub threads_per_block: u32,
    pub blocks_per_grid: u32,
    pub bandwidth_gbps: f64,
}

impl SweepRecord for GridRecord {
    const COLUMNS: &'static [&'static str] =
        &["threads_per_block", "blocks_per_grid", "bandwidth_gbps"];

    fn bandwidth(&self) -> f64 {
        self.bandwidth_gbps
    }

    fn values(&self) -> Vec<f64> {
        vec![
            f64::from(self.threads_per_block),
            f64::from(self.blocks_per_grid),
            self.bandwidth_gbps,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperimentId {
    ThreadsPerBlock,
    BlocksPerGrid,
    GridOptimization,
    StrideComparison,
    OffsetComparison,
    MemorySize,
}

impl ExperimentId {
    /// One-based experiment number used in file names and headings.
    pub fn number(self) -> u8 {
        match self {
            ExperimentId::ThreadsPerBlock => 1,
            ExperimentId::BlocksPerGrid => 2,
            ExperimentId::GridOptimization => 3,
            ExperimentId::StrideComparison => 4,
            ExperimentId::OffsetComparison => 5,
            ExperimentId::MemorySize => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableShape {
    /// One configuration column plus bandwidth.
    List,
    /// Two configuration columns forming a complete grid.
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisScale {
    Linear,
    Log2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Circle,
    Square,
    Diamond,
}

/// Stroke colour and point marker of the primary data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: &'static str,
    pub marker: Marker,
}

/// Fixed chart text. Never derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

/// How an experiment's table is turned into charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    /// Line chart with the optimum starred; `unit` names the parameter in the legend.
    Line { scale: AxisScale, unit: &'static str },
    /// Annotated heatmap plus a projected surface of the same grid.
    Heatmap { surface_title: &'static str },
    /// The same series on a linear and a log2 axis, side by side.
    DualScale { log_color: &'static str },
    /// Line chart with every misaligned x highlighted.
    Threshold { alignment: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentDescriptor {
    pub id: ExperimentId,
    /// Short display name used in progress output.
    pub name: &'static str,
    /// File stem shared by the input table and the primary chart.
    pub stem: &'static str,
    pub columns: &'static [&'static str],
    pub shape: TableShape,
    pub recipe: Recipe,
    pub labels: ChartLabels,
    pub style: SeriesStyle,
}

impl ExperimentDescriptor {
    /// File name of the CSV input inside the results directory.
    pub fn input_file(&self) -> String {
        format!("{}.csv", self.stem)
    }

    /// File names of every chart this experiment writes, primary first.
    pub fn artifacts(&self) -> Vec<String> {
        match self.recipe {
            Recipe::Heatmap { .. } => vec![
                format!("{}.svg", self.stem),
                format!("{}_3d.svg", self.stem),
            ],
            _ => vec![format!("{}.svg", self.stem)],
        }
    }
}

const BANDWIDTH_LABEL: &str = "Bandwidth (GB/s)";

/// The six sweeps, in execution order.
pub static EXPERIMENTS: [ExperimentDescriptor; 6] = [
    ExperimentDescriptor {
        id: ExperimentId::ThreadsPerBlock,
        name: "Threads per Block",
        stem: "exp1_threads_per_block",
        columns: ThreadsPerBlockRecord::COLUMNS,
        shape: TableShape::List,
        recipe: Recipe::Line {
            scale: AxisScale::Log2,
            unit: "threads",
        },
        labels: ChartLabels {
            title: "Memory Bandwidth vs Threads per Block",
            subtitle: Some("(Single Block)"),
            x_label: "Threads per Block",
            y_label: BANDWIDTH_LABEL,
        },
        style: SeriesStyle {
            color: "#2E86AB",
            marker: Marker::Circle,
        },
    },
    ExperimentDescriptor {
        id: ExperimentId::BlocksPerGrid,
        name: "Blocks per Grid",
        stem: "exp2_blocks_per_grid",
        columns: BlocksPerGridRecord::COLUMNS,
        shape: TableShape::List,
        recipe: Recipe::Line {
            scale: AxisScale::Linear,
            unit: "blocks",
        },
        labels: ChartLabels {
            title: "Memory Bandwidth vs Number of Blocks",
            subtitle: Some("(Fixed Threads per Block)"),
            x_label: "Blocks per Grid",
            y_label: BANDWIDTH_LABEL,
        },
        style: SeriesStyle {
            color: "#A23B72",
            marker: Marker::Square,
        },
    },
    ExperimentDescriptor {
        id: ExperimentId::GridOptimization,
        name: "2D Optimization",
        stem: "exp3_2d_optimization",
        columns: GridRecord::COLUMNS,
        shape: TableShape::Grid,
        recipe: Recipe::Heatmap {
            surface_title: "3D View: Memory Bandwidth Optimization",
        },
        labels: ChartLabels {
            title: "Memory Bandwidth Heatmap",
            subtitle: Some("(Threads per Block \u{d7} Blocks per Grid)"),
            x_label: "Blocks per Grid",
            y_label: "Threads per Block",
        },
        style: SeriesStyle {
            color: "#0000FF",
            marker: Marker::Square,
        },
    },
    ExperimentDescriptor {
        id: ExperimentId::StrideComparison,
        name: "Stride Comparison",
        stem: "exp4_stride_comparison",
        columns: StrideRecord::COLUMNS,
        shape: TableShape::List,
        recipe: Recipe::DualScale {
            log_color: "#C73E1D",
        },
        labels: ChartLabels {
            title: "Memory Bandwidth vs Stride",
            subtitle: None,
            x_label: "Stride",
            y_label: BANDWIDTH_LABEL,
        },
        style: SeriesStyle {
            color: "#F18F01",
            marker: Marker::Circle,
        },
    },
    ExperimentDescriptor {
        id: ExperimentId::OffsetComparison,
        name: "Offset Effect",
        stem: "exp5_offset_comparison",
        columns: OffsetRecord::COLUMNS,
        shape: TableShape::List,
        recipe: Recipe::Threshold { alignment: 32 },
        labels: ChartLabels {
            title: "Memory Bandwidth vs Access Offset",
            subtitle: None,
            x_label: "Offset (elements)",
            y_label: BANDWIDTH_LABEL,
        },
        style: SeriesStyle {
            color: "#6A4C93",
            marker: Marker::Diamond,
        },
    },
    ExperimentDescriptor {
        id: ExperimentId::MemorySize,
        name: "Memory Size Effect",
        stem: "exp6_memory_size",
        columns: MemorySizeRecord::COLUMNS,
        shape: TableShape::List,
        recipe: Recipe::Line {
            scale: AxisScale::Log2,
            unit: "MB",
        },
        labels: ChartLabels {
            title: "Memory Bandwidth vs Transfer Size",
            subtitle: None,
            x_label: "Memory Size (MB)",
            y_label: BANDWIDTH_LABEL,
        },
        style: SeriesStyle {
            color: "#1E847F",
            marker: Marker::Circle,
        },
    },
];

/// Looks up the static descriptor of an experiment.
pub fn descriptor(id: ExperimentId) -> &'static ExperimentDescriptor {
    &EXPERIMENTS[usize::from(id.number()) - 1]
}
