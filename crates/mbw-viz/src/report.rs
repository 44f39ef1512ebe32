//! Plain text summary of experiments 1 to 4.
//!
//! Offset and transfer size sweeps are chart-only and never appear here.

use serde::{Deserialize, Serialize};

use crate::experiments::{ExperimentId, StrideRecord};
use crate::metrics::{BandwidthRange, DegradationSeries};

const RULE_WIDTH: usize = 70;

/// Static conclusions appended to every report.
pub const KEY_FINDINGS: [&str; 5] = [
    "Memory coalescing is critical for optimal bandwidth",
    "Thread block size affects occupancy and performance",
    "Sufficient parallelism (blocks) needed to saturate memory",
    "Strided access causes significant performance degradation",
    "Memory alignment affects coalescing efficiency",
];

/// Optimum and spread of a single-parameter sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimumSummary {
    pub parameter: u32,
    pub bandwidth: f64,
    pub range: BandwidthRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    pub threads_per_block: u32,
    pub blocks_per_grid: u32,
    pub bandwidth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StridePoint {
    pub stride: u32,
    pub bandwidth: f64,
    pub degradation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrideSummary {
    pub coalesced_bandwidth: f64,
    /// Rows with stride > 1, in input order.
    pub strided: Vec<StridePoint>,
}

impl StrideSummary {
    pub fn from_series(series: &DegradationSeries<StrideRecord>) -> Self {
        Self {
            coalesced_bandwidth: series.baseline_bandwidth,
            strided: series
                .excluding_baseline()
                .filter(|point| point.record.stride > 1)
                .map(|point| StridePoint {
                    stride: point.record.stride,
                    bandwidth: point.record.bandwidth_gbps,
                    degradation: point.percent,
                })
                .collect(),
        }
    }
}

/// Metrics an experiment contributes to the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExperimentMetrics {
    ThreadsPerBlock(OptimumSummary),
    BlocksPerGrid(OptimumSummary),
    Grid(GridSummary),
    Stride(StrideSummary),
}

impl ExperimentMetrics {
    pub fn id(&self) -> ExperimentId {
        match self {
            ExperimentMetrics::ThreadsPerBlock(_) => ExperimentId::ThreadsPerBlock,
            ExperimentMetrics::BlocksPerGrid(_) => ExperimentId::BlocksPerGrid,
            ExperimentMetrics::Grid(_) => ExperimentId::GridOptimization,
            ExperimentMetrics::Stride(_) => ExperimentId::StrideComparison,
        }
    }

    pub fn section(&self) -> ReportSection {
        let (heading, lines) = match self {
            ExperimentMetrics::ThreadsPerBlock(summary) => (
                "Threads per Block Optimization",
                optimum_lines(summary, "threads/block"),
            ),
            ExperimentMetrics::BlocksPerGrid(summary) => {
                ("Blocks per Grid Optimization", optimum_lines(summary, "blocks"))
            }
            ExperimentMetrics::Grid(summary) => (
                "2D Optimization",
                vec![
                    format!(
                        "Optimal: {} threads/block, {} blocks",
                        summary.threads_per_block, summary.blocks_per_grid
                    ),
                    format!("Bandwidth: {:.2} GB/s", summary.bandwidth),
                ],
            ),
            ExperimentMetrics::Stride(summary) => {
                let mut lines = vec![format!(
                    "Coalesced (stride=1): {:.2} GB/s",
                    summary.coalesced_bandwidth
                )];
                lines.extend(summary.strided.iter().map(|point| {
                    format!(
                        "Stride {}: {:.2} GB/s ({:.1}% degradation)",
                        point.stride, point.bandwidth, point.degradation
                    )
                }));
                ("Stride Impact", lines)
            }
        };
        ReportSection {
            id: self.id(),
            heading: format!("Experiment {}: {}", self.id().number(), heading),
            lines,
        }
    }
}

fn optimum_lines(summary: &OptimumSummary, unit: &str) -> Vec<String> {
    vec![
        format!("Optimal: {} {}", summary.parameter, unit),
        format!("Bandwidth: {:.2} GB/s", summary.bandwidth),
        format!(
            "Range: {:.2} - {:.2} GB/s",
            summary.range.min, summary.range.max
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub id: ExperimentId,
    pub heading: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    fn render(&self, out: &mut String) {
        out.push_str(&self.heading);
        out.push('\n');
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
}

/// Renders the full report; sections are emitted in experiment order
/// regardless of the order of `metrics`.
pub fn compose(metrics: &[ExperimentMetrics]) -> String {
    let mut sections: Vec<ReportSection> = metrics.iter().map(ExperimentMetrics::section).collect();
    sections.sort_by_key(|section| section.id);

    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&rule);
    out.push_str("\nCUDA MEMORY BENCHMARK SUMMARY REPORT\n");
    out.push_str(&rule);
    out.push_str("\n\n");
    for section in &sections {
        section.render(&mut out);
    }
    out.push_str(&rule);
    out.push_str("\nKEY FINDINGS:\n");
    out.push_str(&rule);
    out.push('\n');
    for (idx, finding) in KEY_FINDINGS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, finding));
    }
    out
}
