//! Charts and a summary report for CUDA memory bandwidth benchmark sweeps.

pub mod config;
pub mod console;
pub mod experiments;
pub mod figures;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod table;

pub use config::{load_config, PipelineConfig};
pub use experiments::{descriptor, ExperimentDescriptor, ExperimentId, EXPERIMENTS};
pub use figures::FigureConfig;
pub use metrics::{argmax_bandwidth, bandwidth_range, degradation_series, pivot, Grid, Optimum};
pub use pipeline::{run_pipeline, PipelineSummary, REPORT_FILE};
pub use report::{compose, ExperimentMetrics};
pub use table::{load, ResultTable};
