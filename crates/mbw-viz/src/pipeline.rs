use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use mbw_core::errors::{ErrorInfo, VizError};

use crate::config::PipelineConfig;
use crate::experiments::{
    BlocksPerGridRecord, ExperimentDescriptor, ExperimentId, GridRecord, MemorySizeRecord,
    OffsetRecord, Recipe, SingleParam, StrideRecord, ThreadsPerBlockRecord, EXPERIMENTS,
};
use crate::figures::{
    render_dual_scale, render_heatmap, render_line_chart, render_surface, render_threshold_chart,
};
use crate::metrics::{
    argmax_bandwidth, bandwidth_range, degradation_series, misaligned_offsets, pivot,
    BandwidthRange, Optimum,
};
use crate::report::{compose, ExperimentMetrics, GridSummary, OptimumSummary, StrideSummary};
use crate::table::{load, ResultTable};

/// File name of the text report inside the output directory.
pub const REPORT_FILE: &str = "summary_report.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    /// Every chart written, in the order it was written.
    pub artifacts: Vec<PathBuf>,
    pub report: PathBuf,
    pub metrics: Vec<ExperimentMetrics>,
}

/// Runs the six experiments in order, then writes the report.
///
/// Progress lines go to `log`. The first failure stops the run; charts that
/// were already written are left in place and no report is produced.
pub fn run_pipeline(
    config: &PipelineConfig,
    log: &mut dyn Write,
) -> Result<PipelineSummary, VizError> {
    fs::create_dir_all(&config.out_dir)
        .map_err(|err| VizError::io("mbw.output_dir", &config.out_dir, err))?;
    let mut run = Run {
        config,
        log,
        artifacts: Vec::new(),
    };
    let mut metrics = Vec::new();
    for descriptor in EXPERIMENTS.iter() {
        run.note(format_args!(
            "Plotting Experiment {}: {}...",
            descriptor.id.number(),
            descriptor.name
        ))?;
        if let Some(summary) = run.experiment(descriptor)? {
            metrics.push(summary);
        }
    }

    run.note("\nGenerating summary report...")?;
    let report = config.out_dir.join(REPORT_FILE);
    fs::write(&report, compose(&metrics))
        .map_err(|err| VizError::io("mbw.report_write", &report, err))?;
    run.note(format_args!("  Summary report saved to {}", report.display()))?;
    Ok(PipelineSummary {
        artifacts: run.artifacts,
        report,
        metrics,
    })
}

struct Run<'a> {
    config: &'a PipelineConfig,
    log: &'a mut dyn Write,
    artifacts: Vec<PathBuf>,
}

impl Run<'_> {
    fn note(&mut self, line: impl Display) -> Result<(), VizError> {
        writeln!(self.log, "{line}")
            .map_err(|err| VizError::Io(ErrorInfo::new("mbw.progress_log", err.to_string())))
    }

    fn input(&self, descriptor: &ExperimentDescriptor) -> PathBuf {
        self.config.results_dir.join(descriptor.input_file())
    }

    fn write(&mut self, name: &str, svg: &str) -> Result<(), VizError> {
        let path = self.config.out_dir.join(name);
        fs::write(&path, svg).map_err(|err| VizError::io("mbw.chart_write", &path, err))?;
        self.artifacts.push(path);
        Ok(())
    }

    fn experiment(
        &mut self,
        descriptor: &ExperimentDescriptor,
    ) -> Result<Option<ExperimentMetrics>, VizError> {
        match descriptor.id {
            ExperimentId::ThreadsPerBlock => {
                let (optimum, range) = self.line::<ThreadsPerBlockRecord>(descriptor)?;
                let threads = optimum.record.threads_per_block;
                self.note(format_args!(
                    "  Optimal configuration: {threads} threads/block, {:.2} GB/s",
                    optimum.bandwidth()
                ))?;
                Ok(Some(ExperimentMetrics::ThreadsPerBlock(OptimumSummary {
                    parameter: threads,
                    bandwidth: optimum.bandwidth(),
                    range,
                })))
            }
            ExperimentId::BlocksPerGrid => {
                let (optimum, range) = self.line::<BlocksPerGridRecord>(descriptor)?;
                let blocks = optimum.record.blocks_per_grid;
                self.note(format_args!(
                    "  Optimal configuration: {blocks} blocks, {:.2} GB/s",
                    optimum.bandwidth()
                ))?;
                Ok(Some(ExperimentMetrics::BlocksPerGrid(OptimumSummary {
                    parameter: blocks,
                    bandwidth: optimum.bandwidth(),
                    range,
                })))
            }
            ExperimentId::GridOptimization => self.grid(descriptor).map(Some),
            ExperimentId::StrideComparison => self.stride(descriptor).map(Some),
            ExperimentId::OffsetComparison => {
                self.offset(descriptor)?;
                Ok(None)
            }
            ExperimentId::MemorySize => {
                let (optimum, range) = self.line::<MemorySizeRecord>(descriptor)?;
                self.note(format_args!(
                    "  Peak: {:.2} GB/s at {} MB (range {:.2} - {:.2} GB/s)",
                    optimum.bandwidth(),
                    optimum.record.memory_size_mb,
                    range.min,
                    range.max
                ))?;
                Ok(None)
            }
        }
    }

    fn line<R: SingleParam>(
        &mut self,
        descriptor: &ExperimentDescriptor,
    ) -> Result<(Optimum<R>, BandwidthRange), VizError> {
        let table: ResultTable<R> = load(&self.input(descriptor))?;
        let optimum = argmax_bandwidth(&table);
        let range = bandwidth_range(&table);
        let svg = render_line_chart(&table, &optimum, descriptor, &self.config.figure)?;
        self.write(&descriptor.artifacts()[0], &svg)?;
        Ok((optimum, range))
    }

    fn grid(&mut self, descriptor: &ExperimentDescriptor) -> Result<ExperimentMetrics, VizError> {
        let table: ResultTable<GridRecord> = load(&self.input(descriptor))?;
        let grid = pivot(
            &table,
            |row| f64::from(row.threads_per_block),
            |row| f64::from(row.blocks_per_grid),
            |row| row.bandwidth_gbps,
        )?;
        let optimum = argmax_bandwidth(&table);
        let best = optimum.record;
        let cell = grid.position(
            f64::from(best.threads_per_block),
            f64::from(best.blocks_per_grid),
        );
        let artifacts = descriptor.artifacts();
        let figure = &self.config.figure;
        let heatmap = render_heatmap(&grid, cell, descriptor, figure)?;
        let surface = render_surface(&grid, descriptor, figure)?;
        self.write(&artifacts[0], &heatmap)?;
        self.write(&artifacts[1], &surface)?;
        self.note(format_args!(
            "  Optimal: {} threads/block, {} blocks, {:.2} GB/s",
            best.threads_per_block, best.blocks_per_grid, best.bandwidth_gbps
        ))?;
        Ok(ExperimentMetrics::Grid(GridSummary {
            threads_per_block: best.threads_per_block,
            blocks_per_grid: best.blocks_per_grid,
            bandwidth: best.bandwidth_gbps,
        }))
    }

    fn stride(&mut self, descriptor: &ExperimentDescriptor) -> Result<ExperimentMetrics, VizError> {
        let table: ResultTable<StrideRecord> = load(&self.input(descriptor))?;
        let svg = render_dual_scale(&table, descriptor, &self.config.figure)?;
        self.write(&descriptor.artifacts()[0], &svg)?;
        let series = degradation_series(&table, |row| row.stride == 1)?;
        let summary = StrideSummary::from_series(&series);
        self.note(format_args!(
            "  Coalesced bandwidth: {:.2} GB/s",
            summary.coalesced_bandwidth
        ))?;
        for point in &summary.strided {
            self.note(format_args!(
                "  Stride {}: {:.2} GB/s ({:.1}% degradation)",
                point.stride, point.bandwidth, point.degradation
            ))?;
        }
        Ok(ExperimentMetrics::Stride(summary))
    }

    fn offset(&mut self, descriptor: &ExperimentDescriptor) -> Result<(), VizError> {
        let table: ResultTable<OffsetRecord> = load(&self.input(descriptor))?;
        let misaligned = match descriptor.recipe {
            Recipe::Threshold { alignment } => misaligned_offsets(&table, alignment),
            _ => Vec::new(),
        };
        let highlights: Vec<f64> = misaligned.iter().copied().map(f64::from).collect();
        let svg = render_threshold_chart(&table, &highlights, descriptor, &self.config.figure)?;
        self.write(&descriptor.artifacts()[0], &svg)?;
        let aligned = degradation_series(&table, |row| row.offset == 0)?;
        self.note(format_args!(
            "  Aligned (offset=0): {:.2} GB/s",
            aligned.baseline_bandwidth
        ))?;
        self.note(format_args!(
            "  Misaligned offsets highlighted: {}",
            misaligned.len()
        ))
    }
}
