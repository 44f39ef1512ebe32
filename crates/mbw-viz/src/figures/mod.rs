//! SVG chart renderers, one per experiment shape.
//!
//! Every renderer borrows its inputs and returns the finished document; the
//! pipeline decides where it is written.

mod axis;
mod heatmap;
mod line;
mod panels;
mod surface;
mod svg;
mod threshold;

use mbw_core::errors::{ErrorInfo, VizError};
use serde::{Deserialize, Serialize};

use crate::experiments::{ChartLabels, ExperimentDescriptor, SweepRecord};

pub use heatmap::render_heatmap;
pub use line::render_line_chart;
pub use panels::render_dual_scale;
pub use surface::render_surface;
pub use threshold::render_threshold_chart;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub font_size: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
            font_size: 12.0,
        }
    }
}

impl FigureConfig {
    fn font(&self) -> f64 {
        self.font_size.max(4.0)
    }

    fn scaled(&self, width_factor: f64, height_factor: f64) -> (u32, u32) {
        (
            (f64::from(self.width) * width_factor).round().max(64.0) as u32,
            (f64::from(self.height) * height_factor).round().max(64.0) as u32,
        )
    }
}

/// Fails unless every column the chart plots is carried by `R`.
fn ensure_columns<R: SweepRecord>(descriptor: &ExperimentDescriptor) -> Result<(), VizError> {
    let missing: Vec<&str> = descriptor
        .columns
        .iter()
        .copied()
        .filter(|column| !R::COLUMNS.contains(column))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(VizError::SchemaMismatch(
        ErrorInfo::new("mbw.chart_columns", "table lacks a column the chart plots")
            .with_context("experiment", descriptor.stem)
            .with_context("columns", missing.join(",")),
    ))
}

fn recipe_mismatch(descriptor: &ExperimentDescriptor, expected: &str) -> VizError {
    VizError::SchemaMismatch(
        ErrorInfo::new("mbw.recipe_mismatch", "experiment is not rendered by this chart")
            .with_context("experiment", descriptor.stem)
            .with_context("expected", expected),
    )
}

fn panel_text(labels: &ChartLabels) -> axis::PanelText<'static> {
    axis::PanelText {
        title: labels.title,
        subtitle: labels.subtitle,
        x_label: labels.x_label,
        y_label: labels.y_label,
    }
}
