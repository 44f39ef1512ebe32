use mbw_core::errors::VizError;

use crate::experiments::{AxisScale, ExperimentDescriptor, Recipe, SingleParam};
use crate::table::ResultTable;

use super::axis::{draw_series_panel, sorted_points, PlotArea};
use super::svg::{Stroke, SvgDocument};
use super::{ensure_columns, panel_text, recipe_mismatch, FigureConfig};

const HIGHLIGHT_COLOR: &str = "#FF0000";

/// Line chart with a dashed vertical marker at every x in `highlights`.
/// Highlights falling outside the plot area are skipped.
pub fn render_threshold_chart<R: SingleParam>(
    table: &ResultTable<R>,
    highlights: &[f64],
    descriptor: &ExperimentDescriptor,
    config: &FigureConfig,
) -> Result<String, VizError> {
    ensure_columns::<R>(descriptor)?;
    let Recipe::Threshold { .. } = descriptor.recipe else {
        return Err(recipe_mismatch(descriptor, "threshold"));
    };
    let font = config.font();
    let mut doc = SvgDocument::new(config.width, config.height);
    let area = PlotArea::inset(0.0, 0.0, doc.width(), doc.height(), font);
    let points = sorted_points(
        table
            .rows()
            .iter()
            .map(|row| (row.param(), row.bandwidth()))
            .collect(),
    );
    let (x_axis, _) = draw_series_panel(
        &mut doc,
        area,
        &points,
        AxisScale::Linear,
        descriptor.style,
        panel_text(&descriptor.labels),
        font,
    );
    let stroke = Stroke::new(HIGHLIGHT_COLOR, 1.5).opacity(0.2).dashed();
    for x in highlights {
        let Some(px) = x_axis.map(*x) else {
            continue;
        };
        if px < area.left || px > area.right() {
            continue;
        }
        doc.line(px, area.top, px, area.bottom(), stroke);
    }
    Ok(doc.finish())
}
