use mbw_core::errors::VizError;

use crate::experiments::{AxisScale, ExperimentDescriptor, Recipe, SeriesStyle, SingleParam};
use crate::table::ResultTable;

use super::axis::{draw_series_panel, sorted_points, PanelText, PlotArea};
use super::svg::SvgDocument;
use super::{ensure_columns, recipe_mismatch, FigureConfig};

/// The same series on a linear (left) and a log2 (right) x-axis.
pub fn render_dual_scale<R: SingleParam>(
    table: &ResultTable<R>,
    descriptor: &ExperimentDescriptor,
    config: &FigureConfig,
) -> Result<String, VizError> {
    ensure_columns::<R>(descriptor)?;
    let Recipe::DualScale { log_color } = descriptor.recipe else {
        return Err(recipe_mismatch(descriptor, "dual-scale"));
    };
    let font = config.font();
    let (width, height) = config.scaled(1.25, 0.75);
    let mut doc = SvgDocument::new(width, height);
    let half = doc.width() / 2.0;
    let points = sorted_points(
        table
            .rows()
            .iter()
            .map(|row| (row.param(), row.bandwidth()))
            .collect(),
    );
    let labels = &descriptor.labels;
    let panels = [
        (AxisScale::Linear, "Linear Scale", descriptor.style.color),
        (AxisScale::Log2, "Log Scale", log_color),
    ];
    for (idx, (scale, suffix, color)) in panels.into_iter().enumerate() {
        let title = format!("{} ({suffix})", labels.title);
        let area = PlotArea::inset(half * idx as f64, 0.0, half, doc.height(), font);
        draw_series_panel(
            &mut doc,
            area,
            &points,
            scale,
            SeriesStyle {
                color,
                marker: descriptor.style.marker,
            },
            PanelText {
                title: &title,
                subtitle: labels.subtitle,
                x_label: labels.x_label,
                y_label: labels.y_label,
            },
            font,
        );
    }
    Ok(doc.finish())
}
