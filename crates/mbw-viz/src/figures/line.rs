use mbw_core::errors::VizError;

use crate::experiments::{ExperimentDescriptor, Recipe, SingleParam};
use crate::metrics::Optimum;
use crate::table::ResultTable;

use super::axis::{draw_series_panel, draw_star, format_tick, sorted_points, PlotArea};
use super::svg::{Anchor, Stroke, SvgDocument, TextStyle};
use super::{ensure_columns, panel_text, recipe_mismatch, FigureConfig};

const OPTIMUM_COLOR: &str = "#FF0000";

/// Bandwidth against the swept parameter with the optimum starred.
pub fn render_line_chart<R: SingleParam>(
    table: &ResultTable<R>,
    optimum: &Optimum<R>,
    descriptor: &ExperimentDescriptor,
    config: &FigureConfig,
) -> Result<String, VizError> {
    ensure_columns::<R>(descriptor)?;
    let Recipe::Line { scale, unit } = descriptor.recipe else {
        return Err(recipe_mismatch(descriptor, "line"));
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
    let (x_axis, y_axis) = draw_series_panel(
        &mut doc,
        area,
        &points,
        scale,
        descriptor.style,
        panel_text(&descriptor.labels),
        font,
    );

    let param = optimum.record.param();
    if let (Some(px), Some(py)) = (x_axis.map(param), y_axis.map(optimum.bandwidth())) {
        draw_star(&mut doc, px, py, font * 1.1, OPTIMUM_COLOR);
    }
    let label = format!(
        "Optimal: {} {} ({:.2} GB/s)",
        format_tick(param),
        unit,
        optimum.bandwidth()
    );
    draw_legend(&mut doc, area, &label, font);
    Ok(doc.finish())
}

fn draw_legend(doc: &mut SvgDocument, area: PlotArea, label: &str, font: f64) {
    let width = font * (2.5 + 0.55 * label.chars().count() as f64);
    let height = font * 2.0;
    let x = area.right() - width - font * 0.5;
    let y = area.top + font * 0.5;
    doc.rect(x, y, width, height, "#ffffff");
    doc.outline(x, y, width, height, Stroke::new("#cccccc", 1.0));
    draw_star(doc, x + font, y + height / 2.0, font * 0.6, OPTIMUM_COLOR);
    doc.text(
        x + font * 2.0,
        y + height / 2.0 + font * 0.35,
        label,
        TextStyle::new(font * 0.9).anchor(Anchor::Start),
    );
}
