use mbw_core::errors::VizError;

use crate::experiments::{ExperimentDescriptor, Recipe};
use crate::metrics::Grid;

use super::axis::{format_tick, nice_ticks};
use super::svg::{Anchor, Stroke, SvgDocument, TextStyle, YL_OR_RD};
use super::{recipe_mismatch, FigureConfig};

const COLORBAR_LABEL: &str = "Bandwidth (GB/s)";
const COLORBAR_STEPS: usize = 48;

/// Colour-mapped grid with every cell value printed and `highlight` outlined.
///
/// Row 0 is drawn at the top, matching the row order of the grid.
pub fn render_heatmap(
    grid: &Grid,
    highlight: Option<(usize, usize)>,
    descriptor: &ExperimentDescriptor,
    config: &FigureConfig,
) -> Result<String, VizError> {
    if !matches!(descriptor.recipe, Recipe::Heatmap { .. }) {
        return Err(recipe_mismatch(descriptor, "heatmap"));
    }
    let font = config.font();
    let mut doc = SvgDocument::new(config.width, config.height);
    let left = font * 6.0;
    let top = font * 5.0;
    let width = (doc.width() - left - font * 9.0).max(1.0);
    let height = (doc.height() - top - font * 4.5).max(1.0);
    let (rows, cols) = (grid.rows(), grid.cols());
    let cell_w = width / cols.max(1) as f64;
    let cell_h = height / rows.max(1) as f64;
    let range = grid.range();
    let span = (range.max - range.min).max(1e-9);
    let value_style = TextStyle::new((font * 0.7).min(cell_h * 0.45)).fill("#000000");

    for row in 0..rows {
        for col in 0..cols {
            let value = grid.value(row, col);
            let x = left + col as f64 * cell_w;
            let y = top + row as f64 * cell_h;
            doc.rect(x, y, cell_w, cell_h, &YL_OR_RD.sample((value - range.min) / span));
            doc.text(
                x + cell_w / 2.0,
                y + cell_h / 2.0 + value_style.size * 0.35,
                &format!("{value:.1}"),
                value_style,
            );
        }
    }
    if let Some((row, col)) = highlight.filter(|(r, c)| *r < rows && *c < cols) {
        doc.outline(
            left + col as f64 * cell_w,
            top + row as f64 * cell_h,
            cell_w,
            cell_h,
            Stroke::new(descriptor.style.color, 3.0),
        );
    }

    let tick_style = TextStyle::new(font * 0.85);
    for (col, key) in grid.col_keys.iter().enumerate() {
        doc.text(
            left + (col as f64 + 0.5) * cell_w,
            top + height + font * 1.3,
            &format_tick(*key),
            tick_style,
        );
    }
    for (row, key) in grid.row_keys.iter().enumerate() {
        doc.text(
            left - font * 0.5,
            top + (row as f64 + 0.5) * cell_h + font * 0.3,
            &format_tick(*key),
            tick_style.anchor(Anchor::End),
        );
    }

    let labels = &descriptor.labels;
    let center_x = left + width / 2.0;
    doc.text(center_x, top - font * 2.6, labels.title, TextStyle::new(font * 1.15).bold());
    if let Some(subtitle) = labels.subtitle {
        doc.text(center_x, top - font * 1.3, subtitle, TextStyle::new(font * 1.15).bold());
    }
    doc.text(center_x, top + height + font * 3.0, labels.x_label, TextStyle::new(font).bold());
    doc.text(
        left - font * 4.5,
        top + height / 2.0,
        labels.y_label,
        TextStyle::new(font).bold().rotate(-90.0),
    );

    draw_colorbar(&mut doc, left + width + font * 1.5, top, height, range.min, range.max, font);
    Ok(doc.finish())
}

fn draw_colorbar(doc: &mut SvgDocument, x: f64, top: f64, height: f64, min: f64, max: f64, font: f64) {
    let bar_w = font * 1.5;
    let step_h = height / COLORBAR_STEPS as f64;
    for step in 0..COLORBAR_STEPS {
        let t = 1.0 - (step as f64 + 0.5) / COLORBAR_STEPS as f64;
        doc.rect(x, top + step as f64 * step_h, bar_w, step_h + 0.5, &YL_OR_RD.sample(t));
    }
    doc.outline(x, top, bar_w, height, Stroke::new("#444444", 1.0));
    let span = (max - min).max(1e-9);
    let tick_style = TextStyle::new(font * 0.8).anchor(Anchor::Start);
    for tick in nice_ticks(min, max, 5) {
        if tick < min - 1e-9 || tick > max + 1e-9 {
            continue;
        }
        let y = top + (1.0 - (tick - min) / span) * height;
        doc.line(x + bar_w, y, x + bar_w + font * 0.3, y, Stroke::new("#444444", 1.0));
        doc.text(x + bar_w + font * 0.5, y + font * 0.3, &format_tick(tick), tick_style);
    }
    doc.text(
        x + bar_w + font * 4.5,
        top + height / 2.0,
        COLORBAR_LABEL,
        TextStyle::new(font * 0.9).rotate(90.0),
    );
}
