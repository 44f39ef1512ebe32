use mbw_core::errors::VizError;

use crate::experiments::{ExperimentDescriptor, Recipe};
use crate::metrics::Grid;

use super::axis::format_tick;
use super::svg::{Anchor, Stroke, SvgDocument, TextStyle, VIRIDIS};
use super::{recipe_mismatch, FigureConfig};

const AZIMUTH_DEG: f64 = -60.0;
const ELEVATION_DEG: f64 = 30.0;
const Z_LABEL: &str = "Bandwidth (GB/s)";

/// Rotates the unit cube about its vertical axis, then tilts it towards the viewer.
#[derive(Debug, Clone, Copy)]
struct Projection {
    cos_az: f64,
    sin_az: f64,
    cos_el: f64,
    sin_el: f64,
}

impl Projection {
    fn new() -> Self {
        let (az, el) = (AZIMUTH_DEG.to_radians(), ELEVATION_DEG.to_radians());
        Self {
            cos_az: az.cos(),
            sin_az: az.sin(),
            cos_el: el.cos(),
            sin_el: el.sin(),
        }
    }

    /// Screen coordinates (y up) and depth (larger is farther) of a unit-cube point.
    fn project(&self, u: f64, v: f64, w: f64) -> (f64, f64, f64) {
        let (a, b, c) = (u - 0.5, v - 0.5, w - 0.5);
        let x1 = a * self.cos_az - b * self.sin_az;
        let y1 = a * self.sin_az + b * self.cos_az;
        (
            x1,
            c * self.cos_el + y1 * self.sin_el,
            y1 * self.cos_el - c * self.sin_el,
        )
    }
}

/// Maps projected coordinates into the canvas, preserving aspect ratio.
struct Viewport {
    projection: Projection,
    scale: f64,
    mid: (f64, f64),
    center: (f64, f64),
}

impl Viewport {
    fn fit(projection: Projection, left: f64, top: f64, width: f64, height: f64) -> Self {
        let corners: Vec<(f64, f64, f64)> = (0..8u32)
            .map(|i| {
                projection.project(
                    f64::from(i & 1),
                    f64::from((i >> 1) & 1),
                    f64::from((i >> 2) & 1),
                )
            })
            .collect();
        let fold = |pick: fn(&(f64, f64, f64)) -> f64| {
            corners
                .iter()
                .map(pick)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
        };
        let (x_lo, x_hi) = fold(|p| p.0);
        let (y_lo, y_hi) = fold(|p| p.1);
        let scale = (width / (x_hi - x_lo)).min(height / (y_hi - y_lo));
        Self {
            projection,
            scale,
            mid: ((x_lo + x_hi) / 2.0, (y_lo + y_hi) / 2.0),
            center: (left + width / 2.0, top + height / 2.0),
        }
    }

    fn pixel(&self, u: f64, v: f64, w: f64) -> (f64, f64) {
        let (sx, sy, _) = self.projection.project(u, v, w);
        (
            self.center.0 + (sx - self.mid.0) * self.scale,
            self.center.1 - (sy - self.mid.1) * self.scale,
        )
    }

    fn depth(&self, u: f64, v: f64, w: f64) -> f64 {
        self.projection.project(u, v, w).2
    }
}

/// Projected 3D surface of `grid`: columns along x, rows along y, value along z.
pub fn render_surface(
    grid: &Grid,
    descriptor: &ExperimentDescriptor,
    config: &FigureConfig,
) -> Result<String, VizError> {
    let Recipe::Heatmap { surface_title } = descriptor.recipe else {
        return Err(recipe_mismatch(descriptor, "surface"));
    };
    let font = config.font();
    let (width, height) = config.scaled(7.0 / 6.0, 1.0);
    let mut doc = SvgDocument::new(width, height);
    let view = Viewport::fit(
        Projection::new(),
        font * 8.0,
        font * 5.0,
        doc.width() - font * 16.0,
        doc.height() - font * 10.0,
    );

    let normalize = |keys: &[f64]| -> Vec<f64> {
        let lo = keys.first().copied().unwrap_or(0.0);
        let hi = keys.last().copied().unwrap_or(0.0);
        let span = (hi - lo).max(1e-9);
        keys.iter().map(|k| (k - lo) / span).collect()
    };
    let us = normalize(grid.col_keys.as_slice());
    let vs = normalize(grid.row_keys.as_slice());
    let range = grid.range();
    let z_span = (range.max - range.min).max(1e-9);
    let w_at = |row: usize, col: usize| (grid.value(row, col) - range.min) / z_span;

    draw_floor(&mut doc, &view);

    if grid.rows() < 2 || grid.cols() < 2 {
        let mut points = Vec::new();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                points.push(view.pixel(us[col], vs[row], w_at(row, col)));
            }
        }
        doc.polyline(&points, Stroke::new(&VIRIDIS.sample(0.5), 2.0));
    } else {
        let mut quads = Vec::with_capacity((grid.rows() - 1) * (grid.cols() - 1));
        for row in 0..grid.rows() - 1 {
            for col in 0..grid.cols() - 1 {
                let corners = [(row, col), (row, col + 1), (row + 1, col + 1), (row + 1, col)];
                let mean_w = corners.iter().map(|(r, c)| w_at(*r, *c)).sum::<f64>() / 4.0;
                let depth = view.depth(
                    (us[col] + us[col + 1]) / 2.0,
                    (vs[row] + vs[row + 1]) / 2.0,
                    mean_w,
                );
                let points: Vec<(f64, f64)> = corners
                    .iter()
                    .map(|(r, c)| view.pixel(us[*c], vs[*r], w_at(*r, *c)))
                    .collect();
                quads.push((depth, mean_w, points));
            }
        }
        // Painter's order: farthest first.
        quads.sort_by(|a, b| b.0.total_cmp(&a.0));
        let edge = Stroke::new("#333333", 0.5).opacity(0.4);
        for (_, mean_w, points) in &quads {
            doc.polygon(points, &VIRIDIS.sample(*mean_w), Some(edge));
        }
    }

    let labels = &descriptor.labels;
    let tick_style = TextStyle::new(font * 0.8);
    let axis_style = TextStyle::new(font).bold();
    let (x0, y0) = view.pixel(0.0, 0.0, 0.0);
    let (x1, y1) = view.pixel(1.0, 0.0, 0.0);
    doc.text(x0, y0 + font * 1.2, &format_tick(first(&grid.col_keys)), tick_style);
    doc.text(x1, y1 + font * 1.2, &format_tick(last(&grid.col_keys)), tick_style);
    doc.text((x0 + x1) / 2.0, (y0 + y1) / 2.0 + font * 2.6, labels.x_label, axis_style);

    let (x2, y2) = view.pixel(1.0, 1.0, 0.0);
    let side_style = tick_style.anchor(Anchor::Start);
    doc.text(
        x1 + font * 0.6,
        y1 + font * 0.4,
        &format_tick(first(&grid.row_keys)),
        side_style,
    );
    doc.text(
        x2 + font * 0.6,
        y2 + font * 0.4,
        &format_tick(last(&grid.row_keys)),
        side_style,
    );
    doc.text(
        (x1 + x2) / 2.0 + font * 2.5,
        (y1 + y2) / 2.0 + font * 1.5,
        labels.y_label,
        axis_style.anchor(Anchor::Start),
    );

    let (zx0, zy0) = view.pixel(0.0, 1.0, 0.0);
    let (zx1, zy1) = view.pixel(0.0, 1.0, 1.0);
    doc.line(zx0, zy0, zx1, zy1, Stroke::new("#444444", 1.0));
    let z_style = tick_style.anchor(Anchor::End);
    doc.text(zx0 - font * 0.5, zy0, &format!("{:.1}", range.min), z_style);
    doc.text(zx1 - font * 0.5, zy1, &format!("{:.1}", range.max), z_style);
    doc.text(
        zx0 - font * 4.0,
        (zy0 + zy1) / 2.0,
        Z_LABEL,
        axis_style.rotate(-90.0),
    );

    let title_x = doc.width() / 2.0;
    doc.text(
        title_x,
        font * 2.5,
        surface_title,
        TextStyle::new(font * 1.15).bold(),
    );
    Ok(doc.finish())
}

fn draw_floor(doc: &mut SvgDocument, view: &Viewport) {
    let floor: Vec<(f64, f64)> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .iter()
        .map(|(u, v)| view.pixel(*u, *v, 0.0))
        .collect();
    doc.polygon(&floor, "#f2f2f7", Some(Stroke::new("#888888", 1.0)));
}

fn first(keys: &[f64]) -> f64 {
    keys.first().copied().unwrap_or(0.0)
}

fn last(keys: &[f64]) -> f64 {
    keys.last().copied().unwrap_or(0.0)
}
