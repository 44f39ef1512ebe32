//! Axis scaling, ticks and the shared cartesian panel.

use crate::experiments::{AxisScale, Marker, SeriesStyle};

use super::svg::{Anchor, Stroke, SvgDocument, TextStyle};

/// Pixel rectangle a panel draws into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Inner plotting rectangle of a panel occupying `x..x+w`, `y..y+h`.
    pub fn inset(x: f64, y: f64, w: f64, h: f64, font: f64) -> Self {
        let left = x + font * 6.0;
        let top = y + font * 5.0;
        Self {
            left,
            top,
            width: (x + w - font * 2.0 - left).max(1.0),
            height: (y + h - font * 4.5 - top).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Maps data values onto a pixel interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Axis {
    scale: AxisScale,
    lo: f64,
    hi: f64,
    pixel_lo: f64,
    pixel_hi: f64,
}

impl Axis {
    /// Fits `values` with a 5% margin. Empty input gets a unit span; a span
    /// too narrow to resolve at the values' magnitude is widened around its
    /// midpoint.
    pub fn fit(values: &[f64], scale: AxisScale, pixel_lo: f64, pixel_hi: f64) -> Self {
        let transformed: Vec<f64> = values.iter().filter_map(|v| transform(scale, *v)).collect();
        let (mut lo, mut hi) = transformed
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        if !lo.is_finite() || !hi.is_finite() {
            lo = 0.0;
            hi = 1.0;
        }
        let magnitude = lo.abs().max(hi.abs());
        if hi - lo < 1e-9 || hi - lo <= magnitude * 1e-9 {
            let half = (magnitude * 1e-6).max(0.5);
            let mid = lo / 2.0 + hi / 2.0;
            lo = mid - half;
            hi = mid + half;
        }
        let pad = (hi - lo) * 0.05;
        Self {
            scale,
            lo: lo - pad,
            hi: hi + pad,
            pixel_lo,
            pixel_hi,
        }
    }

    /// Pixel coordinate of `value`; `None` when it cannot sit on a log axis.
    pub fn map(&self, value: f64) -> Option<f64> {
        let t = transform(self.scale, value)?;
        Some(self.pixel_lo + (t - self.lo) / (self.hi - self.lo) * (self.pixel_hi - self.pixel_lo))
    }

    /// Tick positions: the data itself on log2 axes, rounded steps otherwise.
    pub fn ticks(&self, data: &[f64]) -> Vec<f64> {
        match self.scale {
            AxisScale::Log2 => {
                let mut ticks: Vec<f64> = data.iter().copied().filter(|v| *v > 0.0).collect();
                ticks.sort_by(|a, b| a.total_cmp(b));
                ticks.dedup();
                ticks
            }
            AxisScale::Linear => nice_ticks(self.lo, self.hi, 6),
        }
    }
}

fn transform(scale: AxisScale, value: f64) -> Option<f64> {
    match scale {
        AxisScale::Linear => Some(value),
        AxisScale::Log2 if value > 0.0 => Some(value.log2()),
        AxisScale::Log2 => None,
    }
}

/// Round-numbered ticks covering `lo..=hi`, at most `4 * target + 2` of them.
/// Stops early once the step no longer moves the tick at this magnitude.
pub(crate) fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let span = (hi - lo).abs().max(1e-9);
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude);
    let limit = target.max(1) * 4 + 2;
    let mut ticks = Vec::new();
    let mut tick = (lo / step).ceil() * step;
    while tick <= hi + step * 1e-6 && ticks.len() < limit {
        ticks.push(if tick.abs() < step * 1e-9 { 0.0 } else { tick });
        let next = tick + step;
        if next <= tick {
            break;
        }
        tick = next;
    }
    ticks
}

/// Integers print bare, everything else with up to two decimals.
pub(crate) fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Fixed text of one cartesian panel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelText<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Axes, grid, labels and a marked line for `points`, which must be sorted by x.
pub(crate) fn draw_series_panel(
    doc: &mut SvgDocument,
    area: PlotArea,
    points: &[(f64, f64)],
    scale: AxisScale,
    style: SeriesStyle,
    text: PanelText<'_>,
    font: f64,
) -> (Axis, Axis) {
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let x_axis = Axis::fit(&xs, scale, area.left, area.right());
    let y_axis = Axis::fit(&ys, AxisScale::Linear, area.bottom(), area.top);
    draw_frame(doc, area, &x_axis, &y_axis, &xs, text, font);

    let pixels: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|(x, y)| Some((x_axis.map(*x)?, y_axis.map(*y)?)))
        .collect();
    doc.polyline(&pixels, Stroke::new(style.color, 2.0));
    for (px, py) in &pixels {
        draw_marker(doc, *px, *py, style.marker, font * 0.4, style.color);
    }
    (x_axis, y_axis)
}

fn draw_frame(
    doc: &mut SvgDocument,
    area: PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    xs: &[f64],
    text: PanelText<'_>,
    font: f64,
) {
    doc.rect(area.left, area.top, area.width, area.height, "#eaeaf2");
    let grid = Stroke::new("#ffffff", 1.0);
    let tick_style = TextStyle::new(font * 0.85);
    for tick in x_axis.ticks(xs) {
        if let Some(px) = x_axis.map(tick) {
            doc.line(px, area.top, px, area.bottom(), grid);
            doc.text(px, area.bottom() + font * 1.3, &format_tick(tick), tick_style);
        }
    }
    for tick in y_axis.ticks(&[]) {
        if let Some(py) = y_axis.map(tick) {
            if py < area.top - 0.5 || py > area.bottom() + 0.5 {
                continue;
            }
            doc.line(area.left, py, area.right(), py, grid);
            doc.text(
                area.left - font * 0.5,
                py + font * 0.3,
                &format_tick(tick),
                tick_style.anchor(Anchor::End),
            );
        }
    }
    doc.outline(area.left, area.top, area.width, area.height, Stroke::new("#444444", 1.0));

    let center_x = area.left + area.width / 2.0;
    let title_y = if text.subtitle.is_some() {
        area.top - font * 2.6
    } else {
        area.top - font * 1.2
    };
    doc.text(center_x, title_y, text.title, TextStyle::new(font * 1.15).bold());
    if let Some(subtitle) = text.subtitle {
        doc.text(
            center_x,
            title_y + font * 1.3,
            subtitle,
            TextStyle::new(font * 1.15).bold(),
        );
    }
    doc.text(
        center_x,
        area.bottom() + font * 3.0,
        text.x_label,
        TextStyle::new(font).bold(),
    );
    let label_x = area.left - font * 4.5;
    let label_y = area.top + area.height / 2.0;
    doc.text(
        label_x,
        label_y,
        text.y_label,
        TextStyle::new(font).bold().rotate(-90.0),
    );
}

pub(crate) fn draw_marker(
    doc: &mut SvgDocument,
    x: f64,
    y: f64,
    marker: Marker,
    radius: f64,
    color: &str,
) {
    match marker {
        Marker::Circle => doc.circle(x, y, radius, color),
        Marker::Square => doc.rect(x - radius, y - radius, radius * 2.0, radius * 2.0, color),
        Marker::Diamond => doc.polygon(
            &[(x, y - radius * 1.2), (x + radius, y), (x, y + radius * 1.2), (x - radius, y)],
            color,
            None,
        ),
    }
}

/// Five pointed star centred on `(x, y)`.
pub(crate) fn draw_star(doc: &mut SvgDocument, x: f64, y: f64, radius: f64, color: &str) {
    let points: Vec<(f64, f64)> = (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { radius * 0.4 };
            let angle = std::f64::consts::PI / 5.0 * i as f64 - std::f64::consts::FRAC_PI_2;
            (x + r * angle.cos(), y + r * angle.sin())
        })
        .collect();
    doc.polygon(&points, color, None);
}

/// Points sorted by x, stable for equal x.
pub(crate) fn sorted_points(mut points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}
