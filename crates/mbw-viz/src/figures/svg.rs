//! Minimal SVG document builder.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text styling for a single label.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle<'a> {
    pub size: f64,
    pub anchor: Anchor,
    pub bold: bool,
    pub fill: &'a str,
    /// Rotation in degrees around the anchor point.
    pub rotate: f64,
}

impl<'a> TextStyle<'a> {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            anchor: Anchor::Middle,
            bold: false,
            fill: "#222222",
            rotate: 0.0,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn fill(mut self, fill: &'a str) -> Self {
        self.fill = fill;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }
}

/// Stroke styling for lines and outlines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub opacity: f64,
    pub dashed: bool,
}

impl<'a> Stroke<'a> {
    pub fn new(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dashed: false,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    fn attrs(&self) -> String {
        let mut out = format!(
            "stroke='{}' stroke-width='{:.2}'",
            self.color, self.width
        );
        if self.opacity < 1.0 {
            let _ = write!(out, " stroke-opacity='{:.2}'", self.opacity);
        }
        if self.dashed {
            out.push_str(" stroke-dasharray='6,4'");
        }
        out
    }
}

pub(crate) struct SvgDocument {
    width: f64,
    height: f64,
    parts: Vec<String>,
}

impl SvgDocument {
    /// Starts a document with a white background.
    pub fn new(width: u32, height: u32) -> Self {
        let mut doc = Self {
            width: f64::from(width),
            height: f64::from(height),
            parts: Vec::new(),
        };
        doc.parts.push(format!(
            "<rect x='0' y='0' width='{w}' height='{h}' fill='#ffffff' />",
            w = width,
            h = height
        ));
        doc
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.parts.push(format!(
            "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='{}' />",
            x,
            y,
            w.max(0.0),
            h.max(0.0),
            fill
        ));
    }

    pub fn outline(&mut self, x: f64, y: f64, w: f64, h: f64, stroke: Stroke<'_>) {
        self.parts.push(format!(
            "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' {} />",
            x,
            y,
            w.max(0.0),
            h.max(0.0),
            stroke.attrs()
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>) {
        self.parts.push(format!(
            "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' {} />",
            x1,
            y1,
            x2,
            y2,
            stroke.attrs()
        ));
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: Stroke<'_>) {
        if points.len() < 2 {
            return;
        }
        self.parts.push(format!(
            "<polyline points='{}' fill='none' stroke-linejoin='round' {} />",
            point_list(points),
            stroke.attrs()
        ));
    }

    pub fn polygon(&mut self, points: &[(f64, f64)], fill: &str, stroke: Option<Stroke<'_>>) {
        let stroke = stroke.map(|s| s.attrs()).unwrap_or_default();
        self.parts.push(format!(
            "<polygon points='{}' fill='{}' {} />",
            point_list(points),
            fill,
            stroke
        ));
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.parts.push(format!(
            "<circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{}' />",
            cx, cy, r, fill
        ));
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle<'_>) {
        let mut attrs = format!(
            "x='{:.2}' y='{:.2}' font-family='sans-serif' font-size='{:.1}' text-anchor='{}' fill='{}'",
            x,
            y,
            style.size,
            style.anchor.as_str(),
            style.fill
        );
        if style.bold {
            attrs.push_str(" font-weight='bold'");
        }
        if style.rotate != 0.0 {
            let _ = write!(attrs, " transform='rotate({:.1} {:.2} {:.2})'", style.rotate, x, y);
        }
        self.parts
            .push(format!("<text {}>{}</text>", attrs, escape(content)));
    }

    pub fn finish(self) -> String {
        let mut out = format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
            w = self.width,
            h = self.height
        );
        for part in self.parts {
            out.push_str(&part);
        }
        out.push_str("</svg>");
        out
    }
}

fn point_list(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Piecewise linear colour ramp.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorMap {
    stops: &'static [(u8, u8, u8)],
}

/// Yellow to dark red, for heatmaps.
pub(crate) const YL_OR_RD: ColorMap = ColorMap {
    stops: &[
        (255, 255, 204),
        (254, 217, 118),
        (253, 141, 60),
        (227, 26, 28),
        (128, 0, 38),
    ],
};

/// Purple through teal to yellow, for surfaces.
pub(crate) const VIRIDIS: ColorMap = ColorMap {
    stops: &[
        (68, 1, 84),
        (59, 82, 139),
        (33, 145, 140),
        (94, 201, 98),
        (253, 231, 37),
    ],
};

impl ColorMap {
    /// Colour at `t` in `[0, 1]`, clamped.
    pub fn sample(&self, t: f64) -> String {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = self.stops.len() - 1;
        let pos = t * segments as f64;
        let idx = (pos.floor() as usize).min(segments - 1);
        let frac = pos - idx as f64;
        let (a, b) = (self.stops[idx], self.stops[idx + 1]);
        let mix = |lo: u8, hi: u8| -> u8 {
            (f64::from(lo) + (f64::from(hi) - f64::from(lo)) * frac).round() as u8
        };
        format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}
