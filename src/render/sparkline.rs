//! Sparkline geometry and SVG path emission.

use crate::shared::Trend;

/// Geometry and feature flags for one sparkline surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineOptions {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Draw a marker on the most recent point.
    pub show_end_dot: bool,
    /// Fill the area between the line and the bottom margin.
    pub as_area: bool,
    /// Draw a reference line at value zero, clamped into the visible band.
    pub show_zero_line: bool,
    /// Rescale values relative to the first one as `((v / v0) - 1) * 100`
    /// before projection. Falls back to raw values when the first value is
    /// non-finite or zero.
    pub percent_normalized: bool,
}

impl Default for SparklineOptions {
    fn default() -> Self {
        Self {
            width: 140.0,
            height: 32.0,
            margin_x: 2.0,
            margin_y: 2.0,
            show_end_dot: false,
            as_area: false,
            show_zero_line: false,
            percent_normalized: false,
        }
    }
}

/// One projected point in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkPoint {
    pub x: f64,
    pub y: f64,
}

/// Rescale a series relative to its first value, in percent.
///
/// Returns the raw values unchanged when the first value cannot anchor the
/// rescale (non-finite or zero).
pub fn percent_normalize(values: &[f64]) -> Vec<f64> {
    match values.first() {
        Some(&v0) if v0.is_finite() && v0 != 0.0 => {
            values.iter().map(|v| (v / v0 - 1.0) * 100.0).collect()
        }
        _ => values.to_vec(),
    }
}

struct Projection {
    points: Vec<SparkPoint>,
    min: f64,
    range: f64,
}

/// Project values into screen space. `None` with fewer than 2 finite values.
fn project(values: &[f64], opts: &SparklineOptions) -> Option<Projection> {
    let source = if opts.percent_normalized {
        percent_normalize(values)
    } else {
        values.to_vec()
    };

    let filtered: Vec<f64> = source.into_iter().filter(|v| v.is_finite()).collect();
    if filtered.len() < 2 {
        return None;
    }

    let min = filtered.iter().copied().fold(f64::MAX, f64::min);
    let max = filtered.iter().copied().fold(f64::MIN, f64::max);
    // Range floor of 1 keeps a flat series renderable.
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    let step_x = (opts.width - opts.margin_x * 2.0) / (filtered.len() - 1) as f64;
    let inner_height = opts.height - opts.margin_y * 2.0;

    let points = filtered
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let norm = (v - min) / range;
            SparkPoint {
                x: opts.margin_x + i as f64 * step_x,
                y: opts.height - opts.margin_y - norm * inner_height,
            }
        })
        .collect();

    Some(Projection { points, min, range })
}

/// Map a series into evenly spaced screen coordinates.
///
/// X spacing is by index, independent of timestamp gaps — periodic polling
/// makes the intervals equal in practice. Empty output (never an error) with
/// fewer than 2 finite values.
pub fn normalize(values: &[f64], opts: &SparklineOptions) -> Vec<SparkPoint> {
    project(values, opts)
        .map(|p| p.points)
        .unwrap_or_default()
}

/// Emit an SVG sparkline for a series, or `None` when there is nothing to
/// draw. The trend only picks CSS classes; it is supplied by the caller,
/// never recomputed from the series.
pub fn render_sparkline(
    values: &[f64],
    trend: Trend,
    opts: &SparklineOptions,
) -> Option<String> {
    let projection = project(values, opts)?;
    let points = &projection.points;

    let mut line_path = String::new();
    for (i, pt) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { "L" };
        line_path.push_str(&format!("{}{:.2} {:.2} ", cmd, pt.x, pt.y));
    }
    let line_path = line_path.trim_end();

    let first = points[0];
    let last = points[points.len() - 1];
    let bottom_y = opts.height - opts.margin_y;

    let trend_class = trend.css_class();
    let line_class = if trend_class.is_empty() {
        "sparkline-path".to_string()
    } else {
        format!("sparkline-path {}", trend_class)
    };

    let mut svg = format!(
        "<svg viewBox=\"0 0 {} {}\" preserveAspectRatio=\"none\">",
        opts.width, opts.height
    );

    if opts.as_area {
        let area_class = if trend_class.is_empty() {
            "sparkline-area".to_string()
        } else {
            format!("sparkline-area {}", trend_class)
        };
        let mut area_path = format!("M {:.2} {:.2} ", first.x, bottom_y);
        for pt in points {
            area_path.push_str(&format!("L {:.2} {:.2} ", pt.x, pt.y));
        }
        area_path.push_str(&format!("L {:.2} {:.2} Z", last.x, bottom_y));
        svg.push_str(&format!(
            "<path class=\"{}\" d=\"{}\" />",
            area_class, area_path
        ));
    }

    svg.push_str(&format!(
        "<path class=\"{}\" d=\"{}\" pathLength=\"100\" />",
        line_class, line_path
    ));

    if opts.show_zero_line {
        let zero_norm = (0.0 - projection.min) / projection.range;
        let y_zero = (opts.height - opts.margin_y
            - zero_norm * (opts.height - opts.margin_y * 2.0))
            .clamp(opts.margin_y, bottom_y);
        svg.push_str(&format!(
            "<line class=\"sparkline-zero-line\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" />",
            opts.margin_x,
            y_zero,
            opts.width - opts.margin_x,
            y_zero
        ));
    }

    if opts.show_end_dot {
        svg.push_str(&format!(
            "<circle class=\"sparkline-end-dot\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"1.8\" />",
            last.x, last.y
        ));
    }

    svg.push_str("</svg>");
    Some(svg)
}
