//! # Charts
//!
//! Painter-based charts for the main panel:
//! - Scatter plot of bytes against elapsed time, colored by anomaly flag
//! - Bar chart of threat type frequencies
//!
//! ## Coordinate Mapping
//!
//! Data values are mapped linearly into the plot rectangle with `egui::lerp`. The y axis grows
//! upwards, so the vertical mapping runs from `rect.bottom()` to `rect.top()`. Both axes get a
//! 5% margin so points on the extremes are not clipped by the frame.

use eframe::egui;
use egui::{Color32, Pos2, Rect};

use crate::data::summary::ScatterSeries;
use crate::ui::color_for_anomaly;

/// Number of grid divisions per axis.
const GRID_DIVISIONS: usize = 5;
/// Point color when the scatter plot is not grouped by anomaly.
const DEFAULT_POINT_COLOR: Color32 = Color32::from_rgb(40, 200, 255);
/// Bar fill color.
const BAR_COLOR: Color32 = Color32::from_rgb(40, 200, 255);
/// Bar fill color under the pointer.
const BAR_HOVER_COLOR: Color32 = Color32::from_rgb(120, 225, 255);
/// Pixel distance within which a hovered point is reported.
const HOVER_RADIUS: f32 = 8.0;

/// Inclusive data range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    /// Range covering `values` with a 5% margin on each side; `None` if there are no values.
    fn covering(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

        // A single distinct value still needs a non-zero span
        let span = if max > min { max - min } else { min.abs().max(1.0) };
        let margin = span * 0.05;
        Some(Self {
            min: min - margin,
            max: max + margin,
        })
    }

    fn fraction(&self, value: f64) -> f32 {
        ((value - self.min) / (self.max - self.min)) as f32
    }

    fn tick(&self, i: usize) -> f64 {
        self.min + (self.max - self.min) * i as f64 / GRID_DIVISIONS as f64
    }
}

/// Format an axis value compactly (1.2k, 3.4M).
fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if abs >= 10.0 || value == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn to_screen(plot: Rect, x_range: AxisRange, y_range: AxisRange, point: [f64; 2]) -> Pos2 {
    egui::pos2(
        egui::lerp(plot.left()..=plot.right(), x_range.fraction(point[0])),
        egui::lerp(plot.bottom()..=plot.top(), y_range.fraction(point[1])),
    )
}

/// Render the bytes vs elapsed time scatter plot.
///
/// # Parameters
///
/// * `ui` - egui UI to allocate the chart in
/// * `series` - Point groups from `scatter_series`
/// * `grouped` - Whether series are anomaly groups (draws the legend and uses flag colors)
/// * `height` - Height of the chart in pixels
pub fn render_scatter(ui: &mut egui::Ui, series: &[ScatterSeries], grouped: bool, height: f32) {
    let (response, painter) = ui.allocate_painter(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

    let legend_width = if grouped { 110.0 } else { 10.0 };
    let plot = Rect::from_min_max(egui::pos2(rect.left() + 60.0, rect.top() + 24.0), egui::pos2(rect.right() - legend_width, rect.bottom() - 40.0));
    let text_color = ui.visuals().text_color();

    let all_points = || series.iter().flat_map(|s| s.points.iter());
    let (Some(x_range), Some(y_range)) = (AxisRange::covering(all_points().map(|p| p[0])), AxisRange::covering(all_points().map(|p| p[1]))) else {
        painter.text(rect.center(), egui::Align2::CENTER_CENTER, "No records match the current filters", egui::FontId::proportional(14.0), text_color);
        return;
    };

    draw_axes(&painter, plot, x_range, y_range, text_color);

    for s in series {
        let color = if grouped { color_for_anomaly(s.anomaly, 0.8) } else { DEFAULT_POINT_COLOR };
        for p in &s.points {
            painter.circle_filled(to_screen(plot, x_range, y_range, *p), 3.0, color);
        }
    }

    if grouped {
        draw_legend(&painter, egui::pos2(plot.right() + 16.0, plot.top()), series, text_color);
    }

    // Report the point closest to the pointer
    if let Some(hover) = response.hover_pos() {
        let nearest = all_points()
            .map(|p| (p, to_screen(plot, x_range, y_range, *p).distance_sq(hover)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((p, d2)) = nearest {
            if d2 <= HOVER_RADIUS * HOVER_RADIUS {
                let pos = to_screen(plot, x_range, y_range, *p);
                painter.circle_stroke(pos, 5.0, egui::Stroke::new(1.5, text_color));
                painter.text(
                    egui::pos2(pos.x + 8.0, pos.y - 8.0),
                    egui::Align2::LEFT_BOTTOM,
                    format!("{:.2} s, {} B", p[0], p[1] as u64),
                    egui::FontId::monospace(12.0),
                    text_color,
                );
            }
        }
    }
}

/// Draw grid lines, tick labels and axis titles.
fn draw_axes(painter: &egui::Painter, plot: Rect, x_range: AxisRange, y_range: AxisRange, text_color: Color32) {
    let grid_stroke = egui::Stroke::new(1.0, Color32::from_gray(70));
    let font = egui::FontId::proportional(11.0);

    for i in 0..=GRID_DIVISIONS {
        let t = i as f32 / GRID_DIVISIONS as f32;

        let x = egui::lerp(plot.left()..=plot.right(), t);
        painter.line_segment([egui::pos2(x, plot.top()), egui::pos2(x, plot.bottom())], grid_stroke);
        painter.text(egui::pos2(x, plot.bottom() + 4.0), egui::Align2::CENTER_TOP, format_tick(x_range.tick(i)), font.clone(), text_color);

        let y = egui::lerp(plot.bottom()..=plot.top(), t);
        painter.line_segment([egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)], grid_stroke);
        painter.text(egui::pos2(plot.left() - 6.0, y), egui::Align2::RIGHT_CENTER, format_tick(y_range.tick(i)), font.clone(), text_color);
    }

    painter.text(egui::pos2(plot.center().x, plot.bottom() + 22.0), egui::Align2::CENTER_TOP, "Elapsed Time (sec)", egui::FontId::proportional(13.0), text_color);
    painter.text(egui::pos2(plot.left() - 6.0, plot.top() - 6.0), egui::Align2::RIGHT_BOTTOM, "Bytes", egui::FontId::proportional(13.0), text_color);
}

fn draw_legend(painter: &egui::Painter, origin: Pos2, series: &[ScatterSeries], text_color: Color32) {
    painter.text(origin, egui::Align2::LEFT_TOP, "anomaly", egui::FontId::proportional(13.0), text_color);
    for (i, s) in series.iter().enumerate() {
        let y = origin.y + 22.0 + i as f32 * 18.0;
        painter.circle_filled(egui::pos2(origin.x + 6.0, y + 6.0), 5.0, color_for_anomaly(s.anomaly, 1.0));
        painter.text(
            egui::pos2(origin.x + 18.0, y),
            egui::Align2::LEFT_TOP,
            format!("{} ({})", s.label(), s.points.len()),
            egui::FontId::proportional(12.0),
            text_color,
        );
    }
}

/// Render a vertical bar chart of `(label, count)` pairs in the given order.
///
/// Labels longer than the bar slot are shortened with an ellipsis; hovering a bar shows its
/// full label and count.
pub fn render_bar_chart(ui: &mut egui::Ui, counts: &[(String, usize)], height: f32) {
    let (response, painter) = ui.allocate_painter(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
    let text_color = ui.visuals().text_color();

    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max_count == 0 {
        painter.text(rect.center(), egui::Align2::CENTER_CENTER, "No threat types in the selected window", egui::FontId::proportional(14.0), text_color);
        return;
    }

    let plot = Rect::from_min_max(egui::pos2(rect.left() + 50.0, rect.top() + 20.0), egui::pos2(rect.right() - 10.0, rect.bottom() - 30.0));

    // Integer grid steps so labels stay whole numbers
    let step = max_count.div_ceil(GRID_DIVISIONS).max(1);
    let top = step * GRID_DIVISIONS;
    let grid_stroke = egui::Stroke::new(1.0, Color32::from_gray(70));
    for i in 0..=GRID_DIVISIONS {
        let value = step * i;
        let y = egui::lerp(plot.bottom()..=plot.top(), value as f32 / top as f32);
        painter.line_segment([egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)], grid_stroke);
        painter.text(egui::pos2(plot.left() - 6.0, y), egui::Align2::RIGHT_CENTER, value.to_string(), egui::FontId::proportional(11.0), text_color);
    }

    let slot = plot.width() / counts.len() as f32;
    let bar_width = slot * 0.7;
    let max_chars = ((slot / 7.0) as usize).max(3);
    let hover = response.hover_pos();

    for (i, (label, count)) in counts.iter().enumerate() {
        let center_x = plot.left() + slot * (i as f32 + 0.5);
        let bar_top = egui::lerp(plot.bottom()..=plot.top(), *count as f32 / top as f32);
        let bar = Rect::from_min_max(egui::pos2(center_x - bar_width / 2.0, bar_top), egui::pos2(center_x + bar_width / 2.0, plot.bottom()));

        let hovered = hover.is_some_and(|p| p.x >= bar.left() && p.x <= bar.right() && p.y >= plot.top() && p.y <= plot.bottom());
        let fill = if hovered { BAR_HOVER_COLOR } else { BAR_COLOR };
        painter.rect_filled(bar, 2.0, fill);

        painter.text(egui::pos2(center_x, plot.bottom() + 4.0), egui::Align2::CENTER_TOP, shorten(label, max_chars), egui::FontId::proportional(11.0), text_color);

        if hovered {
            painter.text(
                egui::pos2(center_x, bar_top - 4.0),
                egui::Align2::CENTER_BOTTOM,
                format!("{}: {}", label, count),
                egui::FontId::monospace(12.0),
                text_color,
            );
        }
    }
}

/// Cut `label` to at most `max_chars` characters, ending with an ellipsis when shortened.
fn shorten(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut short: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_adds_margin() {
        let range = AxisRange::covering([0.0, 100.0].into_iter()).unwrap();
        assert_eq!(range.min, -5.0);
        assert_eq!(range.max, 105.0);
        assert!((range.fraction(50.0) - 0.5).abs() < 1e-6);
        assert_eq!(range.tick(0), range.min);
        assert_eq!(range.tick(GRID_DIVISIONS), range.max);
    }

    #[test]
    fn test_axis_range_single_value() {
        let range = AxisRange::covering([42.0, 42.0].into_iter()).unwrap();
        assert!(range.max > range.min);
        assert!((range.fraction(42.0) - 0.5).abs() < 1e-6);
        assert!(AxisRange::covering(std::iter::empty::<f64>()).is_none());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(2.5), "2.50");
        assert_eq!(format_tick(950.0), "950");
        assert_eq!(format_tick(1500.0), "1.5k");
        assert_eq!(format_tick(2_500_000.0), "2.5M");
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("scan", 10), "scan");
        assert_eq!(shorten("port-scan-horizontal", 6), "port-…");
    }

    #[test]
    fn test_to_screen_flips_y() {
        let plot = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 100.0));
        let range = AxisRange { min: 0.0, max: 10.0 };
        let bottom_left = to_screen(plot, range, range, [0.0, 0.0]);
        let top_right = to_screen(plot, range, range, [10.0, 10.0]);
        assert_eq!(bottom_left, egui::pos2(0.0, 100.0));
        assert_eq!(top_right, egui::pos2(100.0, 0.0));
    }
}
