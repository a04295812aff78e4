//! Bar and line charts drawn straight onto the painter.
//!
//! Every chart in the deck goes through [`draw`], so tooltip format, axis
//! styling and the screen/print palette stay consistent between slides.

use std::time::Instant;

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke};

use crate::data::ChartRow;
use crate::theme::Theme;

/// Seconds the bars take to grow in on screen.
pub const ENTRY_ANIMATION: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPalette {
    pub text: Color32,
    pub grid: Color32,
    pub series_a: Color32,
    pub series_b: Color32,
    pub cursor: Color32,
    pub tooltip_background: Color32,
    pub tooltip_border: Color32,
}

impl ChartPalette {
    /// Colors for a dark screen or for white paper.
    pub fn resolve(print: bool) -> Self {
        if print {
            Self {
                text: Color32::BLACK,
                grid: Color32::from_rgb(0x94, 0xA3, 0xB8),
                series_a: Color32::from_rgb(0xD9, 0x77, 0x06),
                series_b: Color32::from_rgb(0x1E, 0x40, 0xAF),
                cursor: Color32::from_rgb(0xF0, 0xF0, 0xF0),
                tooltip_background: Color32::WHITE,
                tooltip_border: Color32::BLACK,
            }
        } else {
            Self {
                text: Color32::from_rgb(0xF8, 0xFA, 0xFC),
                grid: Color32::from_rgb(0x33, 0x41, 0x55),
                series_a: Color32::from_rgb(0xEA, 0xB3, 0x08),
                series_b: Color32::from_rgb(0x3B, 0x82, 0xF6),
                cursor: Color32::from_rgba_unmultiplied(255, 255, 255, 13),
                tooltip_background: Color32::from_rgb(0x0F, 0x17, 0x2A),
                tooltip_border: Color32::from_rgb(0x33, 0x41, 0x55),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Vertical bars, one group per category.
    Bars,
    /// Horizontal bars with category labels on the left.
    HorizontalBars,
    Line,
}

#[derive(Debug, Clone)]
pub struct Series<'a> {
    /// Key into [`ChartRow::values`].
    pub key: &'a str,
    pub label: &'a str,
    pub color: Color32,
}

#[derive(Debug, Clone)]
pub struct Chart<'a> {
    pub kind: ChartKind,
    pub rows: &'a [ChartRow],
    pub series: Vec<Series<'a>>,
    /// Color each category with its own `fill` instead of the series color.
    pub per_row_fill: bool,
    pub legend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub label: String,
    pub entries: Vec<TooltipEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub name: String,
    pub value: f64,
    pub color: Color32,
}

impl TooltipEntry {
    pub fn text(&self) -> String {
        format!("{}: {}", self.name, format_value(self.value))
    }
}

impl Chart<'_> {
    pub fn max_value(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| self.series.iter().map(move |s| row.value(s.key)))
            .fold(0.0, f64::max)
    }

    /// Hovered category label plus one name/value pair per series.
    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        let row = self.rows.get(index)?;
        Some(Tooltip {
            label: row.name.clone(),
            entries: self
                .series
                .iter()
                .map(|s| TooltipEntry {
                    name: s.label.to_string(),
                    value: row.value(s.key),
                    color: self.fill_for(row, s),
                })
                .collect(),
        })
    }

    fn fill_for(&self, row: &ChartRow, series: &Series) -> Color32 {
        match row.fill {
            Some(fill) if self.per_row_fill => Theme::rgb(fill),
            _ => series.color,
        }
    }
}

/// How far the entry animation has run, 0.0..=1.0. Print output is always
/// fully drawn.
pub fn entry_progress(shown_at: Option<Instant>, now: Instant, print: bool) -> f32 {
    if print {
        return 1.0;
    }
    let Some(shown_at) = shown_at else {
        return 1.0;
    };
    let t = (now.saturating_duration_since(shown_at).as_secs_f32() / ENTRY_ANIMATION).clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Axis step and ceiling for a maximum value, using 1/2/5 steps with about
/// four intervals.
pub fn axis_ticks(max: f64) -> (f64, f64) {
    if max <= 0.0 {
        return (1.0, 4.0);
    }
    let raw = max / 4.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    (step, (max / step).ceil() * step)
}

pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Draw `chart` into `rect`. `progress` scales the bars/line for the entry
/// animation; tooltips only appear when `interactive`.
pub fn draw(
    ui: &egui::Ui,
    rect: Rect,
    chart: &Chart,
    palette: &ChartPalette,
    progress: f32,
    scale: f32,
    interactive: bool,
) {
    if chart.rows.is_empty() {
        return;
    }
    let font = FontId::proportional(18.0 * scale);
    let legend_h = if chart.legend { 44.0 * scale } else { 0.0 };
    let left = match chart.kind {
        ChartKind::HorizontalBars => 150.0 * scale,
        _ => 56.0 * scale,
    };
    let plot = Rect::from_min_max(
        egui::pos2(rect.left() + left, rect.top() + 16.0 * scale),
        egui::pos2(
            rect.right() - 24.0 * scale,
            rect.bottom() - 36.0 * scale - legend_h,
        ),
    );
    if plot.width() <= 0.0 || plot.height() <= 0.0 {
        return;
    }

    let (step, ceiling) = axis_ticks(chart.max_value());
    let painter = ui.painter();
    let horizontal = chart.kind == ChartKind::HorizontalBars;

    // Value grid
    let grid_stroke = Stroke::new(1.0 * scale, palette.grid);
    let mut tick = 0.0;
    while tick <= ceiling + f64::EPSILON {
        let frac = (tick / ceiling) as f32;
        let (from, to, label_pos, align) = if horizontal {
            let x = plot.left() + frac * plot.width();
            (
                egui::pos2(x, plot.top()),
                egui::pos2(x, plot.bottom()),
                egui::pos2(x, plot.bottom() + 8.0 * scale),
                Align2::CENTER_TOP,
            )
        } else {
            let y = plot.bottom() - frac * plot.height();
            (
                egui::pos2(plot.left(), y),
                egui::pos2(plot.right(), y),
                egui::pos2(plot.left() - 8.0 * scale, y),
                Align2::RIGHT_CENTER,
            )
        };
        painter.extend(egui::Shape::dashed_line(
            &[from, to],
            grid_stroke,
            6.0 * scale,
            6.0 * scale,
        ));
        painter.text(label_pos, align, format_value(tick), font.clone(), palette.text);
        tick += step;
    }

    // Axes
    let axis_stroke = Stroke::new(1.5 * scale, palette.text);
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
    painter.line_segment([plot.left_top(), plot.left_bottom()], axis_stroke);

    let count = chart.rows.len();
    let band = if horizontal {
        plot.height() / count as f32
    } else {
        plot.width() / count as f32
    };

    // Hovered category
    let hovered = if interactive {
        ui.ctx()
            .pointer_hover_pos()
            .filter(|p| plot.contains(*p))
            .map(|p| {
                let offset = if horizontal {
                    p.y - plot.top()
                } else {
                    p.x - plot.left()
                };
                ((offset / band) as usize).min(count - 1)
            })
    } else {
        None
    };
    if let Some(index) = hovered {
        let band_rect = band_rect(plot, band, index, horizontal);
        painter.rect_filled(band_rect, 0.0, palette.cursor);
    }

    // Category labels
    for (i, row) in chart.rows.iter().enumerate() {
        let center = band_rect(plot, band, i, horizontal).center();
        if horizontal {
            painter.text(
                egui::pos2(plot.left() - 10.0 * scale, center.y),
                Align2::RIGHT_CENTER,
                &row.name,
                FontId::proportional(18.0 * scale),
                palette.text,
            );
        } else {
            painter.text(
                egui::pos2(center.x, plot.bottom() + 8.0 * scale),
                Align2::CENTER_TOP,
                &row.name,
                font.clone(),
                palette.text,
            );
        }
    }

    let value_frac = |v: f64| (v / ceiling) as f32 * progress;

    match chart.kind {
        ChartKind::Bars | ChartKind::HorizontalBars => {
            let series_count = chart.series.len().max(1) as f32;
            let max_bar = if horizontal { 40.0 } else { 110.0 };
            let group = (band * 0.7).min(max_bar * scale * series_count);
            let thickness = group / series_count;
            let radius = (4.0 * scale).round().clamp(0.0, 255.0) as u8;
            for (i, row) in chart.rows.iter().enumerate() {
                let band_start = if horizontal {
                    plot.top() + band * i as f32
                } else {
                    plot.left() + band * i as f32
                };
                let group_start = band_start + (band - group) / 2.0;
                for (s, series) in chart.series.iter().enumerate() {
                    let start = group_start + thickness * s as f32;
                    let frac = value_frac(row.value(series.key));
                    let (bar, corners) = if horizontal {
                        (
                            Rect::from_min_max(
                                egui::pos2(plot.left(), start),
                                egui::pos2(plot.left() + frac * plot.width(), start + thickness),
                            ),
                            CornerRadius { nw: 0, ne: radius, sw: 0, se: radius },
                        )
                    } else {
                        (
                            Rect::from_min_max(
                                egui::pos2(start + 1.0, plot.bottom() - frac * plot.height()),
                                egui::pos2(start + thickness - 1.0, plot.bottom()),
                            ),
                            CornerRadius { nw: radius, ne: radius, sw: 0, se: 0 },
                        )
                    };
                    painter.rect_filled(bar, corners, chart.fill_for(row, series));
                }
            }
        }
        ChartKind::Line => {
            for series in &chart.series {
                let points: Vec<Pos2> = chart
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        let x = plot.left() + band * (i as f32 + 0.5);
                        let y = plot.bottom() - value_frac(row.value(series.key)) * plot.height();
                        egui::pos2(x, y)
                    })
                    .collect();
                painter.add(egui::Shape::line(
                    points.clone(),
                    Stroke::new(3.0 * scale, series.color),
                ));
                for (i, p) in points.iter().enumerate() {
                    let r = if hovered == Some(i) { 6.0 } else { 4.0 };
                    painter.circle_filled(*p, r * scale, series.color);
                }
            }
        }
    }

    if chart.legend {
        draw_legend(ui, rect, chart, palette, scale);
    }

    if let (Some(index), Some(pointer)) = (hovered, ui.ctx().pointer_hover_pos()) {
        if let Some(tooltip) = chart.tooltip(index) {
            draw_tooltip(ui, pointer, rect, &tooltip, palette, scale);
        }
    }
}

fn band_rect(plot: Rect, band: f32, index: usize, horizontal: bool) -> Rect {
    if horizontal {
        let top = plot.top() + band * index as f32;
        Rect::from_min_max(egui::pos2(plot.left(), top), egui::pos2(plot.right(), top + band))
    } else {
        let left = plot.left() + band * index as f32;
        Rect::from_min_max(egui::pos2(left, plot.top()), egui::pos2(left + band, plot.bottom()))
    }
}

fn draw_legend(ui: &egui::Ui, rect: Rect, chart: &Chart, palette: &ChartPalette, scale: f32) {
    let painter = ui.painter();
    let font = FontId::proportional(18.0 * scale);
    let swatch = 14.0 * scale;
    let gap = 28.0 * scale;

    let galleys: Vec<_> = chart
        .series
        .iter()
        .map(|s| painter.layout_no_wrap(s.label.to_string(), font.clone(), palette.text))
        .collect();
    let total: f32 = galleys
        .iter()
        .map(|g| swatch + 8.0 * scale + g.rect.width())
        .sum::<f32>()
        + gap * (galleys.len().saturating_sub(1)) as f32;

    let y = rect.bottom() - 18.0 * scale;
    let mut x = rect.center().x - total / 2.0;
    for (series, galley) in chart.series.iter().zip(galleys) {
        let swatch_rect = Rect::from_center_size(
            egui::pos2(x + swatch / 2.0, y),
            egui::vec2(swatch, swatch),
        );
        painter.rect_filled(swatch_rect, 2.0 * scale, series.color);
        x += swatch + 8.0 * scale;
        let width = galley.rect.width();
        painter.galley(egui::pos2(x, y - galley.rect.height() / 2.0), galley, palette.text);
        x += width + gap;
    }
}

fn draw_tooltip(
    ui: &egui::Ui,
    pointer: Pos2,
    bounds: Rect,
    tooltip: &Tooltip,
    palette: &ChartPalette,
    scale: f32,
) {
    let painter = ui.painter();
    let padding = 12.0 * scale;
    let line_gap = 4.0 * scale;

    let title = painter.layout_no_wrap(
        tooltip.label.clone(),
        FontId::proportional(20.0 * scale),
        palette.text,
    );
    let lines: Vec<_> = tooltip
        .entries
        .iter()
        .map(|e| painter.layout_no_wrap(e.text(), FontId::proportional(17.0 * scale), e.color))
        .collect();

    let width = lines
        .iter()
        .map(|g| g.rect.width())
        .fold(title.rect.width(), f32::max)
        + padding * 2.0;
    let height = title.rect.height()
        + lines.iter().map(|g| g.rect.height() + line_gap).sum::<f32>()
        + padding * 2.0;

    // Keep the box inside the chart area.
    let mut min = pointer + egui::vec2(16.0 * scale, 16.0 * scale);
    if min.x + width > bounds.right() {
        min.x = pointer.x - width - 16.0 * scale;
    }
    if min.y + height > bounds.bottom() {
        min.y = bounds.bottom() - height;
    }
    let box_rect = Rect::from_min_size(min, egui::vec2(width, height));
    painter.rect_filled(box_rect, 8.0 * scale, palette.tooltip_background);
    painter.rect_stroke(
        box_rect,
        8.0 * scale,
        Stroke::new(1.0 * scale, palette.tooltip_border),
        egui::StrokeKind::Inside,
    );

    let mut y = box_rect.top() + padding;
    let title_height = title.rect.height();
    painter.galley(egui::pos2(box_rect.left() + padding, y), title, palette.text);
    y += title_height + line_gap;
    for (galley, entry) in lines.into_iter().zip(&tooltip.entries) {
        let h = galley.rect.height();
        painter.galley(egui::pos2(box_rect.left() + padding, y), galley, entry.color);
        y += h + line_gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Report, SERIES_AUDIT, SERIES_BILLING, SERIES_VALUE};
    use std::time::Duration;

    #[test]
    fn test_palette_modes_differ() {
        let screen = ChartPalette::resolve(false);
        let print = ChartPalette::resolve(true);
        assert_ne!(screen, print);
        assert_eq!(print.text, Color32::BLACK);
        assert_eq!(screen.series_a, Color32::from_rgb(0xEA, 0xB3, 0x08));
        assert_eq!(print.series_b, Color32::from_rgb(0x1E, 0x40, 0xAF));
    }

    #[test]
    fn test_print_palette_is_darker() {
        let luminance = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        let screen = ChartPalette::resolve(false);
        let print = ChartPalette::resolve(true);
        assert!(luminance(print.text) < luminance(screen.text));
        assert!(luminance(print.series_a) < luminance(screen.series_a));
        assert!(luminance(print.series_b) < luminance(screen.series_b));
    }

    #[test]
    fn test_tooltip_lists_every_series() {
        let report = Report::builtin().unwrap();
        let palette = ChartPalette::resolve(false);
        let chart = Chart {
            kind: ChartKind::Bars,
            rows: &report.weekly_flow,
            series: vec![
                Series { key: SERIES_AUDIT, label: "Entrada (Auditoria)", color: palette.series_a },
                Series { key: SERIES_BILLING, label: "Saída (Faturamento)", color: palette.series_b },
            ],
            per_row_fill: false,
            legend: true,
        };
        let tooltip = chart.tooltip(4).unwrap();
        assert_eq!(tooltip.label, "Sex");
        assert_eq!(tooltip.entries.len(), 2);
        assert_eq!(tooltip.entries[0].text(), "Entrada (Auditoria): 112");
        assert_eq!(tooltip.entries[1].text(), "Saída (Faturamento): 118");
        assert_eq!(tooltip.entries[1].color, palette.series_b);
        assert!(chart.tooltip(7).is_none());
        assert_eq!(chart.max_value(), 128.0);
    }

    #[test]
    fn test_tooltip_uses_row_fill() {
        let report = Report::builtin().unwrap();
        let chart = Chart {
            kind: ChartKind::HorizontalBars,
            rows: &report.errors_by_sector,
            series: vec![Series { key: SERIES_VALUE, label: "Erros", color: Color32::GRAY }],
            per_row_fill: true,
            legend: false,
        };
        let tooltip = chart.tooltip(1).unwrap();
        assert_eq!(tooltip.label, "Enfermagem");
        assert_eq!(tooltip.entries[0].color, Color32::from_rgb(0x22, 0xc5, 0x5e));
    }

    #[test]
    fn test_axis_ticks() {
        assert_eq!(axis_ticks(128.0), (50.0, 150.0));
        assert_eq!(axis_ticks(1093.0), (500.0, 1500.0));
        assert_eq!(axis_ticks(42.0), (20.0, 60.0));
        assert_eq!(axis_ticks(0.0), (1.0, 4.0));
    }

    #[test]
    fn test_entry_progress() {
        let t0 = Instant::now();
        assert_eq!(entry_progress(Some(t0), t0, true), 1.0);
        assert_eq!(entry_progress(None, t0, false), 1.0);
        assert_eq!(entry_progress(Some(t0), t0, false), 0.0);
        let mid = entry_progress(Some(t0), t0 + Duration::from_millis(400), false);
        assert!(mid > 0.5 && mid < 1.0, "{mid}");
        assert_eq!(entry_progress(Some(t0), t0 + Duration::from_secs(5), false), 1.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1093.0), "1093");
        assert_eq!(format_value(1.75), "1.8");
    }
}
