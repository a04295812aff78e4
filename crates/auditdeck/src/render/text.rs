use eframe::egui::{self, Color32, CornerRadius, FontFamily, FontId, Pos2, Rect, Stroke};

use crate::data::Icon;
use crate::theme::Theme;

/// Build a LayoutJob from text where `**...**` spans are emphasised.
pub fn emphasis_job(
    text: &str,
    font_size: f32,
    color: Color32,
    strong: Color32,
    max_width: f32,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    for (i, span) in text.split("**").enumerate() {
        if span.is_empty() {
            continue;
        }
        let bold = i % 2 == 1;
        let format = egui::text::TextFormat {
            font_id: FontId::new(
                if bold { font_size + 1.0 } else { font_size },
                FontFamily::Proportional,
            ),
            color: if bold { strong } else { color },
            ..Default::default()
        };
        job.append(span, 0.0, format);
    }
    job
}

/// Layout and paint wrapped text, returning the height used.
pub fn draw_text(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = ui.painter().layout(
        text.to_string(),
        FontId::proportional(font_size),
        color,
        max_width,
    );
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Like [`draw_text`], centered horizontally on `center_x`.
pub fn draw_text_centered(
    ui: &egui::Ui,
    text: &str,
    center_x: f32,
    top: f32,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    let mut job = egui::text::LayoutJob::simple(
        text.to_string(),
        FontId::proportional(font_size),
        color,
        max_width,
    );
    job.halign = egui::Align::Center;
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(Pos2::new(center_x, top), galley, color);
    height
}

/// Paint text with `**bold**` highlights. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_emphasis(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font_size: f32,
    color: Color32,
    strong: Color32,
    max_width: f32,
) -> f32 {
    let job = emphasis_job(text, font_size, color, strong, max_width);
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Section heading: title, short accent bar, optional subtitle and a rule
/// underneath. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_section_title(
    ui: &egui::Ui,
    title: &str,
    subtitle: Option<&str>,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let heading = Theme::with_opacity(theme.heading_color, opacity);
    let mut y = pos.y;
    y += draw_text(
        ui,
        title,
        Pos2::new(pos.x, y),
        theme.h2_size * scale,
        heading,
        max_width,
    );
    y += 12.0 * scale;

    let bar = Rect::from_min_size(Pos2::new(pos.x, y), egui::vec2(96.0 * scale, 4.0 * scale));
    ui.painter()
        .rect_filled(bar, 2.0 * scale, Theme::with_opacity(theme.accent, opacity));
    y += 4.0 * scale + 16.0 * scale;

    if let Some(subtitle) = subtitle {
        y += draw_text(
            ui,
            subtitle,
            Pos2::new(pos.x, y),
            theme.body_size * 0.9 * scale,
            Theme::with_opacity(theme.muted, opacity),
            max_width,
        );
        y += 16.0 * scale;
    }

    ui.painter().line_segment(
        [Pos2::new(pos.x, y), Pos2::new(pos.x + max_width, y)],
        Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
    );
    y + 28.0 * scale - pos.y
}

/// Dot-marked list. Items may use `**bold**`. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_bullets(
    ui: &egui::Ui,
    items: &[&str],
    theme: &Theme,
    marker: Color32,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let color = Theme::with_opacity(theme.foreground, opacity);
    let strong = Theme::with_opacity(theme.highlight, opacity);
    let font_size = theme.body_size * scale;
    let marker_width = 28.0 * scale;
    let item_spacing = 14.0 * scale;
    let mut y_offset = 0.0;

    for item in items {
        let dot = Pos2::new(pos.x + 5.0 * scale, pos.y + y_offset + font_size * 0.6);
        ui.painter()
            .circle_filled(dot, 5.0 * scale, Theme::with_opacity(marker, opacity));
        let text_pos = Pos2::new(pos.x + marker_width, pos.y + y_offset);
        y_offset += draw_emphasis(
            ui,
            item,
            text_pos,
            font_size,
            color,
            strong,
            max_width - marker_width,
        );
        y_offset += item_spacing;
    }
    y_offset
}

/// Rounded badge around a short label, left-aligned at `pos`. Returns its rect.
pub fn draw_pill(
    ui: &egui::Ui,
    label: &str,
    pos: Pos2,
    font_size: f32,
    text_color: Color32,
    fill: Color32,
    stroke: Color32,
) -> Rect {
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), FontId::proportional(font_size), text_color);
    let pad = egui::vec2(font_size * 0.7, font_size * 0.3);
    let rect = Rect::from_min_size(pos, galley.rect.size() + pad * 2.0);
    let radius = CornerRadius::same((rect.height() / 2.0).min(255.0) as u8);
    ui.painter().rect_filled(rect, radius, fill);
    ui.painter()
        .rect_stroke(rect, radius, Stroke::new(1.0, stroke), egui::StrokeKind::Inside);
    ui.painter().galley(pos + pad, galley, text_color);
    rect
}

/// Paint an icon centered on `center`.
pub fn draw_icon(ui: &egui::Ui, icon: Icon, center: Pos2, size: f32, color: Color32) {
    ui.painter().text(
        center,
        egui::Align2::CENTER_CENTER,
        icon.glyph(),
        FontId::proportional(size),
        color,
    );
}

/// Filled, bordered panel used for cards inside a slide. On paper the fill
/// drops out and the border turns black.
pub fn draw_panel(ui: &egui::Ui, rect: Rect, theme: &Theme, fill: Color32, opacity: f32, scale: f32) {
    let radius = 16.0 * scale;
    let fill = if theme.is_paper() { theme.surface } else { fill };
    ui.painter()
        .rect_filled(rect, radius, Theme::with_opacity(fill, opacity));
    ui.painter().rect_stroke(
        rect,
        radius,
        Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
        egui::StrokeKind::Inside,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(job: &egui::text::LayoutJob) -> Vec<(&str, Color32)> {
        job.sections
            .iter()
            .map(|s| (&job.text[s.byte_range.clone()], s.format.color))
            .collect()
    }

    #[test]
    fn test_emphasis_marks_bold_spans() {
        let job = emphasis_job(
            "Baseado em **457 contas** e **1.529 erros**.",
            20.0,
            Color32::GRAY,
            Color32::GREEN,
            400.0,
        );
        assert_eq!(
            sections(&job),
            vec![
                ("Baseado em ", Color32::GRAY),
                ("457 contas", Color32::GREEN),
                (" e ", Color32::GRAY),
                ("1.529 erros", Color32::GREEN),
                (".", Color32::GRAY),
            ]
        );
        assert_eq!(job.wrap.max_width, 400.0);
    }

    #[test]
    fn test_emphasis_plain_text() {
        let job = emphasis_job("sem destaque", 20.0, Color32::GRAY, Color32::GREEN, 100.0);
        assert_eq!(sections(&job), vec![("sem destaque", Color32::GRAY)]);
    }

    #[test]
    fn test_emphasis_leading_bold() {
        let job = emphasis_job("**Análise:** texto", 20.0, Color32::GRAY, Color32::WHITE, 100.0);
        assert_eq!(
            sections(&job),
            vec![("Análise:", Color32::WHITE), (" texto", Color32::GRAY)]
        );
    }
}
