use eframe::egui::{self, Align2, FontId, Pos2, Rect, Stroke};

use super::{grid, section};
use crate::data::Insurer;
use crate::deck::SlideKind;
use crate::render::SlideContext;
use crate::render::logo::CardFace;
use crate::render::text;
use crate::theme::Theme;

const ANALYSIS: &str = "**Análise:** A concentração na Unimed (Local + Intercâmbio) reflete o \
    volume de atendimento, mas também a complexidade das regras de negócio.";

pub fn render(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::Insurers.title(),
        "Onde estão concentradas as divergências e riscos de glosa.",
    );

    let note_h = cx.px(76.0);
    let gap = cx.px(20.0);
    let cards = Rect::from_min_max(
        body.min,
        Pos2::new(body.right(), body.bottom() - note_h - gap),
    );
    let insurers = &cx.report.insurers;
    let rows = insurers.len().div_ceil(4).max(1);
    let card_h = (cards.height() - gap * (rows as f32 - 1.0)) / rows as f32;
    for (index, (insurer, cell)) in insurers
        .iter()
        .zip(grid(cards, insurers.len(), 4, gap, card_h))
        .enumerate()
    {
        card(ui, cx, insurer, index, cell);
    }

    let note = Rect::from_min_max(Pos2::new(body.left(), body.bottom() - note_h), body.max);
    text::draw_panel(ui, note, theme, theme.surface_alt, cx.opacity * 0.6, cx.scale);
    let pad = cx.px(18.0);
    text::draw_emphasis(
        ui,
        ANALYSIS,
        note.min + egui::vec2(pad, pad),
        theme.body_size * 0.8 * cx.scale,
        cx.fade(theme.foreground),
        cx.fade(theme.heading_color),
        note.width() - pad * 2.0,
    );
}

fn card(ui: &egui::Ui, cx: &SlideContext, insurer: &Insurer, index: usize, cell: Rect) {
    let theme = cx.theme;
    text::draw_panel(ui, cell, theme, theme.surface_alt, cx.opacity, cx.scale);
    let inner = cell.shrink(cx.px(14.0));

    // Logo slot, or the initials badge when the logo cannot be shown
    let slot_h = (inner.height() * 0.38).min(cx.px(64.0));
    let slot = Rect::from_center_size(
        Pos2::new(inner.center().x, inner.top() + slot_h / 2.0),
        egui::vec2(slot_h * 1.5, slot_h),
    );
    let radius = cx.px(8.0);
    ui.painter().rect_filled(
        slot,
        radius,
        cx.pick(egui::Color32::from_rgb(0xE2, 0xE8, 0xF0), theme.surface),
    );
    match cx.logos.face(ui.ctx(), insurer, index) {
        CardFace::Logo(texture) => {
            let fitted = fit(texture.size_vec2(), slot.shrink(cx.px(6.0)));
            let tint = Theme::with_opacity(egui::Color32::WHITE, cx.opacity);
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter().image(texture.id(), fitted, uv, tint);
        }
        CardFace::Initials { text: initials, color } => {
            if !cx.print {
                ui.painter().rect_filled(slot, radius, cx.fade(color));
            }
            ui.painter().text(
                slot.center(),
                Align2::CENTER_CENTER,
                initials,
                FontId::proportional(theme.h3_size * 0.8 * cx.scale),
                cx.pick(egui::Color32::WHITE, theme.foreground),
            );
        }
    }
    if cx.print {
        ui.painter().rect_stroke(
            slot,
            radius,
            Stroke::new(1.0, cx.fade(theme.border)),
            egui::StrokeKind::Inside,
        );
    }

    let mut y = slot.bottom() + cx.px(10.0);
    y += text::draw_text_centered(
        ui,
        &insurer.name,
        inner.center().x,
        y,
        theme.body_size * 0.85 * cx.scale,
        cx.fade(theme.heading_color),
        inner.width(),
    );
    text::draw_text_centered(
        ui,
        &format!("{} do total", insurer.pct),
        inner.center().x,
        y + cx.px(2.0),
        theme.small_size * 0.85 * cx.scale,
        cx.fade(theme.muted),
        inner.width(),
    );

    // Error count badge pinned to the bottom of the card
    let label = format!("{} Erros", insurer.errors);
    let size = theme.small_size * 0.85 * cx.scale;
    let galley_w = ui
        .painter()
        .layout_no_wrap(label.clone(), FontId::proportional(size), theme.warning)
        .rect
        .width();
    let pill_w = galley_w + size * 1.4;
    let pill_h = size * 1.6 + cx.px(2.0);
    text::draw_pill(
        ui,
        &label,
        Pos2::new(inner.center().x - pill_w / 2.0, inner.bottom() - pill_h),
        size,
        cx.pick(theme.warning, theme.foreground),
        cx.pick(Theme::with_opacity(theme.warning, 0.12), egui::Color32::TRANSPARENT),
        cx.pick(Theme::with_opacity(theme.warning, 0.3), theme.border),
    );
}

/// Largest rect with the texture's aspect ratio that fits in `area`, centered.
fn fit(size: egui::Vec2, area: Rect) -> Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return area;
    }
    let scale = (area.width() / size.x).min(area.height() / size.y);
    Rect::from_center_size(area.center(), size * scale)
}
