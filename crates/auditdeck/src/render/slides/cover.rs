use eframe::egui::{self, Pos2, Rect};

use super::format_count;
use crate::data::Icon;
use crate::render::SlideContext;
use crate::render::text;
use crate::theme::Theme;

pub fn render(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let meta = &cx.report.meta;
    let width = rect.width();
    let mut y = rect.top() + rect.height() * 0.08;

    let title_size = theme.h1_size * cx.scale;
    y += text::draw_text(
        ui,
        &meta.title,
        Pos2::new(rect.left(), y),
        title_size,
        cx.fade(theme.heading_color),
        width,
    );
    y += text::draw_text(
        ui,
        &meta.subtitle,
        Pos2::new(rect.left(), y),
        title_size,
        cx.fade(theme.accent),
        width,
    );
    y += cx.px(24.0);

    y += text::draw_text(
        ui,
        &meta.summary,
        Pos2::new(rect.left(), y),
        theme.body_size * 1.15 * cx.scale,
        cx.fade(theme.muted),
        width * 0.7,
    );
    y += cx.px(40.0);

    // Period and author badges
    let pill_size = theme.small_size * cx.scale;
    let period = text::draw_pill(
        ui,
        &format!("{}  {}", Icon::Calendar.glyph(), meta.period),
        Pos2::new(rect.left(), y),
        pill_size,
        cx.pick(theme.info, theme.foreground),
        cx.pick(Theme::with_opacity(theme.accent, 0.1), theme.surface),
        cx.pick(Theme::with_opacity(theme.accent, 0.3), theme.border),
    );
    let author = text::draw_pill(
        ui,
        &format!("{}  Resp: {}", Icon::User.glyph(), meta.author),
        Pos2::new(period.right() + cx.px(16.0), y),
        pill_size,
        cx.fade(theme.foreground),
        cx.fade(theme.surface_alt),
        cx.pick(theme.border, theme.border),
    );
    y = author.bottom() + cx.px(56.0);

    let accounts = format!(
        "Baseado em **{} contas auditadas** e **{} erros**.",
        format_count(meta.accounts_audited),
        format_count(meta.errors_found),
    );
    let items = [
        accounts.as_str(),
        "Foco na proteção da **saúde financeira** do Hospital.",
    ];

    let pad = cx.px(28.0);
    let panel_width = width * 0.75;
    let list_height = items.len() as f32 * (theme.body_size + 14.0) * cx.scale * 1.3;
    let panel = Rect::from_min_size(
        Pos2::new(rect.left(), y),
        egui::vec2(panel_width, list_height + pad * 2.0),
    );
    text::draw_panel(ui, panel, theme, theme.surface_alt, cx.opacity * 0.5, cx.scale);
    text::draw_bullets(
        ui,
        &items,
        theme,
        theme.accent,
        Pos2::new(panel.left() + pad, panel.top() + pad),
        panel_width - pad * 2.0,
        cx.opacity,
        cx.scale,
    );
}
