use eframe::egui::{self, Align2, FontId, Pos2, Rect};

use super::{columns, grid, section};
use crate::data::{Icon, Kpi};
use crate::deck::SlideKind;
use crate::render::SlideContext;
use crate::render::text;
use crate::theme::Theme;

const KPI_NOTE: &str = "A alta taxa de erro (93%) combinada com o fluxo rápido para o \
    faturamento (0 dias) demonstra que a auditoria está atuando como uma barreira crítica \
    contra perdas financeiras imediatas.";

const IMPACT: &str = "Materiais e medicações não cobrados são \"ralos silenciosos\". Só aparecem \
    quando a auditoria confronta prontuário, enfermagem e conta. A correção aqui é lucro \
    líquido direto.";

const ACTION: &str = "Revisão dos kits cirúrgicos e protocolos de dispensação de farmácia para \
    garantir que o físico (entregue) bata com o sistêmico (cobrado) antes da auditoria.";

pub fn render_kpis(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::Indicators.title(),
        "Volume de trabalho da auditoria e impacto potencial na receita.",
    );

    let gap = cx.px(24.0);
    let note_height = cx.px(110.0);
    let cards_area = Rect::from_min_max(body.min, Pos2::new(body.right(), body.bottom() - note_height - gap));
    let rows = cx.report.kpis.len().div_ceil(3).max(1);
    let card_height = ((cards_area.height() - gap * (rows as f32 - 1.0)) / rows as f32).min(cx.px(220.0));
    for (kpi, cell) in cx
        .report
        .kpis
        .iter()
        .zip(grid(cards_area, cx.report.kpis.len(), 3, gap, card_height))
    {
        kpi_card(ui, cx, kpi, cell);
    }

    let note = Rect::from_min_max(
        Pos2::new(body.left(), body.bottom() - note_height),
        body.max,
    );
    text::draw_panel(
        ui,
        note,
        theme,
        Theme::with_opacity(theme.accent, 0.12),
        cx.opacity,
        cx.scale,
    );
    let pad = cx.px(20.0);
    let icon_size = cx.px(30.0);
    text::draw_icon(
        ui,
        Icon::AlertTriangle,
        Pos2::new(note.left() + pad + icon_size / 2.0, note.top() + pad + icon_size / 2.0),
        icon_size,
        cx.pick(theme.info, theme.foreground),
    );
    text::draw_text(
        ui,
        KPI_NOTE,
        Pos2::new(note.left() + pad * 2.0 + icon_size, note.top() + pad),
        theme.body_size * 0.85 * cx.scale,
        cx.fade(theme.heading_color),
        note.width() - pad * 3.0 - icon_size,
    );
}

fn kpi_card(ui: &egui::Ui, cx: &SlideContext, kpi: &Kpi, cell: Rect) {
    let theme = cx.theme;
    text::draw_panel(ui, cell, theme, theme.surface_alt, cx.opacity, cx.scale);
    let pad = cx.px(24.0);
    let inner = cell.shrink(pad);
    let small = theme.small_size * cx.scale;

    text::draw_icon(
        ui,
        kpi.icon,
        Pos2::new(inner.left() + small / 2.0, inner.top() + small / 2.0),
        small,
        cx.pick(theme.accent, theme.foreground),
    );
    let mut y = inner.top();
    y += text::draw_text(
        ui,
        &kpi.label.to_uppercase(),
        Pos2::new(inner.left() + small * 1.6, y),
        small,
        cx.fade(theme.muted),
        inner.width() - small * 1.6,
    );
    y += cx.px(12.0);
    y += text::draw_text(
        ui,
        &kpi.value,
        Pos2::new(inner.left(), y),
        theme.h2_size * cx.scale,
        cx.fade(theme.heading_color),
        inner.width(),
    );
    y += cx.px(8.0);
    text::draw_text(
        ui,
        &kpi.sub,
        Pos2::new(inner.left(), y),
        small,
        cx.fade(theme.muted),
        inner.width(),
    );
}

pub fn render_revenue_leaks(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::RevenueLeaks.title(),
        "Causas que representam perda direta de faturamento.",
    );

    let gap = cx.px(24.0);
    let card_height = (body.height() * 0.5).min(cx.px(280.0));
    let cards = Rect::from_min_size(body.min, egui::vec2(body.width(), card_height));
    let count = cx.report.revenue_leaks.len().max(1);
    for (leak, cell) in cx
        .report
        .revenue_leaks
        .iter()
        .zip(columns(cards, count, gap))
    {
        leak_card(ui, cx, leak, cell);
    }

    let notes = Rect::from_min_max(
        Pos2::new(body.left(), cards.bottom() + gap * 1.5),
        body.max,
    );
    let halves = columns(notes, 2, gap * 1.5);
    note_panel(
        ui,
        cx,
        halves[0],
        Icon::TrendingUp,
        "Impacto Estratégico",
        cx.pick(theme.highlight, theme.foreground),
        IMPACT,
    );
    note_panel(
        ui,
        cx,
        halves[1],
        Icon::ShieldAlert,
        "Ação Recomendada",
        cx.pick(theme.info, theme.foreground),
        ACTION,
    );
}

fn leak_card(ui: &egui::Ui, cx: &SlideContext, leak: &Kpi, cell: Rect) {
    let theme = cx.theme;
    text::draw_panel(ui, cell, theme, theme.surface_alt, cx.opacity, cx.scale);

    // Loss marker along the top edge
    let stripe = Rect::from_min_size(
        cell.left_top() + egui::vec2(cx.px(16.0), 0.0),
        egui::vec2(cell.width() - cx.px(32.0), cx.px(4.0)),
    );
    ui.painter()
        .rect_filled(stripe, 0.0, cx.pick(theme.danger, theme.foreground));

    let pad = cx.px(24.0);
    let inner = cell.shrink(pad);
    let box_size = cx.px(52.0);
    let icon_box = Rect::from_min_size(inner.left_top(), egui::vec2(box_size, box_size));
    ui.painter().rect_filled(
        icon_box,
        cx.px(8.0),
        cx.pick(theme.background, theme.surface),
    );
    if cx.print {
        ui.painter().rect_stroke(
            icon_box,
            cx.px(8.0),
            egui::Stroke::new(1.0, cx.fade(theme.border)),
            egui::StrokeKind::Inside,
        );
    }
    text::draw_icon(ui, leak.icon, icon_box.center(), cx.px(26.0), cx.fade(theme.foreground));

    ui.painter().text(
        Pos2::new(inner.right(), inner.top()),
        Align2::RIGHT_TOP,
        &leak.value,
        FontId::proportional(theme.h2_size * 0.85 * cx.scale),
        cx.fade(theme.heading_color),
    );

    let mut y = icon_box.bottom() + cx.px(20.0);
    y += text::draw_text(
        ui,
        &leak.label,
        Pos2::new(inner.left(), y),
        theme.body_size * cx.scale,
        cx.fade(theme.heading_color),
        inner.width(),
    );
    y += cx.px(8.0);
    text::draw_text(
        ui,
        &leak.sub,
        Pos2::new(inner.left(), y),
        theme.small_size * cx.scale,
        cx.fade(theme.muted),
        inner.width(),
    );
}

fn note_panel(
    ui: &egui::Ui,
    cx: &SlideContext,
    rect: Rect,
    icon: Icon,
    heading: &str,
    heading_color: egui::Color32,
    body: &str,
) {
    let theme = cx.theme;
    text::draw_panel(ui, rect, theme, theme.surface_alt, cx.opacity * 0.6, cx.scale);
    let pad = cx.px(24.0);
    let inner = rect.shrink(pad);
    let size = theme.body_size * cx.scale;

    text::draw_icon(
        ui,
        icon,
        Pos2::new(inner.left() + size / 2.0, inner.top() + size / 2.0),
        size,
        heading_color,
    );
    let mut y = inner.top();
    y += text::draw_text(
        ui,
        heading,
        Pos2::new(inner.left() + size * 1.5, y),
        size,
        heading_color,
        inner.width() - size * 1.5,
    );
    y += cx.px(12.0);
    text::draw_text(
        ui,
        body,
        Pos2::new(inner.left(), y),
        theme.body_size * 0.85 * cx.scale,
        cx.fade(theme.foreground),
        inner.width(),
    );
}
