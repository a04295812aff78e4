use eframe::egui::{self, Pos2, Rect, Stroke};

use super::{columns, section};
use crate::data::Icon;
use crate::deck::SlideKind;
use crate::render::SlideContext;
use crate::render::text;
use crate::theme::Theme;

const CURRENT: [(Icon, &str); 3] = [
    (Icon::AlertTriangle, "Atuação predominantemente pós-faturamento."),
    (Icon::AlertTriangle, "Correção de contas já prestes a serem enviadas."),
    (Icon::CheckCircle, "Mesmo assim, evita perdas massivas de materiais e taxas."),
];

const FUTURE: [(Icon, &str); 3] = [
    (Icon::TrendingUp, "Modelo Pré + Pós faturamento."),
    (Icon::TrendingUp, "Foco em prevenção na fonte (educação continuada)."),
    (Icon::TrendingUp, "Auditoria como consultoria interna de qualidade."),
];

const STEPS: [(Icon, &str, &str); 3] = [
    (
        Icon::FileText,
        "Relatório Executivo Mensal",
        "Padronização institucional para apresentação em reuniões de resultado. \
         Arquivamento organizado para acreditações.",
    ),
    (
        Icon::Aperture,
        "Dashboard Integrado",
        "Indicadores em tempo real integrados ao NurseAuditoria. Visão rápida para \
         coordenação e diretoria.",
    ),
    (
        Icon::ArrowRight,
        "Automação de Envio",
        "Script para leitura de banco de dados e geração automática de PDF, permitindo \
         comparação histórica de evolução.",
    ),
];

const CLOSING: &str = "A auditoria demonstrou sua capacidade de proteger receita e gerar \
    informação qualificada. Com pequenos ajustes, é possível migrar para um modelo preventivo, \
    com **menos retrabalho** e **mais previsibilidade**.";

pub fn render_strategy(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::Strategy.title(),
        "Última linha de defesa da receita e termômetro da qualidade.",
    );

    let panel_h = body.height().min(cx.px(420.0));
    let area = Rect::from_center_size(body.center(), egui::vec2(body.width(), panel_h));
    let halves = columns(area, 2, cx.px(32.0));

    scenario(
        ui,
        cx,
        halves[0],
        "Cenário Atual (Reativo)",
        theme.danger,
        theme.surface_alt,
        &CURRENT,
    );
    scenario(
        ui,
        cx,
        halves[1],
        "Visão Futura (Híbrido)",
        theme.accent,
        Theme::with_opacity(theme.accent, 0.15),
        &FUTURE,
    );
}

fn scenario(
    ui: &egui::Ui,
    cx: &SlideContext,
    panel: Rect,
    heading: &str,
    accent: egui::Color32,
    fill: egui::Color32,
    items: &[(Icon, &str)],
) {
    let theme = cx.theme;
    text::draw_panel(ui, panel, theme, fill, cx.opacity, cx.scale);
    let inner = panel.shrink(cx.px(36.0));
    let mut y = inner.top();
    y += text::draw_text(
        ui,
        heading,
        Pos2::new(inner.left(), y),
        theme.h3_size * cx.scale,
        cx.pick(accent, theme.foreground),
        inner.width(),
    );
    y += cx.px(24.0);

    let size = theme.body_size * cx.scale;
    for (icon, line) in items {
        let icon_color = if *icon == Icon::CheckCircle {
            theme.muted
        } else {
            accent
        };
        text::draw_icon(
            ui,
            *icon,
            Pos2::new(inner.left() + size / 2.0, y + size * 0.6),
            size,
            cx.pick(icon_color, theme.foreground),
        );
        y += text::draw_text(
            ui,
            line,
            Pos2::new(inner.left() + size * 1.6, y),
            size,
            cx.fade(theme.foreground),
            inner.width() - size * 1.6,
        );
        y += cx.px(18.0);
    }
}

pub fn render_next_steps(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::NextSteps.title(),
        "Consolidando a auditoria como instrumento permanente de gestão.",
    );

    let gap = cx.px(24.0);
    let row_h = ((body.height() - gap * 2.0) / 3.0).min(cx.px(170.0));
    let tints = [theme.accent, theme.highlight, egui::Color32::from_rgb(0xA8, 0x55, 0xF7)];
    for (i, ((icon, heading, detail), tint)) in STEPS.into_iter().zip(tints).enumerate() {
        let row = Rect::from_min_size(
            Pos2::new(body.left(), body.top() + i as f32 * (row_h + gap)),
            egui::vec2(body.width(), row_h),
        );
        text::draw_panel(ui, row, theme, theme.surface_alt, cx.opacity * 0.6, cx.scale);
        let inner = row.shrink(cx.px(26.0));

        let box_size = cx.px(68.0);
        let icon_box = Rect::from_min_size(inner.min, egui::vec2(box_size, box_size));
        ui.painter().rect_filled(
            icon_box,
            cx.px(12.0),
            cx.pick(Theme::with_opacity(tint, 0.2), theme.surface),
        );
        if cx.print {
            ui.painter().rect_stroke(
                icon_box,
                cx.px(12.0),
                Stroke::new(1.0, cx.fade(theme.border)),
                egui::StrokeKind::Inside,
            );
        }
        text::draw_icon(
            ui,
            icon,
            icon_box.center(),
            cx.px(32.0),
            cx.pick(tint, theme.foreground),
        );

        let x = icon_box.right() + cx.px(28.0);
        let width = inner.right() - x;
        let heading_h = text::draw_text(
            ui,
            heading,
            Pos2::new(x, inner.top()),
            theme.h3_size * 0.9 * cx.scale,
            cx.fade(theme.heading_color),
            width,
        );
        text::draw_text(
            ui,
            detail,
            Pos2::new(x, inner.top() + heading_h + cx.px(8.0)),
            theme.body_size * 0.85 * cx.scale,
            cx.fade(theme.muted),
            width,
        );
    }
}

pub fn render_closing(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let meta = &cx.report.meta;
    let center_x = rect.center().x;
    let width = rect.width() * 0.7;
    let mut y = rect.top() + rect.height() * 0.06;

    let radius = cx.px(52.0);
    let badge = Pos2::new(center_x, y + radius);
    if cx.print {
        ui.painter().circle(
            badge,
            radius,
            cx.fade(theme.surface),
            Stroke::new(1.5, cx.fade(theme.border)),
        );
    } else {
        ui.painter().circle_filled(badge, radius, cx.fade(theme.accent));
    }
    text::draw_icon(
        ui,
        Icon::CheckCircle,
        badge,
        cx.px(48.0),
        cx.pick(egui::Color32::WHITE, theme.foreground),
    );
    y += radius * 2.0 + cx.px(36.0);

    y += text::draw_text_centered(
        ui,
        SlideKind::Closing.title(),
        center_x,
        y,
        theme.h2_size * cx.scale,
        cx.fade(theme.heading_color),
        width,
    );
    y += cx.px(28.0);

    let mut job = text::emphasis_job(
        CLOSING,
        theme.body_size * 1.1 * cx.scale,
        cx.fade(theme.muted),
        cx.pick(theme.info, theme.foreground),
        width,
    );
    job.halign = egui::Align::Center;
    let galley = ui.painter().layout_job(job);
    let paragraph_h = galley.rect.height();
    ui.painter()
        .galley(Pos2::new(center_x, y), galley, cx.fade(theme.muted));
    y += paragraph_h + cx.px(56.0);

    let rule_w = rect.width() * 0.5;
    ui.painter().line_segment(
        [
            Pos2::new(center_x - rule_w / 2.0, y),
            Pos2::new(center_x + rule_w / 2.0, y),
        ],
        Stroke::new(1.0, cx.fade(theme.border)),
    );
    y += cx.px(48.0);

    y += text::draw_text_centered(
        ui,
        "RELATÓRIO DESENVOLVIDO POR",
        center_x,
        y,
        theme.small_size * cx.scale,
        cx.fade(theme.muted),
        width,
    );
    y += cx.px(10.0);
    y += text::draw_text_centered(
        ui,
        &meta.author,
        center_x,
        y,
        theme.h3_size * cx.scale,
        cx.fade(theme.heading_color),
        width,
    );
    y += cx.px(6.0);
    text::draw_text_centered(
        ui,
        &format!("{} \u{2022} {}", meta.registration, meta.organisation),
        center_x,
        y,
        theme.body_size * 0.85 * cx.scale,
        cx.fade(theme.muted),
        width,
    );
}
