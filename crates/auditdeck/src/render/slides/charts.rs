use eframe::egui::{self, Pos2, Rect, Stroke};

use super::{columns, section};
use crate::data::{ChartRow, SERIES_AUDIT, SERIES_BILLING, SERIES_VALUE};
use crate::deck::SlideKind;
use crate::render::SlideContext;
use crate::render::chart::{self, Chart, ChartKind, Series, format_value};
use crate::render::text;
use crate::theme::Theme;

const SECTOR_NOTES: [&str; 3] = [
    "Maior volume. Necessidade de protocolos claros de conferência.",
    "Impacta rastreabilidade. Falta de checagem.",
    "Sustentação documental. Evoluções e descrições.",
];

const CATEGORY_NOTES: [(&str, &str); 3] = [
    (
        "Erro de Enfermagem",
        "Falta de relatórios e evoluções não anexadas. Itens assistenciais realizados mas \
         não registrados (checagem).",
    ),
    (
        "Erro Médico",
        "Falta de evolução diária. Compromete a validação técnica da cobrança de diárias e \
         procedimentos.",
    ),
    (
        "Erro de Faturamento",
        "Materiais não lançados no sistema. Taxas administrativas esquecidas.",
    ),
];

fn draw_chart(ui: &egui::Ui, cx: &SlideContext, area: Rect, chart: &Chart) {
    chart::draw(
        ui,
        area,
        chart,
        &cx.palette,
        cx.chart_progress,
        cx.scale,
        cx.interactive(),
    );
}

fn single_series<'a>(cx: &SlideContext, rows: &'a [ChartRow], kind: ChartKind) -> Chart<'a> {
    Chart {
        kind,
        rows,
        series: vec![Series {
            key: SERIES_VALUE,
            label: "Erros",
            color: cx.palette.series_b,
        }],
        per_row_fill: true,
        legend: false,
    }
}

pub fn render_weekly_flow(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::WeeklyFlow.title(),
        "Volume de contas entregues à auditoria vs. enviadas ao faturamento.",
    );

    let footnote_h = cx.px(48.0);
    let panel = Rect::from_min_max(body.min, Pos2::new(body.right(), body.bottom() - footnote_h));
    text::draw_panel(ui, panel, theme, theme.surface_alt, cx.opacity * 0.6, cx.scale);

    let chart = Chart {
        kind: ChartKind::Bars,
        rows: &cx.report.weekly_flow,
        series: vec![
            Series {
                key: SERIES_AUDIT,
                label: "Entrada (Auditoria)",
                color: cx.palette.series_a,
            },
            Series {
                key: SERIES_BILLING,
                label: "Saída (Faturamento)",
                color: cx.palette.series_b,
            },
        ],
        per_row_fill: false,
        legend: true,
    };
    draw_chart(ui, cx, panel.shrink(cx.px(24.0)), &chart);

    text::draw_text_centered(
        ui,
        "Picos em Quarta e Sexta exigem escala reforçada para evitar gargalos.",
        body.center().x,
        panel.bottom() + cx.px(16.0),
        theme.small_size * cx.scale,
        cx.fade(theme.muted),
        body.width(),
    );
}

pub fn render_audit_vs_billing(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::AuditVsBilling.title(),
        "Análise comparativa das curvas de trabalho.",
    );

    let halves = columns(body, 2, cx.px(32.0));
    let panels = [
        ("Entregues para Auditoria", SERIES_AUDIT, cx.palette.series_a),
        ("Enviadas ao Faturamento", SERIES_BILLING, cx.palette.series_b),
    ];
    for (panel, (heading, key, color)) in halves.into_iter().zip(panels) {
        text::draw_panel(ui, panel, theme, theme.surface_alt, cx.opacity * 0.6, cx.scale);
        let inner = panel.shrink(cx.px(24.0));
        let heading_h = text::draw_text_centered(
            ui,
            heading,
            inner.center().x,
            inner.top(),
            theme.body_size * cx.scale,
            cx.fade(theme.heading_color),
            inner.width(),
        );
        let chart = Chart {
            kind: ChartKind::Line,
            rows: &cx.report.weekly_flow,
            series: vec![Series {
                key,
                label: key,
                color,
            }],
            per_row_fill: false,
            legend: false,
        };
        let area = Rect::from_min_max(
            Pos2::new(inner.left(), inner.top() + heading_h + cx.px(16.0)),
            inner.max,
        );
        draw_chart(ui, cx, area, &chart);
    }
}

pub fn render_error_distribution(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::ErrorDistribution.title(),
        "Distribuição dos apontamentos por setor responsável.",
    );

    let gap = cx.px(32.0);
    let chart_width = (body.width() - gap) * 2.0 / 3.0;
    let panel = Rect::from_min_size(body.min, egui::vec2(chart_width, body.height()));
    text::draw_panel(ui, panel, theme, theme.surface_alt, cx.opacity * 0.6, cx.scale);
    let rows = &cx.report.errors_by_sector;
    draw_chart(
        ui,
        cx,
        panel.shrink(cx.px(24.0)),
        &single_series(cx, rows, ChartKind::HorizontalBars),
    );

    // Notes for the three largest sources, in report order
    let notes = Rect::from_min_max(Pos2::new(panel.right() + gap, body.top()), body.max);
    let note_h = cx.px(130.0);
    let note_gap = cx.px(18.0);
    let total = 3.0 * note_h + 2.0 * note_gap;
    let mut y = notes.center().y - total / 2.0;
    for (row, note) in rows.iter().zip(SECTOR_NOTES) {
        let card = Rect::from_min_size(Pos2::new(notes.left(), y), egui::vec2(notes.width(), note_h));
        let accent = row.fill.map(Theme::rgb).unwrap_or(theme.accent);
        side_note(
            ui,
            cx,
            card,
            accent,
            &format!("{} ({})", row.name, format_value(row.value(SERIES_VALUE))),
            note,
        );
        y += note_h + note_gap;
    }
}

pub fn render_error_categories(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::ErrorCategories.title(),
        "Ranking por tipo macro de erro.",
    );

    let halves = columns(body, 2, cx.px(40.0));
    let panel = Rect::from_center_size(
        halves[0].center(),
        egui::vec2(halves[0].width(), halves[0].height().min(cx.px(520.0))),
    );
    text::draw_panel(ui, panel, theme, theme.surface_alt, cx.opacity * 0.6, cx.scale);
    draw_chart(
        ui,
        cx,
        panel.shrink(cx.px(20.0)),
        &single_series(cx, &cx.report.error_categories, ChartKind::Bars),
    );

    let list = halves[1];
    let item_h = cx.px(150.0);
    let item_gap = cx.px(28.0);
    let total = 3.0 * item_h + 2.0 * item_gap;
    let mut y = list.center().y - total / 2.0;
    let markers = [theme.accent, theme.warning, theme.highlight];
    for ((heading, note), marker) in CATEGORY_NOTES.into_iter().zip(markers) {
        let bar = Rect::from_min_size(Pos2::new(list.left(), y), egui::vec2(cx.px(3.0), item_h));
        ui.painter()
            .rect_filled(bar, 0.0, cx.pick(marker, theme.foreground));
        let x = list.left() + cx.px(24.0);
        let width = list.width() - cx.px(24.0);
        let heading_h = text::draw_text(
            ui,
            heading,
            Pos2::new(x, y),
            theme.h3_size * cx.scale,
            cx.fade(theme.heading_color),
            width,
        );
        text::draw_text(
            ui,
            note,
            Pos2::new(x, y + heading_h + cx.px(8.0)),
            theme.body_size * 0.85 * cx.scale,
            cx.fade(theme.muted),
            width,
        );
        y += item_h + item_gap;
    }
}

/// Card with a colored left edge, a bold heading and one line of context.
fn side_note(
    ui: &egui::Ui,
    cx: &SlideContext,
    card: Rect,
    accent: egui::Color32,
    heading: &str,
    body: &str,
) {
    let theme = cx.theme;
    let radius = cx.px(8.0);
    ui.painter()
        .rect_filled(card, radius, cx.pick(theme.surface_alt, theme.surface));
    if cx.print {
        ui.painter().rect_stroke(
            card,
            radius,
            Stroke::new(1.0, cx.fade(theme.border)),
            egui::StrokeKind::Inside,
        );
    } else {
        let edge = Rect::from_min_size(card.min, egui::vec2(cx.px(5.0), card.height()));
        ui.painter().rect_filled(
            edge,
            egui::CornerRadius {
                nw: radius as u8,
                sw: radius as u8,
                ne: 0,
                se: 0,
            },
            cx.fade(accent),
        );
    }

    let inner = card.shrink(cx.px(18.0));
    let x = inner.left() + cx.px(6.0);
    let heading_h = text::draw_text(
        ui,
        heading,
        Pos2::new(x, inner.top()),
        theme.body_size * cx.scale,
        cx.pick(accent, theme.foreground),
        inner.width(),
    );
    text::draw_text(
        ui,
        body,
        Pos2::new(x, inner.top() + heading_h + cx.px(6.0)),
        theme.small_size * cx.scale,
        cx.fade(theme.muted),
        inner.width(),
    );
}
