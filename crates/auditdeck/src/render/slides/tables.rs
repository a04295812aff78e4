use eframe::egui::{self, Align2, FontId, Pos2, Rect, Stroke};

use super::section;
use crate::data::{Icon, RankItem, Severity};
use crate::deck::SlideKind;
use crate::render::SlideContext;
use crate::render::text;
use crate::theme::Theme;

const INTERPRETATION: &str = "**Interpretação:** Alto volume nestes casos indica **alta \
    produtividade de auditoria**. Bruno e Kátia, por exemplo, são os que mais auditam.";

#[derive(Clone, Copy)]
struct Column {
    header: &'static str,
    /// Share of the table width.
    weight: f32,
    align: Align2,
}

impl Column {
    const fn new(header: &'static str, weight: f32, align: Align2) -> Self {
        Self {
            header,
            weight,
            align,
        }
    }
}

const RANKING_COLUMNS: [Column; 4] = [
    Column::new("#", 0.08, Align2::CENTER_CENTER),
    Column::new("Item / Causa", 0.47, Align2::LEFT_CENTER),
    Column::new("Qtd", 0.12, Align2::RIGHT_CENTER),
    Column::new("Impacto", 0.33, Align2::LEFT_CENTER),
];

const PROFESSIONAL_COLUMNS: [Column; 5] = [
    Column::new("#", 0.07, Align2::CENTER_CENTER),
    Column::new("Profissional", 0.26, Align2::LEFT_CENTER),
    Column::new("Setor/Função", 0.24, Align2::LEFT_CENTER),
    Column::new("Erros Reg.", 0.14, Align2::RIGHT_CENTER),
    Column::new("Contexto", 0.29, Align2::LEFT_CENTER),
];

pub fn render_item_ranking(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::ItemRanking.title(),
        "Itens com maior volume absoluto de registros na auditoria.",
    );
    ranked_table(ui, cx, body, &RANKING_COLUMNS, &cx.report.top_errors, |item| {
        vec![item.name.as_str()]
    });
}

pub fn render_professionals(ui: &egui::Ui, cx: &SlideContext, rect: Rect) {
    let theme = cx.theme;
    let body = section(
        ui,
        cx,
        rect,
        SlideKind::Professionals.title(),
        "Volume de erros identificados por profissional responsável.",
    );

    let note_h = cx.px(84.0);
    let area = Rect::from_min_max(
        body.min,
        Pos2::new(body.right(), body.bottom() - note_h - cx.px(20.0)),
    );
    let table = ranked_table(
        ui,
        cx,
        area,
        &PROFESSIONAL_COLUMNS,
        &cx.report.professionals,
        |item| vec![item.name.as_str(), item.details.as_deref().unwrap_or("")],
    );

    let note = Rect::from_min_size(
        Pos2::new(body.left(), table.bottom() + cx.px(20.0)),
        egui::vec2(body.width(), note_h),
    );
    text::draw_panel(ui, note, theme, theme.surface_alt, cx.opacity, cx.scale);
    let pad = cx.px(18.0);
    let icon = cx.px(22.0);
    text::draw_icon(
        ui,
        Icon::AlertTriangle,
        Pos2::new(note.left() + pad + icon / 2.0, note.top() + pad + icon / 2.0),
        icon,
        cx.pick(theme.warning, theme.foreground),
    );
    text::draw_emphasis(
        ui,
        INTERPRETATION,
        Pos2::new(note.left() + pad * 2.0 + icon, note.top() + pad),
        theme.small_size * cx.scale,
        cx.fade(theme.muted),
        cx.fade(theme.heading_color),
        note.width() - pad * 3.0 - icon,
    );
}

/// Table of ranked rows: position, the text columns from `labels`, quantity
/// and a severity badge. Returns the rect the table occupies.
fn ranked_table<'a>(
    ui: &egui::Ui,
    cx: &SlideContext,
    area: Rect,
    columns: &[Column],
    items: &'a [RankItem],
    labels: impl Fn(&'a RankItem) -> Vec<&'a str>,
) -> Rect {
    let theme = cx.theme;
    let row_h = (area.height() / (items.len() + 1) as f32).min(cx.px(76.0));
    let table = Rect::from_min_size(area.min, egui::vec2(area.width(), row_h * (items.len() + 1) as f32));
    let radius = cx.px(12.0);

    ui.painter()
        .rect_filled(table, radius, cx.pick(Theme::with_opacity(theme.surface, 0.5), theme.surface));
    let header = Rect::from_min_size(table.min, egui::vec2(table.width(), row_h));
    ui.painter().rect_filled(
        header,
        egui::CornerRadius {
            nw: radius as u8,
            ne: radius as u8,
            sw: 0,
            se: 0,
        },
        cx.fade(theme.surface_alt),
    );

    let cells = column_rects(table, columns, row_h);
    let font = theme.body_size * 0.85 * cx.scale;
    for (column, cell) in columns.iter().zip(&cells) {
        cell_text(ui, cx, *cell, column, column.header, font, cx.fade(theme.heading_color));
    }

    let rule = Stroke::new(1.0, cx.pick(Theme::with_opacity(theme.border, 0.8), theme.border));
    for (r, item) in items.iter().enumerate() {
        let offset = egui::vec2(0.0, row_h * (r + 1) as f32);
        ui.painter().line_segment(
            [table.left_top() + offset, table.right_top() + offset],
            rule,
        );

        let row: Vec<Rect> = cells.iter().map(|c| c.translate(offset)).collect();
        let last = columns.len() - 1;
        cell_text(
            ui,
            cx,
            row[0],
            &columns[0],
            &format!("{}º", item.position),
            font,
            cx.fade(theme.muted),
        );
        for (i, label) in labels(item).into_iter().enumerate() {
            let color = if i == 0 { theme.heading_color } else { theme.muted };
            cell_text(ui, cx, row[i + 1], &columns[i + 1], label, font, cx.fade(color));
        }
        cell_text(
            ui,
            cx,
            row[last - 1],
            &columns[last - 1],
            &item.quantity.to_string(),
            font,
            cx.fade(theme.heading_color),
        );
        severity_pill(ui, cx, row[last], &item.tag, item.severity);
    }

    ui.painter().rect_stroke(
        table,
        radius,
        Stroke::new(1.0, cx.fade(theme.border)),
        egui::StrokeKind::Inside,
    );
    table
}

fn column_rects(table: Rect, columns: &[Column], row_h: f32) -> Vec<Rect> {
    let mut x = table.left();
    columns
        .iter()
        .map(|c| {
            let width = table.width() * c.weight;
            let rect = Rect::from_min_size(Pos2::new(x, table.top()), egui::vec2(width, row_h));
            x += width;
            rect
        })
        .collect()
}

fn cell_text(
    ui: &egui::Ui,
    cx: &SlideContext,
    cell: Rect,
    column: &Column,
    label: &str,
    size: f32,
    color: egui::Color32,
) {
    let inner = cell.shrink2(egui::vec2(cx.px(14.0), 0.0));
    let anchor = column.align.pos_in_rect(&inner);
    ui.painter()
        .text(anchor, column.align, label, FontId::proportional(size), color);
}

fn severity_pill(ui: &egui::Ui, cx: &SlideContext, cell: Rect, tag: &str, severity: Severity) {
    let theme = cx.theme;
    let size = theme.small_size * 0.9 * cx.scale;
    let height = size + size * 0.6;
    let pos = Pos2::new(cell.left() + cx.px(14.0), cell.center().y - height / 2.0);
    let color = theme.severity_color(severity);
    let stroke = if cx.print {
        theme.border
    } else {
        Theme::with_opacity(color, 0.4)
    };
    text::draw_pill(
        ui,
        tag,
        pos,
        size,
        cx.fade(color),
        cx.fade(theme.severity_fill(severity)),
        cx.fade(stroke),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_weights_fill_the_table() {
        for columns in [&RANKING_COLUMNS[..], &PROFESSIONAL_COLUMNS[..]] {
            let total: f32 = columns.iter().map(|c| c.weight).sum();
            assert!((total - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_column_rects_are_contiguous() {
        let table = Rect::from_min_size(Pos2::new(10.0, 0.0), egui::vec2(1000.0, 500.0));
        let cells = column_rects(table, &RANKING_COLUMNS, 50.0);
        assert_eq!(cells[0].left(), 10.0);
        for pair in cells.windows(2) {
            assert!((pair[0].right() - pair[1].left()).abs() < 1e-3);
        }
        assert!((cells[3].right() - 1010.0).abs() < 1e-3);
    }
}
