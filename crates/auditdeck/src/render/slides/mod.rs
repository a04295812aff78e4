pub mod charts;
pub mod closing;
pub mod cover;
pub mod indicators;
pub mod insurers;
pub mod tables;

use eframe::egui::{self, Pos2, Rect};

use super::SlideContext;
use super::text;

/// Draw the section heading at the top of `rect` and return what is left
/// below it.
pub fn section(ui: &egui::Ui, cx: &SlideContext, rect: Rect, title: &str, subtitle: &str) -> Rect {
    let used = text::draw_section_title(
        ui,
        title,
        Some(subtitle),
        cx.theme,
        rect.left_top(),
        rect.width(),
        cx.opacity,
        cx.scale,
    );
    Rect::from_min_max(Pos2::new(rect.left(), rect.top() + used), rect.max)
}

/// Split `rect` into `n` equal-width columns separated by `gap`.
pub fn columns(rect: Rect, n: usize, gap: f32) -> Vec<Rect> {
    grid(rect, n, n, gap, rect.height())
}

/// `count` cells of `cell_height`, `cols` per row, filling rows top-down.
pub fn grid(rect: Rect, count: usize, cols: usize, gap: f32, cell_height: f32) -> Vec<Rect> {
    let cols = cols.max(1);
    let cell_width = (rect.width() - gap * (cols as f32 - 1.0)) / cols as f32;
    (0..count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            Rect::from_min_size(
                Pos2::new(
                    rect.left() + col as f32 * (cell_width + gap),
                    rect.top() + row as f32 * (cell_height + gap),
                ),
                egui::vec2(cell_width, cell_height),
            )
        })
        .collect()
}

/// Whole number with `.` thousands separators, as the report prints them.
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(457), "457");
        assert_eq!(format_count(1529), "1.529");
        assert_eq!(format_count(1234567), "1.234.567");
    }

    #[test]
    fn test_columns_split_evenly() {
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(320.0, 100.0));
        let cols = columns(rect, 3, 10.0);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].width(), 100.0);
        assert_eq!(cols[1].left(), 110.0);
        assert_eq!(cols[2].right(), 320.0);
    }

    #[test]
    fn test_grid_wraps_rows() {
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0));
        let cells = grid(rect, 5, 4, 0.0, 50.0);
        assert_eq!(cells[4].left(), 0.0);
        assert_eq!(cells[4].top(), 50.0);
    }
}
