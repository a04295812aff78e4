pub mod chart;
pub mod frame;
pub mod logo;
pub mod slides;
pub mod text;

use eframe::egui::{self, Color32};

use crate::data::Report;
use crate::deck::SlideKind;
use crate::theme::Theme;

use chart::ChartPalette;
use logo::LogoCache;

/// Everything a content unit needs besides its rect.
pub struct SlideContext<'a> {
    pub report: &'a Report,
    pub theme: &'a Theme,
    pub palette: ChartPalette,
    pub logos: &'a LogoCache,
    /// Paper output: flat colors, no animation, no hover.
    pub print: bool,
    pub opacity: f32,
    pub scale: f32,
    /// Entry animation progress for charts, 1.0 when settled.
    pub chart_progress: f32,
}

impl SlideContext<'_> {
    pub fn px(&self, value: f32) -> f32 {
        value * self.scale
    }

    pub fn fade(&self, color: Color32) -> Color32 {
        Theme::with_opacity(color, self.opacity)
    }

    /// `screen` on screen, `paper` when printing.
    pub fn pick(&self, screen: Color32, paper: Color32) -> Color32 {
        self.fade(if self.print { paper } else { screen })
    }

    pub fn interactive(&self) -> bool {
        !self.print
    }
}

/// Scale factor for a slide drawn into `rect`, relative to a 1920x1080 layout.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Render one content unit into `rect`.
pub fn render_slide(ui: &egui::Ui, kind: SlideKind, rect: egui::Rect, cx: &SlideContext) {
    match kind {
        SlideKind::Cover => slides::cover::render(ui, cx, rect),
        SlideKind::Indicators => slides::indicators::render_kpis(ui, cx, rect),
        SlideKind::RevenueLeaks => slides::indicators::render_revenue_leaks(ui, cx, rect),
        SlideKind::WeeklyFlow => slides::charts::render_weekly_flow(ui, cx, rect),
        SlideKind::AuditVsBilling => slides::charts::render_audit_vs_billing(ui, cx, rect),
        SlideKind::ErrorDistribution => slides::charts::render_error_distribution(ui, cx, rect),
        SlideKind::ItemRanking => slides::tables::render_item_ranking(ui, cx, rect),
        SlideKind::Insurers => slides::insurers::render(ui, cx, rect),
        SlideKind::Professionals => slides::tables::render_professionals(ui, cx, rect),
        SlideKind::ErrorCategories => slides::charts::render_error_categories(ui, cx, rect),
        SlideKind::Strategy => slides::closing::render_strategy(ui, cx, rect),
        SlideKind::NextSteps => slides::closing::render_next_steps(ui, cx, rect),
        SlideKind::Closing => slides::closing::render_closing(ui, cx, rect),
    }
}
