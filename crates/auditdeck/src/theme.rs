use eframe::egui::Color32;

use crate::data::{Rgb, Severity};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub surface: Color32,
    pub surface_alt: Color32,
    pub border: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub highlight: Color32,
    pub danger: Color32,
    pub warning: Color32,
    pub info: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
    pub small_size: f32,
}

impl Theme {
    /// Bright-on-dark styling for interactive viewing.
    pub fn screen() -> Self {
        Self {
            name: "screen".to_string(),
            background: Color32::from_rgb(0x02, 0x06, 0x17),
            surface: Color32::from_rgb(0x0F, 0x17, 0x2A),
            surface_alt: Color32::from_rgb(0x1E, 0x29, 0x3B),
            border: Color32::from_rgb(0x1E, 0x29, 0x3B),
            foreground: Color32::from_rgb(0xCB, 0xD5, 0xE1),
            muted: Color32::from_rgb(0x94, 0xA3, 0xB8),
            heading_color: Color32::from_rgb(0xF1, 0xF5, 0xF9),
            accent: Color32::from_rgb(0x3B, 0x82, 0xF6),
            highlight: Color32::from_rgb(0x34, 0xD3, 0x99),
            danger: Color32::from_rgb(0xF8, 0x71, 0x71),
            warning: Color32::from_rgb(0xFB, 0xBF, 0x24),
            info: Color32::from_rgb(0x60, 0xA5, 0xFA),
            h1_size: 88.0,
            h2_size: 52.0,
            h3_size: 30.0,
            body_size: 26.0,
            small_size: 19.0,
        }
    }

    /// Flat, high-contrast styling for paper.
    pub fn paper() -> Self {
        Self {
            name: "paper".to_string(),
            background: Color32::WHITE,
            surface: Color32::WHITE,
            surface_alt: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            border: Color32::BLACK,
            foreground: Color32::BLACK,
            muted: Color32::from_rgb(0x1F, 0x29, 0x37),
            heading_color: Color32::BLACK,
            accent: Color32::BLACK,
            highlight: Color32::BLACK,
            danger: Color32::from_rgb(0xB9, 0x1C, 0x1C),
            warning: Color32::from_rgb(0xB4, 0x53, 0x09),
            info: Color32::from_rgb(0x1D, 0x4E, 0xD8),
            h1_size: 88.0,
            h2_size: 52.0,
            h3_size: 30.0,
            body_size: 26.0,
            small_size: 19.0,
        }
    }

    pub fn for_print(print: bool) -> Self {
        if print { Self::paper() } else { Self::screen() }
    }

    pub fn is_paper(&self) -> bool {
        self.name == "paper"
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    pub fn rgb(color: Rgb) -> Color32 {
        let [r, g, b] = color.0;
        Color32::from_rgb(r, g, b)
    }

    pub fn severity_color(&self, severity: Severity) -> Color32 {
        match severity {
            Severity::Danger => self.danger,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    /// Pill background for a severity tag. Paper pills are outlined only.
    pub fn severity_fill(&self, severity: Severity) -> Color32 {
        if self.is_paper() {
            Color32::TRANSPARENT
        } else {
            Self::with_opacity(self.severity_color(severity), 0.15)
        }
    }

    /// Badge colors for logo fallbacks, cycled by card position.
    pub fn fallback_palette() -> [Color32; 10] {
        [
            Color32::from_rgb(0x05, 0x96, 0x69), // emerald-600
            Color32::from_rgb(0x04, 0x78, 0x57), // emerald-700
            Color32::from_rgb(0x25, 0x63, 0xEB), // blue-600
            Color32::from_rgb(0x1D, 0x4E, 0xD8), // blue-700
            Color32::from_rgb(0xEA, 0x58, 0x0C), // orange-600
            Color32::from_rgb(0xDC, 0x26, 0x26), // red-600
            Color32::from_rgb(0x93, 0x33, 0xEA), // purple-600
            Color32::from_rgb(0x4F, 0x46, 0xE5), // indigo-600
            Color32::from_rgb(0x0D, 0x94, 0x88), // teal-600
            Color32::from_rgb(0x08, 0x91, 0xB2), // cyan-600
        ]
    }
}
