use serde::Deserialize;

/// Glyphs a report may reference by name.
///
/// The set is closed: a report naming an icon outside this list fails to
/// deserialize instead of rendering an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    FileText,
    AlertTriangle,
    Clock,
    ArrowRight,
    Bed,
    Box,
    Pill,
    Utensils,
    Aperture,
    CheckCircle,
    TrendingUp,
    ShieldAlert,
    Calendar,
    User,
}

impl Icon {
    /// Character drawn for this icon. All of them are covered by egui's
    /// bundled emoji fonts.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::FileText => "\u{1F4C4}",
            Self::AlertTriangle => "\u{26A0}",
            Self::Clock => "\u{1F550}",
            Self::ArrowRight => "\u{27A1}",
            Self::Bed => "\u{1F6CF}",
            Self::Box => "\u{1F4E6}",
            Self::Pill => "\u{1F48A}",
            Self::Utensils => "\u{1F374}",
            Self::Aperture => "\u{1F4F7}",
            Self::CheckCircle => "\u{2714}",
            Self::TrendingUp => "\u{1F4C8}",
            Self::ShieldAlert => "\u{1F6E1}",
            Self::Calendar => "\u{1F4C5}",
            Self::User => "\u{1F464}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_names_resolve() {
        let icon: Icon = serde_yaml::from_str("alert-triangle").unwrap();
        assert_eq!(icon, Icon::AlertTriangle);
        let icon: Icon = serde_yaml::from_str("file-text").unwrap();
        assert_eq!(icon, Icon::FileText);
    }

    #[test]
    fn test_unknown_icon_is_rejected() {
        let result: Result<Icon, _> = serde_yaml::from_str("sparkles");
        assert!(result.is_err());
    }

    #[test]
    fn test_every_icon_has_a_glyph() {
        let all = [
            Icon::FileText,
            Icon::AlertTriangle,
            Icon::Clock,
            Icon::ArrowRight,
            Icon::Bed,
            Icon::Box,
            Icon::Pill,
            Icon::Utensils,
            Icon::Aperture,
            Icon::CheckCircle,
            Icon::TrendingUp,
            Icon::ShieldAlert,
            Icon::Calendar,
            Icon::User,
        ];
        for icon in all {
            assert!(!icon.glyph().is_empty(), "{icon:?} has no glyph");
        }
    }
}
