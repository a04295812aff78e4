pub mod icon;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub use icon::Icon;

const BUILTIN_REPORT: &str = include_str!("../../assets/report.yaml");

/// Series keys the weekly flow charts read.
pub const SERIES_AUDIT: &str = "Auditoria";
pub const SERIES_BILLING: &str = "Faturamento";
/// Series key for single-series charts.
pub const SERIES_VALUE: &str = "value";

/// The full, read-only report a deck presents.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub kpis: Vec<Kpi>,
    pub revenue_leaks: Vec<Kpi>,
    pub weekly_flow: Vec<ChartRow>,
    pub errors_by_sector: Vec<ChartRow>,
    pub error_categories: Vec<ChartRow>,
    pub top_errors: Vec<RankItem>,
    pub insurers: Vec<Insurer>,
    pub professionals: Vec<RankItem>,
    /// Directory logo references resolve against. Filled in on load.
    #[serde(skip)]
    pub base_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportMeta {
    pub organisation: String,
    pub title: String,
    pub subtitle: String,
    pub tagline: String,
    pub summary: String,
    pub period: String,
    pub author: String,
    pub credit: String,
    pub registration: String,
    pub accounts_audited: u32,
    pub errors_found: u32,
    #[serde(default = "default_logo_dir")]
    pub logo_dir: PathBuf,
}

fn default_logo_dir() -> PathBuf {
    PathBuf::from("logos")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub sub: String,
    pub icon: Icon,
}

/// One category of a chart: a label plus a value per named series.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartRow {
    pub name: String,
    pub values: BTreeMap<String, f64>,
    #[serde(default)]
    pub fill: Option<Rgb>,
}

impl ChartRow {
    pub fn value(&self, series: &str) -> f64 {
        self.values.get(series).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankItem {
    pub position: u32,
    pub name: String,
    pub quantity: u32,
    pub tag: String,
    pub severity: Severity,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Insurer {
    pub name: String,
    pub errors: u32,
    pub pct: String,
    pub initials: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// A `#rrggbb` color from the report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub [u8; 3]);

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .ok_or_else(|| format!("color must start with '#': {value}"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("color must be #rrggbb: {value}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid color: {value}"))
        };
        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl Report {
    /// The report compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_REPORT, Path::new("."))
            .context("Embedded report is malformed")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        let base_path = path.parent().unwrap_or(Path::new("."));
        Self::parse(&contents, base_path)
            .with_context(|| format!("Failed to parse report {}", path.display()))
    }

    pub fn parse(contents: &str, base_path: &Path) -> Result<Self> {
        let mut report: Report = serde_yaml::from_str(contents)?;
        report.base_path = base_path.to_path_buf();
        report.validate()?;
        log::debug!(
            "Loaded report '{}' ({} insurers, {} ranked items)",
            report.meta.title,
            report.insurers.len(),
            report.top_errors.len()
        );
        Ok(report)
    }

    pub fn logo_dir(&self) -> PathBuf {
        self.base_path.join(&self.meta.logo_dir)
    }

    fn validate(&self) -> Result<()> {
        for row in &self.weekly_flow {
            for series in [SERIES_AUDIT, SERIES_BILLING] {
                anyhow::ensure!(
                    row.values.contains_key(series),
                    "weekly_flow row '{}' is missing series '{series}'",
                    row.name
                );
            }
        }
        for (section, rows) in [
            ("errors_by_sector", &self.errors_by_sector),
            ("error_categories", &self.error_categories),
        ] {
            for row in rows {
                anyhow::ensure!(
                    row.values.contains_key(SERIES_VALUE),
                    "{section} row '{}' is missing series '{SERIES_VALUE}'",
                    row.name
                );
            }
        }
        for (section, items) in [
            ("top_errors", &self.top_errors),
            ("professionals", &self.professionals),
        ] {
            for (i, item) in items.iter().enumerate() {
                anyhow::ensure!(
                    item.position as usize == i + 1,
                    "{section}: expected position {} for '{}', found {}",
                    i + 1,
                    item.name,
                    item.position
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_report_parses() {
        let report = Report::builtin().unwrap();
        assert_eq!(report.meta.organisation, "Hospital UNIQUE");
        assert_eq!(report.kpis.len(), 5);
        assert_eq!(report.revenue_leaks.len(), 4);
        assert_eq!(report.weekly_flow.len(), 7);
        assert_eq!(report.top_errors.len(), 10);
        assert_eq!(report.insurers.len(), 11);
        assert_eq!(report.professionals.len(), 5);
    }

    #[test]
    fn test_builtin_values() {
        let report = Report::builtin().unwrap();
        let wednesday = &report.weekly_flow[2];
        assert_eq!(wednesday.name, "Qua");
        assert_eq!(wednesday.value(SERIES_AUDIT), 125.0);
        assert_eq!(wednesday.value(SERIES_BILLING), 128.0);
        assert_eq!(report.errors_by_sector[0].value(SERIES_VALUE), 1093.0);
        assert_eq!(report.errors_by_sector[0].fill, Some(Rgb([0x3b, 0x82, 0xf6])));
        assert_eq!(report.kpis[2].value, "10,6d");
        assert_eq!(report.top_errors[0].severity, Severity::Danger);
        assert_eq!(
            report.professionals[0].details.as_deref(),
            Some("Gestor Faturamento")
        );
    }

    #[test]
    fn test_logo_dir_is_relative_to_report() {
        let report = Report::builtin().unwrap();
        assert_eq!(report.logo_dir(), Path::new(".").join("logos"));
    }

    #[test]
    fn test_rgb_parsing() {
        assert_eq!(
            Rgb::try_from("#a855f7".to_string()),
            Ok(Rgb([0xa8, 0x55, 0xf7]))
        );
        assert!(Rgb::try_from("a855f7".to_string()).is_err());
        assert!(Rgb::try_from("#a855".to_string()).is_err());
        assert!(Rgb::try_from("#zz55f7".to_string()).is_err());
    }

    #[test]
    fn test_missing_series_is_rejected() {
        let builtin = include_str!("../../assets/report.yaml");
        let broken = builtin.replace(
            "{ name: Seg, values: { Auditoria: 72, Faturamento: 74 } }",
            "{ name: Seg, values: { Auditoria: 72 } }",
        );
        let err = Report::parse(&broken, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("Faturamento"), "{err}");
    }

    #[test]
    fn test_out_of_order_positions_are_rejected() {
        let builtin = include_str!("../../assets/report.yaml");
        let broken = builtin.replace("{ position: 2, name: Medicação", "{ position: 7, name: Medicação");
        let err = Report::parse(&broken, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("top_errors"), "{err}");
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let builtin = include_str!("../../assets/report.yaml");
        let broken = builtin.replacen("severity: danger", "severity: catastrophic", 1);
        assert!(Report::parse(&broken, Path::new(".")).is_err());
    }
}
