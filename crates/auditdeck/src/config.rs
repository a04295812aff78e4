use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "auditdeck";

pub const VALID_KEYS: &str = "defaults.start_slide, defaults.windowed, print.output_dir, \
    print.command, print.prepare_ms, print.settle_ms, print.reset_ms";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print: Option<PrintConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Slide to open on, 1-indexed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Where printed pages are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Command the page files are handed to, e.g. `lp -o fit-to-page`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepare_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_ms: Option<u64>,
}

impl PrintConfig {
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(default_print_dir)
    }
}

pub fn default_print_dir() -> PathBuf {
    dirs::document_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("print"))
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `auditdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.to_yaml()?)?;
        Ok(path)
    }

    pub fn to_yaml(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("# auditdeck configuration\n{yaml}"))
    }

    pub fn print_or_default(&self) -> PrintConfig {
        self.print.clone().unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.start_slide" => {
                let slide = parse_number::<usize>(key, value)?;
                if slide == 0 {
                    anyhow::bail!("Invalid start_slide: {value}. Slides are numbered from 1.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_slide = Some(slide);
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            "print.output_dir" => {
                if value.trim().is_empty() {
                    anyhow::bail!("Invalid output_dir: must not be empty.");
                }
                self.print.get_or_insert_with(PrintConfig::default).output_dir =
                    Some(PathBuf::from(value));
            }
            "print.command" => {
                // An empty command disables handing pages to a printer.
                let command = value.trim();
                self.print.get_or_insert_with(PrintConfig::default).command =
                    (!command.is_empty()).then(|| command.to_string());
            }
            "print.prepare_ms" => {
                self.print.get_or_insert_with(PrintConfig::default).prepare_ms =
                    Some(parse_number(key, value)?);
            }
            "print.settle_ms" => {
                self.print.get_or_insert_with(PrintConfig::default).settle_ms =
                    Some(parse_number(key, value)?);
            }
            "print.reset_ms" => {
                self.print.get_or_insert_with(PrintConfig::default).reset_ms =
                    Some(parse_number(key, value)?);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("Invalid value for {key}: {value}. Must be a whole number."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_defaults() {
        let mut config = Config::default();
        config.set("defaults.start_slide", "4").unwrap();
        config.set("defaults.windowed", "true").unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.start_slide, Some(4));
        assert_eq!(defaults.windowed, Some(true));
    }

    #[test]
    fn test_set_print_timings() {
        let mut config = Config::default();
        config.set("print.prepare_ms", "2500").unwrap();
        config.set("print.reset_ms", "0").unwrap();
        let print = config.print.unwrap();
        assert_eq!(print.prepare_ms, Some(2500));
        assert_eq!(print.settle_ms, None);
        assert_eq!(print.reset_ms, Some(0));
    }

    #[test]
    fn test_empty_command_clears() {
        let mut config = Config::default();
        config.set("print.command", "lp -o fit-to-page").unwrap();
        assert_eq!(
            config.print.as_ref().unwrap().command.as_deref(),
            Some("lp -o fit-to-page")
        );
        config.set("print.command", "  ").unwrap();
        assert_eq!(config.print.unwrap().command, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.start_slide", "two").is_err());
        assert!(config.set("defaults.windowed", "maybe").is_err());
        assert!(config.set("print.settle_ms", "-5").is_err());
        assert!(config.set("print.output_dir", "").is_err());
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let mut config = Config::default();
        let err = config.set("defaults.theme", "dark").unwrap_err();
        assert!(err.to_string().contains("print.prepare_ms"));
    }

    #[test]
    fn test_yaml_round_trip_skips_unset() {
        let mut config = Config::default();
        config.set("print.settle_ms", "250").unwrap();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("settle_ms: 250"));
        assert!(!yaml.contains("defaults"));
        assert!(!yaml.contains("prepare_ms"));

        let body = yaml.lines().skip(1).collect::<Vec<_>>().join("\n");
        let parsed: Config = serde_yaml::from_str(&body).unwrap();
        assert_eq!(parsed.print.unwrap().settle_ms, Some(250));
    }
}
