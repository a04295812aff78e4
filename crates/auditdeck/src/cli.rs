use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "auditdeck")]
#[command(author, version, about)]
#[command(long_about = "Executive billing-audit report, presented as a keyboard-driven deck.\n\n\
    Navigate with the arrow keys or Space, print every slide as pages with Ctrl+P.\n\n\
    Examples:\n  \
    auditdeck                      Present the built-in report (fullscreen)\n  \
    auditdeck --windowed           Present in a window\n  \
    auditdeck --data report.yaml   Present another report with the same layout\n  \
    auditdeck export               Save every slide as a PNG")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Report file to present instead of the built-in one
    #[arg(long, global = false)]
    pub data: Option<PathBuf>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Export slides as PNG images
    Export {
        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Export width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Export height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Keep the on-screen style instead of the print style
        #[arg(long)]
        screen: bool,

        /// Report file to export instead of the built-in one
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.start_slide, print.command, print.prepare_ms)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    /// Default log filter for the verbosity flags; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Export {
                output_dir,
                width,
                height,
                screen,
                data,
            }) => {
                let report = load_report(data)?;
                crate::commands::export::run(report, output_dir, width, height, screen)
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                let report = load_report(self.data)?;
                crate::app::run(report, self.windowed, self.slide)
            }
        }
    }
}

fn load_report(data: Option<PathBuf>) -> anyhow::Result<crate::data::Report> {
    match data {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            crate::data::Report::load(&path)
        }
        None => crate::data::Report::builtin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_presents() {
        let cli = Cli::try_parse_from(["auditdeck"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.windowed);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_presentation_flags() {
        let cli =
            Cli::try_parse_from(["auditdeck", "--windowed", "--slide", "4", "-vv"]).unwrap();
        assert!(cli.windowed);
        assert_eq!(cli.slide, Some(4));
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn test_quiet_beats_verbose() {
        let cli = Cli::try_parse_from(["auditdeck", "-v", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["auditdeck", "export"]).unwrap();
        match cli.command {
            Some(Commands::Export {
                output_dir,
                width,
                height,
                screen,
                data,
            }) => {
                assert_eq!(output_dir, PathBuf::from("export"));
                assert_eq!((width, height), (1920, 1080));
                assert!(!screen);
                assert!(data.is_none());
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_config_set_parses() {
        let cli =
            Cli::try_parse_from(["auditdeck", "config", "set", "print.command", "lp"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }

    #[test]
    fn test_missing_data_file_is_an_error() {
        let err = load_report(Some(PathBuf::from("/nonexistent/report.yaml"))).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
