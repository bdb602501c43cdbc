use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sysmon_config::{DetailMode, Settings, ThemeMode};

/// System monitor: CPU usage and temperature, memory and disk usage.
#[derive(Debug, Parser)]
#[command(name = "sysmon", version, about)]
pub struct Cli {
    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color theme for this run.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full-screen text monitor.
    Text(TextArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::System => ThemeMode::System,
        }
    }
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Time between screen refreshes, in seconds.
    #[arg(short, long, value_name = "TIME")]
    pub refresh: Option<f64>,

    /// Show disk details (default).
    #[arg(short, long, group = "details")]
    pub disk: bool,

    /// Show temperature details.
    #[arg(short, long, group = "details")]
    pub temp: bool,

    /// Show disk and temperature details side by side.
    #[arg(short, long, group = "details")]
    pub both: bool,

    /// Show no details.
    #[arg(short = 'x', long, group = "details")]
    pub no_details: bool,
}

impl TextArgs {
    pub fn details(&self) -> Option<DetailMode> {
        if self.disk {
            Some(DetailMode::Disk)
        } else if self.temp {
            Some(DetailMode::Temperature)
        } else if self.both {
            Some(DetailMode::Both)
        } else if self.no_details {
            Some(DetailMode::None)
        } else {
            None
        }
    }
}

impl Cli {
    /// Fold command-line overrides into `settings` for this run.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(theme) = self.theme {
            settings.general.theme = theme.into();
        }
        if let Some(Command::Text(args)) = &self.command {
            if let Some(refresh) = args.refresh {
                settings.text.refresh_secs = refresh;
            }
            if let Some(details) = args.details() {
                settings.text.details = details;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn no_subcommand_runs_dashboard() {
        let cli = parse(&["sysmon"]);
        assert!(cli.command.is_none());
        assert!(cli.theme.is_none());
    }

    #[test]
    fn theme_flag_overrides_settings() {
        let cli = parse(&["sysmon", "--theme", "light"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.general.theme, ThemeMode::Light);
    }

    #[test]
    fn text_flags_override_settings() {
        let cli = parse(&["sysmon", "text", "-r", "2.5", "-b"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.text.refresh_secs, 2.5);
        assert_eq!(settings.text.details, DetailMode::Both);
    }

    #[test]
    fn text_without_flags_keeps_settings() {
        let cli = parse(&["sysmon", "text"]);
        let mut settings = Settings::default();
        settings.text.details = DetailMode::Temperature;
        cli.apply(&mut settings);
        assert_eq!(settings.text.details, DetailMode::Temperature);
        assert_eq!(settings.text.refresh_secs, 1.0);
    }

    #[test]
    fn detail_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["sysmon", "text", "-d", "-t"]).is_err());
        let Some(Command::Text(args)) = parse(&["sysmon", "text", "-x"]).command else {
            panic!("expected text subcommand");
        };
        assert_eq!(args.details(), Some(DetailMode::None));
    }

    #[test]
    fn config_path_is_global() {
        let cli = parse(&["sysmon", "text", "--config", "/tmp/s.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
