//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum PrintMode {
    /// Content plus every field as indented JSON (default)
    #[default]
    Full,
    /// Role, type and a short content preview
    Summary,
    /// Ids, kwargs, response metadata and usage
    Metadata,
    /// Role and content only
    Content,
    /// Whole message object as JSON with long lines cut
    Json,
}

#[derive(Parser)]
#[command(name = "msgcost")]
#[command(
    about = "Token cost accounting and debug views for LLM agent conversations",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Enable debug logging (per-message cost lines)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
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
    fn config_enables_debug_and_color() {
        let config = Config {
            debug: true,
            color: Some(ConfigColorMode::Always),
            ..Config::default()
        };
        let cli = parse(&["msgcost", "models"]).with_config(&config);
        assert!(cli.debug);
        assert_eq!(cli.color, ColorMode::Always);
        assert!(cli.use_color());
    }

    #[test]
    fn cli_color_overrides_config() {
        let config = Config {
            color: Some(ConfigColorMode::Always),
            ..Config::default()
        };
        let cli = parse(&["msgcost", "--color", "never", "models"]).with_config(&config);
        assert_eq!(cli.color, ColorMode::Never);
        assert!(!cli.use_color());
    }

    #[test]
    fn no_color_wins() {
        let cli = parse(&["msgcost", "models", "--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn cost_requires_input() {
        assert!(Cli::try_parse_from(["msgcost", "cost"]).is_err());
    }

    #[test]
    fn inspect_mode_parses() {
        let cli = parse(&["msgcost", "inspect", "run.json", "--mode", "summary"]);
        match cli.command {
            Commands::Inspect { mode, .. } => assert_eq!(mode, PrintMode::Summary),
            _ => panic!("expected inspect"),
        }
    }
}
