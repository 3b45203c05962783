//! Command line interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "note-browser", version, about = "Browse a patient's clinical notes")]
pub struct Cli {
    /// Config file (default: <config_dir>/note-browser/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Notes endpoint URL, overrides `endpoint.url`
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds, overrides `request.timeout_seconds`
    #[arg(long, global = true)]
    pub timeout: Option<u32>,

    /// Log level filter, overrides `logging.level`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive browser (default)
    Browse(BrowseArgs),
    /// Run one search and print the notes
    Dump(DumpArgs),
}

#[derive(Debug, Default, Args)]
pub struct BrowseArgs {
    /// Patient MRN, or `fhir:<id>` for a FHIR logical id
    #[arg(long)]
    pub mrn: Option<String>,

    /// Only notes on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub after: Option<String>,
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Patient MRN, or `fhir:<id>` for a FHIR logical id
    #[arg(long)]
    pub mrn: String,

    /// Only notes on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub after: String,

    #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
    pub format: DumpFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.url = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request.timeout_seconds = timeout;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_browse() {
        let cli = Cli::try_parse_from(["note-browser"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn browse_accepts_prefill() {
        let cli =
            Cli::try_parse_from(["note-browser", "browse", "--mrn", "123", "--after", "2024-01-01"])
                .unwrap();
        match cli.command {
            Some(Command::Browse(args)) => {
                assert_eq!(args.mrn.as_deref(), Some("123"));
                assert_eq!(args.after.as_deref(), Some("2024-01-01"));
            }
            other => panic!("Expected Browse, got {other:?}"),
        }
    }

    #[test]
    fn dump_requires_query() {
        assert!(Cli::try_parse_from(["note-browser", "dump", "--mrn", "123"]).is_err());

        let cli = Cli::try_parse_from([
            "note-browser",
            "dump",
            "--mrn",
            "123",
            "--after",
            "2024-01-01",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Dump(DumpArgs { format: DumpFormat::Json, .. }))
        ));
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "note-browser",
            "--endpoint",
            "https://notes.example/fhir",
            "--timeout",
            "7",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.endpoint.url, "https://notes.example/fhir");
        assert_eq!(config.request.timeout_seconds, 7);
        assert_eq!(config.logging.level, "debug");
    }
}
