//! Minimal CLI: OpenAPI document → Sorbet structs
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::diagnostics::LogSink;
use crate::{Config, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Sorbet T::Struct / T::Enum classes from an OpenAPI document's component schemas
#[derive(Parser, Debug)]
#[command(name = "openapi-sorbet", version)]
pub struct CommandLineInterface {
    /// path to the OpenAPI document (.json, .yaml or .yml)
    #[arg(long)]
    path: PathBuf,

    /// Ruby module to nest the classes in, e.g. `Acme::Models`
    #[arg(long, default_value = "")]
    module: String,

    /// output root directory
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// print the generated files instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            path: self.path.clone(),
            module: self.module.clone(),
            out: self.out.clone(),
            dry_run: self.dry_run,
        }
    }

    /// `RUST_LOG` wins over `-v`.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        // a second init (tests, embedding) keeps the first subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub fn run(&self) -> Result<()> {
        let mut sink = LogSink::new();
        let report = crate::run(&self.config(), &mut sink)?;

        let verb = if self.dry_run { "rendered" } else { "generated" };
        let summary = format!("{verb} {} files", report.files.len());
        let warnings = format!("{} warnings", sink.count());
        eprintln!(
            "{} {}",
            summary.green().bold(),
            if sink.count() == 0 { warnings.dimmed() } else { warnings.yellow() }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_flags() {
        let cli =
            CommandLineInterface::try_parse_from(["openapi-sorbet", "--path", "api.yaml"]).unwrap();
        let config = cli.config();
        assert_eq!(config.path, PathBuf::from("api.yaml"));
        assert_eq!(config.module, "");
        assert_eq!(config.out, PathBuf::from("out"));
        assert!(!config.dry_run);
    }

    #[test]
    fn all_flags_parse() {
        let cli = CommandLineInterface::try_parse_from([
            "openapi-sorbet",
            "--path",
            "api.json",
            "--module",
            "Acme::Models",
            "--out",
            "gen",
            "--dry-run",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let config = cli.config();
        assert_eq!(config.module, "Acme::Models");
        assert_eq!(config.out, PathBuf::from("gen"));
        assert!(config.dry_run);
    }

    #[test]
    fn path_is_required() {
        assert!(CommandLineInterface::try_parse_from(["openapi-sorbet"]).is_err());
    }
}
