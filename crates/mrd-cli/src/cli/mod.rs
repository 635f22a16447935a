use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `mrd` binary.
#[derive(Debug, Parser)]
#[command(name = "mrd", version, about = "Meridian - device metadata database audit tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to an explicit configuration file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["mrd", "--format", "table", "--verbose", "audit"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Audit(_)));
    }

    #[test]
    fn audit_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["mrd", "audit", "--file", "/tmp/db.json", "--extras"])
            .expect("cli should parse");

        let Commands::Audit(args) = cli.command else {
            panic!("expected audit subcommand");
        };
        assert_eq!(args.file.as_deref(), Some(std::path::Path::new("/tmp/db.json")));
        assert!(args.extras);
    }

    #[test]
    fn audit_defaults_to_full_sequence() {
        let cli = Cli::try_parse_from(["mrd", "audit"]).expect("cli should parse");
        let Commands::Audit(args) = cli.command else {
            panic!("expected audit subcommand");
        };
        assert!(args.file.is_none());
        assert!(!args.extras);
    }

    #[test]
    fn search_requires_criteria() {
        assert!(Cli::try_parse_from(["mrd", "search"]).is_err());

        let cli = Cli::try_parse_from(["mrd", "search", "name=im*", "type=Motor"])
            .expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search subcommand");
        };
        assert_eq!(args.criteria.len(), 2);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["mrd", "--format", "xml", "audit"]).is_err());
    }
}
