use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Inspect a database's entries.
    Audit(AuditArgs),
    /// Search the record database.
    Search(SearchArgs),
}

/// Arguments for `mrd audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Path to the JSON database to be audited.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Check specifically for extra attributes.
    #[arg(long)]
    pub extras: bool,
}

/// Arguments for `mrd search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Search criteria: field=value with glob patterns. A bare value is
    /// shorthand for name=value. As many criteria as you like.
    #[arg(required = true)]
    pub criteria: Vec<String>,

    /// Path to the JSON database to search.
    #[arg(long)]
    pub file: Option<PathBuf>,
}
