//! Handle `mrd audit`.

use std::time::Duration;

use anyhow::Context;
use mrd_audit::{AuditPipeline, PythonProbe};
use mrd_config::MrdConfig;
use mrd_core::SchemaRegistry;
use mrd_registry::RegistryClient;
use mrd_store::RecordStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::resolve_database_path;
use crate::output;

pub async fn handle(
    args: &AuditArgs,
    config: &MrdConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let database_path = resolve_database_path(args.file.as_deref(), config)?;
    tracing::info!(path = %database_path.display(), "using database file");

    let store = RecordStore::load(&database_path).with_context(|| {
        format!(
            "the database file path '{}' could not be validated",
            database_path.display()
        )
    })?;

    let registry = SchemaRegistry::new();
    let timeout = Duration::from_secs(config.audit.probe_timeout_secs);
    let index = RegistryClient::new(&config.audit.index_url, timeout);
    let probe = PythonProbe::new(&config.audit.python, timeout);
    let pipeline = AuditPipeline::new(&registry, &index, &probe, timeout);

    let report = if args.extras {
        pipeline.run_extras(store.all())
    } else {
        pipeline.run(store.all()).await
    };

    if !flags.quiet {
        tracing::info!(
            records = store.all().len(),
            findings = report.finding_count(),
            "audit complete"
        );
    }

    // Findings are reported, not treated as process failure.
    output::output(&report, flags.format)
}
