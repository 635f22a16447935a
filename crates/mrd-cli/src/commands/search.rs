//! Handle `mrd search`.

use anyhow::Context;
use mrd_config::MrdConfig;
use mrd_store::RecordStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::resolve_database_path;
use crate::output;

pub fn handle(args: &SearchArgs, config: &MrdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let criteria = parse_criteria(&args.criteria)?;

    let database_path = resolve_database_path(args.file.as_deref(), config)?;
    let store = RecordStore::load(&database_path).with_context(|| {
        format!(
            "the database file path '{}' could not be validated",
            database_path.display()
        )
    })?;

    let hits = store.search(&criteria)?;
    if hits.is_empty() {
        tracing::error!("no records found");
    }

    output::output(&hits, flags.format)
}

/// Turn `field=value` strings into criteria pairs. A bare value searches
/// the `name` field. Duplicate fields are rejected rather than silently
/// overwritten.
fn parse_criteria(raw: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    let mut criteria: Vec<(String, String)> = Vec::with_capacity(raw.len());

    for entry in raw {
        let (field, value) = entry
            .split_once('=')
            .map_or(("name", entry.as_str()), |(field, value)| (field, value));

        if criteria.iter().any(|(existing, _)| existing == field) {
            anyhow::bail!("received duplicate search criteria '{field}'");
        }
        criteria.push((field.to_string(), value.to_string()));
    }

    Ok(criteria)
}
