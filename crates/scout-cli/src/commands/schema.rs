use anyhow::Context;
use scout_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `scout schema [name]`. Needs no config or library.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    match &args.name {
        None => output(&registry.list(), flags.format),
        Some(name) => {
            let schema = registry.get(name).with_context(|| {
                format!(
                    "unknown schema '{name}'; available: {}",
                    registry.list().join(", ")
                )
            })?;
            output(schema, flags.format)
        }
    }
}
