use anyhow::bail;
use fm_schema::SchemaRegistry;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `filemap schema`. Without a type name, lists the registered types.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let Some(type_name) = &args.type_name else {
        return output(&json!({ "types": registry.list() }), flags.format);
    };
    match registry.get(type_name) {
        Some(schema) => output(schema, flags.format),
        None => bail!(
            "unknown schema type '{type_name}' (available: {})",
            registry.list().join(", ")
        ),
    }
}
