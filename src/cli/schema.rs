use crate::config::Config;
use schemars::schema_for;

/// Print the config file's JSON Schema, for editor completion on curator.yaml
pub fn execute() -> anyhow::Result<()> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
