//! JSON schema of the configuration file.

use crate::config::RibbonConfig;

/// Public identifier of the schema.
pub const SCHEMA_ID: &str =
    "https://raw.githubusercontent.com/ribbon-bar/ribbon/main/ribbon.schema.json";

/// Generates a JSON Schema for the Ribbon configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(RibbonConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for the Ribbon configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    let schema = generate_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
