use super::resource_schema;
use crate::utils;
use capella_plugin::{Provider, ResourceData};
use capella_provider::CapellaMeta;
use serde_json::json;
use std::path::Path;

/// Compare saved state with a desired configuration
///
/// Needs no credentials: only the schema is consulted.
pub fn handle(
    provider: &Provider<CapellaMeta>,
    resource_type: &str,
    state_path: &Path,
    config_path: &Path,
) -> anyhow::Result<()> {
    let schema = resource_schema(provider, resource_type)?;
    let prior = utils::load_object(state_path)?;
    let mut proposed = utils::load_object(config_path)?;
    schema.apply_defaults(&mut proposed);
    schema.validate(&proposed).into_result()?;

    let replace = schema.requires_replace(&prior, &proposed);
    let action = if !ResourceData::from(prior).exists() {
        "create"
    } else if replace.is_empty() {
        "no-op"
    } else {
        "replace"
    };

    utils::print_json(&json!({
        "action": action,
        "requires_replace": replace,
    }))
}
