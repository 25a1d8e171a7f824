pub mod create;
pub mod delete;
pub mod plan;
pub mod read;
pub mod schema;

use crate::utils;
use capella_plugin::{ConfiguredProvider, Provider, Schema};
use capella_provider::CapellaMeta;
use serde_json::Map;
use std::path::Path;

/// Configure the provider from the optional provider-config file plus
/// environment defaults
pub fn configure(
    provider: &Provider<CapellaMeta>,
    provider_config: Option<&Path>,
) -> anyhow::Result<ConfiguredProvider<CapellaMeta>> {
    let config = match provider_config {
        Some(path) => utils::load_object(path)?,
        None => Map::new(),
    };
    Ok(provider.configure(config)?)
}

/// Schema of `resource_type`, or an error naming the supported types
pub fn resource_schema(
    provider: &Provider<CapellaMeta>,
    resource_type: &str,
) -> anyhow::Result<Schema> {
    provider.resource_schema(resource_type).ok_or_else(|| {
        let supported: Vec<_> = provider.resource_types().collect();
        anyhow::anyhow!(
            "Unsupported resource type \"{}\" (supported: {})",
            resource_type,
            supported.join(", ")
        )
    })
}
