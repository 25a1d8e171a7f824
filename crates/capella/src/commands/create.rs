use super::resource_schema;
use crate::utils;
use capella_plugin::{ConfiguredProvider, Provider};
use capella_provider::CapellaMeta;
use std::path::Path;

pub async fn handle(
    provider: &Provider<CapellaMeta>,
    configured: &ConfiguredProvider<CapellaMeta>,
    resource_type: &str,
    config_path: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let schema = resource_schema(provider, resource_type)?;
    let config = utils::load_object(config_path)?;

    let state = configured.create(resource_type, config).await?;
    tracing::info!(
        "Created {} {}",
        resource_type,
        state.id().unwrap_or_default()
    );

    if let Some(out) = out {
        utils::write_json(out, &state)?;
    }
    utils::print_json(&schema.redact(state.attributes()))
}
