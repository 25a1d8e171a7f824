use super::resource_schema;
use crate::utils;
use capella_plugin::{ConfiguredProvider, Provider, ResourceData};
use capella_provider::CapellaMeta;
use serde_json::Value;
use std::path::Path;

pub async fn handle(
    provider: &Provider<CapellaMeta>,
    configured: &ConfiguredProvider<CapellaMeta>,
    resource_type: &str,
    state_path: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let schema = resource_schema(provider, resource_type)?;
    let state = ResourceData::from(utils::load_object(state_path)?);

    match configured.read(resource_type, state).await? {
        Some(state) => {
            if let Some(out) = out {
                utils::write_json(out, &state)?;
            }
            utils::print_json(&schema.redact(state.attributes()))
        }
        None => {
            eprintln!("{} no longer exists", resource_type);
            if let Some(out) = out.filter(|p| p.exists()) {
                std::fs::remove_file(out)?;
            }
            utils::print_json(&Value::Null)
        }
    }
}
