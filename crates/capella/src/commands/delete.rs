use crate::utils;
use capella_plugin::{ConfiguredProvider, ResourceData};
use capella_provider::CapellaMeta;
use std::path::Path;

pub async fn handle(
    configured: &ConfiguredProvider<CapellaMeta>,
    resource_type: &str,
    state_path: &Path,
) -> anyhow::Result<()> {
    let state = ResourceData::from(utils::load_object(state_path)?);
    let id = state.id().unwrap_or_default().to_string();

    configured.delete(resource_type, state).await?;
    eprintln!("Deleted {} {}", resource_type, id);
    Ok(())
}
