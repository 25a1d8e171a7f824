use crate::utils;
use capella_plugin::Provider;
use capella_provider::CapellaMeta;

pub fn handle(provider: &Provider<CapellaMeta>) -> anyhow::Result<()> {
    utils::print_json(&provider.provider_schema())
}
