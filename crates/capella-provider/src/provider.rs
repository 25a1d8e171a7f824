//! Provider registration and configuration

use crate::meta::CapellaMeta;
use crate::resources::{BucketResource, DatabaseUserResource, ProjectResource};
use capella_client::{
    ACCESS_KEY_ENV, API_URL_ENV, ApiClient, CapellaApi, ClientError, Configuration, Credentials,
    DEFAULT_API_URL, SECRET_KEY_ENV,
};
use capella_plugin::{Attribute, DiagResult, Diagnostic, Provider, ResourceData, Schema};
use std::sync::Arc;

pub const PROVIDER_NAME: &str = "couchbasecapella";

/// Provider backed by the HTTP client
pub fn provider() -> Provider<CapellaMeta> {
    provider_with_client(|api_url| {
        let client = ApiClient::new(Configuration::default().with_base_url(api_url))?;
        Ok(Arc::new(client) as Arc<dyn CapellaApi>)
    })
}

/// Provider whose API client is built by `make_client` from the configured URL
pub fn provider_with_client<F>(make_client: F) -> Provider<CapellaMeta>
where
    F: Fn(&str) -> Result<Arc<dyn CapellaApi>, ClientError> + Send + Sync + 'static,
{
    Provider::new(provider_schema(), move |config| configure(config, &make_client))
        .with_resource(ProjectResource)
        .with_resource(DatabaseUserResource)
        .with_resource(BucketResource)
}

fn provider_schema() -> Schema {
    Schema::new("Couchbase Capella")
        .with_attribute(
            "access_key",
            Attribute::required_string()
                .env_default(ACCESS_KEY_ENV)
                .with_description("Couchbase Capella API Access Key"),
        )
        .with_attribute(
            "secret_key",
            Attribute::required_string()
                .env_default(SECRET_KEY_ENV)
                .sensitive()
                .with_description("Couchbase Capella API Secret Key"),
        )
        .with_attribute(
            "api_url",
            Attribute::optional_string()
                .env_default(API_URL_ENV)
                .with_default(DEFAULT_API_URL)
                .with_description("Base URL of the Couchbase Capella API"),
        )
}

fn configure<F>(config: &ResourceData, make_client: &F) -> DiagResult<CapellaMeta>
where
    F: Fn(&str) -> Result<Arc<dyn CapellaApi>, ClientError>,
{
    let credentials = Credentials::new(
        config.require_str("access_key")?,
        config.require_str("secret_key")?,
    );
    let api_url = config.get_str("api_url").unwrap_or(DEFAULT_API_URL);

    let api = make_client(api_url).map_err(|e| {
        Diagnostic::error("Unable to create Capella API client")
            .with_attribute("api_url")
            .with_detail(e.to_string())
    })?;

    tracing::debug!("Configured Capella client for {}", api_url);
    Ok(CapellaMeta::new(api, credentials))
}
