//! Provider and resource handler definitions

use crate::diagnostics::{DiagResult, Diagnostic};
use crate::schema::Schema;
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// CRUD handler for one resource type
///
/// `M` is the provider metadata produced by configuration (usually a
/// shared API client). There is no update: every user-settable attribute
/// is force-new, so the host replaces the resource instead.
#[async_trait]
pub trait ResourceHandler<M: Send + Sync>: Send + Sync {
    /// Resource type name (e.g., "couchbasecapella_project")
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create the remote object and record its id in `data`
    async fn create(&self, data: &mut ResourceData, meta: &M) -> DiagResult;

    /// Refresh `data` from the remote object, clearing the id if it is gone
    async fn read(&self, data: &mut ResourceData, meta: &M) -> DiagResult;

    async fn delete(&self, data: &mut ResourceData, meta: &M) -> DiagResult;
}

type ConfigureFn<M> = Box<dyn Fn(&ResourceData) -> DiagResult<M> + Send + Sync>;

/// Unconfigured provider: schemas plus registered handlers
pub struct Provider<M: Send + Sync> {
    schema: Schema,
    resources: BTreeMap<&'static str, Arc<dyn ResourceHandler<M>>>,
    configure: ConfigureFn<M>,
}

impl<M: Send + Sync + 'static> Provider<M> {
    pub fn new<F>(schema: Schema, configure: F) -> Self
    where
        F: Fn(&ResourceData) -> DiagResult<M> + Send + Sync + 'static,
    {
        Self {
            schema,
            resources: BTreeMap::new(),
            configure: Box::new(configure),
        }
    }

    pub fn with_resource(mut self, handler: impl ResourceHandler<M> + 'static) -> Self {
        self.resources.insert(handler.type_name(), Arc::new(handler));
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn resource_schema(&self, type_name: &str) -> Option<Schema> {
        self.resources.get(type_name).map(|h| h.schema())
    }

    /// Full schema as reported to the host
    pub fn provider_schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: self.schema.clone(),
            resource_schemas: self
                .resources
                .iter()
                .map(|(name, handler)| (name.to_string(), handler.schema()))
                .collect(),
        }
    }

    /// Resolve defaults, validate, and build the provider metadata
    ///
    /// Fails before the configure function runs when the configuration
    /// does not satisfy the schema, so no network call happens with
    /// missing credentials.
    pub fn configure(
        &self,
        mut config: Map<String, Value>,
    ) -> DiagResult<ConfiguredProvider<M>> {
        self.schema.apply_defaults(&mut config);
        self.schema.validate(&config).into_result()?;

        let meta = (self.configure)(&ResourceData::from(config))?;
        tracing::debug!("Provider configured with {} resource types", self.resources.len());

        Ok(ConfiguredProvider {
            meta: Arc::new(meta),
            resources: self.resources.clone(),
        })
    }
}

/// Configured provider that dispatches CRUD calls to handlers
pub struct ConfiguredProvider<M: Send + Sync> {
    meta: Arc<M>,
    resources: BTreeMap<&'static str, Arc<dyn ResourceHandler<M>>>,
}

impl<M: Send + Sync + 'static> ConfiguredProvider<M> {
    pub fn meta(&self) -> &M {
        &self.meta
    }

    fn handler(&self, type_name: &str) -> DiagResult<&Arc<dyn ResourceHandler<M>>> {
        self.resources.get(type_name).ok_or_else(|| {
            Diagnostic::error("Invalid resource type")
                .with_detail(format!(
                    "The provider does not support resource type \"{}\".",
                    type_name
                ))
                .into()
        })
    }

    /// Create a resource from its configuration and return the new state
    pub async fn create(
        &self,
        type_name: &str,
        mut config: Map<String, Value>,
    ) -> DiagResult<ResourceData> {
        let handler = self.handler(type_name)?;
        let schema = handler.schema();
        schema.apply_defaults(&mut config);
        schema.validate(&config).into_result()?;

        let mut data = ResourceData::from(config);
        tracing::info!("Creating {}", type_name);
        handler.create(&mut data, &self.meta).await?;
        Ok(data)
    }

    /// Refresh a resource; `None` means the remote object no longer exists
    pub async fn read(
        &self,
        type_name: &str,
        state: ResourceData,
    ) -> DiagResult<Option<ResourceData>> {
        let handler = self.handler(type_name)?;
        state.require_id()?;

        let mut data = state;
        handler.read(&mut data, &self.meta).await?;
        if data.exists() {
            Ok(Some(data))
        } else {
            tracing::info!("{} no longer exists, dropping from state", type_name);
            Ok(None)
        }
    }

    pub async fn delete(&self, type_name: &str, state: ResourceData) -> DiagResult {
        let handler = self.handler(type_name)?;
        state.require_id()?;

        let mut data = state;
        tracing::info!("Deleting {} {}", type_name, data.id().unwrap_or_default());
        handler.delete(&mut data, &self.meta).await
    }
}

/// Provider and resource schemas, as serialized for the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resource_schemas: BTreeMap<String, Schema>,
}
