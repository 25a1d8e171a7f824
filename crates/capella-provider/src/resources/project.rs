//! `couchbasecapella_project`

use super::refresh;
use crate::meta::CapellaMeta;
use async_trait::async_trait;
use capella_client::models::CreateProjectRequest;
use capella_plugin::{Attribute, DiagResult, Diagnostics, ResourceData, ResourceHandler, Schema};

pub struct ProjectResource;

#[async_trait]
impl ResourceHandler<CapellaMeta> for ProjectResource {
    fn type_name(&self) -> &'static str {
        "couchbasecapella_project"
    }

    fn schema(&self) -> Schema {
        Schema::new("Manage Couchbase Capella projects.")
            .with_attribute(
                "id",
                Attribute::computed_string()
                    .force_new()
                    .with_description("Project id."),
            )
            .with_attribute(
                "name",
                Attribute::required_string()
                    .force_new()
                    .with_description("Project name."),
            )
    }

    async fn create(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let request = CreateProjectRequest::new(data.require_str("name")?);

        let auth = meta.auth();
        let project = meta
            .api()
            .create_project(&auth, &request)
            .await
            .map_err(Diagnostics::from_err)?;

        tracing::info!("Created project {} ({})", project.name, project.id);
        data.set_id(project.id);

        self.read(data, meta).await
    }

    async fn read(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let project_id = data.require_id()?.to_string();

        let auth = meta.auth();
        let result = meta.api().get_project(&auth, &project_id).await;
        refresh(data, result, |data, project| {
            data.set("name", project.name);
        })
    }

    async fn delete(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let project_id = data.require_id()?;

        let auth = meta.auth();
        meta.api()
            .delete_project(&auth, project_id)
            .await
            .map_err(Diagnostics::from_err)?;

        tracing::info!("Deleted project {}", project_id);
        Ok(())
    }
}
