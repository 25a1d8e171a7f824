//! `couchbasecapella_database_user`
//!
//! The id is the username. The password is write-only on the API side, so
//! Read keeps whatever value the state already holds.

use super::{choice_names, parse_choice, refresh};
use crate::meta::CapellaMeta;
use async_trait::async_trait;
use capella_client::models::{BucketAccess, CreateDatabaseUserRequest};
use capella_plugin::{Attribute, DiagResult, Diagnostics, ResourceData, ResourceHandler, Schema};

pub struct DatabaseUserResource;

fn parse_access(data: &ResourceData) -> DiagResult<BucketAccess> {
    parse_choice(
        data,
        "all_bucket_access",
        &BucketAccess::ALL,
        BucketAccess::as_str,
        BucketAccess::DataWriter,
    )
}

#[async_trait]
impl ResourceHandler<CapellaMeta> for DatabaseUserResource {
    fn type_name(&self) -> &'static str {
        "couchbasecapella_database_user"
    }

    fn schema(&self) -> Schema {
        Schema::new("Manage database users of a Couchbase Capella cluster.")
            .with_attribute(
                "id",
                Attribute::computed_string().with_description("Database user id (the username)."),
            )
            .with_attribute(
                "cluster_id",
                Attribute::required_string()
                    .force_new()
                    .with_description("Id of the cluster the user belongs to."),
            )
            .with_attribute(
                "username",
                Attribute::required_string()
                    .force_new()
                    .with_description("Database username."),
            )
            .with_attribute(
                "password",
                Attribute::required_string()
                    .force_new()
                    .sensitive()
                    .with_description("Database user password."),
            )
            .with_attribute(
                "all_bucket_access",
                Attribute::optional_string()
                    .force_new()
                    .one_of(choice_names(&BucketAccess::ALL, BucketAccess::as_str))
                    .with_default(BucketAccess::DataWriter.as_str())
                    .with_description("Role granted on every bucket of the cluster."),
            )
    }

    async fn create(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let cluster_id = data.require_str("cluster_id")?.to_string();
        let request = CreateDatabaseUserRequest {
            username: data.require_str("username")?.to_string(),
            password: data.require_str("password")?.to_string(),
            all_buckets_access: parse_access(data)?,
        };

        let auth = meta.auth();
        meta.api()
            .create_database_user(&auth, &cluster_id, &request)
            .await
            .map_err(Diagnostics::from_err)?;

        tracing::info!("Created database user {} on cluster {}", request.username, cluster_id);
        data.set_id(request.username);

        self.read(data, meta).await
    }

    async fn read(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let username = data.require_id()?.to_string();
        let cluster_id = data.require_str("cluster_id")?.to_string();

        let auth = meta.auth();
        let result = meta
            .api()
            .get_database_user(&auth, &cluster_id, &username)
            .await;
        refresh(data, result, |data, user| {
            data.set("username", user.username);
            if let Some(access) = user.all_buckets_access {
                data.set("all_bucket_access", access.as_str());
            }
        })
    }

    async fn delete(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let username = data.require_id()?;
        let cluster_id = data.require_str("cluster_id")?;

        let auth = meta.auth();
        meta.api()
            .delete_database_user(&auth, cluster_id, username)
            .await
            .map_err(Diagnostics::from_err)?;

        tracing::info!("Deleted database user {} on cluster {}", username, cluster_id);
        Ok(())
    }
}
