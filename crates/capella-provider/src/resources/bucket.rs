//! `couchbasecapella_bucket`

use super::{choice_names, parse_choice, refresh};
use crate::meta::CapellaMeta;
use async_trait::async_trait;
use capella_client::models::{ConflictResolution, CreateBucketRequest};
use capella_plugin::{Attribute, DiagResult, Diagnostics, ResourceData, ResourceHandler, Schema};

pub struct BucketResource;

fn parse_conflict_resolution(data: &ResourceData) -> DiagResult<ConflictResolution> {
    parse_choice(
        data,
        "conflict_resolution",
        &ConflictResolution::ALL,
        ConflictResolution::as_str,
        ConflictResolution::Seqno,
    )
}

#[async_trait]
impl ResourceHandler<CapellaMeta> for BucketResource {
    fn type_name(&self) -> &'static str {
        "couchbasecapella_bucket"
    }

    fn schema(&self) -> Schema {
        Schema::new("Manage buckets of a Couchbase Capella cluster.")
            .with_attribute("id", Attribute::computed_string().with_description("Bucket id."))
            .with_attribute(
                "cluster_id",
                Attribute::required_string()
                    .force_new()
                    .with_description("Id of the cluster hosting the bucket."),
            )
            .with_attribute(
                "name",
                Attribute::required_string()
                    .force_new()
                    .with_description("Bucket name."),
            )
            .with_attribute(
                "memory_quota",
                Attribute::required_int()
                    .force_new()
                    .with_description("Bucket memory quota in MB."),
            )
            .with_attribute(
                "conflict_resolution",
                Attribute::optional_string()
                    .force_new()
                    .one_of(choice_names(
                        &ConflictResolution::ALL,
                        ConflictResolution::as_str,
                    ))
                    .with_default(ConflictResolution::Seqno.as_str())
                    .with_description("Conflict resolution strategy."),
            )
    }

    async fn create(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let cluster_id = data.require_str("cluster_id")?.to_string();
        let request = CreateBucketRequest {
            name: data.require_str("name")?.to_string(),
            memory_quota: data.require_i64("memory_quota")?,
            conflict_resolution: parse_conflict_resolution(data)?,
        };

        let auth = meta.auth();
        let bucket = meta
            .api()
            .create_bucket(&auth, &cluster_id, &request)
            .await
            .map_err(Diagnostics::from_err)?;

        tracing::info!("Created bucket {} ({}) on cluster {}", bucket.name, bucket.id, cluster_id);
        data.set_id(bucket.id);

        self.read(data, meta).await
    }

    async fn read(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let bucket_id = data.require_id()?.to_string();
        let cluster_id = data.require_str("cluster_id")?.to_string();

        let auth = meta.auth();
        let result = meta.api().get_bucket(&auth, &cluster_id, &bucket_id).await;
        refresh(data, result, |data, bucket| {
            data.set("name", bucket.name);
            data.set("memory_quota", bucket.memory_quota);
            if let Some(resolution) = bucket.conflict_resolution {
                data.set("conflict_resolution", resolution.as_str());
            }
        })
    }

    async fn delete(&self, data: &mut ResourceData, meta: &CapellaMeta) -> DiagResult {
        let bucket_id = data.require_id()?;
        let cluster_id = data.require_str("cluster_id")?;

        let auth = meta.auth();
        meta.api()
            .delete_bucket(&auth, cluster_id, bucket_id)
            .await
            .map_err(Diagnostics::from_err)?;

        tracing::info!("Deleted bucket {} on cluster {}", bucket_id, cluster_id);
        Ok(())
    }
}
