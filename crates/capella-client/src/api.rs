//! Endpoint trait implemented by the HTTP client

use crate::auth::AuthContext;
use crate::error::Result;
use crate::models::{
    Bucket, CreateBucketRequest, CreateDatabaseUserRequest, CreateProjectRequest, DatabaseUser,
    Project,
};
use async_trait::async_trait;

/// Capella endpoints used by the provider
///
/// Every call takes the auth context that signs it; implementations hold
/// no credentials of their own.
#[async_trait]
pub trait CapellaApi: Send + Sync {
    async fn create_project(
        &self,
        auth: &AuthContext<'_>,
        request: &CreateProjectRequest,
    ) -> Result<Project>;

    async fn get_project(&self, auth: &AuthContext<'_>, project_id: &str) -> Result<Project>;

    async fn delete_project(&self, auth: &AuthContext<'_>, project_id: &str) -> Result<()>;

    async fn create_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        request: &CreateDatabaseUserRequest,
    ) -> Result<()>;

    async fn get_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        username: &str,
    ) -> Result<DatabaseUser>;

    async fn delete_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        username: &str,
    ) -> Result<()>;

    async fn create_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        request: &CreateBucketRequest,
    ) -> Result<Bucket>;

    async fn get_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        bucket_id: &str,
    ) -> Result<Bucket>;

    async fn delete_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        bucket_id: &str,
    ) -> Result<()>;
}
