use async_trait::async_trait;
use capella_client::models::{
    Bucket, CreateBucketRequest, CreateDatabaseUserRequest, CreateProjectRequest, DatabaseUser,
    Project,
};
use capella_client::{AuthContext, CapellaApi, ClientError, Result};
use capella_plugin::ConfiguredProvider;
use capella_provider::{CapellaMeta, provider_with_client};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory Capella API
#[derive(Default)]
pub struct FakeCapella {
    next_id: AtomicUsize,
    projects: Mutex<HashMap<String, Project>>,
    users: Mutex<HashMap<(String, String), DatabaseUser>>,
    buckets: Mutex<HashMap<(String, String), Bucket>>,
    fail_status: Mutex<Option<u16>>,
    access_keys: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeCapella {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following call fail with `status`
    pub fn fail_with(&self, status: u16) {
        *self.fail_status.lock().unwrap() = Some(status);
    }

    /// Delete a project behind the provider's back
    pub fn remove_project(&self, id: &str) {
        self.projects.lock().unwrap().remove(id);
    }

    pub fn project_count(&self) -> usize {
        self.projects.lock().unwrap().len()
    }

    /// Access keys of every call received so far
    pub fn access_keys(&self) -> Vec<String> {
        self.access_keys.lock().unwrap().clone()
    }

    fn begin(&self, auth: &AuthContext<'_>) -> Result<()> {
        self.access_keys
            .lock()
            .unwrap()
            .push(auth.access_key().to_string());
        match *self.fail_status.lock().unwrap() {
            Some(status) => Err(ClientError::Api {
                status,
                message: "Internal Server Error (injected)".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

fn not_found() -> ClientError {
    ClientError::Api {
        status: 404,
        message: "Not Found".to_string(),
    }
}

#[async_trait]
impl CapellaApi for FakeCapella {
    async fn create_project(
        &self,
        auth: &AuthContext<'_>,
        request: &CreateProjectRequest,
    ) -> Result<Project> {
        self.begin(auth)?;
        let project = Project {
            id: self.next_id("p"),
            name: request.name.clone(),
            created_at: None,
        };
        self.projects
            .lock()
            .unwrap()
            .insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn get_project(&self, auth: &AuthContext<'_>, project_id: &str) -> Result<Project> {
        self.begin(auth)?;
        self.projects
            .lock()
            .unwrap()
            .get(project_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn delete_project(&self, auth: &AuthContext<'_>, project_id: &str) -> Result<()> {
        self.begin(auth)?;
        self.projects.lock().unwrap().remove(project_id);
        Ok(())
    }

    async fn create_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        request: &CreateDatabaseUserRequest,
    ) -> Result<()> {
        self.begin(auth)?;
        self.users.lock().unwrap().insert(
            (cluster_id.to_string(), request.username.clone()),
            DatabaseUser {
                username: request.username.clone(),
                all_buckets_access: Some(request.all_buckets_access),
            },
        );
        Ok(())
    }

    async fn get_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        username: &str,
    ) -> Result<DatabaseUser> {
        self.begin(auth)?;
        self.users
            .lock()
            .unwrap()
            .get(&(cluster_id.to_string(), username.to_string()))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn delete_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        username: &str,
    ) -> Result<()> {
        self.begin(auth)?;
        self.users
            .lock()
            .unwrap()
            .remove(&(cluster_id.to_string(), username.to_string()));
        Ok(())
    }

    async fn create_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        request: &CreateBucketRequest,
    ) -> Result<Bucket> {
        self.begin(auth)?;
        let bucket = Bucket {
            id: self.next_id("b"),
            name: request.name.clone(),
            memory_quota: request.memory_quota,
            conflict_resolution: Some(request.conflict_resolution),
        };
        self.buckets
            .lock()
            .unwrap()
            .insert((cluster_id.to_string(), bucket.id.clone()), bucket.clone());
        Ok(bucket)
    }

    async fn get_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        bucket_id: &str,
    ) -> Result<Bucket> {
        self.begin(auth)?;
        self.buckets
            .lock()
            .unwrap()
            .get(&(cluster_id.to_string(), bucket_id.to_string()))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn delete_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        bucket_id: &str,
    ) -> Result<()> {
        self.begin(auth)?;
        self.buckets
            .lock()
            .unwrap()
            .remove(&(cluster_id.to_string(), bucket_id.to_string()));
        Ok(())
    }
}

pub fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

/// Provider configured with explicit credentials against `fake`
pub fn configured(fake: &Arc<FakeCapella>) -> ConfiguredProvider<CapellaMeta> {
    let fake = fake.clone();
    let provider = provider_with_client(move |_| Ok(fake.clone() as Arc<dyn CapellaApi>));
    match provider.configure(object(serde_json::json!({
        "access_key": "ak-test",
        "secret_key": "sk-test-secret",
    }))) {
        Ok(configured) => configured,
        Err(diags) => panic!("configure failed: {}", diags),
    }
}
