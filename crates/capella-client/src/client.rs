//! HTTP implementation of the Capella endpoints

use crate::api::CapellaApi;
use crate::auth::{AuthContext, TIMESTAMP_HEADER};
use crate::error::{ClientError, Result};
use crate::models::{
    Bucket, CreateBucketRequest, CreateDatabaseUserRequest, CreateProjectRequest, DatabaseUser,
    ErrorBody, Project,
};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_API_URL: &str = "https://cloudapi.cloud.couchbase.com";
pub const API_URL_ENV: &str = "CBC_API_URL";

/// Longest error body kept in an error message
const MAX_ERROR_BODY: usize = 512;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Configuration {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("terraform-provider-capella/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Configuration {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Capella REST client
///
/// Cheap to share behind an `Arc`; carries no per-request state.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: Configuration) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Endpoint URL built from path segments
    ///
    /// Each segment is percent-encoded, so ids containing `/`, `#` or `?`
    /// stay a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a signed request and turn non-2xx responses into errors
    ///
    /// The signature covers the encoded path exactly as sent.
    async fn send<B: Serialize + ?Sized>(
        &self,
        auth: &AuthContext<'_>,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response> {
        let path = url.path().to_string();
        let signed = auth.sign(method.as_str(), &path);
        tracing::debug!("{} {}", method, path);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(AUTHORIZATION, signed.authorization)
            .header(TIMESTAMP_HEADER, signed.timestamp);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::debug!("{} {} failed with {}", method, path, status);
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(status, &text),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        auth: &AuthContext<'_>,
        segments: &[&str],
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.send::<()>(auth, Method::GET, url, None).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        auth: &AuthContext<'_>,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.send(auth, Method::POST, url, Some(body)).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn delete(&self, auth: &AuthContext<'_>, segments: &[&str]) -> Result<()> {
        let url = self.endpoint(segments)?;
        self.send::<()>(auth, Method::DELETE, url, None).await?;
        Ok(())
    }
}

/// Human-readable message from an error response
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");

    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    let detail = match (parsed.error_type, parsed.message) {
        (Some(kind), Some(message)) => format!("{}: {}", kind, message),
        (None, Some(message)) => message,
        _ => body.trim().chars().take(MAX_ERROR_BODY).collect(),
    };

    if detail.is_empty() {
        reason.to_string()
    } else {
        format!("{} ({})", reason, detail)
    }
}

#[async_trait]
impl CapellaApi for ApiClient {
    async fn create_project(
        &self,
        auth: &AuthContext<'_>,
        request: &CreateProjectRequest,
    ) -> Result<Project> {
        self.post_json(auth, &["v2", "projects"], request).await
    }

    async fn get_project(&self, auth: &AuthContext<'_>, project_id: &str) -> Result<Project> {
        self.get_json(auth, &["v2", "projects", project_id]).await
    }

    async fn delete_project(&self, auth: &AuthContext<'_>, project_id: &str) -> Result<()> {
        self.delete(auth, &["v2", "projects", project_id]).await
    }

    async fn create_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        request: &CreateDatabaseUserRequest,
    ) -> Result<()> {
        // The API answers 201 with no usable body
        let url = self.endpoint(&["v2", "clusters", cluster_id, "users"])?;
        self.send(auth, Method::POST, url, Some(request)).await?;
        Ok(())
    }

    async fn get_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        username: &str,
    ) -> Result<DatabaseUser> {
        self.get_json(auth, &["v2", "clusters", cluster_id, "users", username])
            .await
    }

    async fn delete_database_user(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        username: &str,
    ) -> Result<()> {
        self.delete(auth, &["v2", "clusters", cluster_id, "users", username])
            .await
    }

    async fn create_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        request: &CreateBucketRequest,
    ) -> Result<Bucket> {
        self.post_json(auth, &["v2", "clusters", cluster_id, "buckets"], request)
            .await
    }

    async fn get_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        bucket_id: &str,
    ) -> Result<Bucket> {
        self.get_json(auth, &["v2", "clusters", cluster_id, "buckets", bucket_id])
            .await
    }

    async fn delete_bucket(
        &self,
        auth: &AuthContext<'_>,
        cluster_id: &str,
        bucket_id: &str,
    ) -> Result<()> {
        self.delete(auth, &["v2", "clusters", cluster_id, "buckets", bucket_id])
            .await
    }
}
