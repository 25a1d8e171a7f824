//! Couchbase Capella API client
//!
//! A small REST client for the Capella public v2 API, covering the
//! endpoints the provider manages: projects, database users and buckets.
//!
//! # Authentication
//!
//! The client itself holds no credentials. Each call takes an
//! [`AuthContext`] built from [`Credentials`], which signs the request:
//!
//! ```text
//! Couchbase-Timestamp: <unix millis>
//! Authorization: Bearer <access_key>:<base64(HMAC-SHA256(secret_key, "METHOD\nPATH\nTIMESTAMP"))>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use capella_client::{ApiClient, CapellaApi, Configuration, Credentials};
//! use capella_client::models::CreateProjectRequest;
//!
//! let credentials = Credentials::new(access_key, secret_key);
//! let client = ApiClient::new(Configuration::default())?;
//!
//! let auth = credentials.auth_context();
//! let project = client.create_project(&auth, &CreateProjectRequest::new("analytics")).await?;
//! client.delete_project(&auth, &project.id).await?;
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use api::CapellaApi;
pub use auth::{ACCESS_KEY_ENV, AuthContext, Credentials, SECRET_KEY_ENV, SecretKey};
pub use client::{API_URL_ENV, ApiClient, Configuration, DEFAULT_API_URL};
pub use error::{ClientError, Result};
