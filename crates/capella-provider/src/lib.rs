//! Couchbase Capella provider
//!
//! Registers three resource types with the plugin host and maps each one
//! onto the Capella v2 API:
//!
//! | resource type                     | endpoints                          |
//! |-----------------------------------|------------------------------------|
//! | `couchbasecapella_project`        | `/v2/projects`                     |
//! | `couchbasecapella_database_user`  | `/v2/clusters/{cluster}/users`     |
//! | `couchbasecapella_bucket`         | `/v2/clusters/{cluster}/buckets`   |
//!
//! # Requirements
//!
//! - `access_key` / `secret_key` in the provider block, or the
//!   `CBC_ACCESS_KEY` / `CBC_SECRET_KEY` environment variables
//!
//! # Example
//!
//! ```ignore
//! use capella_provider::provider;
//!
//! let configured = provider().configure(serde_json::Map::new())?;
//! let state = configured
//!     .create("couchbasecapella_project", config)
//!     .await?;
//! ```

pub mod error;
pub mod meta;
pub mod provider;
pub mod resources;

pub use error::{ProviderError, Result};
pub use meta::CapellaMeta;
pub use provider::{PROVIDER_NAME, provider, provider_with_client};
pub use resources::{BucketResource, DatabaseUserResource, ProjectResource};
