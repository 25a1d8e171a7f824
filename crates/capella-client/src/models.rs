//! Request and response bodies of the Capella v2 API

use serde::{Deserialize, Serialize};

// ============ Projects ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

impl CreateProjectRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// ============ Database users ============

/// Bucket-wide role granted to a database user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketAccess {
    DataReader,
    DataWriter,
}

impl BucketAccess {
    pub const ALL: [BucketAccess; 2] = [BucketAccess::DataReader, BucketAccess::DataWriter];

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketAccess::DataReader => "data_reader",
            BucketAccess::DataWriter => "data_writer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|access| access.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatabaseUserRequest {
    pub username: String,
    pub password: String,
    pub all_buckets_access: BucketAccess,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseUser {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_buckets_access: Option<BucketAccess>,
}

// ============ Buckets ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    Seqno,
    Lww,
}

impl ConflictResolution {
    pub const ALL: [ConflictResolution; 2] = [ConflictResolution::Seqno, ConflictResolution::Lww];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictResolution::Seqno => "seqno",
            ConflictResolution::Lww => "lww",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|resolution| resolution.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucketRequest {
    pub name: String,
    /// Memory quota in MB
    pub memory_quota: i64,
    pub conflict_resolution: ConflictResolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub id: String,
    pub name: String,
    pub memory_quota: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_resolution: Option<ConflictResolution>,
}

// ============ Errors ============

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
