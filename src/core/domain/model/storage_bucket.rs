//! Domain models for object-storage buckets.
//!
//! Buckets live on a global endpoint: they are never location-scoped and
//! their name doubles as the identifier.

use serde::{Deserialize, Serialize};

/// Desired or observed state of a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBucketRecord {
    pub name: String,
    pub billing_account_id: i64,
}

/// A bucket as returned by `/storage/bucket?name=`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageBucketResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub billing_account_id: Option<i64>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}
