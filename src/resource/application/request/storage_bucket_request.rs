use crate::core::{
    domain::model::storage_bucket::StorageBucketRecord, infrastructure::api_client::RequestBody,
};

/// Form body of a bucket create (`PUT`) or update (`PATCH`).
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRequest {
    pub name: String,
    pub billing_account_id: i64,
}

impl From<&StorageBucketRecord> for BucketRequest {
    fn from(bucket: &StorageBucketRecord) -> Self {
        Self {
            name: bucket.name.clone(),
            billing_account_id: bucket.billing_account_id,
        }
    }
}

impl BucketRequest {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Form(vec![
            ("name", self.name),
            ("billing_account_id", self.billing_account_id.to_string()),
        ])
    }
}

/// Form body of `DELETE /storage/bucket`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteBucketRequest {
    pub name: String,
}

impl DeleteBucketRequest {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Form(vec![("name", self.name)])
    }
}
