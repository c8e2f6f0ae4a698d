use crate::core::{
    domain::{
        error::{IdcloudhostError, IdcloudhostResult, ValidationError},
        model::{
            resource_kind::ResourceKind,
            storage_bucket::{StorageBucketRecord, StorageBucketResponse},
        },
    },
    infrastructure::api_client::ApiClient,
};
use crate::resource::application::{
    request::storage_bucket_request::{BucketRequest, DeleteBucketRequest},
    service::resource_adapter::ResourceAdapter,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

/// Buckets are served from the unscoped `/v1` root.
pub const BUCKET_PATH: &str = "/storage/bucket";

/// Adapter for object-storage buckets.
#[derive(Debug, Clone)]
pub struct StorageBucketService {
    client: Arc<ApiClient>,
}

impl StorageBucketService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn fetch(&self, name: &str, context: &str) -> IdcloudhostResult<StorageBucketResponse> {
        self.client
            .get_json(None, BUCKET_PATH, &[("name", name)], context)
            .await
    }
}

fn require_name(name: &str) -> IdcloudhostResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::field("name", "value is required").into());
    }
    Ok(())
}

#[async_trait]
impl ResourceAdapter for StorageBucketService {
    type Record = StorageBucketRecord;

    fn kind(&self) -> ResourceKind {
        ResourceKind::StorageBucket
    }

    async fn create(&self, desired: StorageBucketRecord) -> IdcloudhostResult<StorageBucketRecord> {
        require_name(&desired.name)?;
        self.client
            .send(
                Method::PUT,
                None,
                BUCKET_PATH,
                &[],
                BucketRequest::from(&desired).into_body(),
            )
            .await?;
        info!(bucket = %desired.name, "storage bucket created");
        self.read(desired).await
    }

    async fn read(
        &self,
        mut current: StorageBucketRecord,
    ) -> IdcloudhostResult<StorageBucketRecord> {
        require_name(&current.name)?;
        let response = self.fetch(&current.name, "get storage bucket").await?;
        if let Some(billing_account_id) = response.billing_account_id {
            current.billing_account_id = billing_account_id;
        }
        debug!(bucket = %current.name, size_bytes = ?response.size_bytes, "storage bucket read");
        Ok(current)
    }

    async fn update(
        &self,
        prior: &StorageBucketRecord,
        desired: StorageBucketRecord,
    ) -> IdcloudhostResult<StorageBucketRecord> {
        if prior.name != desired.name {
            return Err(ValidationError::ConstraintViolation(format!(
                "bucket '{}' cannot be renamed to '{}'",
                prior.name, desired.name
            ))
            .into());
        }
        if prior.billing_account_id == desired.billing_account_id {
            debug!(bucket = %desired.name, "no update group changed");
            return Ok(desired);
        }

        self.client
            .send(
                Method::PATCH,
                None,
                BUCKET_PATH,
                &[],
                BucketRequest::from(&desired).into_body(),
            )
            .await?;
        info!(
            bucket = %desired.name,
            billing_account_id = desired.billing_account_id,
            "storage bucket billing account changed"
        );
        self.read(desired).await
    }

    async fn delete(&self, current: &StorageBucketRecord) -> IdcloudhostResult<()> {
        require_name(&current.name)?;
        let body = DeleteBucketRequest {
            name: current.name.clone(),
        }
        .into_body();
        self.client
            .send(Method::DELETE, None, BUCKET_PATH, &[], body)
            .await?;
        info!(bucket = %current.name, "storage bucket deleted");
        Ok(())
    }

    /// Imports a bucket by name. The response must report its billing account.
    async fn import(&self, id: &str) -> IdcloudhostResult<StorageBucketRecord> {
        require_name(id)?;
        let response = self.fetch(id, "import storage bucket").await?;
        let billing_account_id = response.billing_account_id.ok_or_else(|| {
            IdcloudhostError::missing_field("billing_account_id", "import storage bucket")
        })?;
        info!(bucket = %id, "storage bucket imported");
        Ok(StorageBucketRecord {
            name: id.to_string(),
            billing_account_id,
        })
    }
}
