use crate::core::{
    domain::{
        error::{IdcloudhostError, IdcloudhostResult, ValidationError},
        model::{
            private_network::{PrivateNetworkRecord, PrivateNetworkResponse},
            resource_kind::ResourceKind,
        },
    },
    infrastructure::api_client::{ApiClient, RequestBody},
};
use crate::resource::application::{
    request::private_network_request::RenameNetworkRequest,
    service::resource_adapter::ResourceAdapter,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

pub const NETWORK_PATH: &str = "/network/network";

fn network_path(uuid: &str) -> String {
    format!("{}/{}", NETWORK_PATH, uuid)
}

fn require_uuid(record: &PrivateNetworkRecord) -> IdcloudhostResult<&str> {
    record
        .uuid
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ValidationError::field("uuid", "network has no identifier yet").into())
}

/// Adapter for private networks.
///
/// Networks only carry a name; the attached VMs are reported by the API
/// and never written from here.
#[derive(Debug, Clone)]
pub struct PrivateNetworkService {
    client: Arc<ApiClient>,
}

impl PrivateNetworkService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn location_for(&self, own: Option<&str>) -> Option<String> {
        self.client
            .config()
            .resolve_location(own)
            .map(str::to_string)
    }

    async fn fetch(
        &self,
        location: Option<&str>,
        uuid: &str,
    ) -> IdcloudhostResult<PrivateNetworkResponse> {
        self.client
            .get_json(location, &network_path(uuid), &[], "get private network")
            .await
    }
}

fn apply_response(record: &mut PrivateNetworkRecord, response: PrivateNetworkResponse) {
    if let Some(name) = response.name {
        record.name = name;
    }
    record.vm_uuids = response.vm_uuids.unwrap_or_default();
}

#[async_trait]
impl ResourceAdapter for PrivateNetworkService {
    type Record = PrivateNetworkRecord;

    fn kind(&self) -> ResourceKind {
        ResourceKind::PrivateNetwork
    }

    async fn create(
        &self,
        mut desired: PrivateNetworkRecord,
    ) -> IdcloudhostResult<PrivateNetworkRecord> {
        if desired.name.trim().is_empty() {
            return Err(ValidationError::field("name", "value is required").into());
        }
        let location = self.location_for(desired.location.as_deref());

        let response: PrivateNetworkResponse = self
            .client
            .send(
                Method::POST,
                location.as_deref(),
                NETWORK_PATH,
                &[("name", desired.name.as_str())],
                RequestBody::Empty,
            )
            .await?
            .json("create private network")?;

        let uuid = response
            .uuid
            .filter(|u| !u.is_empty())
            .ok_or_else(|| IdcloudhostError::missing_field("uuid", "create private network"))?;
        info!(network_id = %uuid, name = %desired.name, "private network created");
        desired.uuid = Some(uuid);

        self.read(desired).await
    }

    async fn read(
        &self,
        mut current: PrivateNetworkRecord,
    ) -> IdcloudhostResult<PrivateNetworkRecord> {
        let uuid = require_uuid(&current)?.to_string();
        let location = self.location_for(current.location.as_deref());
        let response = self.fetch(location.as_deref(), &uuid).await?;
        apply_response(&mut current, response);
        debug!(network_id = %uuid, "private network read");
        Ok(current)
    }

    async fn update(
        &self,
        prior: &PrivateNetworkRecord,
        mut desired: PrivateNetworkRecord,
    ) -> IdcloudhostResult<PrivateNetworkRecord> {
        if desired.uuid.is_none() {
            desired.uuid = prior.uuid.clone();
        }
        if desired.location.is_none() {
            desired.location = prior.location.clone();
        }
        let uuid = require_uuid(&desired)?.to_string();

        if prior.name == desired.name {
            debug!(network_id = %uuid, "no update group changed");
            return Ok(desired);
        }

        let location = self.location_for(desired.location.as_deref());
        let body = RenameNetworkRequest {
            name: desired.name.clone(),
        }
        .into_body();
        self.client
            .send(
                Method::PATCH,
                location.as_deref(),
                &network_path(&uuid),
                &[],
                body,
            )
            .await?;
        info!(network_id = %uuid, name = %desired.name, "private network renamed");

        self.read(desired).await
    }

    async fn delete(&self, current: &PrivateNetworkRecord) -> IdcloudhostResult<()> {
        let uuid = require_uuid(current)?;
        let location = self.location_for(current.location.as_deref());
        self.client
            .send(
                Method::DELETE,
                location.as_deref(),
                &network_path(uuid),
                &[],
                RequestBody::Empty,
            )
            .await?;
        info!(network_id = %uuid, "private network deleted");
        Ok(())
    }

    async fn import(&self, id: &str) -> IdcloudhostResult<PrivateNetworkRecord> {
        if id.is_empty() {
            return Err(
                ValidationError::field("uuid", "an identifier is required to import").into(),
            );
        }
        let location = self
            .client
            .config()
            .default_location()
            .map(|l| l.as_str().to_string());

        let mut record = PrivateNetworkRecord {
            uuid: Some(id.to_string()),
            location,
            name: String::new(),
            vm_uuids: Vec::new(),
        };
        let response = self.fetch(record.location.as_deref(), id).await?;
        apply_response(&mut record, response);

        info!(network_id = %id, "private network imported");
        Ok(record)
    }
}
