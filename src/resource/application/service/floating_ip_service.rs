use crate::core::{
    domain::{
        error::{IdcloudhostError, IdcloudhostResult, ValidationError},
        model::{
            floating_ip::{FloatingIpRecord, FloatingIpResponse},
            resource_kind::ResourceKind,
        },
    },
    infrastructure::api_client::{ApiClient, RequestBody},
};
use crate::resource::application::{
    request::floating_ip_request::FloatingIpParams, service::resource_adapter::ResourceAdapter,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

pub const FLOATING_IP_PATH: &str = "/network/ip_addresses";

fn address_path(address: &str) -> String {
    format!("{}/{}", FLOATING_IP_PATH, address)
}

fn require_address(record: &FloatingIpRecord) -> IdcloudhostResult<&str> {
    record
        .address
        .as_deref()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ValidationError::field("address", "floating IP is not allocated yet").into())
}

/// Adapter for floating IPs.
///
/// The allocated address is the identifier. Binding to a VM is driven from
/// the VM side; `assigned_to` is only observed here.
#[derive(Debug, Clone)]
pub struct FloatingIpService {
    client: Arc<ApiClient>,
}

impl FloatingIpService {
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
        address: &str,
    ) -> IdcloudhostResult<FloatingIpResponse> {
        self.client
            .get_json(location, &address_path(address), &[], "get floating IP")
            .await
    }
}

fn apply_response(record: &mut FloatingIpRecord, response: FloatingIpResponse) {
    if let Some(name) = response.name {
        record.name = name;
    }
    if let Some(billing_account_id) = response.billing_account_id {
        record.billing_account_id = billing_account_id;
    }
    record.assigned_to = response.assigned_to.filter(|vm| !vm.is_empty());
}

#[async_trait]
impl ResourceAdapter for FloatingIpService {
    type Record = FloatingIpRecord;

    fn kind(&self) -> ResourceKind {
        ResourceKind::FloatingIp
    }

    async fn create(&self, mut desired: FloatingIpRecord) -> IdcloudhostResult<FloatingIpRecord> {
        if desired.name.trim().is_empty() {
            return Err(ValidationError::field("name", "value is required").into());
        }
        let location = self.location_for(desired.location.as_deref());

        let response: FloatingIpResponse = self
            .client
            .send(
                Method::POST,
                location.as_deref(),
                FLOATING_IP_PATH,
                &[],
                FloatingIpParams::from(&desired).into_body(),
            )
            .await?
            .json("create floating IP")?;

        let address = response
            .address
            .filter(|a| !a.is_empty())
            .ok_or_else(|| IdcloudhostError::missing_field("address", "create floating IP"))?;
        info!(address = %address, name = %desired.name, "floating IP allocated");
        desired.address = Some(address);

        self.read(desired).await
    }

    async fn read(&self, mut current: FloatingIpRecord) -> IdcloudhostResult<FloatingIpRecord> {
        let address = require_address(&current)?.to_string();
        let location = self.location_for(current.location.as_deref());
        let response = self.fetch(location.as_deref(), &address).await?;
        apply_response(&mut current, response);
        debug!(address = %address, "floating IP read");
        Ok(current)
    }

    async fn update(
        &self,
        prior: &FloatingIpRecord,
        mut desired: FloatingIpRecord,
    ) -> IdcloudhostResult<FloatingIpRecord> {
        if desired.address.is_none() {
            desired.address = prior.address.clone();
        }
        if desired.location.is_none() {
            desired.location = prior.location.clone();
        }
        let address = require_address(&desired)?.to_string();

        if prior.name == desired.name && prior.billing_account_id == desired.billing_account_id {
            debug!(address = %address, "no update group changed");
            return Ok(desired);
        }

        let location = self.location_for(desired.location.as_deref());
        self.client
            .send(
                Method::PATCH,
                location.as_deref(),
                &address_path(&address),
                &[],
                FloatingIpParams::from(&desired).into_body(),
            )
            .await?;
        info!(address = %address, "floating IP updated");

        self.read(desired).await
    }

    async fn delete(&self, current: &FloatingIpRecord) -> IdcloudhostResult<()> {
        let address = require_address(current)?;
        let location = self.location_for(current.location.as_deref());
        self.client
            .send(
                Method::DELETE,
                location.as_deref(),
                &address_path(address),
                &[],
                RequestBody::Empty,
            )
            .await?;
        info!(address = %address, "floating IP released");
        Ok(())
    }

    async fn import(&self, id: &str) -> IdcloudhostResult<FloatingIpRecord> {
        if id.is_empty() {
            return Err(
                ValidationError::field("address", "an address is required to import").into(),
            );
        }
        let location = self
            .client
            .config()
            .default_location()
            .map(|l| l.as_str().to_string());

        let mut record = FloatingIpRecord {
            address: Some(id.to_string()),
            location,
            name: String::new(),
            billing_account_id: 0,
            assigned_to: None,
        };
        let response = self.fetch(record.location.as_deref(), id).await?;
        apply_response(&mut record, response);

        info!(address = %id, "floating IP imported");
        Ok(record)
    }
}
