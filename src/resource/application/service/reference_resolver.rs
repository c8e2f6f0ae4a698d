//! Reconstruction of the references that point at a VM.
//!
//! The VM endpoint does not report which private network or floating IP a
//! VM belongs to. Both are found by scanning the collection listings for an
//! entry that names the VM.

use crate::core::{
    domain::error::{IdcloudhostError, IdcloudhostResult},
    infrastructure::api_client::ApiClient,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const NETWORK_LISTING_PATH: &str = "/network/networks";
pub const FLOATING_IP_LISTING_PATH: &str = "/network/ip_addresses";

/// Finds the resources that reference a VM.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    /// Uuid of the first private network whose `vm_uuids` contains `vm_id`.
    async fn private_network_of(
        &self,
        location: Option<String>,
        vm_id: &str,
    ) -> IdcloudhostResult<Option<String>>;

    /// Address of the floating IP whose `assigned_to` equals `vm_id`.
    async fn floating_ip_of(
        &self,
        location: Option<String>,
        vm_id: &str,
    ) -> IdcloudhostResult<Option<String>>;
}

/// Resolver backed by the network and floating-IP listing endpoints.
#[derive(Debug, Clone)]
pub struct ListingResolver {
    client: Arc<ApiClient>,
}

impl ListingResolver {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn listing(&self, location: Option<&str>, path: &str) -> IdcloudhostResult<Vec<Value>> {
        let response = self
            .client
            .get(location, path, &[])
            .await
            .map_err(|e| match e {
                IdcloudhostError::RemoteApi { status, body } => IdcloudhostError::Resolution(
                    format!("listing {} failed ({}): {}", path, status, body),
                ),
                other => other,
            })?;
        response.json(path)
    }
}

#[async_trait]
impl ReferenceResolver for ListingResolver {
    async fn private_network_of(
        &self,
        location: Option<String>,
        vm_id: &str,
    ) -> IdcloudhostResult<Option<String>> {
        let networks = self
            .listing(location.as_deref(), NETWORK_LISTING_PATH)
            .await?;
        let found = find_private_network(&networks, vm_id)?;
        debug!(vm_id, network = ?found, "resolved private network");
        Ok(found)
    }

    async fn floating_ip_of(
        &self,
        location: Option<String>,
        vm_id: &str,
    ) -> IdcloudhostResult<Option<String>> {
        let addresses = self
            .listing(location.as_deref(), FLOATING_IP_LISTING_PATH)
            .await?;
        let found = find_floating_ip(&addresses, vm_id)?;
        debug!(vm_id, address = ?found, "resolved floating IP");
        Ok(found)
    }
}

/// Scans a network listing for the first network attached to `vm_id`.
///
/// Entries that are not objects or carry no `vm_uuids` array are skipped. A
/// matching entry without a string `uuid` is an error.
pub(crate) fn find_private_network(
    networks: &[Value],
    vm_id: &str,
) -> IdcloudhostResult<Option<String>> {
    if vm_id.is_empty() {
        return Ok(None);
    }
    for network in networks.iter().filter_map(Value::as_object) {
        let Some(vm_uuids) = network.get("vm_uuids").and_then(Value::as_array) else {
            continue;
        };
        if vm_uuids.iter().any(|v| v.as_str() == Some(vm_id)) {
            let uuid = network
                .get("uuid")
                .and_then(Value::as_str)
                .ok_or_else(|| IdcloudhostError::missing_field("uuid", "private network listing"))?;
            return Ok(Some(uuid.to_string()));
        }
    }
    Ok(None)
}

/// Scans a floating-IP listing for the address assigned to `vm_id`.
///
/// A matching entry without a string `address` is an error.
pub(crate) fn find_floating_ip(
    addresses: &[Value],
    vm_id: &str,
) -> IdcloudhostResult<Option<String>> {
    if vm_id.is_empty() {
        return Ok(None);
    }
    for entry in addresses.iter().filter_map(Value::as_object) {
        if entry.get("assigned_to").and_then(Value::as_str) == Some(vm_id) {
            let address = entry
                .get("address")
                .and_then(Value::as_str)
                .ok_or_else(|| IdcloudhostError::missing_field("address", "floating IP listing"))?;
            return Ok(Some(address.to_string()));
        }
    }
    Ok(None)
}
