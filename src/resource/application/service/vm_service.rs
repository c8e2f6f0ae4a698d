//! Lifecycle of compute instances.
//!
//! Create provisions the VM together with its primary disk and optionally
//! binds a floating IP. Update dispatches one call per changed field group,
//! in a fixed order: compute size, disk size, then floating IP (unassign
//! before assign). A failing group stops the update; groups already sent are
//! not rolled back.

use crate::core::{
    domain::{
        error::{IdcloudhostError, IdcloudhostResult, ValidationError},
        model::{
            resource_kind::ResourceKind,
            vm::{VmRecord, VmResponse},
            vm_changes::VmChanges,
        },
        value_object::VmPassword,
    },
    infrastructure::api_client::{ApiClient, RequestBody},
};
use crate::resource::application::{
    request::vm_request::{
        AssignFloatIpRequest, CreateVmRequest, DeleteVmRequest, ResizeDiskRequest,
        UpdateVmRequest,
    },
    service::{
        reference_resolver::{ListingResolver, ReferenceResolver},
        resource_adapter::ResourceAdapter,
    },
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const VM_PATH: &str = "/user-resource/vm";
pub const VM_STORAGE_PATH: &str = "/user-resource/vm/storage";

fn float_ip_action_path(address: &str, action: &str) -> String {
    format!("/network/ip_addresses/{}/{}", address, action)
}

/// Adapter for the VM resource.
///
/// Generic over the resolver so imports and reads can be exercised without
/// the listing endpoints.
#[derive(Debug, Clone)]
pub struct VmService<R = ListingResolver> {
    client: Arc<ApiClient>,
    resolver: R,
}

impl VmService<ListingResolver> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let resolver = ListingResolver::new(Arc::clone(&client));
        Self { client, resolver }
    }
}

impl<R: ReferenceResolver> VmService<R> {
    pub fn with_resolver(client: Arc<ApiClient>, resolver: R) -> Self {
        Self { client, resolver }
    }

    fn location_for(&self, own: Option<&str>) -> Option<String> {
        self.client
            .config()
            .resolve_location(own)
            .map(str::to_string)
    }

    async fn fetch(&self, location: Option<&str>, id: &str) -> IdcloudhostResult<VmResponse> {
        self.client
            .get_json(location, VM_PATH, &[("uuid", id)], "get VM")
            .await
    }

    async fn assign_float_ip(
        &self,
        location: Option<&str>,
        address: &str,
        vm_id: &str,
    ) -> IdcloudhostResult<()> {
        let body = AssignFloatIpRequest {
            vm_uuid: vm_id.to_string(),
        }
        .into_body();
        self.client
            .send(
                Method::POST,
                location,
                &float_ip_action_path(address, "assign"),
                &[],
                body,
            )
            .await?;
        info!(vm_id, address, "floating IP assigned");
        Ok(())
    }

    async fn unassign_float_ip(
        &self,
        location: Option<&str>,
        address: &str,
    ) -> IdcloudhostResult<()> {
        self.client
            .send(
                Method::POST,
                location,
                &float_ip_action_path(address, "unassign"),
                &[],
                RequestBody::Empty,
            )
            .await?;
        info!(address, "floating IP unassigned");
        Ok(())
    }

    /// Steps that follow the create POST: the floating-IP binding, then a read.
    async fn complete_create(
        &self,
        created: &VmRecord,
        location: Option<&str>,
        id: &str,
    ) -> IdcloudhostResult<VmRecord> {
        if let Some(address) = created.float_ip() {
            self.assign_float_ip(location, address, id).await?;
        }
        self.read(created.clone()).await
    }

    /// Resolves the network and floating IP that reference the VM.
    ///
    /// The floating IP always mirrors the listing. The network is only
    /// replaced when one is found.
    async fn refresh_references(
        &self,
        record: &mut VmRecord,
        location: Option<String>,
        id: &str,
    ) -> IdcloudhostResult<()> {
        if let Some(network) = self
            .resolver
            .private_network_of(location.clone(), id)
            .await?
        {
            record.private_network_uuid = network;
        }
        record.float_ip_address = self.resolver.floating_ip_of(location, id).await?;
        Ok(())
    }
}

/// Copies the observable fields of a VM response into a record.
///
/// The password is never touched. The primary disk is required.
fn apply_response(
    record: &mut VmRecord,
    response: VmResponse,
    context: &str,
) -> IdcloudhostResult<()> {
    let (disk_uuid, disk_size) = response.primary_disk(context)?;
    record.disks_uuid = Some(disk_uuid.to_string());
    if let Some(size) = disk_size {
        record.disks = size;
    }

    let VmResponse {
        name,
        billing_account_id,
        username,
        os_name,
        os_version,
        vcpu,
        memory,
        status,
        ..
    } = response;

    if let Some(name) = name {
        record.name = name;
    }
    if let Some(billing_account_id) = billing_account_id {
        record.billing_account_id = billing_account_id;
    }
    if let Some(username) = username {
        record.username = username;
    }
    if let Some(os_name) = os_name {
        record.os_name = os_name;
    }
    if let Some(os_version) = os_version {
        record.os_version = os_version;
    }
    if let Some(vcpu) = vcpu {
        record.vcpu = vcpu;
    }
    if let Some(memory) = memory {
        record.ram = memory;
    }
    if status.is_some() {
        record.desired_status = status;
    }
    Ok(())
}

#[async_trait]
impl<R: ReferenceResolver> ResourceAdapter for VmService<R> {
    type Record = VmRecord;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Vm
    }

    /// Creates the VM, records its id and primary disk, binds the floating IP
    /// if one is requested, then reads the VM back.
    ///
    /// # Errors
    /// - `Validation` if the record is incomplete or already has an id
    /// - `MissingField` if the response lacks `uuid` or `storage[0].uuid`; no
    ///   further request is sent in that case
    /// - `PartiallyCreated` if the assign or the read fails after the VM was
    ///   created; it carries the record with the new `id`
    async fn create(&self, mut desired: VmRecord) -> IdcloudhostResult<VmRecord> {
        if desired.id.as_deref().is_some_and(|id| !id.is_empty()) {
            return Err(ValidationError::ConstraintViolation(
                "VM already has an identifier; it is assigned once at creation".to_string(),
            )
            .into());
        }
        desired.validate_for_create(self.client.validation())?;

        let location = self.location_for(desired.location.as_deref());
        let response: VmResponse = self
            .client
            .send(
                Method::POST,
                location.as_deref(),
                VM_PATH,
                &[],
                CreateVmRequest::from(&desired).into_body(),
            )
            .await?
            .json("create VM")?;

        let id = response.require_uuid("create VM")?.to_string();
        let (disk_uuid, _) = response.primary_disk("create VM")?;
        desired.id = Some(id.clone());
        desired.disks_uuid = Some(disk_uuid.to_string());
        info!(vm_id = %id, location = ?location, "VM created");

        match self.complete_create(&desired, location.as_deref(), &id).await {
            Ok(vm) => Ok(vm),
            Err(source) => {
                warn!(vm_id = %id, error = %source, "VM created but not completed");
                Err(IdcloudhostError::PartiallyCreated {
                    record: Box::new(desired),
                    source: Box::new(source),
                })
            }
        }
    }

    async fn read(&self, mut current: VmRecord) -> IdcloudhostResult<VmRecord> {
        let id = current.require_id()?.to_string();
        let location = self.location_for(current.location.as_deref());

        let response = self.fetch(location.as_deref(), &id).await?;
        apply_response(&mut current, response, "get VM")?;
        self.refresh_references(&mut current, location, &id).await?;

        debug!(vm_id = %id, "VM read");
        Ok(current)
    }

    async fn update(&self, prior: &VmRecord, mut desired: VmRecord) -> IdcloudhostResult<VmRecord> {
        if desired.id.as_deref().is_none_or(str::is_empty) {
            desired.id = prior.id.clone();
        }
        let id = desired.require_id()?.to_string();
        if desired.disks_uuid.as_deref().is_none_or(str::is_empty) {
            desired.disks_uuid = prior.disks_uuid.clone();
        }
        if desired.location.is_none() {
            desired.location = prior.location.clone();
        }

        let changes = VmChanges::between(prior, &desired);
        if changes.desired_status {
            debug!(vm_id = %id, "desired_status changed; it is not applied remotely");
        }
        if !changes.requires_remote_calls() {
            debug!(vm_id = %id, "no update group changed");
            return Ok(desired);
        }

        let location = self.location_for(desired.location.as_deref());

        if changes.compute {
            self.client
                .send(
                    Method::PATCH,
                    location.as_deref(),
                    VM_PATH,
                    &[],
                    UpdateVmRequest::new(&id, &desired).into_body(),
                )
                .await?;
            info!(vm_id = %id, vcpu = desired.vcpu, ram = desired.ram, "VM compute updated");
        }

        if changes.disks {
            let disk_uuid = desired
                .disks_uuid
                .clone()
                .filter(|d| !d.is_empty())
                .ok_or_else(|| {
                    ValidationError::field("disks_uuid", "required to resize the disk")
                })?;
            let body = ResizeDiskRequest {
                uuid: id.clone(),
                disk_uuid,
                size_gb: desired.disks,
            }
            .into_body();
            self.client
                .send(Method::PATCH, location.as_deref(), VM_STORAGE_PATH, &[], body)
                .await?;
            info!(vm_id = %id, size_gb = desired.disks, "VM disk resized");
        }

        if let Some(change) = &changes.float_ip {
            if let Some(old) = change.old.as_deref() {
                self.unassign_float_ip(location.as_deref(), old).await?;
            }
            if let Some(new) = change.new.as_deref() {
                self.assign_float_ip(location.as_deref(), new, &id).await?;
            }
        }

        self.read(desired).await
    }

    async fn delete(&self, current: &VmRecord) -> IdcloudhostResult<()> {
        let id = current.require_id()?;
        let location = self.location_for(current.location.as_deref());
        let body = DeleteVmRequest {
            uuid: id.to_string(),
        }
        .into_body();
        self.client
            .send(Method::DELETE, location.as_deref(), VM_PATH, &[], body)
            .await?;
        info!(vm_id = %id, "VM deleted");
        Ok(())
    }

    /// Rebuilds a VM record from its id, at the provider default location.
    ///
    /// The password cannot be read back and is set to the redaction marker.
    async fn import(&self, id: &str) -> IdcloudhostResult<VmRecord> {
        if id.is_empty() {
            return Err(ValidationError::field("id", "an identifier is required to import").into());
        }
        let location = self
            .client
            .config()
            .default_location()
            .map(|l| l.as_str().to_string());

        let response = self.fetch(location.as_deref(), id).await?;

        let mut record = VmRecord {
            id: Some(id.to_string()),
            location: location.clone(),
            name: String::new(),
            billing_account_id: 0,
            username: String::new(),
            password: VmPassword::hidden(),
            os_name: String::new(),
            os_version: String::new(),
            vcpu: 0,
            ram: 0,
            disks: 0,
            disks_uuid: None,
            private_network_uuid: String::new(),
            float_ip_address: None,
            desired_status: None,
        };
        apply_response(&mut record, response, "import VM")?;
        self.refresh_references(&mut record, location, id).await?;

        info!(vm_id = %id, "VM imported");
        Ok(record)
    }
}
