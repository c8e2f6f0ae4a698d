//! Payloads sent to the VM endpoints.
//!
//! The VM collection and disk endpoints take form bodies; the floating-IP
//! assign endpoint takes JSON.

use crate::core::{domain::model::vm::VmRecord, infrastructure::api_client::RequestBody};

/// Form body of `POST /user-resource/vm`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVmRequest {
    pub name: String,
    pub billing_account_id: i64,
    pub username: String,
    pub password: String,
    pub network_uuid: String,
    pub os_name: String,
    pub os_version: String,
    pub vcpu: u32,
    pub ram: u32,
    pub disks: u32,
}

impl From<&VmRecord> for CreateVmRequest {
    fn from(vm: &VmRecord) -> Self {
        Self {
            name: vm.name.clone(),
            billing_account_id: vm.billing_account_id,
            username: vm.username.clone(),
            password: vm.password.as_str().to_string(),
            network_uuid: vm.private_network_uuid.clone(),
            os_name: vm.os_name.clone(),
            os_version: vm.os_version.clone(),
            vcpu: vm.vcpu,
            ram: vm.ram,
            disks: vm.disks,
        }
    }
}

impl CreateVmRequest {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Form(vec![
            ("name", self.name),
            ("billing_account_id", self.billing_account_id.to_string()),
            ("username", self.username),
            ("password", self.password),
            ("network_uuid", self.network_uuid),
            ("os_name", self.os_name),
            ("os_version", self.os_version),
            ("vcpu", self.vcpu.to_string()),
            ("ram", self.ram.to_string()),
            ("disks", self.disks.to_string()),
            // Public addressing goes through floating IPs only.
            ("reserve_public_ip", "false".to_string()),
        ])
    }
}

/// Form body of `PATCH /user-resource/vm`.
///
/// The endpoint has no partial update: name, ram and vcpu travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateVmRequest {
    pub uuid: String,
    pub name: String,
    pub ram: u32,
    pub vcpu: u32,
}

impl UpdateVmRequest {
    pub fn new(uuid: &str, vm: &VmRecord) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: vm.name.clone(),
            ram: vm.ram,
            vcpu: vm.vcpu,
        }
    }

    pub fn into_body(self) -> RequestBody {
        RequestBody::Form(vec![
            ("uuid", self.uuid),
            ("name", self.name),
            ("ram", self.ram.to_string()),
            ("vcpu", self.vcpu.to_string()),
        ])
    }
}

/// Form body of `PATCH /user-resource/vm/storage`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDiskRequest {
    pub uuid: String,
    pub disk_uuid: String,
    pub size_gb: u32,
}

impl ResizeDiskRequest {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Form(vec![
            ("uuid", self.uuid),
            ("disk_uuid", self.disk_uuid),
            ("size_gb", self.size_gb.to_string()),
        ])
    }
}

/// Form body of `DELETE /user-resource/vm`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteVmRequest {
    pub uuid: String,
}

impl DeleteVmRequest {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Form(vec![("uuid", self.uuid)])
    }
}

/// JSON body of `POST /network/ip_addresses/{address}/assign`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignFloatIpRequest {
    pub vm_uuid: String,
}

impl AssignFloatIpRequest {
    pub fn into_body(self) -> RequestBody {
        RequestBody::Json(serde_json::json!({ "vm_uuid": self.vm_uuid }))
    }
}
