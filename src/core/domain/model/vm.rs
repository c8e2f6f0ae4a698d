//! Domain models for compute instances.
//!
//! [`VmRecord`] is the desired/observed state the orchestrator hands to the
//! VM adapter. [`VmResponse`] is what `/user-resource/vm` returns.

use crate::core::domain::{
    error::{IdcloudhostError, IdcloudhostResult, ValidationError},
    model::provider_config::ValidationConfig,
    value_object::{VmPassword, validate_vm_password},
};
use serde::{Deserialize, Serialize};

/// Desired or observed state of one VM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmRecord {
    /// Provider-assigned instance identifier. Absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Region/zone override. Falls back to the provider default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub name: String,
    pub billing_account_id: i64,
    pub username: String,
    /// Write-only; never refreshed from the remote side.
    pub password: VmPassword,
    /// Immutable after creation.
    pub os_name: String,
    /// Immutable after creation.
    pub os_version: String,
    pub vcpu: u32,
    /// Memory in MB.
    pub ram: u32,
    /// Primary disk size in GB.
    pub disks: u32,
    /// Identifier of the primary disk, derived from the create response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disks_uuid: Option<String>,
    pub private_network_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_ip_address: Option<String>,
    /// Accepted and tracked, never sent to the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_status: Option<String>,
}

impl VmRecord {
    /// The floating IP, with an empty string treated as unassigned.
    pub fn float_ip(&self) -> Option<&str> {
        self.float_ip_address.as_deref().filter(|a| !a.is_empty())
    }

    /// The instance id, failing if the record was never created.
    pub(crate) fn require_id(&self) -> IdcloudhostResult<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ValidationError::field("id", "VM has no identifier yet").into())
    }

    /// Checks the fields a create request needs before anything is sent.
    pub(crate) fn validate_for_create(&self, config: &ValidationConfig) -> IdcloudhostResult<()> {
        let required = [
            ("name", &self.name),
            ("username", &self.username),
            ("os_name", &self.os_name),
            ("os_version", &self.os_version),
            ("private_network_uuid", &self.private_network_uuid),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::field(field, "value is required").into());
            }
        }
        for (field, value) in [("vcpu", self.vcpu), ("ram", self.ram), ("disks", self.disks)] {
            if value == 0 {
                return Err(ValidationError::field(field, "must be greater than zero").into());
            }
        }
        validate_vm_password(self.password.as_str(), config.password_min_score)?;
        Ok(())
    }
}

/// A VM as returned by `/user-resource/vm`.
///
/// Scalar fields are optional; the fields an operation depends on are
/// checked through [`VmResponse::require_uuid`] and [`VmResponse::primary_disk`].
/// Numeric fields accept whole-number floats (`2048.0`); any other value is
/// read as absent instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VmResponse {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "billing_account", deserialize_with = "lenient::opt_i64")]
    pub billing_account_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub os_name: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub vcpu: Option<u32>,
    /// Memory in MB.
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub memory: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub storage: Option<Vec<VmStorage>>,
}

/// A disk attached to a VM.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VmStorage {
    #[serde(default)]
    pub uuid: Option<String>,
    /// Size in GB.
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub size: Option<u32>,
}

/// Tolerant readers for the numeric fields of VM responses.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn whole_number(value: &Value) -> Option<i64> {
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    pub(super) fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(whole_number))
    }

    pub(super) fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(whole_number)
            .and_then(|n| u32::try_from(n).ok()))
    }
}

impl VmResponse {
    pub(crate) fn require_uuid(&self, context: &str) -> IdcloudhostResult<&str> {
        self.uuid
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| IdcloudhostError::missing_field("uuid", context))
    }

    /// The first entry of `storage`, which must carry a uuid.
    pub(crate) fn primary_disk(&self, context: &str) -> IdcloudhostResult<(&str, Option<u32>)> {
        let disk = self
            .storage
            .as_ref()
            .and_then(|s| s.first())
            .ok_or_else(|| IdcloudhostError::missing_field("storage", context))?;
        let uuid = disk
            .uuid
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| IdcloudhostError::missing_field("storage[0].uuid", context))?;
        Ok((uuid, disk.size))
    }
}
