//! Domain models for private networks.

use serde::{Deserialize, Serialize};

/// Desired or observed state of a private network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateNetworkRecord {
    /// Provider-assigned network uuid. Absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub name: String,
    /// VMs attached to the network. Owned by the network, read-only here.
    #[serde(default)]
    pub vm_uuids: Vec<String>,
}

impl PrivateNetworkRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: None,
            location: None,
            name: name.into(),
            vm_uuids: Vec::new(),
        }
    }
}

/// A private network as returned by `/network/network/{uuid}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrivateNetworkResponse {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vm_uuids: Option<Vec<String>>,
}
