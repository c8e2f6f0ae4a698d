//! Domain models for floating (public) IP addresses.

use serde::{Deserialize, Serialize};

/// Desired or observed state of a floating IP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpRecord {
    /// The allocated address, which is also the identifier. Absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub name: String,
    pub billing_account_id: i64,
    /// Uuid of the VM holding the address, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl FloatingIpRecord {
    pub fn new(name: impl Into<String>, billing_account_id: i64) -> Self {
        Self {
            address: None,
            location: None,
            name: name.into(),
            billing_account_id,
            assigned_to: None,
        }
    }
}

/// A floating IP as returned by `/network/ip_addresses/{address}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FloatingIpResponse {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub billing_account_id: Option<i64>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}
