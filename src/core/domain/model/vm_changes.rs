//! Field-group diff driving VM updates.

use crate::core::domain::model::vm::VmRecord;

/// Old and new floating-IP assignment of a VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatIpChange {
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Which update groups differ between the observed and the desired record.
///
/// Each group maps to one remote call (two for the floating IP when both
/// sides are set). Unchanged groups are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmChanges {
    /// `name`, `ram` or `vcpu` changed.
    pub compute: bool,
    /// `disks` changed.
    pub disks: bool,
    pub float_ip: Option<FloatIpChange>,
    /// `desired_status` changed. Tracked only; no call is issued for it.
    pub desired_status: bool,
}

impl VmChanges {
    pub fn between(prior: &VmRecord, desired: &VmRecord) -> Self {
        let compute =
            prior.name != desired.name || prior.ram != desired.ram || prior.vcpu != desired.vcpu;
        let float_ip = (prior.float_ip() != desired.float_ip()).then(|| FloatIpChange {
            old: prior.float_ip().map(str::to_string),
            new: desired.float_ip().map(str::to_string),
        });

        Self {
            compute,
            disks: prior.disks != desired.disks,
            float_ip,
            desired_status: prior.desired_status != desired.desired_status,
        }
    }

    /// True if at least one group needs a remote call.
    pub fn requires_remote_calls(&self) -> bool {
        self.compute || self.disks || self.float_ip.is_some()
    }
}
