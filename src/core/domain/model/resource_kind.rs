use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource types an adapter can manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Vm,
    PrivateNetwork,
    FloatingIp,
    StorageBucket,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Vm => write!(f, "vm"),
            ResourceKind::PrivateNetwork => write!(f, "private-network"),
            ResourceKind::FloatingIp => write!(f, "floating-ip"),
            ResourceKind::StorageBucket => write!(f, "storage-bucket"),
        }
    }
}
