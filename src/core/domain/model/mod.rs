pub mod floating_ip;
pub mod private_network;
pub mod provider_config;
pub mod resource_kind;
pub mod storage_bucket;
pub mod vm;
pub mod vm_changes;
