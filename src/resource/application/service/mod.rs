pub mod floating_ip_service;
pub mod private_network_service;
pub mod reference_resolver;
pub mod resource_adapter;
pub mod storage_bucket_service;
pub mod vm_service;
