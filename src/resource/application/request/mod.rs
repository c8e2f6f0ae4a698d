pub mod floating_ip_request;
pub mod private_network_request;
pub mod storage_bucket_request;
pub mod vm_request;
