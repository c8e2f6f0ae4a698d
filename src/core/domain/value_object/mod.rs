mod api_key;
mod base_url;
mod location;
mod vm_password;

pub use api_key::ApiKey;
pub use base_url::BaseUrl;
pub use location::Location;
pub use vm_password::{HIDDEN_PASSWORD, VmPassword};

// Re-export validation functions for internal use
pub(crate) use api_key::validate_api_key;
pub(crate) use base_url::validate_base_url;
pub(crate) use location::validate_location;
pub(crate) use vm_password::validate_vm_password;
