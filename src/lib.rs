mod core;
mod resource;


pub use crate::core::domain::error::{IdcloudhostError, IdcloudhostResult, ValidationError};
pub use crate::core::domain::model::{
    floating_ip::FloatingIpRecord,
    private_network::PrivateNetworkRecord,
    provider_config::{DEFAULT_BASE_URL, ProviderConfig, RateLimitConfig, ValidationConfig},
    resource_kind::ResourceKind,
    storage_bucket::StorageBucketRecord,
    vm::VmRecord,
};
pub use crate::core::domain::value_object::{
    ApiKey, BaseUrl, HIDDEN_PASSWORD, Location, VmPassword,
};
pub use crate::resource::application::service::{
    floating_ip_service::FloatingIpService,
    private_network_service::PrivateNetworkService,
    reference_resolver::{ListingResolver, ReferenceResolver},
    resource_adapter::ResourceAdapter,
    storage_bucket_service::StorageBucketService,
    vm_service::VmService,
};

use crate::core::{
    domain::value_object::{validate_api_key, validate_base_url, validate_location},
    infrastructure::api_client::ApiClient,
};
use std::sync::Arc;

/// A client for provisioning resources through the IDCloudHost API
///
/// The client holds the provider configuration and hands out one adapter per
/// resource type. Every adapter implements [`ResourceAdapter`], the
/// create/read/update/delete/import contract an orchestrator drives.
///
/// # Examples
///
/// ```no_run
/// use idcloudhost_provisioner::{IdcloudhostClient, IdcloudhostResult, ResourceAdapter};
///
/// #[tokio::main]
/// async fn main() -> IdcloudhostResult<()> {
///     let client = IdcloudhostClient::builder()
///         .api_key("my-api-key")?
///         .default_location("jkt01")?
///         .build()?;
///
///     let vm = client.vms().import("7b1f6f4e-vm").await?;
///     println!("{} has {} vCPU", vm.name, vm.vcpu);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IdcloudhostClient {
    api_client: Arc<ApiClient>,
}

/// Builder for IdcloudhostClient configuration
#[derive(Debug, Default)]
pub struct IdcloudhostClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    default_location: Option<String>,
    validation: ValidationConfig,
}

impl IdcloudhostClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> IdcloudhostResult<Self> {
        let api_key = api_key.into();
        validate_api_key(&api_key)?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> IdcloudhostResult<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        self.base_url = Some(base_url);
        Ok(self)
    }

    /// Location used by resources that do not set their own.
    pub fn default_location(mut self, location: impl Into<String>) -> IdcloudhostResult<Self> {
        let location = location.into();
        validate_location(&location)?;
        self.default_location = Some(location);
        Ok(self)
    }

    /// Rejects VM passwords below this zxcvbn score before they are sent.
    pub fn password_min_score(mut self, score: zxcvbn::Score) -> Self {
        self.validation.password_min_score = Some(score);
        self
    }

    /// Throttles outgoing requests.
    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.validation.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    /// Returns `IdcloudhostError::Validation` if the API key is missing or the
    /// rate limit has a zero component.
    pub fn build(self) -> IdcloudhostResult<IdcloudhostClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| ValidationError::field("api_key", "API key is required"))?;
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let config = ProviderConfig::parse(&api_key, base_url, self.default_location.as_deref())?;
        IdcloudhostClient::with_config(config, self.validation)
    }
}

impl IdcloudhostClient {
    /// Creates a new builder for IdcloudhostClient configuration
    pub fn builder() -> IdcloudhostClientBuilder {
        IdcloudhostClientBuilder::default()
    }

    /// Creates a client from an already validated configuration.
    pub fn with_config(
        config: ProviderConfig,
        validation: ValidationConfig,
    ) -> IdcloudhostResult<Self> {
        Ok(Self {
            api_client: Arc::new(ApiClient::new(config, validation)?),
        })
    }

    /// Creates a client from `IDCLOUDHOST_*` environment variables.
    ///
    /// See [`ProviderConfig::from_env`].
    pub fn from_env() -> IdcloudhostResult<Self> {
        Self::with_config(ProviderConfig::from_env()?, ValidationConfig::default())
    }

    pub fn config(&self) -> &ProviderConfig {
        self.api_client.config()
    }

    /// VM adapter, resolving references through the listing endpoints.
    pub fn vms(&self) -> VmService {
        VmService::new(Arc::clone(&self.api_client))
    }

    /// VM adapter with a caller-supplied reference resolver.
    pub fn vms_with_resolver<R: ReferenceResolver>(&self, resolver: R) -> VmService<R> {
        VmService::with_resolver(Arc::clone(&self.api_client), resolver)
    }

    pub fn private_networks(&self) -> PrivateNetworkService {
        PrivateNetworkService::new(Arc::clone(&self.api_client))
    }

    pub fn floating_ips(&self) -> FloatingIpService {
        FloatingIpService::new(Arc::clone(&self.api_client))
    }

    pub fn storage_buckets(&self) -> StorageBucketService {
        StorageBucketService::new(Arc::clone(&self.api_client))
    }

    /// The listing-backed resolver the VM adapter uses by default.
    pub fn resolver(&self) -> ListingResolver {
        ListingResolver::new(Arc::clone(&self.api_client))
    }
}
