//! Provider-wide configuration shared by every resource adapter.
//!
//! Built once (through [`crate::IdcloudhostClient::builder`] or
//! [`ProviderConfig::from_env`]) and never mutated afterwards.

use crate::core::domain::{
    error::{IdcloudhostResult, ValidationError},
    value_object::{
        ApiKey, BaseUrl, Location, validate_api_key, validate_base_url, validate_location,
    },
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.idcloudhost.com";

/// API credentials and endpoint selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    default_location: Option<Location>,
}

impl ProviderConfig {
    pub fn new(api_key: ApiKey, base_url: BaseUrl, default_location: Option<Location>) -> Self {
        Self {
            api_key,
            base_url,
            default_location,
        }
    }

    /// Validates raw values and builds a configuration.
    ///
    /// An empty `default_location` is treated as "no default".
    pub fn parse(
        api_key: &str,
        base_url: &str,
        default_location: Option<&str>,
    ) -> IdcloudhostResult<Self> {
        validate_api_key(api_key)?;
        validate_base_url(base_url)?;
        let default_location = match default_location.filter(|l| !l.is_empty()) {
            Some(location) => {
                validate_location(location)?;
                Some(Location::new_unchecked(location.to_string()))
            }
            None => None,
        };
        Ok(Self::new(
            ApiKey::new_unchecked(api_key.to_string()),
            BaseUrl::new_unchecked(base_url.to_string()),
            default_location,
        ))
    }

    /// Loads the configuration from the environment (and `.env`, if present):
    ///
    /// - `IDCLOUDHOST_API_KEY` (required)
    /// - `IDCLOUDHOST_BASE_URL` (default: [`DEFAULT_BASE_URL`])
    /// - `IDCLOUDHOST_LOCATION` (optional)
    pub fn from_env() -> IdcloudhostResult<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("IDCLOUDHOST_API_KEY").map_err(|_| {
            ValidationError::field("IDCLOUDHOST_API_KEY", "environment variable not set")
        })?;
        let base_url =
            std::env::var("IDCLOUDHOST_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let location = std::env::var("IDCLOUDHOST_LOCATION").ok();

        Self::parse(&api_key, &base_url, location.as_deref())
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn default_location(&self) -> Option<&Location> {
        self.default_location.as_ref()
    }

    /// Picks the location a call should target.
    ///
    /// A non-empty location on the resource wins over the provider default.
    pub fn resolve_location<'a>(&'a self, own: Option<&'a str>) -> Option<&'a str> {
        own.filter(|l| !l.is_empty())
            .or_else(|| self.default_location.as_ref().map(Location::as_str))
    }
}

/// Client-side throttling of outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

/// Local checks applied before requests are sent.
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Minimum zxcvbn score required for VM passwords. `None` disables the check.
    pub password_min_score: Option<zxcvbn::Score>,
    /// Optional request throttling. `None` sends requests as fast as they are issued.
    pub rate_limit: Option<RateLimitConfig>,
}
