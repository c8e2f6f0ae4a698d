//! Internal HTTP client shared by every resource adapter.

use crate::core::domain::{
    error::{IdcloudhostError, IdcloudhostResult, ValidationError},
    model::provider_config::{ProviderConfig, ValidationConfig},
    value_object::validate_location,
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, Method, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::fmt;
use std::num::NonZeroU32;
use tracing::{debug, warn};

/// Version segment inserted after the base URL.
pub const API_VERSION: &str = "/v1";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "apikey";

/// Request payload, encoded according to the endpoint's contract.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(&'static str, String)>),
    /// `application/json`
    Json(serde_json::Value),
}

/// A fully read 2xx response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Parses the body as `T`.
    ///
    /// # Errors
    /// Returns `IdcloudhostError::Resolution` if the body is not of the expected shape.
    pub fn json<T>(&self, context: &str) -> IdcloudhostResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|e| {
            IdcloudhostError::Resolution(format!("Failed to parse {} response: {}", context, e))
        })
    }
}

/// HTTP client that authenticates every call with the configured API key and
/// targets `{base_url}/v1[/{location}]{path}`.
///
/// Calls are issued one at a time by the adapters; the client adds no retry
/// and no timeout of its own.
pub struct ApiClient {
    http_client: Client,
    config: ProviderConfig,
    validation: ValidationConfig,
    rate_limiter: Option<DefaultDirectRateLimiter>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `IdcloudhostError::Transport` if the HTTP client cannot be built and
    /// `IdcloudhostError::Validation` if the rate limit has a zero component.
    pub fn new(config: ProviderConfig, validation: ValidationConfig) -> IdcloudhostResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| IdcloudhostError::Transport(e.to_string()))?;

        let rate_limiter = match validation.rate_limit {
            Some(rl) => {
                let per_second = NonZeroU32::new(rl.requests_per_second).ok_or_else(|| {
                    ValidationError::field("requests_per_second", "must be greater than zero")
                })?;
                let burst = NonZeroU32::new(rl.burst_size).ok_or_else(|| {
                    ValidationError::field("burst_size", "must be greater than zero")
                })?;
                let quota = Quota::per_second(per_second).allow_burst(burst);
                Some(DefaultDirectRateLimiter::direct(quota))
            }
            None => None,
        };

        Ok(Self {
            http_client,
            config,
            validation,
            rate_limiter,
        })
    }

    /// Returns the provider configuration this client was built with.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns the local validation settings.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Builds the absolute URL of an endpoint.
    ///
    /// The location segment is only inserted when `location` is set.
    ///
    /// # Errors
    /// Returns `IdcloudhostError::Validation` if the location is not a valid path segment.
    pub fn endpoint(&self, location: Option<&str>, path: &str) -> IdcloudhostResult<String> {
        let base = self.config.base_url().as_str();
        let path = format!("/{}", path.trim_start_matches('/'));
        match location {
            Some(location) => {
                validate_location(location)?;
                Ok(format!("{}{}/{}{}", base, API_VERSION, location, path))
            }
            None => Ok(format!("{}{}{}", base, API_VERSION, path)),
        }
    }

    /// Performs a GET and returns the successful response.
    pub async fn get(
        &self,
        location: Option<&str>,
        path: &str,
        query: &[(&str, &str)],
    ) -> IdcloudhostResult<ApiResponse> {
        self.send(Method::GET, location, path, query, RequestBody::Empty)
            .await
    }

    /// Performs a GET and parses the body as `T`.
    pub async fn get_json<T>(
        &self,
        location: Option<&str>,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> IdcloudhostResult<T>
    where
        T: DeserializeOwned,
    {
        self.get(location, path, query).await?.json(context)
    }

    /// Core request execution method. It applies rate limiting, attaches the API
    /// key, encodes the body and classifies the response by status.
    ///
    /// # Errors
    /// - `IdcloudhostError::Transport` if no response was received or the body could not be read
    /// - `IdcloudhostError::RemoteApi` for any status outside `200..=299`, carrying the raw body
    pub async fn send(
        &self,
        method: Method,
        location: Option<&str>,
        path: &str,
        query: &[(&str, &str)],
        body: RequestBody,
    ) -> IdcloudhostResult<ApiResponse> {
        let endpoint = self.endpoint(location, path)?;
        let mut url = url::Url::parse(&endpoint)
            .map_err(|e| ValidationError::Format(format!("Invalid endpoint URL: {}", e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(method = %method, url = %url, "sending request");

        let mut req_builder = self
            .http_client
            .request(method.clone(), url.as_str())
            .header(API_KEY_HEADER, self.config.api_key().as_str());

        req_builder = match body {
            RequestBody::Empty => req_builder,
            RequestBody::Form(pairs) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
                    .finish();
                req_builder
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(encoded)
            }
            RequestBody::Json(value) => req_builder.json(&value),
        };

        let response = req_builder
            .send()
            .await
            .map_err(|e| IdcloudhostError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            IdcloudhostError::Transport(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            warn!(method = %method, url = %url, status = status.as_u16(), "request rejected");
            return Err(IdcloudhostError::RemoteApi {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ApiResponse { status, body })
    }
}
