use crate::core::domain::error::ValidationError;

/// Root URL of the management API, without the version segment.
///
/// Stored without a trailing slash so path suffixes can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new base URL without validation.
    pub(crate) fn new_unchecked(url: String) -> Self {
        Self(url.trim_end_matches('/').to_string())
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a base URL.
pub(crate) fn validate_base_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::field("base_url", "URL cannot be empty"));
    }
    if url.len() > 2083 {
        return Err(ValidationError::Format(
            "URL exceeds maximum length of 2083 characters".to_string(),
        ));
    }
    let parsed = url::Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::ConstraintViolation(
            "Invalid scheme. Must be one of: https, http".to_string(),
        ));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::ConstraintViolation(
            "Base URL cannot carry a query or fragment".to_string(),
        ));
    }
    Ok(())
}
