use crate::core::domain::error::ValidationError;
use std::fmt;

/// A static API key, sent as the `apikey` header on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new API key without validation.
    pub(crate) fn new_unchecked(key: String) -> Self {
        Self(key)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Validates an API key.
///
/// The key is placed verbatim in a header, so it must be visible ASCII.
pub(crate) fn validate_api_key(key: &str) -> Result<(), ValidationError> {
    if key.trim().is_empty() {
        return Err(ValidationError::field("api_key", "API key cannot be empty"));
    }
    if !key.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ValidationError::Format(
            "API key may only contain visible ASCII characters".to_string(),
        ));
    }
    Ok(())
}
