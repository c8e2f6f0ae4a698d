use crate::core::domain::error::ValidationError;
use std::fmt;

/// A region/zone qualifier inserted as a path segment, e.g. `jkt01`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    /// Creates a new location without validation.
    pub(crate) fn new_unchecked(location: String) -> Self {
        Self(location)
    }

    /// Returns the location as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a location segment.
pub(crate) fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.is_empty() {
        return Err(ValidationError::field("location", "Location cannot be empty"));
    }
    if location.len() > 32 {
        return Err(ValidationError::Format(
            "Location cannot exceed 32 characters".to_string(),
        ));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    if !location.chars().all(allowed) {
        return Err(ValidationError::Format(
            "Location contains invalid characters. Allowed: alphanumeric, -, _".to_string(),
        ));
    }
    Ok(())
}
