use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use zxcvbn::zxcvbn;

/// Marker stored in place of a VM password that cannot be read back.
pub const HIDDEN_PASSWORD: &str = "<Hidden>";

/// The login password of a VM.
///
/// Write-only on the remote side: it is sent at creation and never returned,
/// so imported records carry [`HIDDEN_PASSWORD`] instead.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VmPassword(String);

impl VmPassword {
    /// Creates a new password without validation.
    pub fn new_unchecked(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// The redaction marker used when the real password is unknown.
    pub fn hidden() -> Self {
        Self(HIDDEN_PASSWORD.to_string())
    }

    /// Returns true if this is the redaction marker.
    pub fn is_hidden(&self) -> bool {
        self.0 == HIDDEN_PASSWORD
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VmPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VmPassword(<redacted>)")
    }
}

/// Validates a VM password according to the configuration.
pub(crate) fn validate_vm_password(
    password: &str,
    min_score: Option<zxcvbn::Score>,
) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::field("password", "Password cannot be empty"));
    }
    if password == HIDDEN_PASSWORD {
        return Err(ValidationError::ConstraintViolation(
            "The redaction marker cannot be used as a password".to_string(),
        ));
    }
    if password.len() < 8 {
        return Err(ValidationError::Format(
            "Password must be at least 8 characters long".to_string(),
        ));
    }
    if password.len() > 128 {
        return Err(ValidationError::Format(
            "Password cannot exceed 128 characters".to_string(),
        ));
    }
    if let Some(min_score) = min_score {
        let entropy = zxcvbn(password, &[]);
        if entropy.score() < min_score {
            return Err(ValidationError::ConstraintViolation(
                "Password is too weak (increase complexity)".to_string(),
            ));
        }
    }
    Ok(())
}
