use crate::core::domain::model::vm::VmRecord;
use thiserror::Error;

/// The main error type for IDCloudHost provisioning operations.
///
/// Every lifecycle call returns the first failure it meets; nothing is
/// retried. The variants separate transport failures, remote rejections
/// and responses that succeeded but did not carry what was expected.
#[derive(Error, Debug)]
pub enum IdcloudhostError {
    /// The request never produced an HTTP response (connection, DNS, TLS)
    ///
    /// # Fields
    /// * `0` - A description of the transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a status outside `200..=299`
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `body` - The raw response body, used verbatim as the diagnostic
    #[error("Remote API error ({status}): {body}")]
    RemoteApi { status: u16, body: String },

    /// A successful response lacked a field the operation depends on
    ///
    /// # Fields
    /// * `field` - The missing field
    /// * `context` - The call whose response was inspected
    #[error("Missing field '{field}' in {context} response")]
    MissingField { field: String, context: String },

    /// A successful response could not be read as the expected shape
    ///
    /// # Fields
    /// * `0` - A description of the shape mismatch
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Input or configuration rejected before any request was sent
    ///
    /// # Fields
    /// * `source` - The underlying validation error
    #[error("Validation error: {source}")]
    Validation { source: ValidationError },

    /// The VM exists remotely but a step after its creation failed
    ///
    /// # Fields
    /// * `record` - The record with the assigned `id` and `disks_uuid`
    /// * `source` - The failure of the later step
    #[error("VM created but not completed: {source}")]
    PartiallyCreated {
        record: Box<VmRecord>,
        source: Box<IdcloudhostError>,
    },
}

impl IdcloudhostError {
    pub(crate) fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        IdcloudhostError::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Returns the HTTP status for remote rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            IdcloudhostError::RemoteApi { status, .. } => Some(*status),
            IdcloudhostError::PartiallyCreated { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The record of a VM that was created before the operation failed.
    ///
    /// Callers must keep it: the VM exists and holds its identifier.
    pub fn created_record(&self) -> Option<&VmRecord> {
        match self {
            IdcloudhostError::PartiallyCreated { record, .. } => Some(&**record),
            _ => None,
        }
    }
}

impl From<ValidationError> for IdcloudhostError {
    fn from(error: ValidationError) -> Self {
        IdcloudhostError::Validation { source: error }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    pub(crate) fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::Field {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Type alias for Results that may fail with an IdcloudhostError
pub type IdcloudhostResult<T> = Result<T, IdcloudhostError>;
