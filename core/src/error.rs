use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Faults that prevent a bridge call from being attempted at all.
///
/// These are deliberately kept apart from [`crate::models::ErrorDetail`]:
/// an `ErrorDetail` describes a request that was sent and failed, while a
/// `BridgeError` means no request was sent. Callers at the tool boundary
/// rely on this split to tell "could not even try" from "tried and failed".
///
/// # Examples
///
/// ```rust
/// use bridge_core::error::BridgeError;
///
/// let missing = BridgeError::MissingAccessToken;
/// assert!(missing.is_precondition());
///
/// let invalid = BridgeError::empty_field("projectId");
/// assert!(invalid.is_validation());
/// assert_eq!(invalid.to_string(), "Validation error: Field 'projectId' cannot be empty");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Auth resolution produced no access token
    #[error("No access token available for the resolved connection")]
    MissingAccessToken,

    /// Auth resolution produced no instance URL
    #[error("No instance URL available for the resolved connection")]
    MissingInstanceUrl,

    /// The instance URL could not be parsed as an absolute URL
    #[error("Invalid instance URL: {0}")]
    InvalidInstanceUrl(String),

    /// The auth collaborator itself failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Input rejected before any work was done
    #[error("Validation error: {0}")]
    Validation(String),
}

impl BridgeError {
    /// Create a validation error for an empty field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Check if this error is a missing or unusable connection
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BridgeError::MissingAccessToken
                | BridgeError::MissingInstanceUrl
                | BridgeError::InvalidInstanceUrl(_)
        )
    }

    /// Check if this error indicates an input problem
    pub fn is_validation(&self) -> bool {
        matches!(self, BridgeError::Validation(_))
    }

    /// Check if the auth collaborator failed
    pub fn is_auth(&self) -> bool {
        matches!(self, BridgeError::Auth(_))
    }
}
