use error_location::ErrorLocation;
use thiserror::Error;

/// Session and rendering errors with source location tracking.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The notification subsystem rejected a render.
    #[error("Notification render failed: {reason} {location}")]
    RenderFailed {
        /// Description of the render failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The notification subsystem rejected a withdrawal.
    #[error("Notification withdrawal failed: {reason} {location}")]
    WithdrawFailed {
        /// Description of the withdrawal failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`ServiceError`].
pub type Result<T> = std::result::Result<T, ServiceError>;
