//! Notification error types

use thiserror::Error;

/// Errors raised while surfacing a notification
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The sink refused or failed to display the notification
    #[error("Sink error: {0}")]
    Sink(String),

    /// The receiving side of a channel sink has gone away
    #[error("Notification channel closed")]
    ChannelClosed,

    /// Serialization failed while writing the notification out
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for notification operations
pub type NotificationResult<T> = Result<T, NotificationError>;
