use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Send failed: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Delivery failures may succeed on retry; the other variants will not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SendFailed(_))
    }
}
