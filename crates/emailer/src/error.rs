//! Error types for the digest mailer.

use thiserror::Error;

/// Errors that can occur when rendering or sending a digest.
#[derive(Debug, Error)]
pub enum EmailerError {
    /// Content type selector is neither HTML nor plain text
    #[error("invalid content type: {0:?}")]
    InvalidContentType(String),

    /// Sender or recipient address could not be parsed
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },

    /// Message assembly failed
    #[error("failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),

    /// Connect, authentication or transmission failed
    #[error(transparent)]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl EmailerError {
    /// Whether the failure happened on the wire rather than before connecting.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
