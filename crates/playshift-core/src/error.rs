//! Error taxonomy shared by the client adapter and the view controllers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing user input (empty required field, bad platform tag).
    #[error("{0}")]
    InvalidInput(String),

    /// A playlist URL without a recognisable `playlist/<id>` segment.
    #[error("Invalid playlist URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connect, TLS, body read).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend answered 2xx with a body we could not decode.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// True for the NetworkFailure family: anything that went wrong on the wire.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Status { .. } | Self::Decode(_)
        )
    }

    /// True for errors reported inline next to an input control.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::InvalidUrl("x".into()).is_input());
        assert!(!Error::InvalidUrl("x".into()).is_network());
        let status = Error::Status {
            status: 500,
            message: "boom".into(),
        };
        assert!(status.is_network());
        assert_eq!(status.to_string(), "HTTP 500: boom");
    }
}
