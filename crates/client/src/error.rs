//! Error type for the layout-storage client.

/// Errors from the layout-storage client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Dashboard API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend answered `{"success": false}`.
    #[error("Dashboard API rejected the request: {0}")]
    Rejected(String),

    /// A successful response did not carry the expected payload.
    #[error("Dashboard API response is missing {0}")]
    MissingData(&'static str),

    /// Client configuration is invalid.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether repeating the same idempotent request might succeed.
    ///
    /// Transport failures and 5xx responses are transient; rejections and
    /// client errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(err) => !err.is_decode() && !err.is_builder(),
            Self::Api { status, .. } => *status >= 500,
            Self::Rejected(_) | Self::MissingData(_) | Self::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        let err = ClientError::Api {
            status: 503,
            body: "unavailable".into(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Dashboard API error (503): unavailable");
    }

    #[test]
    fn client_errors_and_rejections_are_not_retryable() {
        let err = ClientError::Api {
            status: 400,
            body: String::new(),
        };
        assert!(!err.is_retryable());
        assert!(!ClientError::Rejected("bad layout".into()).is_retryable());
        assert!(!ClientError::MissingData("layout id").is_retryable());
    }

    #[test]
    fn builder_errors_are_not_retryable() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = ClientError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
        assert!(!err.is_retryable());
    }
}
