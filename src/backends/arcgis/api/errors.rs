use thiserror::Error;

/// Typed error enum for ArcGIS portal REST calls
///
/// The portal reports most request failures inside an HTTP 200 response
/// carrying an `{"error": {...}}` envelope; those surface as `Portal`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArcGisApiError {
    /// Authentication or authorization failed (401, 403)
    #[error("Authentication failed: {message} (status: {status})")]
    Authentication { status: u16, message: String },

    /// Client error (400-499, excluding auth)
    #[error("Client error: {message} (status: {status})")]
    ClientError { status: u16, message: String },

    /// Server error (500+)
    #[error("Server error: {message} (status: {status})")]
    ServerError { status: u16, message: String },

    /// Error envelope returned by the portal itself
    #[error("{message} (code: {code})")]
    Portal { code: i64, message: String },

    /// Network/connection errors (timeout, connection refused, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing errors
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    Other(String),
}

impl ArcGisApiError {
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ArcGisApiError::Network(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            ArcGisApiError::Network(format!("Connection failed: {}", error))
        } else if error.is_request() {
            ArcGisApiError::Network(format!("Request error: {}", error))
        } else if error.is_decode() {
            ArcGisApiError::ParseError(error.to_string())
        } else {
            ArcGisApiError::Other(error.to_string())
        }
    }

    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ArcGisApiError::Authentication {
                status,
                message: body,
            },
            400..=499 => ArcGisApiError::ClientError {
                status,
                message: body,
            },
            500..=599 => ArcGisApiError::ServerError {
                status,
                message: body,
            },
            _ => ArcGisApiError::Other(format!("HTTP {}: {}", status, body)),
        }
    }
}
