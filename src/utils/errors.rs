use thiserror::Error;

/// Failures reported by the portal collaborators.
///
/// Every variant is transient and non-fatal: the caller may simply invoke the
/// operation again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// Session creation failed (authentication or network setup)
    #[error("Connection error: {0}")]
    Connection(String),

    /// A catalog query was malformed or the portal failed to answer it
    #[error("Query error: {0}")]
    Query(String),

    /// The selected item could not be resolved into a web map
    #[error("Load error: {0}")]
    Load(String),
}

impl PortalError {
    /// The failure's message text, as shown to the user.
    pub fn message(&self) -> &str {
        match self {
            PortalError::Connection(message)
            | PortalError::Query(message)
            | PortalError::Load(message) => message,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PortalError::Connection(_) => "connection",
            PortalError::Query(_) => "query",
            PortalError::Load(_) => "load",
        }
    }
}
