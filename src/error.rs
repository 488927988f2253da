//! Error types for the memos client.

use thiserror::Error;

/// Memos client error
#[derive(Debug, Error)]
pub enum MemosError {
    /// Configuration is malformed (bad URL, bad token)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protobuf decoding failed
    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Endpoint or entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// gRPC call finished with a non-OK status
    #[error("gRPC error {code}: {message}")]
    Grpc { code: u32, message: String },

    /// Response had an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl MemosError {
    /// True when the failure means the capability is absent on this server
    /// generation (404-class response, unimplemented service) rather than
    /// a broken transport.
    pub fn is_absence(&self) -> bool {
        match self {
            MemosError::NotFound(_) => true,
            MemosError::Server { status: 404, .. } => true,
            // NOT_FOUND (5) and UNIMPLEMENTED (12)
            MemosError::Grpc { code: 5, .. } | MemosError::Grpc { code: 12, .. } => true,
            _ => false,
        }
    }
}

/// Result type for memos client operations
pub type Result<T> = std::result::Result<T, MemosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absence_covers_not_found_class() {
        assert!(MemosError::NotFound("x".into()).is_absence());
        assert!(MemosError::Server { status: 404, message: String::new() }.is_absence());
        assert!(MemosError::Grpc { code: 5, message: String::new() }.is_absence());
        assert!(MemosError::Grpc { code: 12, message: String::new() }.is_absence());
    }

    #[test]
    fn absence_excludes_transport_failures() {
        assert!(!MemosError::Server { status: 500, message: String::new() }.is_absence());
        assert!(!MemosError::Grpc { code: 13, message: String::new() }.is_absence());
        assert!(!MemosError::InvalidResponse("bad".into()).is_absence());
    }
}
