use thiserror::Error;

/// Failure surfaced by the API client.
///
/// Any non-success HTTP status or transport failure rejects the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("response decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Missing/rejected-credential responses. The session monitor owns
    /// recovery for these; page error paths treat them like any other
    /// failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}
