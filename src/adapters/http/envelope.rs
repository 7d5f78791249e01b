//! Response envelope of the admin API.
//!
//! Every endpoint answers `{ success, data?, error?, message? }`. The
//! envelope is decoded once into a tagged `ApiResponse` so callers match on
//! outcome instead of checking flags.

use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

/// Decoded API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Success {
        data: Option<T>,
        message: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: Envelope<T> = serde_json::from_slice(body)?;
        Ok(envelope.into())
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    /// Message attached to a rejection, if this is one.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ApiResponse::Failure { message } => Some(message),
            ApiResponse::Success { .. } => None,
        }
    }
}

impl<T> From<Envelope<T>> for ApiResponse<T> {
    fn from(envelope: Envelope<T>) -> Self {
        if envelope.success {
            ApiResponse::Success {
                data: envelope.data,
                message: envelope.message,
            }
        } else {
            ApiResponse::Failure {
                message: envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| "request rejected".to_string()),
            }
        }
    }
}
