// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use nml_offers::CoreError;
use nml_offers_domain::DomainError;
use thiserror::Error;

/// Errors surfaced by the REST client and the offer feed.
///
/// Transport and body errors are kept as strings so the error stays
/// `Clone` and can be stored on the feed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered 401. The stored token has been cleared.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backend answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {message}")]
    Decode { message: String },

    /// A request was rejected before being sent.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// A domain rule was violated while building a request.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub(crate) fn invalid_input(field: &str, message: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Domain(err.into_domain())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
