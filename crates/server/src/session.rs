// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token session extraction for the mock backend.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use nml_offers_api::{ErrorBody, SupplierAgent};
use tracing::{debug, warn};

use crate::AppState;

/// The signed-in agent and the token they presented.
///
/// Rejects the request with 401 unless the `Authorization: Bearer <token>`
/// header names an open session.
pub struct SessionAgent {
    pub agent: SupplierAgent,
    pub token: String,
}

impl FromRequestParts<AppState> for SessionAgent {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let backend = state.backend.lock().await;
        let agent: SupplierAgent = backend.validate_session(token).cloned().ok_or_else(|| {
            warn!("Unknown or closed session");
            SessionError::InvalidSession
        })?;

        Ok(Self {
            agent,
            token: token.to_string(),
        })
    }
}

#[derive(Debug)]
pub enum SessionError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidSession,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: &str = match self {
            Self::MissingAuthorizationHeader | Self::InvalidSession => "Unauthenticated.",
            Self::InvalidAuthorizationHeader => {
                "Invalid Authorization header format. Expected: 'Bearer <token>'"
            }
        };
        (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message))).into_response()
    }
}
