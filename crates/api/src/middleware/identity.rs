//! Caller identity extractors.
//!
//! There is no authentication: votes are keyed by a network pseudo-identity
//! and collections by an optional `x-user-id` header.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use bitlings_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header naming the collection owner.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Longest accepted `x-user-id` value.
pub const MAX_USER_ID_LEN: usize = 128;

/// Voter pseudo-identity: the first `x-forwarded-for` hop, else the peer
/// address, else `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterIdentity(pub String);

impl FromRequestParts<AppState> for VoterIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(VoterIdentity(
            forwarded.or(peer).unwrap_or_else(|| "unknown".into()),
        ))
    }
}

/// Owner of the collection a request reads: `x-user-id`, or the configured
/// default user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorId(pub String);

impl FromRequestParts<AppState> for CollectorId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::BadRequest(format!("{USER_ID_HEADER} must be visible ASCII"))
            })?),
            None => None,
        };

        match header.map(str::trim).filter(|v| !v.is_empty()) {
            Some(id) if id.len() > MAX_USER_ID_LEN => Err(AppError::Core(
                CoreError::Validation(format!(
                    "{USER_ID_HEADER} must be at most {MAX_USER_ID_LEN} characters"
                )),
            )),
            Some(id) => Ok(CollectorId(id.to_string())),
            None => Ok(CollectorId(state.config.default_user_id.clone())),
        }
    }
}
