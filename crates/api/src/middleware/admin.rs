//! Shared-secret guard for administrative routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bitlings_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Requires `x-admin-token` to match the configured `ADMIN_TOKEN`.
///
/// Rejects with 401 when the header is missing and 403 when it does not
/// match or when no admin token is configured.
///
/// ```ignore
/// async fn admin_only(_admin: RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_token.as_deref() else {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin endpoints are disabled".into(),
            )));
        };

        let provided = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {ADMIN_TOKEN_HEADER} header"
                )))
            })?;

        if provided != expected {
            return Err(AppError::Core(CoreError::Forbidden(
                "Invalid admin token".into(),
            )));
        }
        Ok(RequireAdmin)
    }
}
