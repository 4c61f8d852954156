//! Caller identity extraction.
//!
//! The API sits behind a gateway that authenticates requests and forwards
//! the caller as an `x-user-id` header. Handlers declare a [`UserContext`]
//! argument to require that header; a missing or malformed value rejects
//! the request with 401 before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use depot_core::error::CoreError;
use depot_core::DbId;

use crate::error::AppError;

/// Header the gateway forwards the caller's user ID in.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, as asserted by the upstream gateway.
#[derive(Debug, Clone, Copy)]
pub struct UserContext {
    pub user_id: DbId,
}

impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-user-id header".to_string(),
                ))
            })?;

        let user_id: DbId = raw.trim().parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Invalid x-user-id header: {raw}"
            )))
        })?;

        Ok(UserContext { user_id })
    }
}
