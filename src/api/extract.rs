//! Request extractors for the HTTP boundary.

use super::error::ApiError;
use crate::identity::domain::UserId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header carrying the caller's identity on authenticated routes.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The authenticated caller, taken from the `X-Actor-Id` header.
///
/// The header value is an opaque id; whether it names a real, active user
/// is the service layer's decision.
#[derive(Debug, Clone)]
pub struct ActorId(pub UserId);

impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| UserId::new(value).ok())
            .map(ActorId)
            .ok_or_else(|| ApiError::bad_request("Missing X-Actor-Id header"))
    }
}
