//! Caller extraction from pre-authenticated identity headers.
//!
//! The original application delegated session handling to a hosted auth
//! provider; this surface keeps that split. A trusted front layer
//! verifies the session and forwards the stable identity token and email
//! in `x-rz-identity` / `x-rz-email`. Requests without both headers are
//! rejected before any handler runs.

use axum::http::request::Parts;
use rentzentro_core::identity::Caller;

use crate::error::ApiError;

pub const IDENTITY_HEADER: &str = "x-rz-identity";
pub const EMAIL_HEADER: &str = "x-rz-email";

/// The authenticated caller, extracted from request headers.
#[derive(Debug, Clone)]
pub struct AuthedCaller(pub Caller);

fn header_value(parts: &Parts, name: &'static str) -> Result<String, ApiError> {
  parts
    .headers
    .get(name)
    .and_then(|v| v.to_str().ok())
    .filter(|v| !v.is_empty())
    .map(str::to_owned)
    .ok_or_else(|| ApiError::Unauthorized(format!("missing {name} header")))
}

impl<S> axum::extract::FromRequestParts<S> for AuthedCaller
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let identity = header_value(parts, IDENTITY_HEADER)?;
    let email = header_value(parts, EMAIL_HEADER)?;
    Ok(Self(Caller::new(identity, email)))
  }
}
