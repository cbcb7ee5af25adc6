//! Handlers for the tenant-portal endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/portal/messages` | Opens (and read-sweeps) the caller's conversation |
//! | `POST` | `/portal/messages` | Body: `{"body":"..."}`; 201 + stored message |
//! | `GET`  | `/portal/unread` | Landlord/team messages not yet opened |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use rentzentro_core::{
  message::Message, notify::NotificationDispatcher, store::MessagingStore,
};
use rentzentro_service::MessagingService;
use serde::Deserialize;
use serde_json::json;

use crate::{auth::AuthedCaller, error::ApiError};

/// `GET /portal/messages`
pub async fn conversation<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
) -> Result<Json<Vec<Message>>, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let tenant = service.resolve_tenant(&caller).await?;
  let messages = service.tenant_conversation(&tenant).await?;
  Ok(Json(messages))
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
  pub body: String,
}

/// `POST /portal/messages`
pub async fn send<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
  Json(body): Json<SendBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let tenant = service.resolve_tenant(&caller).await?;
  let message = service.tenant_send_message(&tenant, &body.body).await?;
  Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /portal/unread`
pub async fn unread<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
) -> Result<impl IntoResponse, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let tenant = service.resolve_tenant(&caller).await?;
  let count = service.tenant_unread_count(&tenant).await?;
  Ok(Json(json!({ "unread": count })))
}
