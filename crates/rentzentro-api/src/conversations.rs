//! Handlers for the owner/team conversation endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/conversations` | Tenants in scope with unread counts |
//! | `GET`  | `/conversations/:tenant_id/messages` | Opens (and read-sweeps) one conversation |
//! | `POST` | `/conversations/:tenant_id/messages` | Body: `{"body":"..."}`; returns 201 + stored message |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rentzentro_core::{
  message::Message, notify::NotificationDispatcher, store::MessagingStore,
};
use rentzentro_service::{ConversationSummary, MessagingService};
use serde::Deserialize;

use crate::{auth::AuthedCaller, error::ApiError};

/// `GET /conversations`
pub async fn list<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
) -> Result<Json<Vec<ConversationSummary>>, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let scope = service.resolve_caller(&caller).await?;
  let summaries = service.list_conversations(&scope).await?;
  Ok(Json(summaries))
}

/// `GET /conversations/:tenant_id/messages`
pub async fn open<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
  Path(tenant_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let scope = service.resolve_caller(&caller).await?;
  let messages = service.open_conversation(&scope, tenant_id).await?;
  Ok(Json(messages))
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
  pub body: String,
}

/// `POST /conversations/:tenant_id/messages`
pub async fn send<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
  Path(tenant_id): Path<i64>,
  Json(body): Json<SendBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let scope = service.resolve_caller(&caller).await?;
  let message = service.send_message(&scope, tenant_id, &body.body).await?;
  Ok((StatusCode::CREATED, Json(message)))
}
