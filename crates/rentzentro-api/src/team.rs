//! Handlers for team-grant lifecycle endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/team/members` | All grants under the scope, any status |
//! | `POST` | `/team/members` | Body: `{"email":"...","role":"manager"}`; 201 + pending grant |
//! | `POST` | `/team/members/:id/revoke` | Terminal; also cancels pending invites |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rentzentro_core::{
  notify::NotificationDispatcher,
  store::MessagingStore,
  team::{TeamMember, TeamRole},
};
use rentzentro_service::MessagingService;
use serde::Deserialize;

use crate::{auth::AuthedCaller, error::ApiError};

/// `GET /team/members`
pub async fn roster<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
) -> Result<Json<Vec<TeamMember>>, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let scope = service.resolve_caller(&caller).await?;
  let roster = service.team_roster(&scope).await?;
  Ok(Json(roster))
}

#[derive(Debug, Deserialize)]
pub struct InviteBody {
  pub email: String,
  pub role:  TeamRole,
}

/// `POST /team/members`
pub async fn invite<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
  Json(body): Json<InviteBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let scope = service.resolve_caller(&caller).await?;
  let member = service.invite(&scope, &body.email, body.role).await?;
  Ok((StatusCode::CREATED, Json(member)))
}

/// `POST /team/members/:id/revoke`
pub async fn revoke<S, N>(
  State(service): State<MessagingService<S, N>>,
  AuthedCaller(caller): AuthedCaller,
  Path(id): Path<i64>,
) -> Result<Json<TeamMember>, ApiError>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  let scope = service.resolve_caller(&caller).await?;
  let member = service.revoke(&scope, id).await?;
  Ok(Json(member))
}
