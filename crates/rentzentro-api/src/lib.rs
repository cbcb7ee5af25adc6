//! JSON HTTP surface for the RentZentro messaging core.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rentzentro_core::store::MessagingStore`]. Session issuance lives
//! upstream: the caller's identity arrives pre-authenticated in the
//! `x-rz-identity` / `x-rz-email` headers (see [`auth`]). TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rentzentro_api::api_router(service.clone()))
//! ```

pub mod auth;
pub mod conversations;
pub mod error;
pub mod portal;
pub mod team;

use axum::{
  Router,
  routing::{get, post},
};
use rentzentro_core::{notify::NotificationDispatcher, store::MessagingStore};
use rentzentro_service::MessagingService;
use serde::Deserialize;

pub use error::ApiError;

/// Runtime configuration for the server binary, loaded from `config.toml`
/// and `RENTZENTRO_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Path to the SQLite database file; `~` is expanded by the binary.
  pub store_path: std::path::PathBuf,
}

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S, N>(service: MessagingService<S, N>) -> Router<()>
where
  S: MessagingStore + 'static,
  N: NotificationDispatcher + 'static,
{
  Router::new()
    // Owner/team side
    .route("/conversations", get(conversations::list::<S, N>))
    .route(
      "/conversations/{tenant_id}/messages",
      get(conversations::open::<S, N>).post(conversations::send::<S, N>),
    )
    // Team lifecycle
    .route(
      "/team/members",
      get(team::roster::<S, N>).post(team::invite::<S, N>),
    )
    .route("/team/members/{id}/revoke", post(team::revoke::<S, N>))
    // Tenant portal
    .route(
      "/portal/messages",
      get(portal::conversation::<S, N>).post(portal::send::<S, N>),
    )
    .route("/portal/unread", get(portal::unread::<S, N>))
    .with_state(service)
}
