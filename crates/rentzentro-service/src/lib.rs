//! The in-process messaging and team-access service.
//!
//! Collapses the resolver/messaging logic that the original application
//! re-implemented per page into one service with a single contract:
//! resolve the caller to an [`OwnerScope`](rentzentro_core::identity::OwnerScope),
//! then query and mutate conversations under that scope.
//!
//! Generic over any [`MessagingStore`] backend and any
//! [`NotificationDispatcher`] sink; transport layers (`rentzentro-api`)
//! depend on this crate, not on a concrete backend.

mod directory;
mod messages;
mod resolver;
mod team;

pub mod notify;

use std::sync::Arc;

use rentzentro_core::{notify::NotificationDispatcher, store::MessagingStore};

pub use directory::ConversationSummary;

#[cfg(test)]
mod tests;

/// The messaging core. Cloning is cheap; both backends are `Arc`-held.
pub struct MessagingService<S, N> {
  store:      Arc<S>,
  dispatcher: Arc<N>,
}

impl<S, N> Clone for MessagingService<S, N> {
  fn clone(&self) -> Self {
    Self {
      store:      Arc::clone(&self.store),
      dispatcher: Arc::clone(&self.dispatcher),
    }
  }
}

impl<S, N> MessagingService<S, N>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  pub fn new(store: Arc<S>, dispatcher: Arc<N>) -> Self {
    Self { store, dispatcher }
  }
}
