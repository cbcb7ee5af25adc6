//! Conversation directory — the tenants reachable from a scope, each with
//! an owner-perspective unread tally.

use std::collections::HashMap;

use rentzentro_core::{
  Error, Result, identity::OwnerScope, notify::NotificationDispatcher,
  store::MessagingStore, tenant::Tenant,
};
use serde::Serialize;

use crate::MessagingService;

/// One entry in the conversation list.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
  pub tenant:       Tenant,
  /// Tenant-authored messages the owner side has not yet opened.
  pub unread_count: u32,
}

impl<S, N> MessagingService<S, N>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  /// List every conversation in scope. Deterministic ordering:
  /// unread-bearing conversations first, then tenant creation order.
  pub async fn list_conversations(
    &self,
    scope: &OwnerScope,
  ) -> Result<Vec<ConversationSummary>> {
    let tenants = self
      .store
      .list_tenants(&scope.owner_identity)
      .await
      .map_err(Error::store)?;

    let counts: HashMap<i64, u32> = self
      .store
      .unread_counts(&scope.owner_identity)
      .await
      .map_err(Error::store)?
      .into_iter()
      .map(|c| (c.tenant_id, c.count))
      .collect();

    let mut summaries: Vec<ConversationSummary> = tenants
      .into_iter()
      .map(|tenant| ConversationSummary {
        unread_count: counts.get(&tenant.id).copied().unwrap_or(0),
        tenant,
      })
      .collect();

    summaries.sort_by_key(|s| (s.unread_count == 0, s.tenant.id));
    Ok(summaries)
  }
}
